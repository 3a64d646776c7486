// src/jwt/jwt_helper.rs
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::Result as JwtResult, DecodingKey, EncodingKey, Header, Validation,
};

use crate::jwt::claims::Claims;

/// Signs and verifies the bearer tokens handed out by `GET /jwt`.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, Duration::days(1))
    }

    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        TokenService {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn create_token(&self, email: &str) -> JwtResult<String> {
        let now = Utc::now();
        let claims = Claims {
            email: email.to_string(),
            iat: now.timestamp().max(0) as usize,
            exp: (now + self.ttl).timestamp().max(0) as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Checks signature and expiry, returning the embedded claims.
    pub fn verify_token(&self, token: &str) -> JwtResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default()).map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_carry_the_email_for_one_day() {
        let tokens = TokenService::new(b"secret");
        let token = tokens.create_token("s@x.com").unwrap();
        let claims = tokens.verify_token(&token).unwrap();

        assert_eq!(claims.email, "s@x.com");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let token = TokenService::new(b"one").create_token("s@x.com").unwrap();
        assert!(TokenService::new(b"two").verify_token(&token).is_err());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let tokens = TokenService::with_ttl(b"secret", Duration::hours(-2));
        let token = tokens.create_token("s@x.com").unwrap();
        assert!(tokens.verify_token(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(TokenService::new(b"secret").verify_token("not.a.token").is_err());
    }
}
