use std::marker::PhantomData;

use rocket::http::Status;
use rocket::outcome::try_outcome;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;

use crate::jwt::jwt_helper::TokenService;
use crate::models::user::{role_of, Role};
use crate::repository::store::StoreError;
use crate::repository::user_repository::UserRepository;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing bearer credential")]
    MissingCredential,

    #[error("invalid bearer credential: {0}")]
    InvalidCredential(#[from] jsonwebtoken::errors::Error),

    #[error("no user registered for {0}")]
    UnknownUser(String),

    #[error("{email} does not hold the {required} role")]
    RoleMismatch { email: String, required: Role },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0} is not managed by the server")]
    MissingState(&'static str),
}

impl AuthError {
    pub fn status(&self) -> Status {
        match self {
            AuthError::MissingCredential => Status::Unauthorized,
            AuthError::InvalidCredential(_)
            | AuthError::UnknownUser(_)
            | AuthError::RoleMismatch { .. } => Status::Forbidden,
            AuthError::Store(_) | AuthError::MissingState(_) => Status::InternalServerError,
        }
    }
}

fn reject<T>(error: AuthError) -> Outcome<T, AuthError> {
    let status = error.status();
    if status.code >= 500 {
        tracing::error!(error = %error, "authorization check failed");
    } else {
        tracing::debug!(error = %error, status = status.code, "request rejected");
    }
    Outcome::Error((status, error))
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Identity decoded from a valid bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Identity {
    type Error = AuthError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(token) = bearer_token(request.headers().get_one("Authorization")) else {
            return reject(AuthError::MissingCredential);
        };
        let Some(tokens) = request.rocket().state::<TokenService>() else {
            return reject(AuthError::MissingState("TokenService"));
        };

        match tokens.verify_token(token) {
            Ok(claims) => Outcome::Success(Identity {
                email: claims.email,
            }),
            Err(e) => reject(e.into()),
        }
    }
}

/// Checks that the user registered under `email` holds `required`.
pub async fn authorize(
    users: &UserRepository,
    email: &str,
    required: Role,
) -> Result<(), AuthError> {
    let user = users
        .find_user_by_email(email)
        .await?
        .ok_or_else(|| AuthError::UnknownUser(email.to_string()))?;

    if role_of(&user) == Some(required) {
        Ok(())
    } else {
        Err(AuthError::RoleMismatch {
            email: email.to_string(),
            required,
        })
    }
}

pub trait RoleRequirement: Send + Sync + 'static {
    const ROLE: Role;
}

pub struct SellerRole;

impl RoleRequirement for SellerRole {
    const ROLE: Role = Role::Seller;
}

pub struct AdminRole;

impl RoleRequirement for AdminRole {
    const ROLE: Role = Role::Admin;
}

/// Request guard admitting authenticated users holding the role `R` requires.
pub struct Authorized<R: RoleRequirement> {
    pub identity: Identity,
    _role: PhantomData<R>,
}

pub type SellerGuard = Authorized<SellerRole>;
pub type AdminGuard = Authorized<AdminRole>;

#[rocket::async_trait]
impl<'r, R: RoleRequirement> FromRequest<'r> for Authorized<R> {
    type Error = AuthError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let identity = try_outcome!(request.guard::<Identity>().await);
        let Some(users) = request.rocket().state::<UserRepository>() else {
            return reject(AuthError::MissingState("UserRepository"));
        };

        match authorize(users, &identity.email, R::ROLE).await {
            Ok(()) => Outcome::Success(Authorized {
                identity,
                _role: PhantomData,
            }),
            Err(e) => reject(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mongodb::bson::doc;

    use super::*;
    use crate::repository::memory_store::MemoryStore;
    use crate::repository::store::{CollectionName, DocumentStore, StoreHandle};

    #[test]
    fn bearer_token_requires_the_scheme_and_a_value() {
        assert_eq!(bearer_token(Some("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(Some("Bearer ")), None);
        assert_eq!(bearer_token(Some("Basic abc")), None);
        assert_eq!(bearer_token(None), None);
    }

    #[test]
    fn auth_errors_map_to_401_and_403() {
        assert_eq!(AuthError::MissingCredential.status(), Status::Unauthorized);
        assert_eq!(AuthError::UnknownUser("x".into()).status(), Status::Forbidden);
        assert_eq!(
            AuthError::RoleMismatch {
                email: "x".into(),
                required: Role::Admin
            }
            .status(),
            Status::Forbidden
        );
    }

    #[rocket::async_test]
    async fn authorize_compares_the_stored_role() {
        let store: StoreHandle = Arc::new(MemoryStore::new());
        store
            .insert_one(CollectionName::Users, doc! { "email": "s@x.com", "role": "seller" })
            .await
            .unwrap();
        let users = UserRepository::new(&store);

        assert!(authorize(&users, "s@x.com", Role::Seller).await.is_ok());
        assert!(matches!(
            authorize(&users, "s@x.com", Role::Admin).await,
            Err(AuthError::RoleMismatch { required: Role::Admin, .. })
        ));
        assert!(matches!(
            authorize(&users, "nobody@x.com", Role::Seller).await,
            Err(AuthError::UnknownUser(_))
        ));
    }
}
