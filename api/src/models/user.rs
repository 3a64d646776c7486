use std::fmt;
use std::str::FromStr;

use mongodb::bson::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Buyer,
    Seller,
    Admin,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role `{0}`")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "buyer" => Ok(Role::Buyer),
            "seller" => Ok(Role::Seller),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Role stored on a user document; `None` when absent or unrecognised.
pub fn role_of(user: &Document) -> Option<Role> {
    user.get_str("role").ok()?.parse().ok()
}

pub fn has_role(user: Option<&Document>, role: Role) -> bool {
    user.and_then(role_of) == Some(role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn roles_parse_from_lowercase_names() {
        assert_eq!("seller".parse::<Role>(), Ok(Role::Seller));
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("buyer".parse::<Role>(), Ok(Role::Buyer));
        assert_eq!("Seller".parse::<Role>(), Err(UnknownRole("Seller".into())));
    }

    #[test]
    fn role_of_ignores_missing_or_foreign_values() {
        assert_eq!(role_of(&doc! { "role": "admin" }), Some(Role::Admin));
        assert_eq!(role_of(&doc! { "role": 3 }), None);
        assert_eq!(role_of(&doc! { "email": "a@x.com" }), None);
        assert!(!has_role(None, Role::Seller));
    }
}
