//! Authorization roles.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse authorization tier.
///
/// This is a closed enum on purpose: the source of truth for "is this a
/// valid role" is the parser, so stores never see an unrecognized role.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account; sees and manages only its own tickets.
    #[default]
    User,
    /// Administrator; bypasses ownership checks and manages accounts.
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_roles() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn rejects_unknown_role() {
        let err = "superuser".parse::<Role>().unwrap_err();
        assert_eq!(err.0, "superuser");
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("Admin".parse::<Role>().is_err());
    }
}
