//! Session types: what the client remembers about the logged-in user.
//!
//! A session is the client's record of a successful login:
//! - WHAT proves identity (the bearer `token`)
//! - WHICH views and actions to offer (the `role`)
//! - WHO it is, when the server said so (`user_id`)
//!
//! The role only gates the UI. The server checks the token on every
//! request and is the real authority.

use std::fmt;
use std::str::FromStr;

use crate::SessionError;

// ---------------------------------------------------------------------------
// StorageKeys
// ---------------------------------------------------------------------------

/// The keys a session occupies in [`Storage`](crate::Storage).
///
/// Older builds of the web client wrote `authToken` / `user` instead;
/// these three names are the only ones read or written now.
pub struct StorageKeys;

impl StorageKeys {
    pub const TOKEN: &'static str = "token";
    pub const ROLE: &'static str = "userRole";
    pub const USER_ID: &'static str = "userId";

    /// Every key a session may occupy, in write order.
    pub const ALL: [&'static str; 3] = [Self::TOKEN, Self::ROLE, Self::USER_ID];
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Which kind of account a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// A player. Sees their own profile and announcements.
    Cricketer,
    /// Academy staff. Posts announcements and manages cricketers.
    Admin,
}

impl Role {
    /// The string stored under [`StorageKeys::ROLE`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cricketer => "cricketer",
            Self::Admin => "admin",
        }
    }

    /// Returns `true` for [`Role::Admin`].
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "cricketer" => Ok(Self::Cricketer),
            "admin" => Ok(Self::Admin),
            other => Err(SessionError::UnknownRole(other.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The logged-in user, as far as the client knows.
///
/// Created from a login response that carried a token; destroyed on
/// logout or when the server rejects the token. Only one exists at a
/// time: a second login simply replaces the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque bearer token issued by the API.
    pub token: String,

    /// The role the token was issued for.
    pub role: Role,

    /// The account id, when the login response included one.
    pub user_id: Option<String>,
}

impl Session {
    /// Creates a session without a user id.
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
            user_id: None,
        }
    }

    /// Attaches a user id.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in [Role::Cricketer, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_parse_unknown_returns_error() {
        let result = "coach".parse::<Role>();
        assert!(matches!(result, Err(SessionError::UnknownRole(r)) if r == "coach"));
    }

    #[test]
    fn test_role_parse_tolerates_whitespace() {
        assert_eq!(" admin\n".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn test_session_builder() {
        let s = Session::new("abc", Role::Cricketer).with_user_id("1");
        assert_eq!(s.token, "abc");
        assert_eq!(s.user_id.as_deref(), Some("1"));
        assert!(!s.role.is_admin());
    }

    #[test]
    fn test_storage_keys_are_canonical() {
        assert_eq!(StorageKeys::ALL, ["token", "userRole", "userId"]);
    }
}
