//! The endpoint table: every route the client calls on the academy API.
//!
//! Keeping the method, path and auth requirement of each route in one
//! place means handlers never spell out URLs themselves.

use std::borrow::Cow;
use std::fmt;

use crease_transport::Method;

use crate::RecordId;

/// A route on the academy API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /`: plain-text health check.
    Health,
    /// `POST /api/signup`
    Signup,
    /// `POST /api/login`
    Login,
    /// `POST /api/admin/login`
    AdminLogin,
    /// `GET /api/cricketer/profile`
    Profile,
    /// `PUT /api/cricketer/profile`
    UpdateProfile,
    /// `GET /api/announcements`
    Announcements,
    /// `POST /api/admin/announcements`
    CreateAnnouncement,
    /// `GET /api/admin/cricketers`
    Cricketers,
    /// `PUT /api/admin/cricketers/{id}/joining-date`
    JoiningDate(RecordId),
    /// `PUT /api/admin/cricketers/{id}/inactive-status`
    InactiveStatus(RecordId),
}

impl Endpoint {
    /// The HTTP method this route expects.
    pub fn method(&self) -> Method {
        match self {
            Self::Health | Self::Profile | Self::Announcements | Self::Cricketers => {
                Method::Get
            }
            Self::Signup | Self::Login | Self::AdminLogin | Self::CreateAnnouncement => {
                Method::Post
            }
            Self::UpdateProfile | Self::JoiningDate(_) | Self::InactiveStatus(_) => Method::Put,
        }
    }

    /// The request path, relative to the API base URL. Record ids are
    /// percent-encoded into a single segment.
    pub fn path(&self) -> Cow<'static, str> {
        match self {
            Self::Health => Cow::Borrowed("/"),
            Self::Signup => Cow::Borrowed("/api/signup"),
            Self::Login => Cow::Borrowed("/api/login"),
            Self::AdminLogin => Cow::Borrowed("/api/admin/login"),
            Self::Profile | Self::UpdateProfile => Cow::Borrowed("/api/cricketer/profile"),
            Self::Announcements => Cow::Borrowed("/api/announcements"),
            Self::CreateAnnouncement => Cow::Borrowed("/api/admin/announcements"),
            Self::Cricketers => Cow::Borrowed("/api/admin/cricketers"),
            Self::JoiningDate(id) => Cow::Owned(format!(
                "/api/admin/cricketers/{}/joining-date",
                urlencoding::encode(id.as_str())
            )),
            Self::InactiveStatus(id) => Cow::Owned(format!(
                "/api/admin/cricketers/{}/inactive-status",
                urlencoding::encode(id.as_str())
            )),
        }
    }

    /// Whether the route needs a bearer token.
    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Self::Health | Self::Signup | Self::Login | Self::AdminLogin
        )
    }

    /// Whether the server only serves this route to admins.
    pub fn admin_only(&self) -> bool {
        matches!(
            self,
            Self::CreateAnnouncement
                | Self::Cricketers
                | Self::JoiningDate(_)
                | Self::InactiveStatus(_)
        )
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
