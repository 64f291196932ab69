//! View routing: which page is on screen, and which role sections inside
//! the logged-in page are offered.
//!
//! Exactly one page section is visible after every [`show`]. Role gating
//! is UI-only; the server checks the token on every request.

use std::fmt;

use crease_session::Role;

use crate::{Document, ElementId};

/// The top-level pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    Signup,
    AdminLogin,
    LoggedIn,
}

impl Page {
    pub const ALL: [Page; 4] = [Self::Login, Self::Signup, Self::AdminLogin, Self::LoggedIn];

    /// The element holding this page.
    pub fn element(self) -> ElementId {
        match self {
            Self::Login => ElementId::LoginPage,
            Self::Signup => ElementId::SignupPage,
            Self::AdminLogin => ElementId::AdminLoginPage,
            Self::LoggedIn => ElementId::LoggedInSection,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Login => "login",
            Self::Signup => "signup",
            Self::AdminLogin => "admin login",
            Self::LoggedIn => "logged in",
        };
        f.write_str(name)
    }
}

/// Hides every page and shows `page`.
///
/// If the target element is missing the document is left untouched and
/// `false` is returned.
pub fn show(doc: &mut Document, page: Page) -> bool {
    if !doc.has(page.element()) {
        tracing::error!(page = %page, element = %page.element(), "page element not found");
        return false;
    }

    for other in Page::ALL {
        if doc.has(other.element()) {
            doc.set_visible(other.element(), other == page);
        }
    }
    tracing::debug!(page = %page, "page shown");
    true
}

/// The page currently on screen, if any.
pub fn current_page(doc: &Document) -> Option<Page> {
    Page::ALL.into_iter().find(|p| doc.is_visible(p.element()))
}

/// The page to open at startup.
pub fn initial_page(authenticated: bool) -> Page {
    if authenticated { Page::LoggedIn } else { Page::Login }
}

/// Shows the sections `role` may use and hides the rest.
///
/// Admins get the admin section; cricketers get their profile section.
/// `None` (anonymous) hides both.
pub fn apply_role(doc: &mut Document, role: Option<Role>) {
    let (profile, admin) = match role {
        Some(Role::Cricketer) => (true, false),
        Some(Role::Admin) => (false, true),
        None => (false, false),
    };
    doc.set_visible(ElementId::ProfileSection, profile);
    doc.set_visible(ElementId::AdminSection, admin);
}
