//! The in-memory page: elements, forms and modal alerts.

use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Elements
// ---------------------------------------------------------------------------

/// Every element the client reads or writes.
///
/// Each maps to the element id the web page used (see [`dom_id`]), so a
/// snapshot of a `Document` lines up with the web page markup.
///
/// [`dom_id`]: ElementId::dom_id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    // -- Pages (exactly one visible at a time) --
    LoginPage,
    SignupPage,
    AdminLoginPage,
    LoggedInSection,

    // -- Role sections inside the logged-in page --
    /// Cricketer-only: profile and profile editing.
    ProfileSection,
    /// Admin-only: announcement form and cricketer list.
    AdminSection,

    // -- Content slots (hold rendered markup) --
    ProfileInfo,
    AnnouncementsList,
    CricketersList,

    // -- Message slots (hold plain text with a success/error class) --
    LoginMessage,
    SignupMessage,
    ProfileMessage,
    AnnouncementsMessage,
    CricketersMessage,
}

impl ElementId {
    /// All elements, in document order.
    pub const ALL: [ElementId; 14] = [
        Self::LoginPage,
        Self::SignupPage,
        Self::AdminLoginPage,
        Self::LoggedInSection,
        Self::ProfileSection,
        Self::AdminSection,
        Self::ProfileInfo,
        Self::AnnouncementsList,
        Self::CricketersList,
        Self::LoginMessage,
        Self::SignupMessage,
        Self::ProfileMessage,
        Self::AnnouncementsMessage,
        Self::CricketersMessage,
    ];

    /// The id the element carried in the web page.
    pub fn dom_id(self) -> &'static str {
        match self {
            Self::LoginPage => "login-page",
            Self::SignupPage => "signup-page",
            Self::AdminLoginPage => "admin-login-page",
            Self::LoggedInSection => "logged-in-section",
            Self::ProfileSection => "profile-section",
            Self::AdminSection => "admin-section",
            Self::ProfileInfo => "profile-info",
            Self::AnnouncementsList => "announcements-list",
            Self::CricketersList => "cricketers-list",
            Self::LoginMessage => "login-message",
            Self::SignupMessage => "signup-message",
            Self::ProfileMessage => "profile-message",
            Self::AnnouncementsMessage => "announcements-message",
            Self::CricketersMessage => "cricketers-message",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_id())
    }
}

/// The class a message slot carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// One element's visible state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub visible: bool,
    /// Markup for content slots, plain text for message slots.
    pub content: String,
    /// Set on message slots that currently show something.
    pub kind: Option<MessageKind>,
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// The forms on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormId {
    Login,
    Signup,
    AdminLogin,
    Profile,
    Announcement,
    /// Admin tools for one cricketer (joining date, inactive flag).
    CricketerAdmin,
}

impl FormId {
    pub const ALL: [FormId; 6] = [
        Self::Login,
        Self::Signup,
        Self::AdminLogin,
        Self::Profile,
        Self::Announcement,
        Self::CricketerAdmin,
    ];
}

/// Input fields, shared across forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Name,
    Email,
    Mobile,
    Password,
    /// Login form: mobile number for cricketers, email for admins.
    Identifier,
    Title,
    Content,
    CricketerId,
    JoiningDate,
}

/// The current values of one form's inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    values: BTreeMap<FormField, String>,
}

impl Form {
    /// Sets an input's value.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) -> &mut Self {
        self.values.insert(field, value.into());
        self
    }

    /// The raw value, or `""` if the input was never filled.
    pub fn value(&self, field: FormField) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    /// The value with surrounding whitespace removed.
    pub fn trimmed(&self, field: FormField) -> String {
        self.value(field).trim().to_owned()
    }

    /// Empties every input, like `form.reset()`.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Returns `true` if no input holds anything but whitespace.
    pub fn is_blank(&self) -> bool {
        self.values.values().all(|v| v.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// The whole page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    elements: BTreeMap<ElementId, Element>,
    forms: BTreeMap<FormId, Form>,
    alerts: Vec<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A page with every element present and hidden, and empty forms.
    pub fn new() -> Self {
        Self {
            elements: ElementId::ALL
                .into_iter()
                .map(|id| (id, Element::default()))
                .collect(),
            forms: FormId::ALL
                .into_iter()
                .map(|id| (id, Form::default()))
                .collect(),
            alerts: Vec::new(),
        }
    }

    /// A page missing some elements, like markup that forgot an id.
    pub fn without(missing: &[ElementId]) -> Self {
        let mut doc = Self::new();
        for id in missing {
            doc.elements.remove(id);
        }
        doc
    }

    /// Returns `true` if the element exists on this page.
    pub fn has(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// The element, if present.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Returns `true` if the element exists and is shown.
    pub fn is_visible(&self, id: ElementId) -> bool {
        self.elements.get(&id).is_some_and(|e| e.visible)
    }

    /// The element's content, if present.
    pub fn content(&self, id: ElementId) -> Option<&str> {
        self.elements.get(&id).map(|e| e.content.as_str())
    }

    /// Shows or hides an element. Missing elements are skipped with a
    /// diagnostic; returns whether the element existed.
    pub fn set_visible(&mut self, id: ElementId, visible: bool) -> bool {
        match self.elements.get_mut(&id) {
            Some(e) => {
                e.visible = visible;
                true
            }
            None => {
                tracing::error!(element = %id, "element not found");
                false
            }
        }
    }

    /// Replaces an element's content (`innerHTML`). Returns whether the
    /// element existed.
    pub fn set_content(&mut self, id: ElementId, content: impl Into<String>) -> bool {
        match self.elements.get_mut(&id) {
            Some(e) => {
                e.content = content.into();
                true
            }
            None => {
                tracing::error!(element = %id, "element not found");
                false
            }
        }
    }

    /// Shows a message in a message slot with the given class.
    pub fn set_message(&mut self, id: ElementId, text: impl Into<String>, kind: MessageKind) {
        match self.elements.get_mut(&id) {
            Some(e) => {
                e.content = text.into();
                e.kind = Some(kind);
            }
            None => tracing::error!(element = %id, "message element not found"),
        }
    }

    /// Empties a message slot and drops its class.
    pub fn clear_message(&mut self, id: ElementId) {
        if let Some(e) = self.elements.get_mut(&id) {
            e.content.clear();
            e.kind = None;
        }
    }

    /// The text and class of a message slot, if it shows anything.
    pub fn message(&self, id: ElementId) -> Option<(&str, MessageKind)> {
        let e = self.elements.get(&id)?;
        let kind = e.kind?;
        (!e.content.is_empty()).then_some((e.content.as_str(), kind))
    }

    /// A form. Every form exists on every page.
    pub fn form(&self, id: FormId) -> &Form {
        // Forms are created for every `FormId` in `new()` and never removed.
        static EMPTY: Form = Form {
            values: BTreeMap::new(),
        };
        self.forms.get(&id).unwrap_or(&EMPTY)
    }

    /// A form, for filling in or resetting.
    pub fn form_mut(&mut self, id: FormId) -> &mut Form {
        self.forms.entry(id).or_default()
    }

    /// Raises a modal alert.
    pub fn alert(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::debug!(%text, "alert raised");
        self.alerts.push(text);
    }

    /// Alerts raised and not yet dismissed, oldest first.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Dismisses and returns every pending alert.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}
