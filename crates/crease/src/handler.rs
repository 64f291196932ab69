//! Form handlers: one per user action.
//!
//! Every handler follows the same flow:
//!   1. Read its form from the document and trim the values
//!   2. Validate presence (failures are shown and never sent)
//!   3. Call the gateway
//!   4. Update the session and the page
//!
//! Failures are rendered where the page expects them (a message slot or a
//! modal alert) and also returned, so callers like the CLI can set an exit
//! status. The form keeps its contents on failure.

use chrono::{DateTime, NaiveDate, Utc};
use crease_protocol::{
    AdminLoginRequest, Codec, Cricketer, Endpoint, InactiveStatusUpdate, JoiningDateUpdate,
    LoginRequest, NewAnnouncement, ProfileUpdate, ProtocolError, RecordId, SignupRequest,
};
use crease_session::{Role, Session, Storage};
use crease_transport::Transport;
use crease_view::render;
use crease_view::router;
use crease_view::{ElementId, FormField, FormId, MessageKind, Page};

use crate::api::ProfileUpdated;
use crate::{ApiError, Portal};

/// Which submit control sent the login form.
///
/// The shared login form has one button per account type; the button
/// decides the route and how the identifier is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginSubmitter {
    /// `POST /api/login` with the identifier as `mobile`.
    #[default]
    Cricketer,
    /// `POST /api/admin/login` with the identifier as `email`.
    Admin,
}

impl LoginSubmitter {
    fn role(self) -> Role {
        match self {
            Self::Cricketer => Role::Cricketer,
            Self::Admin => Role::Admin,
        }
    }
}

fn invalid_response(detail: &str) -> ApiError {
    ProtocolError::InvalidMessage(detail.to_owned()).into()
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
fn parse_joining_date(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|at| at.and_utc());
    }
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

impl<T: Transport, S: Storage, C: Codec> Portal<T, S, C> {
    // -----------------------------------------------------------------
    // Signup
    // -----------------------------------------------------------------

    /// Submits the signup form.
    pub async fn signup(&mut self) -> Result<(), ApiError> {
        let form = self.document.form(FormId::Signup);
        let name = form.trimmed(FormField::Name);
        let email = form.trimmed(FormField::Email);
        let mobile = form.trimmed(FormField::Mobile);
        let password = form.value(FormField::Password).to_owned();

        if [&name, &email, &mobile].iter().any(|v| v.is_empty()) || password.trim().is_empty() {
            return self.fail(
                ElementId::SignupMessage,
                ApiError::validation("All fields are required"),
            );
        }

        if self.config.health_check {
            if let Err(e) = self.gateway.health().await {
                tracing::warn!(error = %e, "health check failed");
                self.document.set_message(
                    ElementId::SignupMessage,
                    format!("Server connection failed: {e}"),
                    MessageKind::Error,
                );
                return Err(e);
            }
        }

        let body = SignupRequest { name, email, mobile, password };
        let response = match self.gateway.signup(&body).await {
            Ok(response) => response,
            Err(e) => return self.fail(ElementId::SignupMessage, e),
        };
        if response.message.is_none() {
            return self.fail(
                ElementId::SignupMessage,
                invalid_response("signup response has no message"),
            );
        }

        tracing::info!(email = %body.email, "signed up");
        self.document.set_message(
            ElementId::SignupMessage,
            "Signup successful! Please login.",
            MessageKind::Success,
        );
        self.document.form_mut(FormId::Signup).reset();

        tokio::time::sleep(self.config.signup_redirect_delay).await;
        router::show(&mut self.document, Page::Login);
        Ok(())
    }

    // -----------------------------------------------------------------
    // Login
    // -----------------------------------------------------------------

    /// Submits the shared login form.
    pub async fn login(&mut self, submitter: LoginSubmitter) -> Result<(), ApiError> {
        let form = self.document.form(FormId::Login);
        let identifier = form.trimmed(FormField::Identifier);
        let password = form.value(FormField::Password).to_owned();

        match self.authenticate(submitter, identifier, password).await {
            Ok(profile) => self.enter(FormId::Login, profile).await,
            Err(e) => {
                self.discard_session();
                self.fail(ElementId::LoginMessage, e)
            }
        }
    }

    /// Submits the dedicated admin login page. Errors are alerts.
    pub async fn admin_login(&mut self) -> Result<(), ApiError> {
        let form = self.document.form(FormId::AdminLogin);
        let email = form.trimmed(FormField::Email);
        let password = form.value(FormField::Password).to_owned();

        if self.config.health_check {
            if let Err(e) = self.gateway.health().await {
                tracing::warn!(error = %e, "health check failed");
                self.document.alert(format!("Server connection failed: {e}"));
                return Err(e);
            }
        }

        match self.authenticate(LoginSubmitter::Admin, email, password).await {
            Ok(profile) => self.enter(FormId::AdminLogin, profile).await,
            Err(e) => {
                self.discard_session();
                self.fail_alert(e)
            }
        }
    }

    /// Posts credentials and commits the session. Returns the cricketer
    /// profile carried by a cricketer login.
    async fn authenticate(
        &mut self,
        submitter: LoginSubmitter,
        identifier: String,
        password: String,
    ) -> Result<Option<Cricketer>, ApiError> {
        let (session, profile) = match submitter {
            LoginSubmitter::Cricketer => {
                let body = LoginRequest { mobile: identifier, password };
                let response = self.gateway.login(&body).await?;
                let (Some(token), Some(cricketer)) = (response.token, response.cricketer) else {
                    return Err(invalid_response("login response lacks token or cricketer"));
                };
                let mut session = Session::new(token, submitter.role());
                if let Some(id) = &cricketer.id {
                    session = session.with_user_id(id.as_str());
                }
                (session, Some(cricketer))
            }
            LoginSubmitter::Admin => {
                let body = AdminLoginRequest { email: identifier, password };
                let response = self.gateway.admin_login(&body).await?;
                let Some(token) = response.token else {
                    return Err(invalid_response("admin login response lacks token"));
                };
                let mut session = Session::new(token, submitter.role());
                if let Some(id) = response.admin.and_then(|a| a.id) {
                    session = session.with_user_id(id.as_str());
                }
                (session, None)
            }
        };

        let session = self.store.commit(session)?;
        tracing::info!(role = %session.role, "logged in");
        Ok(profile)
    }

    /// Switches to the logged-in page after a successful login.
    async fn enter(&mut self, form: FormId, profile: Option<Cricketer>) -> Result<(), ApiError> {
        self.document.clear_message(ElementId::LoginMessage);
        self.document.form_mut(form).reset();
        router::show(&mut self.document, Page::LoggedIn);
        if let Some(profile) = profile {
            self.document
                .set_content(ElementId::ProfileInfo, render::render_profile(&profile));
        }
        self.load_user_data().await
    }

    // -----------------------------------------------------------------
    // Profile
    // -----------------------------------------------------------------

    /// Submits the profile form. Blank fields are left unchanged.
    pub async fn update_profile(&mut self) -> Result<(), ApiError> {
        let token = match self.store.current().cloned() {
            None => {
                return self.fail(
                    ElementId::ProfileMessage,
                    ApiError::validation("Please login first"),
                );
            }
            Some(session) if session.role != Role::Cricketer => {
                return self.fail(
                    ElementId::ProfileMessage,
                    ApiError::validation("Only cricketers can update their profile"),
                );
            }
            Some(session) => session.token,
        };

        let form = self.document.form(FormId::Profile);
        let filled = |field| Some(form.trimmed(field)).filter(|v| !v.is_empty());
        let update = ProfileUpdate {
            name: filled(FormField::Name),
            email: filled(FormField::Email),
            mobile: filled(FormField::Mobile),
            password: Some(form.value(FormField::Password).to_owned())
                .filter(|p| !p.trim().is_empty()),
        };
        if update.is_empty() {
            return self.fail(
                ElementId::ProfileMessage,
                ApiError::validation("Please provide at least one field to update"),
            );
        }

        let profile = match self.gateway.update_profile(&token, &update).await {
            Ok(ProfileUpdated::Profile(profile)) => Some(profile),
            Ok(ProfileUpdated::Message(_)) => match self.gateway.profile(&token).await {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!(error = %e, "profile updated but reload failed");
                    None
                }
            },
            Err(e) => return self.fail(ElementId::ProfileMessage, e),
        };

        if let Some(profile) = profile {
            self.document
                .set_content(ElementId::ProfileInfo, render::render_profile(&profile));
        }
        self.document.form_mut(FormId::Profile).reset();
        self.document.set_message(
            ElementId::ProfileMessage,
            "Profile updated successfully",
            MessageKind::Success,
        );
        Ok(())
    }

    // -----------------------------------------------------------------
    // Admin actions
    // -----------------------------------------------------------------

    /// Submits the announcement form.
    pub async fn create_announcement(&mut self) -> Result<(), ApiError> {
        let token = self.authorize(
            &Endpoint::CreateAnnouncement,
            "Only admins can create announcements",
        )?;

        let form = self.document.form(FormId::Announcement);
        let title = form.trimmed(FormField::Title);
        let content = form.trimmed(FormField::Content);
        if title.is_empty() || content.is_empty() {
            return self.fail_alert(ApiError::validation("Title and content are required"));
        }

        let created = match self
            .gateway
            .create_announcement(&token, &NewAnnouncement { title, content })
            .await
        {
            Ok(created) => created,
            Err(e) => return self.fail_alert(e),
        };
        tracing::info!(title = %created.title, "announcement created");

        self.document.form_mut(FormId::Announcement).reset();
        self.load_announcements().await?;
        self.document.alert("Announcement created successfully!");
        Ok(())
    }

    /// Sets the joining date of the cricketer named in the admin form.
    pub async fn set_joining_date(&mut self) -> Result<(), ApiError> {
        let token = self.authorize(&Endpoint::Cricketers, "Only admins can manage cricketers")?;

        let form = self.document.form(FormId::CricketerAdmin);
        let id = form.trimmed(FormField::CricketerId);
        let date = form.trimmed(FormField::JoiningDate);
        if id.is_empty() || date.is_empty() {
            return self.fail_alert(ApiError::validation(
                "Cricketer id and joining date are required",
            ));
        }
        let Some(joining_date) = parse_joining_date(&date) else {
            return self.fail_alert(ApiError::validation(
                "Joining date must be in YYYY-MM-DD format",
            ));
        };

        let id = RecordId(id);
        let response = match self
            .gateway
            .set_joining_date(&token, &id, &JoiningDateUpdate { joining_date })
            .await
        {
            Ok(response) => response,
            Err(e) => return self.fail_alert(e),
        };
        tracing::info!(cricketer = %id, %joining_date, "joining date set");

        self.finish_admin_action(
            response.message,
            "Joining date updated successfully",
        )
        .await
    }

    /// Marks the cricketer named in the admin form active or inactive.
    pub async fn set_inactive_status(&mut self, is_inactive: bool) -> Result<(), ApiError> {
        let token = self.authorize(&Endpoint::Cricketers, "Only admins can manage cricketers")?;

        let id = self
            .document
            .form(FormId::CricketerAdmin)
            .trimmed(FormField::CricketerId);
        if id.is_empty() {
            return self.fail_alert(ApiError::validation("Cricketer id is required"));
        }

        let id = RecordId(id);
        let response = match self
            .gateway
            .set_inactive_status(&token, &id, &InactiveStatusUpdate { is_inactive })
            .await
        {
            Ok(response) => response,
            Err(e) => return self.fail_alert(e),
        };
        tracing::info!(cricketer = %id, is_inactive, "inactive status set");

        self.finish_admin_action(
            response.message,
            "Inactive status updated successfully",
        )
        .await
    }

    async fn finish_admin_action(
        &mut self,
        message: Option<String>,
        fallback: &str,
    ) -> Result<(), ApiError> {
        self.document.form_mut(FormId::CricketerAdmin).reset();
        self.load_cricketers().await?;
        self.document
            .alert(message.unwrap_or_else(|| fallback.to_owned()));
        Ok(())
    }

    // -----------------------------------------------------------------
    // Logout
    // -----------------------------------------------------------------

    /// Forgets the session and returns to the login page.
    ///
    /// The page is reset even if storage could not be cleared.
    pub fn logout(&mut self) -> Result<(), ApiError> {
        let cleared = self.store.clear();
        self.reset_view();
        self.document.clear_message(ElementId::LoginMessage);
        tracing::info!("logged out");
        Ok(cleared?)
    }

    // -----------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------

    /// The session token if the session may call `endpoint`, otherwise an
    /// alert saying why not. `denied` is shown when the route is admin only
    /// and the session is not.
    fn authorize(&mut self, endpoint: &Endpoint, denied: &str) -> Result<String, ApiError> {
        let err = match self.store.current().cloned() {
            Some(session) if !endpoint.admin_only() || session.role.is_admin() => {
                return Ok(session.token);
            }
            Some(_) => ApiError::validation(denied),
            None => ApiError::validation("Please login first"),
        };
        tracing::debug!(%endpoint, reason = %err, "action refused");
        self.document.alert(err.user_message());
        Err(err)
    }

    /// Drops whatever session was stored before a failed login.
    fn discard_session(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear stale session");
        }
    }

    fn fail(&mut self, slot: ElementId, err: ApiError) -> Result<(), ApiError> {
        self.document
            .set_message(slot, err.user_message(), MessageKind::Error);
        Err(err)
    }

    fn fail_alert(&mut self, err: ApiError) -> Result<(), ApiError> {
        self.document.alert(err.user_message());
        Err(err)
    }
}
