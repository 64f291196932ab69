//! `Portal` builder and data loading.
//!
//! The portal ties the layers together: transport → gateway → session
//! store → document. It owns all client state, so handlers take
//! `&mut self` and no locking is needed.

use crease_protocol::{Codec, JsonCodec};
use crease_session::{Role, SessionStore, Storage};
use crease_transport::Transport;
use crease_view::render;
use crease_view::router;
use crease_view::{Document, ElementId, MessageKind, Page};

use crate::{ApiError, ApiGateway, ClientConfig};

/// Builder for configuring a [`Portal`].
///
/// # Example
///
/// ```rust,no_run
/// use crease::prelude::*;
///
/// # async fn run() -> Result<(), ApiError> {
/// let config = ClientConfig::from_env();
/// let storage = FileStorage::open(&config.storage_path)?;
/// let mut portal = PortalBuilder::new().config(config).connect(storage)?;
/// portal.start().await?;
/// # Ok(())
/// # }
/// ```
pub struct PortalBuilder {
    config: ClientConfig,
}

impl PortalBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the API base URL.
    pub fn base_url(mut self, url: &str) -> Self {
        self.config.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Builds a portal over the given transport and storage with
    /// `JsonCodec`.
    pub fn build<T: Transport, S: Storage>(self, transport: T, storage: S) -> Portal<T, S> {
        Portal {
            gateway: ApiGateway::new(transport),
            store: SessionStore::new(storage),
            document: Document::new(),
            config: self.config,
        }
    }

    /// Builds a portal that talks to `config.base_url` over HTTP.
    pub fn connect<S: Storage>(
        self,
        storage: S,
    ) -> Result<Portal<crease_transport::ReqwestTransport, S>, ApiError> {
        let transport = crease_transport::ReqwestTransport::new(&self.config.base_url)?;
        Ok(self.build(transport, storage))
    }
}

impl Default for PortalBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The client: page, session and API access in one place.
pub struct Portal<T: Transport, S: Storage, C: Codec = JsonCodec> {
    pub(crate) gateway: ApiGateway<T, C>,
    pub(crate) store: SessionStore<S>,
    pub(crate) document: Document,
    pub(crate) config: ClientConfig,
}

impl<T: Transport, S: Storage, C: Codec> Portal<T, S, C> {
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The page, for filling in forms before submitting them.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    pub fn gateway(&self) -> &ApiGateway<T, C> {
        &self.gateway
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The page currently on screen.
    pub fn current_page(&self) -> Option<Page> {
        router::current_page(&self.document)
    }

    /// Follows a navigation link.
    pub fn navigate(&mut self, page: Page) -> bool {
        router::show(&mut self.document, page)
    }

    /// Restores the persisted session and opens the first page.
    ///
    /// With a session, the logged-in page is shown and user data loaded;
    /// otherwise the login page.
    pub async fn start(&mut self) -> Result<Option<Page>, ApiError> {
        let authenticated = self.store.hydrate()?.is_some();
        tracing::info!(authenticated, "portal starting");

        router::show(&mut self.document, router::initial_page(authenticated));
        router::apply_role(&mut self.document, self.store.role());
        if authenticated {
            self.load_user_data().await?;
        }
        Ok(self.current_page())
    }

    /// Fills the logged-in page for the current session.
    ///
    /// The profile (cricketers only) and announcements are fetched
    /// concurrently, then the cricketer list for admins. An auth failure
    /// from any of them ends the session; other failures are shown in the
    /// matching message slot and the page stays usable.
    pub async fn load_user_data(&mut self) -> Result<(), ApiError> {
        let Some(session) = self.store.current().cloned() else {
            router::show(&mut self.document, Page::Login);
            return Ok(());
        };
        router::apply_role(&mut self.document, Some(session.role));

        let token = session.token.as_str();
        let gateway = &self.gateway;
        let profile = async {
            match session.role {
                Role::Cricketer => Some(gateway.profile(token).await),
                Role::Admin => None,
            }
        };
        let (profile, announcements) =
            tokio::join!(profile, gateway.announcements(token));

        let mut rejected = None;

        match profile {
            Some(Ok(profile)) => {
                self.document
                    .set_content(ElementId::ProfileInfo, render::render_profile(&profile));
                self.document.clear_message(ElementId::ProfileMessage);
            }
            Some(Err(e)) if e.is_auth() => rejected = Some(e),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "failed to load profile");
                self.document.set_message(
                    ElementId::ProfileMessage,
                    e.user_message(),
                    MessageKind::Error,
                );
            }
            None => {}
        }

        match announcements {
            Ok(list) => {
                self.document.set_content(
                    ElementId::AnnouncementsList,
                    render::render_announcements(&list),
                );
                self.document.clear_message(ElementId::AnnouncementsMessage);
            }
            Err(e) if e.is_auth() => rejected = rejected.or(Some(e)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load announcements");
                self.document.set_message(
                    ElementId::AnnouncementsMessage,
                    e.user_message(),
                    MessageKind::Error,
                );
            }
        }

        if let Some(e) = rejected {
            return self.expire_session(e);
        }

        if session.role.is_admin() {
            self.load_cricketers().await?;
        }
        Ok(())
    }

    /// Refreshes the announcement list.
    pub async fn load_announcements(&mut self) -> Result<(), ApiError> {
        let Some(token) = self.store.token().map(str::to_owned) else {
            return Ok(());
        };

        match self.gateway.announcements(&token).await {
            Ok(list) => {
                self.document.set_content(
                    ElementId::AnnouncementsList,
                    render::render_announcements(&list),
                );
                self.document.clear_message(ElementId::AnnouncementsMessage);
                Ok(())
            }
            Err(e) if e.is_auth() => self.expire_session(e),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load announcements");
                self.document.set_message(
                    ElementId::AnnouncementsMessage,
                    e.user_message(),
                    MessageKind::Error,
                );
                Ok(())
            }
        }
    }

    /// Refreshes the admin's cricketer list. Does nothing for cricketers.
    pub async fn load_cricketers(&mut self) -> Result<(), ApiError> {
        let token = match self.store.current() {
            Some(session) if session.role.is_admin() => session.token.clone(),
            _ => return Ok(()),
        };

        match self.gateway.cricketers(&token).await {
            Ok(list) => {
                self.document
                    .set_content(ElementId::CricketersList, render::render_cricketers(&list));
                self.document.clear_message(ElementId::CricketersMessage);
                Ok(())
            }
            Err(e) if e.is_auth() => self.expire_session(e),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load cricketers");
                self.document.set_message(
                    ElementId::CricketersMessage,
                    e.user_message(),
                    MessageKind::Error,
                );
                Ok(())
            }
        }
    }

    /// Ends a session the server no longer accepts and returns to login,
    /// passing the rejection back to the caller.
    fn expire_session(&mut self, rejection: ApiError) -> Result<(), ApiError> {
        tracing::info!(error = %rejection, "session rejected by server");
        self.reset_view();
        self.store.clear()?;
        self.document
            .set_message(ElementId::LoginMessage, rejection.user_message(), MessageKind::Error);
        Err(rejection)
    }

    /// Empties everything a session rendered and shows the login page.
    pub(crate) fn reset_view(&mut self) {
        for slot in [
            ElementId::ProfileInfo,
            ElementId::AnnouncementsList,
            ElementId::CricketersList,
        ] {
            self.document.set_content(slot, "");
        }
        for slot in [
            ElementId::ProfileMessage,
            ElementId::AnnouncementsMessage,
            ElementId::CricketersMessage,
        ] {
            self.document.clear_message(slot);
        }
        router::apply_role(&mut self.document, None);
        router::show(&mut self.document, Page::Login);
    }
}
