//! Typed calls, one per API route.

use crease_protocol::{
    AdminLoginRequest, AdminLoginResponse, Announcement, Codec, Cricketer, Endpoint,
    InactiveStatusUpdate, JoiningDateUpdate, LoginRequest, LoginResponse, MessageResponse,
    NewAnnouncement, ProfileUpdate, RecordId, SignupRequest,
};
use crease_transport::Transport;
use serde::Deserialize;

use crate::{ApiError, ApiGateway};

/// What `PUT /api/cricketer/profile` answered.
///
/// The server normally echoes the updated profile, but falls back to a
/// bare message when it could not re-read it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ProfileUpdated {
    Profile(Cricketer),
    Message(MessageResponse),
}

impl<T: Transport, C: Codec> ApiGateway<T, C> {
    /// `GET /`. Succeeds on any 2xx, whatever the body.
    pub async fn health(&self) -> Result<(), ApiError> {
        let endpoint = Endpoint::Health;
        self.exchange(&endpoint.path(), endpoint.method(), None, false, None)
            .await
            .map(|_| ())
    }

    pub async fn signup(&self, body: &SignupRequest) -> Result<MessageResponse, ApiError> {
        self.call(&Endpoint::Signup, Some(body), None).await
    }

    pub async fn login(&self, body: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.call(&Endpoint::Login, Some(body), None).await
    }

    pub async fn admin_login(
        &self,
        body: &AdminLoginRequest,
    ) -> Result<AdminLoginResponse, ApiError> {
        self.call(&Endpoint::AdminLogin, Some(body), None).await
    }

    /// The logged-in cricketer's own profile.
    pub async fn profile(&self, token: &str) -> Result<Cricketer, ApiError> {
        self.get(&Endpoint::Profile, Some(token)).await
    }

    pub async fn update_profile(
        &self,
        token: &str,
        body: &ProfileUpdate,
    ) -> Result<ProfileUpdated, ApiError> {
        self.call(&Endpoint::UpdateProfile, Some(body), Some(token))
            .await
    }

    /// Every announcement, in the server's order. A `null` body is an
    /// empty list.
    pub async fn announcements(&self, token: &str) -> Result<Vec<Announcement>, ApiError> {
        self.get::<Option<Vec<Announcement>>>(&Endpoint::Announcements, Some(token))
            .await
            .map(Option::unwrap_or_default)
    }

    pub async fn create_announcement(
        &self,
        token: &str,
        body: &NewAnnouncement,
    ) -> Result<Announcement, ApiError> {
        self.call(&Endpoint::CreateAnnouncement, Some(body), Some(token))
            .await
    }

    /// Every cricketer. Admin only. A `null` body is an empty list.
    pub async fn cricketers(&self, token: &str) -> Result<Vec<Cricketer>, ApiError> {
        self.get::<Option<Vec<Cricketer>>>(&Endpoint::Cricketers, Some(token))
            .await
            .map(Option::unwrap_or_default)
    }

    pub async fn set_joining_date(
        &self,
        token: &str,
        id: &RecordId,
        body: &JoiningDateUpdate,
    ) -> Result<MessageResponse, ApiError> {
        self.call(&Endpoint::JoiningDate(id.clone()), Some(body), Some(token))
            .await
    }

    pub async fn set_inactive_status(
        &self,
        token: &str,
        id: &RecordId,
        body: &InactiveStatusUpdate,
    ) -> Result<MessageResponse, ApiError> {
        self.call(&Endpoint::InactiveStatus(id.clone()), Some(body), Some(token))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use crease_transport::Method;

    #[tokio::test]
    async fn test_health_accepts_plain_text() {
        let gw = ApiGateway::new(MockTransport::new().on(Method::Get, "/", 200, "OK"));
        gw.health().await.unwrap();
    }

    #[tokio::test]
    async fn test_health_non_2xx_fails() {
        let gw = ApiGateway::new(MockTransport::new().on(Method::Get, "/", 503, ""));
        let err = gw.health().await.unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status 503");
    }

    #[tokio::test]
    async fn test_update_profile_accepts_profile_or_message() {
        let gw = ApiGateway::new(
            MockTransport::new()
                .on(
                    Method::Put,
                    "/api/cricketer/profile",
                    200,
                    r#"{"name":"B","email":"b@x.com","mobile":"2"}"#,
                )
                .on(Method::Put, "/api/cricketer/profile", 200, r#"{"message":"updated"}"#),
        );
        let body = ProfileUpdate { name: Some("B".into()), ..Default::default() };

        let first = gw.update_profile("t", &body).await.unwrap();
        assert!(matches!(first, ProfileUpdated::Profile(ref c) if c.name == "B"));

        let second = gw.update_profile("t", &body).await.unwrap();
        assert!(matches!(second, ProfileUpdated::Message(_)));

        let sent = gw.transport().last_request().unwrap();
        assert_eq!(sent.body.as_deref(), Some(&br#"{"name":"B"}"#[..]));
    }

    #[tokio::test]
    async fn test_null_lists_decode_as_empty() {
        let gw = ApiGateway::new(
            MockTransport::new()
                .on(Method::Get, "/api/announcements", 200, "null")
                .on(Method::Get, "/api/admin/cricketers", 200, "null"),
        );

        assert!(gw.announcements("t").await.unwrap().is_empty());
        assert!(gw.cricketers("t").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_inactive_status_targets_cricketer() {
        let gw = ApiGateway::new(MockTransport::new().on(
            Method::Put,
            "/api/admin/cricketers/65f0/inactive-status",
            200,
            r#"{"message":"Inactive status updated successfully"}"#,
        ));
        let resp = gw
            .set_inactive_status(
                "t",
                &RecordId::from("65f0"),
                &InactiveStatusUpdate { is_inactive: true },
            )
            .await
            .unwrap();
        assert_eq!(resp.message.as_deref(), Some("Inactive status updated successfully"));

        let sent = gw.transport().last_request().unwrap();
        assert_eq!(sent.header_value("Authorization"), Some("Bearer t"));
        assert_eq!(sent.body.as_deref(), Some(&br#"{"isInactive":true}"#[..]));
    }
}
