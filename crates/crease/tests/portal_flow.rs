//! End-to-end flows against a fake academy API on a loopback port.
//!
//! The portal runs with the real `ReqwestTransport` and a `FileStorage`,
//! so these tests cover the whole stack: page → handler → gateway →
//! HTTP → session file.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crease::prelude::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

// =========================================================================
// Fake API
// =========================================================================

/// One request as the fake server saw it.
#[derive(Debug, Clone)]
struct Seen {
    method: String,
    path: String,
    authorization: Option<String>,
    body: String,
}

type Log = Arc<Mutex<Vec<Seen>>>;

/// The academy API, reduced to canned answers.
fn route(seen: &Seen) -> (u16, String) {
    let bearer = seen.authorization.as_deref();
    match (seen.method.as_str(), seen.path.as_str()) {
        ("GET", "/") => (200, "Cricket academy API is running".into()),
        ("POST", "/api/signup") => (201, r#"{"message":"Cricketer created successfully"}"#.into()),
        ("POST", "/api/login") if seen.body.contains(r#""password":"secret""#) => (
            200,
            r#"{"token":"abc","cricketer":{"id":1,"name":"A","email":"a@x.com","mobile":"9999999999"}}"#.into(),
        ),
        ("POST", "/api/login") => (401, r#"{"error":"Invalid mobile number or password"}"#.into()),
        ("POST", "/api/admin/login") => (200, r#"{"token":"adm","admin":{"id":"a1"}}"#.into()),
        (_, _) if bearer.is_none() => (401, "Unauthorized".into()),
        ("GET", "/api/cricketer/profile") if bearer == Some("Bearer abc") => (
            200,
            r#"{"id":1,"name":"A","email":"a@x.com","mobile":"9999999999","joiningDate":"2024-01-10T00:00:00Z"}"#.into(),
        ),
        ("GET", "/api/cricketer/profile") => (401, r#"{"error":"token expired"}"#.into()),
        ("GET", "/api/announcements") => (
            200,
            r#"[{"id":"n1","title":"Nets","content":"6am <sharp>","createdAt":"2024-03-01T09:05:00Z","createdBy":"coach"}]"#.into(),
        ),
        ("POST", "/api/admin/announcements") => (
            201,
            r#"{"id":"n2","title":"Match","content":"Sunday"}"#.into(),
        ),
        ("GET", "/api/admin/cricketers") => (
            200,
            r#"[{"id":"c1","name":"A","email":"a@x.com","mobile":"9999999999","inactiveCricketer":false}]"#.into(),
        ),
        _ => (404, "404 page not found".into()),
    }
}

/// Serves `route` on a random port until the test ends.
async fn start_api() -> (String, Log) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr").to_string();
    let log: Log = Arc::default();

    let server_log = Arc::clone(&log);
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let log = Arc::clone(&server_log);
            tokio::spawn(async move {
                serve(stream, log).await;
            });
        }
    });

    (format!("http://{addr}"), log)
}

async fn serve(mut stream: TcpStream, log: Log) {
    let raw = read_request(&mut stream).await;
    let (head, body) = raw.split_once("\r\n\r\n").unwrap_or((raw.as_str(), ""));
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let seen = Seen {
        method: request_line.next().unwrap_or_default().to_string(),
        path: request_line.next().unwrap_or_default().to_string(),
        authorization: lines.find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("authorization")
                .then(|| value.trim().to_string())
        }),
        body: body.to_string(),
    };

    let (status, reply) = route(&seen);
    log.lock().unwrap().push(seen);

    let response = format!(
        "HTTP/1.1 {status} X\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{reply}",
        reply.len()
    );
    stream.write_all(response.as_bytes()).await.ok();
    stream.shutdown().await.ok();
}

/// Reads headers, then as many body bytes as Content-Length announces.
async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

// =========================================================================
// Helpers
// =========================================================================

fn config(base_url: &str, dir: &tempfile::TempDir) -> ClientConfig {
    ClientConfig {
        base_url: base_url.to_string(),
        storage_path: dir.path().join("session.json"),
        signup_redirect_delay: Duration::from_millis(10),
        health_check: true,
    }
}

fn open_portal(config: &ClientConfig) -> Portal<ReqwestTransport, FileStorage> {
    let storage = FileStorage::open(&config.storage_path).expect("open storage");
    PortalBuilder::new()
        .config(config.clone())
        .connect(storage)
        .expect("portal should build")
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_signup_then_login_then_reload_keeps_session() {
    let (url, log) = start_api().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(&url, &dir);

    let mut portal = open_portal(&config);
    assert_eq!(portal.start().await.unwrap(), Some(Page::Login));

    // Signup.
    portal.navigate(Page::Signup);
    portal
        .document_mut()
        .form_mut(FormId::Signup)
        .set(FormField::Name, "A")
        .set(FormField::Email, "a@x.com")
        .set(FormField::Mobile, "9999999999")
        .set(FormField::Password, "secret");
    portal.signup().await.unwrap();
    assert_eq!(portal.current_page(), Some(Page::Login));

    // Login.
    portal
        .document_mut()
        .form_mut(FormId::Login)
        .set(FormField::Identifier, "9999999999")
        .set(FormField::Password, "secret");
    portal.login(LoginSubmitter::Cricketer).await.unwrap();

    let profile = portal.document().content(ElementId::ProfileInfo).unwrap();
    assert!(profile.contains("<strong>Joining Date:</strong> 2024-01-10 00:00"));
    let announcements = portal.document().content(ElementId::AnnouncementsList).unwrap();
    assert!(announcements.contains("6am &lt;sharp&gt;"));
    assert!(announcements.contains("2024-03-01 09:05 by coach"));

    // A fresh process over the same file picks the session up.
    drop(portal);
    let mut reloaded = open_portal(&config);
    assert_eq!(reloaded.start().await.unwrap(), Some(Page::LoggedIn));
    assert_eq!(reloaded.store().token(), Some("abc"));
    assert!(reloaded.document().is_visible(ElementId::ProfileSection));

    let seen = log.lock().unwrap().clone();
    let health = seen.iter().filter(|s| s.method == "GET" && s.path == "/").count();
    assert_eq!(health, 1, "only signup checks health");
    let login = seen.iter().find(|s| s.path == "/api/login").unwrap();
    assert!(login.authorization.is_none());
    let profile_fetch = seen.iter().find(|s| s.path == "/api/cricketer/profile").unwrap();
    assert_eq!(profile_fetch.authorization.as_deref(), Some("Bearer abc"));
}

#[tokio::test]
async fn test_wrong_password_shows_server_message() {
    let (url, _log) = start_api().await;
    let dir = tempfile::tempdir().unwrap();
    let mut portal = open_portal(&config(&url, &dir));
    portal.start().await.unwrap();

    portal
        .document_mut()
        .form_mut(FormId::Login)
        .set(FormField::Identifier, "9999999999")
        .set(FormField::Password, "wrong");
    let err = portal.login(LoginSubmitter::Cricketer).await.unwrap_err();

    assert!(err.is_auth());
    assert_eq!(
        portal.document().message(ElementId::LoginMessage),
        Some(("Invalid mobile number or password", MessageKind::Error))
    );
    assert!(!portal.store().is_authenticated());
    assert_eq!(portal.current_page(), Some(Page::Login));
}

#[tokio::test]
async fn test_expired_token_on_startup_returns_to_login() {
    let (url, _log) = start_api().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(&url, &dir);

    {
        let mut storage = FileStorage::open(&config.storage_path).unwrap();
        storage.set("token", "stale").unwrap();
        storage.set("userRole", "cricketer").unwrap();
    }

    let mut portal = open_portal(&config);
    let err = portal.start().await.unwrap_err();

    assert!(err.is_auth());
    assert_eq!(portal.current_page(), Some(Page::Login));
    let storage = FileStorage::open(&config.storage_path).unwrap();
    assert!(storage.get("token").is_none());
    assert!(storage.get("userRole").is_none());
}

#[tokio::test]
async fn test_admin_announces_and_manages_roster() {
    let (url, log) = start_api().await;
    let dir = tempfile::tempdir().unwrap();
    let mut portal = open_portal(&config(&url, &dir));
    portal.start().await.unwrap();

    portal.navigate(Page::AdminLogin);
    portal
        .document_mut()
        .form_mut(FormId::AdminLogin)
        .set(FormField::Email, "boss@x.com")
        .set(FormField::Password, "pw");
    portal.admin_login().await.unwrap();

    assert!(portal.document().is_visible(ElementId::AdminSection));
    assert!(
        portal
            .document()
            .content(ElementId::CricketersList)
            .unwrap()
            .contains("data-id=\"c1\"")
    );

    portal
        .document_mut()
        .form_mut(FormId::Announcement)
        .set(FormField::Title, "Match")
        .set(FormField::Content, "Sunday");
    portal.create_announcement().await.unwrap();
    assert_eq!(
        portal.document_mut().take_alerts(),
        vec!["Announcement created successfully!".to_string()]
    );

    let seen = log.lock().unwrap().clone();
    let posted = seen
        .iter()
        .find(|s| s.path == "/api/admin/announcements")
        .unwrap();
    assert_eq!(posted.authorization.as_deref(), Some("Bearer adm"));
    assert_eq!(posted.body, r#"{"title":"Match","content":"Sunday"}"#);
    assert!(seen.iter().all(|s| s.path != "/api/cricketer/profile"));
}

#[tokio::test]
async fn test_unreachable_server_is_reported_not_fatal() {
    // Bind and drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let mut portal = open_portal(&config(&format!("http://{addr}"), &dir));
    portal.start().await.unwrap();

    portal
        .document_mut()
        .form_mut(FormId::Login)
        .set(FormField::Identifier, "1")
        .set(FormField::Password, "secret");
    let err = portal.login(LoginSubmitter::Cricketer).await.unwrap_err();

    assert!(matches!(err, ApiError::NetworkUnreachable(_)));
    let (text, kind) = portal.document().message(ElementId::LoginMessage).unwrap();
    assert!(text.starts_with("Cannot connect to server"));
    assert_eq!(kind, MessageKind::Error);
    assert_eq!(portal.current_page(), Some(Page::Login));
}
