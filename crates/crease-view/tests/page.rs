//! Routing, role gating and rendering against one document.

use crease_protocol::Announcement;
use crease_session::Role;
use crease_view::{Document, ElementId, Page, render, router};

fn announcement(title: &str) -> Announcement {
    Announcement {
        id: None,
        title: title.into(),
        content: "body".into(),
        created_at: None,
        created_by: None,
    }
}

#[test]
fn test_rerender_replaces_instead_of_appending() {
    let mut doc = Document::new();
    let list = vec![announcement("Nets"), announcement("Match")];

    doc.set_content(ElementId::AnnouncementsList, render::render_announcements(&list));
    let first = doc.content(ElementId::AnnouncementsList).unwrap().to_owned();
    doc.set_content(ElementId::AnnouncementsList, render::render_announcements(&list));

    let second = doc.content(ElementId::AnnouncementsList).unwrap();
    assert_eq!(first, second);
    assert_eq!(second.matches("<h3>Nets</h3>").count(), 1);
}

#[test]
fn test_admin_session_sees_admin_section_only() {
    let mut doc = Document::new();
    router::show(&mut doc, router::initial_page(true));
    router::apply_role(&mut doc, Some(Role::Admin));

    assert_eq!(router::current_page(&doc), Some(Page::LoggedIn));
    assert!(doc.is_visible(ElementId::AdminSection));
    assert!(!doc.is_visible(ElementId::ProfileSection));
}

#[test]
fn test_anonymous_start_lands_on_login() {
    let mut doc = Document::new();
    router::show(&mut doc, router::initial_page(false));
    router::apply_role(&mut doc, None);

    assert_eq!(router::current_page(&doc), Some(Page::Login));
    assert!(!doc.is_visible(ElementId::AdminSection));
    assert!(!doc.is_visible(ElementId::ProfileSection));
}

#[test]
fn test_missing_page_element_keeps_current_page() {
    let mut doc = Document::without(&[ElementId::LoggedInSection]);
    router::show(&mut doc, Page::Login);
    assert!(!router::show(&mut doc, Page::LoggedIn));
    assert_eq!(router::current_page(&doc), Some(Page::Login));
}
