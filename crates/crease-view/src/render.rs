//! Renderers: pure functions from API data to markup.
//!
//! Output is deterministic, so rendering the same data twice yields the
//! same string and a slot can simply be overwritten. All text from the
//! server is escaped before it is interpolated.

use chrono::{DateTime, Utc};
use crease_protocol::{Announcement, Cricketer};

pub const NO_ANNOUNCEMENTS: &str = "No announcements found";
pub const NO_CRICKETERS: &str = "No cricketers found";

/// Escapes the five HTML-significant characters.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// `YYYY-MM-DD HH:MM`, always UTC.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

fn field(label: &str, value: &str) -> String {
    format!("<p><strong>{label}:</strong> {}</p>", escape(value))
}

fn cricketer_details(c: &Cricketer) -> String {
    let mut out = String::new();
    out.push_str(&field("Name", &c.name));
    out.push_str(&field("Email", &c.email));
    out.push_str(&field("Mobile", &c.mobile));
    if let Some(at) = &c.joining_date {
        out.push_str(&field("Joining Date", &format_timestamp(at)));
    }
    if let Some(at) = &c.due_date {
        out.push_str(&field("Due Date", &format_timestamp(at)));
    }
    if let Some(inactive) = c.inactive_cricketer {
        out.push_str(&field("Status", if inactive { "Inactive" } else { "Active" }));
    }
    out
}

/// The profile block for the logged-in cricketer.
pub fn render_profile(profile: &Cricketer) -> String {
    cricketer_details(profile)
}

/// The announcement list, in the order the server sent it.
pub fn render_announcements(announcements: &[Announcement]) -> String {
    if announcements.is_empty() {
        return format!("<li class=\"empty\">{NO_ANNOUNCEMENTS}</li>");
    }

    announcements
        .iter()
        .map(|a| {
            let mut item = String::from("<li>");
            item.push_str(&format!("<h3>{}</h3>", escape(&a.title)));
            item.push_str(&format!("<p>{}</p>", escape(&a.content)));
            let meta = match (&a.created_at, &a.created_by) {
                (Some(at), Some(by)) => format!("{} by {}", format_timestamp(at), escape(by)),
                (Some(at), None) => format_timestamp(at),
                (None, Some(by)) => format!("by {}", escape(by)),
                (None, None) => String::new(),
            };
            if !meta.is_empty() {
                item.push_str(&format!("<small>{meta}</small>"));
            }
            item.push_str("</li>");
            item
        })
        .collect()
}

/// The admin's cricketer list. Items carry the cricketer id so admin
/// actions can target them.
pub fn render_cricketers(cricketers: &[Cricketer]) -> String {
    if cricketers.is_empty() {
        return format!("<li class=\"empty\">{NO_CRICKETERS}</li>");
    }

    cricketers
        .iter()
        .map(|c| match &c.id {
            Some(id) => format!(
                "<li data-id=\"{}\">{}</li>",
                escape(id.as_str()),
                cricketer_details(c)
            ),
            None => format!("<li>{}</li>", cricketer_details(c)),
        })
        .collect()
}

/// Reduces rendered markup to terminal text: one line per block element,
/// tags dropped, entities decoded.
pub fn plain_text(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let Some(len) = rest[start..].find('>') else {
            // Unterminated tag: keep the remainder as text.
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let tag = &rest[start + 1..start + len];
        if matches!(tag, "/p" | "/li" | "/h3" | "/small") && !out.ends_with('\n') {
            out.push('\n');
        }
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);

    let decoded = out
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded.trim_end().to_owned()
}
