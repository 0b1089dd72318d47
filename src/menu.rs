//! Menu rendering for xbar/SwiftBar-style plugin hosts.
//!
//! The host reads stdout: first line is the status-bar title, everything
//! after `---` is the dropdown menu. Lines use the host's `text | key=value`
//! directive syntax; submenu entries are prefixed with `--`.

use chrono::{DateTime, TimeZone};
use url::Url;

use upnext_core::{Event, RsvpStatus, Section, TitleInfo};

const SEPARATOR: &str = "---";
const DECLINED_COLOR: &str = "#999999";

/// Rendering context supplied by the configuration layer.
pub struct MenuContext {
    pub web_app_url: Url,
}

/// A user-invocable action attached to a menu line.
///
/// `directive` is the host parameter string that performs the action when
/// the entry is clicked (an `href=` or `refresh=` clause).
pub struct MenuAction {
    pub label: String,
    pub directive: String,
}

/// Ordered actions for one displayed event.
pub fn actions_for(event: &Event, ctx: &MenuContext) -> Vec<MenuAction> {
    let mut event_url = ctx.web_app_url.clone();
    if let Ok(mut segments) = event_url.path_segments_mut() {
        segments.pop_if_empty().extend(["event", event.id.as_str()]);
    }

    vec![MenuAction {
        label: "Open in web app".to_string(),
        directive: format!("href={}", event_url),
    }]
}

/// Render the full plugin output for one poll cycle.
///
/// `now` supplies the timezone used for the per-event time prefixes.
pub fn render<Tz: TimeZone>(
    title: &TitleInfo,
    sections: &[Section],
    now: &DateTime<Tz>,
    ctx: &MenuContext,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut lines = Vec::new();

    lines.push(sanitize(&title.short));
    lines.push(format!("{} | alternate=true", sanitize(&title.long)));
    lines.push(SEPARATOR.to_string());

    for section in sections {
        lines.push(section.kind.label().to_string());
        for event in &section.events {
            lines.push(event_line(event, now));
            for action in actions_for(event, ctx) {
                lines.push(format!("-- {} | {}", sanitize(&action.label), action.directive));
            }
        }
    }

    if !sections.is_empty() {
        lines.push(SEPARATOR.to_string());
    }
    lines.push(format!("Open web app | href={}", ctx.web_app_url));
    lines.push("Refresh | refresh=true".to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn event_line<Tz: TimeZone>(event: &Event, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let local_start = event.start.with_timezone(&now.timezone());
    let mut line = format!(
        "{} {}",
        local_start.format("%H:%M"),
        sanitize(event.display_title())
    );
    if matches!(event.rsvp, RsvpStatus::Declined | RsvpStatus::NotResponded) {
        line.push_str(&format!(" | color={}", DECLINED_COLOR));
    }
    line
}

/// Keep titles from being parsed as host directives.
fn sanitize(s: &str) -> String {
    s.replace('|', "¦")
}
