//! Text and time-distance helpers for title rendering.
//!
//! The exact strings produced here are product rules: the status bar has a
//! fixed character budget and the relative-time abbreviations are pinned by
//! the tests below, not derived from a generic duration formatter.

use chrono::{DateTime, Utc};
use unicode_segmentation::UnicodeSegmentation;

/// Grapheme budget for the short (status bar) title rendering.
pub const SHORT_TITLE_GRAPHEMES: usize = 15;

/// Strip leading and trailing emoji grapheme clusters from a title, along
/// with the whitespace they leave behind.
///
/// Interior emoji are kept: "🎉 Team Sync" becomes "Team Sync", but
/// "Deploy 🚀 party" is untouched.
pub fn strip_emoji(s: &str) -> String {
    let graphemes: Vec<&str> = s.graphemes(true).collect();

    let start = graphemes
        .iter()
        .position(|g| !is_emoji_grapheme(g) && !g.trim().is_empty())
        .unwrap_or(graphemes.len());
    let end = graphemes
        .iter()
        .rposition(|g| !is_emoji_grapheme(g) && !g.trim().is_empty())
        .map(|i| i + 1)
        .unwrap_or(start);

    graphemes[start..end].concat()
}

/// Truncate to `max` grapheme clusters, appending an ellipsis when the
/// input was longer.
pub fn truncate(s: &str, max: usize) -> String {
    let graphemes: Vec<&str> = s.graphemes(true).collect();
    if graphemes.len() <= max {
        return s.to_string();
    }
    let mut out = graphemes[..max].concat();
    out.push('…');
    out
}

/// Human-readable distance from `from` to `to`, e.g. "in 45 minutes".
///
/// Minutes are rounded to the nearest whole minute so an event starting in
/// exactly 45 minutes reads "in 45 minutes" even a second later; hours and
/// days round down.
pub fn humanize_until(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let secs = (to - from).num_seconds();
    if secs <= 0 {
        return "now".to_string();
    }
    if secs < 60 {
        return "in less than a minute".to_string();
    }

    let minutes = (secs + 30) / 60;
    if minutes < 60 {
        return match minutes {
            1 => "in 1 minute".to_string(),
            n => format!("in {} minutes", n),
        };
    }

    let hours = secs / 3600;
    if hours < 24 {
        return match hours.max(1) {
            1 => "in 1 hour".to_string(),
            n => format!("in {} hours", n),
        };
    }

    match secs / 86400 {
        1 => "in 1 day".to_string(),
        n => format!("in {} days", n),
    }
}

/// Compress a human time phrase into its compact status-bar form.
///
/// "in 45 minutes" → "in 45 min". The abbreviation table is exact; words
/// not in the table pass through unchanged.
pub fn compact_distance(s: &str) -> String {
    s.split_whitespace()
        .map(|word| match word {
            "minutes" | "minute" => "min",
            "hours" => "hrs",
            "hour" => "hr",
            "seconds" | "second" => "sec",
            other => other,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether a grapheme cluster is an emoji glyph.
///
/// Covers the pictographic blocks plus the joiners and modifiers that emoji
/// sequences are built from (ZWJ, variation selectors, skin tones, keycaps,
/// regional indicators).
fn is_emoji_grapheme(g: &str) -> bool {
    !g.is_empty()
        && g.chars().all(|c| {
            matches!(u32::from(c),
                // pictographs, emoticons, transport, flags, skin tones
                0x1F000..=0x1FAFF
                | 0x2190..=0x21FF   // arrows used as emoji (↗)
                | 0x2300..=0x23FF   // technical (⏰, ⌛)
                | 0x2600..=0x27BF   // misc symbols, dingbats
                | 0x2B00..=0x2BFF   // arrows, stars (⭐)
                | 0xFE0E..=0xFE0F   // variation selectors
                | 0x200D            // zero-width joiner
                | 0x20E3            // combining keycap
            )
        })
}
