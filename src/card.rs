//! Fixed-width text card rendered from a single activity.

use crate::config::CardLayout;
use crate::feeds::{ActivityRecord, MediaListActivity, TextActivity};
use crate::time_ago::time_ago_from_epoch;

const RULE: &str = "▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔";
const ELLIPSIS: &str = "...";

/// What ends up in the gist: its description and its single file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedCard {
    pub description: String,
    pub content: String,
}

/// Pad `s` with spaces to `width` characters, keeping it in the middle.
///
/// When the padding can't be split evenly the extra space goes on the left
/// only if `width` is odd too. Strings already at or over `width` are
/// returned as is.
pub fn center(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    let right = margin - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

/// Cut `text` to `limit` characters and mark the cut with an ellipsis.
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}{}", &text[..idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Truncated, reflowed body of a text post. Every whitespace character,
/// line breaks and tabs included, becomes a plain space before wrapping.
pub fn render_text(activity: &TextActivity, layout: &CardLayout) -> String {
    let text: String = truncate(&activity.text, layout.text_limit)
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    textwrap::fill(&text, layout.body_width)
}

/// Wrap `s` to `width` and center every resulting line. Only a single word
/// longer than `width` can end up wider.
fn center_wrapped(s: &str, width: usize) -> String {
    textwrap::wrap(s, width)
        .iter()
        .map(|line| center(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn status_line(username: &str, activity: &MediaListActivity) -> String {
    format!(
        "{} {} {} of...",
        username,
        activity.status,
        activity.shown_progress().unwrap_or("all")
    )
}

pub fn render_media_list(
    username: &str,
    activity: &MediaListActivity,
    layout: &CardLayout,
) -> String {
    format!(
        "{}\n{}\n{}",
        textwrap::fill(&status_line(username, activity), layout.body_width),
        center_wrapped(&activity.media_title, layout.body_width),
        center(RULE, layout.rule_width)
    )
}

pub fn stats_line(reply_count: u32, like_count: u32, layout: &CardLayout) -> String {
    center(
        &format!("📢 {} | 💖 {}", reply_count, like_count),
        layout.body_width,
    )
}

pub fn description(phrase: &str) -> String {
    format!("🎀 AniList Activity - {}...", phrase)
}

/// Card body for a supported activity. `None` for unsupported ones.
pub fn render_content(
    username: &str,
    activity: &ActivityRecord,
    layout: &CardLayout,
) -> Option<String> {
    let (body, replies, likes) = match activity {
        ActivityRecord::Text(a) => (render_text(a, layout), a.reply_count, a.like_count),
        ActivityRecord::MediaList(a) => (
            render_media_list(username, a, layout),
            a.reply_count,
            a.like_count,
        ),
        ActivityRecord::Unsupported(_) => return None,
    };

    Some(format!("{}\n{}", body, stats_line(replies, likes, layout)))
}

/// Full card, with the relative time taken against the current clock.
pub fn render_card(
    username: &str,
    activity: &ActivityRecord,
    layout: &CardLayout,
) -> Option<PublishedCard> {
    let content = render_content(username, activity, layout)?;
    let phrase = time_ago_from_epoch(activity.created_at()?);
    Some(PublishedCard {
        description: description(&phrase),
        content,
    })
}
