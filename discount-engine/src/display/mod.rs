//! Message banner rendering
//!
//! Turns the session's collected messages plus the display settings into
//! structured banner data, at most once per evaluation pass. HTML/CSS is
//! the host's job; the engine only resolves positions and colors.

use crate::evaluation::{CartSession, MessageKind};
use serde::{Deserialize, Serialize};
use shared::models::{DisplaySettings, MessagePosition};

/// One banner line with its resolved accent color
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BannerEntry {
    pub text: String,
    pub kind: MessageKind,
    /// Success or threshold color, by kind
    pub accent: String,
}

/// Color-resolved banner ready for the host to render
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageBanner {
    pub position: MessagePosition,
    pub background: String,
    pub text_color: String,
    pub border: String,
    pub entries: Vec<BannerEntry>,
}

/// Build the banner for the session's messages
///
/// Returns `None` when there is nothing to show or the current pass
/// already rendered; otherwise latches the session so repeated display
/// hooks within one pass render once.
pub fn render_messages(
    settings: &DisplaySettings,
    session: &mut CartSession,
) -> Option<MessageBanner> {
    if session.messages.is_empty() || !session.latch_rendered() {
        return None;
    }

    let colors = &settings.colors;
    let entries = session
        .messages
        .iter()
        .map(|m| BannerEntry {
            text: m.text.clone(),
            kind: m.kind,
            accent: match m.kind {
                MessageKind::Success => colors.success.clone(),
                MessageKind::Threshold => colors.threshold.clone(),
            },
        })
        .collect();

    Some(MessageBanner {
        position: settings.message_position,
        background: colors.background.clone(),
        text_color: colors.text.clone(),
        border: colors.border.clone(),
        entries,
    })
}
