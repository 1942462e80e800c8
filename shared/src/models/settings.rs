//! Display Settings Model
//!
//! Presentation-only settings for the message banner. Never consulted by
//! evaluation logic. Missing fields fill from defaults on deserialization
//! so partially-saved settings records stay readable.

use serde::{Deserialize, Serialize};

/// Where the host should render the message banner
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessagePosition {
    #[default]
    AboveCart,
    AboveTotals,
    BelowTotals,
    InsideTotals,
}

/// Banner color scheme (CSS color strings)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageColors {
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_text")]
    pub text: String,
    #[serde(default = "default_border")]
    pub border: String,
    #[serde(default = "default_success")]
    pub success: String,
    #[serde(default = "default_threshold")]
    pub threshold: String,
}

fn default_background() -> String {
    "#f8f8f8".to_string()
}

fn default_text() -> String {
    "#333333".to_string()
}

fn default_border() -> String {
    "#dddddd".to_string()
}

fn default_success() -> String {
    "#28a745".to_string()
}

fn default_threshold() -> String {
    "#ffc107".to_string()
}

impl Default for MessageColors {
    fn default() -> Self {
        Self {
            background: default_background(),
            text: default_text(),
            border: default_border(),
            success: default_success(),
            threshold: default_threshold(),
        }
    }
}

/// Message banner settings record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplaySettings {
    #[serde(default)]
    pub message_position: MessagePosition,
    #[serde(default)]
    pub colors: MessageColors,
}
