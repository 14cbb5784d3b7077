//! End-of-session sharing: post text, social intent link and the fixed
//! 1080x1080 score card layout. Everything is generated locally; the wasm
//! shell only paints the layout and hands results to the page.

use std::str::FromStr;

use crate::engine::Summary;
use crate::error::DanceError;

pub const TITLE: &str = "Dance with Tanssi";
pub const CARD_SIZE: u32 = 1080;
pub const CARD_HASHTAGS: &str = "#DanceWithTanssi #Web3Gaming #TanssiNetwork";
pub const POST_HASHTAGS: &str = "#DanceWithTanssi #Web3Gaming #TanssiNetwork #RhythmGame";
const INTENT_BASE: &str = "https://twitter.com/intent/tweet?text=";

/// Diagonal background gradient (offset, color).
pub const CARD_GRADIENT: [(f64, &str); 3] = [(0.0, "#1a1a2e"), (0.5, "#16213e"), (1.0, "#0f0f23")];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareTarget {
    Twitter,
    Download,
    Copy,
}

impl FromStr for ShareTarget {
    type Err = DanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "twitter" | "x" => Ok(ShareTarget::Twitter),
            "download" => Ok(ShareTarget::Download),
            "copy" => Ok(ShareTarget::Copy),
            _ => Err(DanceError::UnknownShareTarget(s.to_string())),
        }
    }
}

/// One centered text line on the score card.
#[derive(Clone, Debug, PartialEq)]
pub struct CardLine {
    pub text: String,
    pub font: &'static str,
    pub color: &'static str,
    /// Baseline y in card pixels; x is always the card center.
    pub y: f64,
}

impl CardLine {
    fn new(text: impl Into<String>, font: &'static str, color: &'static str, y: f64) -> Self {
        Self { text: text.into(), font, color, y }
    }
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn share_text(summary: &Summary) -> String {
    format!(
        "Just scored {} points in {TITLE}! 🕺💃\n\n\
         Max Combo: {}x\n\
         Accuracy: {}%\n\n\
         Learning Web3 infrastructure through rhythm gaming! 🚀\n\n\
         {POST_HASHTAGS}",
        group_thousands(summary.score),
        summary.max_combo,
        summary.accuracy
    )
}

pub fn intent_url(summary: &Summary) -> String {
    format!("{INTENT_BASE}{}", urlencoding::encode(&share_text(summary)))
}

pub fn download_filename(summary: &Summary) -> String {
    format!("dance-with-tanssi-score-{}.png", summary.score)
}

pub fn card_layout(summary: &Summary) -> Vec<CardLine> {
    vec![
        CardLine::new(TITLE, "bold 72px Arial", "#ffffff", 150.0),
        CardLine::new(group_thousands(summary.score), "bold 96px Arial", "#a855f7", 300.0),
        CardLine::new("Score", "48px Arial", "#ffffff", 360.0),
        CardLine::new(format!("{}x Max Combo", summary.max_combo), "36px Arial", "#ffffff", 450.0),
        CardLine::new(format!("{}% Accuracy", summary.accuracy), "36px Arial", "#ffffff", 500.0),
        CardLine::new("Master Web3 Infrastructure", "bold 42px Arial", "#60a5fa", 600.0),
        CardLine::new("Through Rhythm Gaming!", "bold 42px Arial", "#60a5fa", 660.0),
        CardLine::new(CARD_HASHTAGS, "32px Arial", "#9ca3af", 750.0),
    ]
}
