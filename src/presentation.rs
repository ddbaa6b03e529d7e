//! Display rules shared by every renderer: risk severity colors, summary
//! bullets, answer formatting.

#[cfg(test)]
#[path = "presentation_test.rs"]
mod presentation_test;

use crate::net::types::Answer;

/// Maximum number of summary bullets shown.
pub const MAX_SUMMARY_BULLETS: usize = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    High,
    Medium,
    Low,
    /// No weight supplied.
    Unrated,
}

impl Severity {
    /// Case-insensitive match on the backend's weight label.
    #[must_use]
    pub fn from_weight(weight: Option<&str>) -> Self {
        let Some(weight) = weight.map(str::trim).filter(|w| !w.is_empty()) else {
            return Self::Unrated;
        };
        if weight.eq_ignore_ascii_case("high") {
            Self::High
        } else if weight.eq_ignore_ascii_case("medium") {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Background color: High `#dc6161`, Medium `#fff0b3`, Low `#e8ffe8`,
    /// Unrated `#dddddd`.
    #[must_use]
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::High => (0xdc, 0x61, 0x61),
            Self::Medium => (0xff, 0xf0, 0xb3),
            Self::Low => (0xe8, 0xff, 0xe8),
            Self::Unrated => (0xdd, 0xdd, 0xdd),
        }
    }
}

/// Split a summary into display bullets: blank lines dropped, a leading
/// `-` and the spaces after it stripped, at most [`MAX_SUMMARY_BULLETS`].
#[must_use]
pub fn summary_bullets(summary: &str) -> Vec<&str> {
    summary
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let line = line.trim();
            line.strip_prefix('-').map_or(line, |rest| rest.trim_start_matches(' '))
        })
        .take(MAX_SUMMARY_BULLETS)
        .collect()
}

/// Score rendered with three decimals, if the backend supplied one.
#[must_use]
pub fn format_score(answer: &Answer) -> Option<String> {
    answer.score.map(|score| format!("{score:.3}"))
}
