//! Trigger scanning (input pre-classification).
//!
//! Looks at the raw text once and records which kinds of token occur in it.
//! The grammar uses these signals to skip alternatives that cannot match
//! (no month name anywhere means no month-name prefix is worth trying), and
//! `parse_verbose` reports them.
//!
//! The scan is a heuristic. False positives are fine because the grammar
//! still has to match the whole input; a false negative would reject valid
//! input, so every signal is at least as loose as the scanner it gates.

use bitflags::bitflags;
use serde::Serialize;

use super::grammar::{EARLY_KEYWORDS, LATE_KEYWORDS};
use super::lexer::MONTH_NAME;
use crate::Era;

bitflags! {
    /// Coarse input characteristics.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    #[serde(transparent)]
    pub struct InputFeatures: u16 {
        const HAS_DIGITS    = 1 << 0;
        const MONTHISH      = 1 << 1;
        const ERA_MARKER    = 1 << 2;
        const CIRCA_MARKER  = 1 << 3;
        const RANGE_KEYWORD = 1 << 4;
        const ONGOING       = 1 << 5;
    }
}

impl InputFeatures {
    /// Scan `input` for coarse signals.
    pub fn scan(input: &str) -> Self {
        let mut features = InputFeatures::empty();

        if input.bytes().any(|b| b.is_ascii_digit()) {
            features |= InputFeatures::HAS_DIGITS;
        }

        for word in regex!(r"[A-Za-z]+").find_iter(input) {
            let lower = word.as_str().to_ascii_lowercase();
            let lower = lower.as_str();

            if MONTH_NAME.contains_key(lower) {
                features |= InputFeatures::MONTHISH;
            }
            if Era::from_token(lower).is_some() {
                features |= InputFeatures::ERA_MARKER;
            }
            if matches!(lower, "c" | "circa" | "about" | "estimated") {
                features |= InputFeatures::CIRCA_MARKER;
            }
            if EARLY_KEYWORDS.contains(&lower) || LATE_KEYWORDS.contains(&lower) {
                features |= InputFeatures::RANGE_KEYWORD;
            }
            if lower == "ongoing" {
                features |= InputFeatures::ONGOING;
            }
        }

        features
    }

    /// Names of the set flags, for reports.
    pub fn labels(&self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}
