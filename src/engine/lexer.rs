//! Token scanners.
//!
//! The grammar (`grammar.rs`) walks the input with a [`Cursor`] and asks the
//! scanners below for one token at a time. Every scanner either consumes a
//! whole token and returns its text, or leaves the cursor exactly where it
//! was and returns `None`, so callers can try alternatives by copying the
//! cursor.
//!
//! Digit and letter runs are always read to their end: `1066` is never split
//! into a day `10` and a year `66`, and `march` is never read as `mar` + `ch`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::Era;

/// English month names and their three-letter abbreviations.
pub(crate) static MONTH_NAME: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    let mut names = HashMap::with_capacity(24);
    for (idx, &name) in MONTHS.iter().enumerate() {
        let number = idx as u32 + 1;
        names.insert(name, number);
        names.insert(&name[..3], number);
    }
    names
});

/// Month number for a name, looked up by its first three letters.
pub(crate) fn month_number(name: &str) -> Option<u32> {
    let lowered = name.to_ascii_lowercase();
    MONTH_NAME.get(lowered.get(..3)?).copied()
}

/// Position in the input being matched. `Copy`, so a failed alternative is
/// undone by restoring an earlier copy.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor { input, pos: 0 }
    }

    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn next_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume a match of `re` (which must be `^`-anchored).
    pub fn eat(&mut self, re: &Regex) -> Option<&'a str> {
        let found = re.find(self.rest())?;
        self.pos += found.end();
        Some(found.as_str())
    }

    /// Consume a match of `re` and return its capture groups.
    pub fn eat_captures(&mut self, re: &Regex) -> Option<regex::Captures<'a>> {
        let rest = self.rest();
        let caps = re.captures(rest)?;
        self.pos += caps.get(0)?.end();
        Some(caps)
    }

    /// Skip whitespace. Returns whether anything was skipped.
    pub fn skip_whitespace(&mut self) -> bool {
        self.eat(regex!(r"^\s+")).is_some()
    }
}

/// A run of digits no longer than `max_digits`.
pub(crate) fn number<'a>(cursor: &mut Cursor<'a>, max_digits: usize) -> Option<&'a str> {
    let mut attempt = *cursor;
    let digits = attempt.eat(regex!(r"^[0-9]+"))?;
    if digits.len() > max_digits {
        return None;
    }
    *cursor = attempt;
    Some(digits)
}

/// A run of ASCII letters.
pub(crate) fn word<'a>(cursor: &mut Cursor<'a>) -> Option<&'a str> {
    cursor.eat(regex!(r"^[A-Za-z]+"))
}

/// A full or three-letter English month name, any case.
pub(crate) fn month_name<'a>(cursor: &mut Cursor<'a>) -> Option<&'a str> {
    let mut attempt = *cursor;
    let name = word(&mut attempt)?;
    if !MONTH_NAME.contains_key(name.to_ascii_lowercase().as_str()) {
        return None;
    }
    *cursor = attempt;
    Some(name)
}

/// `st`, `nd`, `rd` or `th` after a day number.
pub(crate) fn ordinal_suffix<'a>(cursor: &mut Cursor<'a>) -> Option<&'a str> {
    cursor.eat(regex!(r"(?i)^(?:st|nd|rd|th)"))
}

/// Optional whitespace followed by an era marker.
pub(crate) fn era<'a>(cursor: &mut Cursor<'a>) -> Option<&'a str> {
    let mut attempt = *cursor;
    attempt.skip_whitespace();
    let marker = word(&mut attempt)?;
    Era::from_token(marker)?;
    *cursor = attempt;
    Some(marker)
}

/// One of `keywords` as a whole word, any case.
pub(crate) fn keyword<'a>(cursor: &mut Cursor<'a>, keywords: &[&str]) -> Option<&'a str> {
    let mut attempt = *cursor;
    let found = word(&mut attempt)?;
    if !keywords.iter().any(|kw| kw.eq_ignore_ascii_case(found)) {
        return None;
    }
    *cursor = attempt;
    Some(found)
}

/// `circa`, `c`, `c.`, `about` or `estimated`, not followed by a letter.
pub(crate) fn circa_marker<'a>(cursor: &mut Cursor<'a>) -> Option<&'a str> {
    let mut attempt = *cursor;
    let marker = attempt.eat(regex!(r"(?i)^(?:circa|about|estimated|c\.?)"))?;
    if attempt.next_char().is_some_and(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    *cursor = attempt;
    Some(marker)
}

/// Circa interval written straight after the marker: `2y`, `18m`, `40d`.
pub(crate) fn circa_length<'a>(cursor: &mut Cursor<'a>) -> Option<(&'a str, &'a str)> {
    let mut attempt = *cursor;
    let caps = attempt.eat_captures(regex!(r"^([0-9]{1,8})([ymdYMD])"))?;
    if attempt.next_char().is_some_and(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    let magnitude = caps.get(1)?.as_str();
    let unit = caps.get(2)?.as_str();
    *cursor = attempt;
    Some((magnitude, unit))
}

/// `-MM` or `-MM-DD` glued to a year.
pub(crate) fn numeric_suffix<'a>(cursor: &mut Cursor<'a>) -> Option<(&'a str, Option<&'a str>)> {
    let mut attempt = *cursor;
    let caps = attempt.eat_captures(regex!(r"^-([0-9]{1,2})(?:-([0-9]{1,2}))?"))?;
    if attempt.next_char().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    let month = caps.get(1)?.as_str();
    let day = caps.get(2).map(|m| m.as_str());
    *cursor = attempt;
    Some((month, day))
}

/// Optional punctuation between prefix components: whitespace, and at most
/// one of `/`, `-`, `.` or `,`. May match nothing.
pub(crate) fn separator(cursor: &mut Cursor<'_>) {
    cursor.eat(regex!(r"^\s*[/\-.,]?\s*"));
}
