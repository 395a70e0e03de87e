use crate::engine::{self, Grammar, InputFeatures, StageMetrics};
use crate::error::Result;
use crate::{CanonicalDate, DateOrder, RawCapture, ResolvedTriple};
use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::time::Instant;
use tracing::debug;

static DEFAULT_PARSER: Lazy<HdateParser> = Lazy::new(HdateParser::default);

/// Text treated as "ongoing" when empty input is allowed.
const ONGOING: &str = "ongoing";

/// Parsing context.
///
/// Holds the environment needed to resolve open-ended descriptions
/// ("ongoing").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    /// Day that "ongoing" is anchored to.
    pub today: NaiveDate,
}

impl Context {
    pub fn at(today: NaiveDate) -> Self {
        Context { today }
    }
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) {
            Self { today: NaiveDate::from_ymd_opt(2013, 2, 12).unwrap_or_default() }
        } else {
            Self { today: Local::now().date_naive() }
        }
    }
}

/// Options that affect parsing/resolution behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Options {
    /// Read empty input as "ongoing" instead of rejecting it.
    pub missing_as_ongoing: bool,
    /// How numeric day/month prefixes are ordered.
    pub date_order: DateOrder,
    /// Fill `calendar_date` for dates before 1 CE. When off, BCE results
    /// carry only their ordinal.
    pub supports_native_bce_date: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options { missing_as_ongoing: false, date_order: DateOrder::Default, supports_native_bce_date: true }
    }
}

/// Everything one parse produced, stage by stage.
///
/// Returned by [`HdateParser::parse_verbose`]; meant for debugging and the
/// CLI's report, the plain [`parse`] path does not build it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseDetails {
    /// The text that was matched (after empty-input substitution).
    pub text: String,
    pub features: InputFeatures,
    pub raw: RawCapture,
    pub canonical: CanonicalDate,
    pub triple: ResolvedTriple,
    pub metrics: StageMetrics,
}

/// A configured parser. Cheap to build and to copy; holds no per-parse state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HdateParser {
    options: Options,
    grammar: Grammar,
}

impl HdateParser {
    pub fn new(options: Options) -> Self {
        HdateParser { options, grammar: Grammar::new(options.date_order) }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Match `text` without interpreting it.
    pub fn capture(&self, text: &str) -> Result<RawCapture> {
        self.grammar.capture(self.effective_text(text))
    }

    /// Match and normalise `text`.
    pub fn canonicalize(&self, text: &str) -> Result<CanonicalDate> {
        engine::canonicalize(&self.capture(text)?)
    }

    /// Parse `text` with a default [`Context`].
    pub fn parse(&self, text: &str) -> Result<ResolvedTriple> {
        self.parse_at(text, &Context::default())
    }

    /// Parse `text`, anchoring "ongoing" to `context.today`.
    pub fn parse_at(&self, text: &str, context: &Context) -> Result<ResolvedTriple> {
        let canonical = self.canonicalize(text)?;
        engine::resolve(&canonical, context, &self.options)
    }

    /// Parse `text` and keep every intermediate form plus stage timings.
    pub fn parse_verbose(&self, text: &str, context: &Context) -> Result<ParseDetails> {
        let started = Instant::now();
        let text = self.effective_text(text);

        let stage = Instant::now();
        let features = InputFeatures::scan(text);
        let raw = self.grammar.capture_scanned(text, features)?;
        let capture = stage.elapsed();

        let stage = Instant::now();
        let canonical = engine::canonicalize(&raw)?;
        let canonicalize = stage.elapsed();

        let stage = Instant::now();
        let triple = engine::resolve(&canonical, context, &self.options)?;
        let resolve = stage.elapsed();

        let metrics = StageMetrics { capture, canonicalize, resolve, total: started.elapsed() };
        debug!(input = text, total_us = metrics.total.as_micros() as u64, "parsed verbosely");

        Ok(ParseDetails { text: text.to_string(), features, raw, canonical, triple, metrics })
    }

    fn effective_text<'a>(&self, text: &'a str) -> &'a str {
        if self.options.missing_as_ongoing && text.trim().is_empty() { ONGOING } else { text }
    }
}

pub(crate) fn default_parser() -> &'static HdateParser {
    &DEFAULT_PARSER
}

/// Parse `text` with default [`Options`] and a default [`Context`].
///
/// # Example
/// ```
/// use hdate::parse;
///
/// let triple = parse("circa 1066-6-24").unwrap();
/// assert!(triple.early.ordinal < triple.mid.ordinal);
/// ```
pub fn parse(text: &str) -> Result<ResolvedTriple> {
    DEFAULT_PARSER.parse(text)
}

/// Parse `text` with the provided `context`/`options`.
///
/// Use this when you want deterministic "ongoing" results by supplying the
/// reference day.
pub fn parse_with(text: &str, context: &Context, options: &Options) -> Result<ResolvedTriple> {
    HdateParser::new(*options).parse_at(text, context)
}

/// Like [`parse_with`], but returns every intermediate stage.
pub fn parse_verbose_with(text: &str, context: &Context, options: &Options) -> Result<ParseDetails> {
    HdateParser::new(*options).parse_verbose(text, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParseError, Precision};

    fn reference_context() -> Context {
        Context::at(NaiveDate::from_ymd_opt(2020, 6, 1).unwrap())
    }

    #[test]
    fn parse_with_uses_the_supplied_context() {
        let triple = parse_with("ongoing", &reference_context(), &Options::default()).unwrap();
        assert_eq!(triple.mid.naive_date(), NaiveDate::from_ymd_opt(2020, 6, 1));
        assert_eq!(triple.mid.precision, Precision::Ongoing);
    }

    #[test]
    fn empty_input_depends_on_missing_as_ongoing() {
        assert_eq!(parse("  "), Err(ParseError::format("  ")));

        let options = Options { missing_as_ongoing: true, ..Options::default() };
        let triple = parse_with("", &reference_context(), &options).unwrap();
        assert!(triple.is_ongoing());
    }

    #[test]
    fn parser_respects_date_order() {
        let mdy = HdateParser::new(Options { date_order: DateOrder::Mdy, ..Options::default() });
        let dmy = HdateParser::new(Options { date_order: DateOrder::Dmy, ..Options::default() });
        assert_eq!(mdy.parse("12/25/1066").unwrap(), dmy.parse("25/12/1066").unwrap());
        assert!(HdateParser::default().parse("25/12/1066").is_err());
    }

    #[test]
    fn parse_verbose_includes_every_stage() {
        let details = parse_verbose_with("c. 287BC", &reference_context(), &Options::default()).unwrap();

        assert_eq!(details.text, "c. 287BC");
        assert!(details.features.contains(InputFeatures::CIRCA_MARKER | InputFeatures::ERA_MARKER));
        assert_eq!(details.raw.get("midyear"), Some("287"));
        assert!(details.canonical.circa);
        assert_eq!(details.triple, parse("c. 287BC").unwrap());
        assert!(details.metrics.capture + details.metrics.resolve <= details.metrics.total);
    }

    #[test]
    fn verbose_and_plain_parse_fail_alike() {
        let context = reference_context();
        for input in ["Dec 1066-12", "after 500 bc", "not a date"] {
            let plain = HdateParser::default().parse_at(input, &context);
            let verbose = HdateParser::default().parse_verbose(input, &context);
            assert_eq!(plain.err(), verbose.err(), "input: {input}");
        }
    }
}
