//! Parsing and resolution engine.
//!
//! The engine lives in focused submodules under `src/engine/`; this file wires
//! them together and re-exports the pieces the public API needs.
//!
//! ## How the parts work together
//!
//! ```text
//! input ── InputFeatures::scan ──┐   (trigger.rs)
//!                                │
//!                                v
//!                      Grammar::capture       (grammar.rs, lexer.rs)
//!                        - whole-string match
//!                        - first prefix shape that fits
//!                                │
//!                                v
//!                           RawCapture
//!                                │
//!                                v
//!                      canonicalize           (canonical.rs)
//!                        - type + merge fields
//!                        - main calendar
//!                                │
//!                                v
//!                          CanonicalDate
//!                                │
//!                                v
//!                      resolve                (resolve.rs)
//!                        - defaults, borrowing
//!                        - gap filling
//!                                │
//!                                v
//!                         ResolvedTriple
//! ```
//!
//! Every stage is a pure function of its input plus the caller's `Context`
//! and `Options`; nothing is cached between runs.
//!
//! ## Debugging
//!
//! Run with `RUST_LOG=hdate=debug` (or `trace`) to log each stage.

#[path = "engine/canonical.rs"]
mod canonical;
#[path = "engine/grammar.rs"]
mod grammar;
#[path = "engine/lexer.rs"]
mod lexer;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/trigger.rs"]
mod trigger;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub(crate) use canonical::canonicalize;
pub use grammar::Grammar;
pub use metrics::StageMetrics;
pub(crate) use resolve::resolve;
pub use trigger::InputFeatures;
