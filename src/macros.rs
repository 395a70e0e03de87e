/// Compile a regex literal once and hand out a `&'static Regex`.
///
/// Every call site gets its own lazily initialised static, so scanners can
/// write `regex!(r"^[0-9]+")` inline without paying for recompilation.
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}
