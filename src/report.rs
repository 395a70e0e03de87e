use hdate::{ParseDetails, ParseError, ResolvedDate, Role};

pub mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

use ansi::Palette;

pub fn print_parse(details: &ParseDetails, palette: &Palette, verbose: bool) {
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Parsing: \"{}\"", details.text), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    for role in Role::ALL {
        print_date(role, details.triple.get(role), palette);
    }

    if verbose {
        println!("\n{}", palette.paint("━━━ Capture ━━━", ansi::GRAY));
        print_capture(details, palette);

        println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
        let metrics = &details.metrics;
        println!(
            "  Total: {}  │  Capture: {}  │  Canonicalize: {}  │  Resolve: {}",
            palette.paint(format!("{:?}", metrics.total), ansi::GREEN),
            palette.paint(format!("{:?}", metrics.capture), ansi::CYAN),
            palette.dim(format!("{:?}", metrics.canonicalize)),
            palette.dim(format!("{:?}", metrics.resolve)),
        );
    }
    println!();
}

pub fn print_error(input: &str, err: &ParseError, palette: &Palette) {
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Parsing: \"{}\"", input), ansi::CYAN)));
    println!("  {} {}", palette.paint(format!("✗ {:?}", err.kind()), ansi::RED), err);
    println!();
}

fn print_date(role: Role, date: &ResolvedDate, palette: &Palette) {
    let calendar = match date.calendar_date {
        Some(ymd) => palette.bold(palette.paint(ymd.to_string(), ansi::GREEN)),
        None => palette.dim("(no calendar date)"),
    };
    println!(
        "  {} {} {} {} {}",
        palette.paint(format!("{:<5}", role.to_string()), ansi::BLUE),
        calendar,
        palette.dim("│"),
        palette.paint(format!("ordinal {}", date.ordinal), ansi::YELLOW),
        palette.dim(format!("[{}]", date.precision)),
    );
}

fn print_capture(details: &ParseDetails, palette: &Palette) {
    let features = details.features.labels();
    if features.is_empty() {
        println!("  {}", palette.dim("features: none"));
    } else {
        println!("  {} {}", palette.dim("features:"), palette.paint(features.join(" | "), ansi::CYAN));
    }

    for (name, value) in details.raw.fields() {
        println!("  {} {}", palette.paint(format!("{name:>14}"), ansi::BLUE), value);
    }

    let canonical = &details.canonical;
    println!(
        "  {} calendar {}  {} circa {}  {} interval {} days",
        palette.dim("→"),
        palette.paint(canonical.calendar.to_string(), ansi::YELLOW),
        palette.dim("│"),
        canonical.circa,
        palette.dim("│"),
        canonical.circa_interval_days(),
    );
}
