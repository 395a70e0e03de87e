mod report;

use chrono::NaiveDate;
use clap::Parser;
use hdate::{Context, DateOrder, HdateParser, Options};
use report::ansi::Palette;
use serde_json::json;
use std::io::{self, BufRead, IsTerminal};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "hdate",
    version,
    about = "Parse historical date descriptions into early/mid/late days",
    after_help = "Exit codes:\n  0  Every input parsed.\n  1  At least one input failed to parse.\n  2  Invalid arguments."
)]
struct Cli {
    /// Description to parse, e.g. "circa 1066-6-24" or "between 500 and 400BC".
    /// Reads one description per line from stdin when omitted.
    input: Vec<String>,

    /// Order of numeric day/month prefixes.
    #[arg(long, value_name = "default|dmy|mdy", default_value = "default")]
    order: DateOrder,

    /// Treat empty input as "ongoing".
    #[arg(long)]
    missing_as_ongoing: bool,

    /// Leave BCE results without a calendar date (ordinal only).
    #[arg(long)]
    legacy_bce: bool,

    /// Day that "ongoing" is anchored to. Default: the local date.
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,

    /// Print one JSON object per input.
    #[arg(long)]
    json: bool,

    /// Show the raw capture, canonical form and stage timings.
    #[arg(long, short)]
    verbose: bool,

    /// Force ANSI color output.
    #[arg(long, overrides_with = "no_color")]
    color: bool,

    /// Disable ANSI color output.
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let options = Options {
        missing_as_ongoing: cli.missing_as_ongoing,
        date_order: cli.order,
        supports_native_bce_date: !cli.legacy_bce,
    };
    let context = cli.today.map(Context::at).unwrap_or_default();
    let parser = HdateParser::new(options);
    let color = if cli.no_color { false } else { cli.color || io::stdout().is_terminal() };
    let palette = Palette::new(color && !cli.json);

    let inputs = match read_inputs(&cli.input) {
        Ok(inputs) => inputs,
        Err(err) => {
            error!(%err, "failed to read stdin");
            return ExitCode::from(2);
        }
    };
    debug!(count = inputs.len(), ?options, today = %context.today, "parsing");

    let mut failed = 0usize;
    for input in &inputs {
        let outcome = parser.parse_verbose(input, &context);
        if outcome.is_err() {
            failed += 1;
        }

        match (&outcome, cli.json) {
            (Ok(details), true) => match serde_json::to_value(details) {
                Ok(value) => println!("{value}"),
                Err(err) => error!(%err, input = input.as_str(), "failed to serialize result"),
            },
            (Err(err), true) => {
                println!("{}", json!({ "text": input, "error": err.to_string(), "kind": format!("{:?}", err.kind()) }));
            }
            (Ok(details), false) => report::print_parse(details, &palette, cli.verbose),
            (Err(err), false) => report::print_error(input, err, &palette),
        }
    }

    if failed > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

/// Arguments joined into one description, or stdin lines when there are none.
fn read_inputs(args: &[String]) -> io::Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(vec![args.join(" ")]);
    }

    let mut inputs = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            inputs.push(line);
        }
    }
    Ok(inputs)
}
