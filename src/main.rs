use clap::Parser;
use i18n_printer::{Arg, Printer, plural, preprocess};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Format a message for a locale, optionally choosing the template with plural cases.
#[derive(Parser, Debug)]
#[command(name = "i18n-printf", version, about)]
struct Cli {
    /// Locale to format for (e.g. en, fr, de-AT)
    #[arg(short, long, default_value = "en")]
    locale: String,

    /// Plural case: an expression such as "[1]d=1" followed by its template
    #[arg(short, long = "case", num_args = 2, value_names = ["EXPR", "TEMPLATE"])]
    cases: Vec<String>,

    /// Print the resolved template and arguments as JSON instead of formatting
    #[arg(long)]
    explain: bool,

    /// Default template
    format: String,

    /// Positional arguments; integers, floats and true/false are recognised
    #[arg(allow_negative_numbers = true)]
    args: Vec<String>,
}

fn parse_arg(raw: &str) -> Arg {
    if let Ok(value) = raw.parse::<i64>() {
        return Arg::Int(value);
    }
    if let Ok(value) = raw.parse::<u64>() {
        return Arg::Uint(value);
    }
    if raw.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(value) = raw.parse::<f64>() {
            return Arg::Float(value);
        }
    }
    match raw {
        "true" => Arg::Bool(true),
        "false" => Arg::Bool(false),
        _ => Arg::Str(raw.to_string()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut args: Vec<Arg> = cli.args.iter().map(|raw| parse_arg(raw)).collect();
    if !cli.cases.is_empty() {
        args.push(Arg::Plural(plural(&cli.cases)));
    }

    if cli.explain {
        let resolved = preprocess(&cli.format, &args)?;
        let explanation = json!({
            "locale": cli.locale,
            "format": resolved.format,
            "args": resolved.args,
        });
        println!("{}", serde_json::to_string_pretty(&explanation)?);
        return Ok(());
    }

    let printer = Printer::new(cli.locale.as_str());
    println!("{}", printer.sprintf(&cli.format, &args)?);
    Ok(())
}
