use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};
use wtftz::{Converter, UnknownZonePolicy, ZoneTable};

const LONG_ABOUT: &str = "\
Convert a timestamp from one timezone to another.

The query is free text: a timestamp followed by optional source and
destination zones. Timestamps may be epoch seconds, ISO-8601, bare times
or natural-language dates, and a zone abbreviation embedded in the
timestamp itself is picked up too.

EXAMPLES:
  wtftz 1355182310 from utc to pst
  wtftz \"2012-12-23T14:23:03.826437-05:00 to pst\"
  wtftz \"Mon Dec 10 23:31:50 EST 2012 to UTC\"
  wtftz 10pm --from utc --to pacific

Unknown zone names fall back to UTC (use --strict to fail instead).";

#[derive(Parser)]
#[command(name = "wtftz")]
#[command(version)]
#[command(about = "Convert a timestamp from one timezone to another")]
#[command(long_about = LONG_ABOUT)]
struct Cli {
    /// Free-text query, e.g. "1355182310 from utc to pst"
    #[arg(required = true)]
    query: Vec<String>,

    /// Source zone; overrides anything extracted from the query
    #[arg(long)]
    from: Option<String>,

    /// Destination zone; overrides anything extracted from the query
    #[arg(long)]
    to: Option<String>,

    /// Keep the UTC offset on the result instead of printing wall-clock time
    #[arg(long)]
    zoned: bool,

    /// Fail on unknown zone names instead of falling back to UTC
    #[arg(long)]
    strict: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let query = cli.query.join(" ");

    let policy = if cli.strict {
        UnknownZonePolicy::Strict
    } else {
        UnknownZonePolicy::Utc
    };
    let converter = Converter::new(ZoneTable::with_common_zones(), policy);

    let result = if cli.from.is_some() || cli.to.is_some() {
        converter.convert(
            query.as_str(),
            cli.to.as_deref().unwrap_or("utc"),
            cli.from.as_deref().unwrap_or("utc"),
            !cli.zoned,
        )
    } else {
        converter.convert_free(&query, !cli.zoned)
    }
    .with_context(|| format!("cannot convert {query:?}"))?;

    if cli.json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        println!("{result}");
    }
    Ok(())
}
