//! rest-query CLI
//!
//! Loads an endpoint declaration from TOML, compiles one client request against
//! it and prints the SQL with its parameter map as JSON. Nothing is executed.
//!
//! ```text
//! rest-query --config users.toml --fields name,age --filter 'age>=18' --sort -age
//! rest-query --config users.toml --filter 'age>=18' --count
//! rest-query --config users.toml --fields company_id --count-subquery
//! ```

use anyhow::Context;
use clap::Parser;
use rest_query::{CompiledQuery, Config, Request, compile, compile_count, compile_count_subquery};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Compile a REST list request into parameterized SQL
#[derive(Parser, Debug)]
#[command(name = "rest-query")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the endpoint declaration (TOML)
    #[arg(long, short)]
    config: PathBuf,

    /// Comma-separated fields to select
    #[arg(long, default_value = "")]
    fields: String,

    /// Comma-separated `field<op>value` filters
    #[arg(long, default_value = "")]
    filter: String,

    /// Comma-separated `[+|-]field` sort tokens
    #[arg(long, alias = "order", default_value = "", allow_hyphen_values = true)]
    sort: String,

    /// Free-text search term
    #[arg(long, default_value = "")]
    search: String,

    /// Page size (0 means the endpoint's cap)
    #[arg(long, default_value_t = 0)]
    limit: u32,

    /// Rows to skip
    #[arg(long, default_value_t = 0)]
    offset: u32,

    /// Compile a direct count of TARGET instead of the listing
    #[arg(long, value_name = "TARGET", num_args = 0..=1, default_missing_value = "*")]
    count: Option<String>,

    /// Compile a count over the projected listing
    #[arg(long, conflicts_with = "count")]
    count_subquery: bool,

    /// Include debug details in rejected-request output
    #[arg(long, short)]
    verbose: bool,
}

impl Args {
    fn request(&self) -> Request {
        Request::new()
            .fields(self.fields.as_str())
            .filter(self.filter.as_str())
            .sort(self.sort.as_str())
            .search(self.search.as_str())
            .limit(self.limit)
            .offset(self.offset)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rest_query=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

fn run(args: &Args) -> anyhow::Result<ExitCode> {
    let config = Config::from_toml_file(&args.config)
        .with_context(|| format!("loading endpoint declaration {}", args.config.display()))?;
    info!(table = %config.table, fields = config.fields.len(), "loaded endpoint");

    let request = args.request();
    debug!(count = ?args.count, subquery = args.count_subquery, "compiling request");

    let result = match (&args.count, args.count_subquery) {
        (Some(target), _) => compile_count(&config, &request, target),
        (None, true) => compile_count_subquery(&config, &request),
        (None, false) => compile(&config, &request),
    };

    match result {
        Ok(query) => {
            print_query(&query)?;
            Ok(ExitCode::SUCCESS)
        },
        Err(err) => {
            let body = serde_json::to_string_pretty(&err.to_body(args.verbose))
                .context("serializing error body")?;
            eprintln!("{body}");
            Ok(ExitCode::from(2))
        },
    }
}

fn print_query(query: &CompiledQuery) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(query).context("serializing compiled query")?;
    println!("{json}");
    Ok(())
}
