//! Command-line front end.
//!
//! ```text
//! colscrape scrape https://example.org/list \
//!     --column 'Author:div:search__card__header__author.font-regular' \
//!     --column 'Link:a:card__title:link' --format json
//! colscrape inspect https://example.org/list --show-source
//! ```
//!
//! Tables go to stdout (or `--output`); trace, errors and logs go to stderr.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rs_colscrape::{export, inspect_url, scrape, ColumnSpec, Options, ResultTable, Strategy};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "colscrape", version, about = "Scrape a page into a table, one CSS class per column")]
struct Cli {
    /// More logging (-v: debug for this crate, -vv: debug everywhere)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract columns from one or more pages
    Scrape(ScrapeArgs),
    /// Report title, class names and script hints for a page
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// Retrieval strategy
    #[arg(long, default_value = "static")]
    strategy: Strategy,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 20)]
    timeout: u64,

    /// Seconds to wait for scripts after the page loads (rendered only)
    #[arg(long, default_value_t = 10)]
    wait: u64,

    /// Show the browser window (rendered only)
    #[arg(long)]
    no_headless: bool,

    /// Override the user agent
    #[arg(long)]
    user_agent: Option<String>,
}

#[derive(Args, Debug)]
struct ScrapeArgs {
    /// Page URL(s)
    #[arg(required = true)]
    urls: Vec<String>,

    /// Column as name:tag:selector[:link][:numeric]
    #[arg(short, long = "column")]
    columns: Vec<ColumnSpec>,

    /// JSON file holding an array of column specs
    #[arg(long)]
    columns_file: Option<PathBuf>,

    #[command(flatten)]
    fetch: FetchArgs,

    /// Seconds to pause between URLs
    #[arg(long, default_value_t = 3)]
    delay: u64,

    /// Skip page inspection lines in the trace
    #[arg(long)]
    no_debug: bool,

    /// Print the trace to stderr
    #[arg(long)]
    trace: bool,

    /// Save each fetched document as HTML
    #[arg(long)]
    save_raw: bool,

    /// Directory for saved documents
    #[arg(long, default_value = ".")]
    raw_dir: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Output file; with several URLs an index is added before the extension
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Page URL
    url: String,

    #[command(flatten)]
    fetch: FetchArgs,

    /// Include the start of the page source
    #[arg(long)]
    show_source: bool,

    /// Characters of page source to show
    #[arg(long, default_value_t = 2000)]
    preview_len: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl FetchArgs {
    fn apply(&self, options: &mut Options) {
        options.strategy = self.strategy;
        options.timeout = Duration::from_secs(self.timeout);
        options.render_wait = Duration::from_secs(self.wait);
        options.headless = !self.no_headless;
        if let Some(ua) = &self.user_agent {
            options.user_agent.clone_from(ua);
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn,rs_colscrape=info",
        1 => "warn,rs_colscrape=debug,colscrape=debug",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_columns(args: &ScrapeArgs) -> Result<Vec<ColumnSpec>> {
    let mut specs = Vec::new();
    if let Some(path) = &args.columns_file {
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let from_file: Vec<ColumnSpec> =
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        specs.extend(from_file);
    }
    specs.extend(args.columns.iter().cloned());

    if specs.iter().all(ColumnSpec::is_skipped) {
        bail!("no usable columns: give at least one --column with a name and a selector");
    }
    Ok(specs)
}

/// `out.csv` with index 1 of 3 becomes `out_1.csv`.
fn indexed_path(base: &Path, index: usize, total: usize) -> PathBuf {
    if total <= 1 {
        return base.to_path_buf();
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("scraped_data");
    let name = match base.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_{index}.{ext}"),
        None => format!("{stem}_{index}"),
    };
    base.with_file_name(name)
}

fn write_table(table: &ResultTable, format: Format, out: impl Write) -> Result<()> {
    match format {
        Format::Csv => export::write_csv(table, out)?,
        Format::Json => export::write_json(table, out)?,
    }
    Ok(())
}

fn run_scrape(args: &ScrapeArgs) -> Result<()> {
    let specs = load_columns(args)?;

    let mut options = Options {
        delay: Duration::from_secs(args.delay),
        debug: !args.no_debug,
        save_raw: args.save_raw,
        raw_dir: args.raw_dir.clone(),
        ..Options::default()
    };
    args.fetch.apply(&mut options);

    let total = args.urls.len();
    let mut failures = 0usize;

    for (i, url) in args.urls.iter().enumerate() {
        if i > 0 {
            tracing::debug!(delay = ?options.delay, "pausing between requests");
            std::thread::sleep(options.delay);
        }

        let outcome = scrape(url, &specs, &options);

        if args.trace {
            eprint!("{}", outcome.trace);
        }
        for error in &outcome.errors {
            eprintln!("{url}: {error}");
        }

        let Some(table) = outcome.table else {
            failures += 1;
            continue;
        };
        eprintln!("{url}: scraped {} rows", table.len());

        match &args.output {
            Some(path) => {
                let path = indexed_path(path, i + 1, total);
                let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
                write_table(&table, args.format, BufWriter::new(file))?;
            }
            None => write_table(&table, args.format, io::stdout().lock())?,
        }
    }

    if failures > 0 {
        bail!("{failures} of {total} page(s) produced no data");
    }
    Ok(())
}

fn run_inspect(args: &InspectArgs) -> Result<()> {
    let mut options = Options {
        show_page_source: args.show_source,
        source_preview_len: args.preview_len,
        ..Options::default()
    };
    args.fetch.apply(&mut options);

    let report = inspect_url(&args.url, &options).with_context(|| format!("inspecting {}", args.url))?;

    let mut out = io::stdout().lock();
    write!(out, "{}", report.trace)?;
    if !report.classes.is_empty() {
        writeln!(out, "\nClasses:")?;
        for class in &report.classes {
            writeln!(out, "  {class}")?;
        }
    }
    if let Some(source) = &report.source_preview {
        writeln!(out, "\nPage source (first {} chars):\n{source}", args.preview_len)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Scrape(args) => run_scrape(args),
        Command::Inspect(args) => run_inspect(args),
    }
}
