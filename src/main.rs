use anyhow::Context;
use clap::Parser;
use livefilter::{load_page, run_headless, OutputFormat};
use livefilter_core::{config::Config, FilterProfile};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "livefilter", about = "Live substring filtering over a list of entries")]
struct Cli {
    /// Page to filter: a `.json` page document, a text file (one entry per
    /// line) or `-` for stdin. Defaults to a built-in demo page.
    page: Option<PathBuf>,

    /// Filter profile preset (`strict` or `generic`). Overrides `[filter]`
    /// in the config file.
    #[arg(long)]
    profile: Option<String>,

    /// Element id of the search input.
    #[arg(long)]
    input_id: Option<String>,

    /// Apply `--query` once and print the result instead of starting the TUI.
    #[arg(long)]
    headless: bool,

    /// Query text for `--headless`.
    #[arg(long, default_value = "")]
    query: String,

    /// Output format for `--headless`.
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// Config file to use instead of `~/.config/livefilter/config.toml`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write debug logs to $TMPDIR/livefilter-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let log_path = std::env::temp_dir().join("livefilter-debug.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!(path = %log_path.display(), "livefilter debug log started");
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!("config load failed, using defaults: {e:#}");
            Config::defaults()
        }),
    };

    let profile = match &cli.profile {
        Some(name) => FilterProfile::preset(name)?,
        None => config.filter.profile(),
    };
    let input_id = cli.input_id.unwrap_or(config.filter.input_id);
    tracing::debug!(profile = %profile.label(), %input_id, "resolved filter settings");

    let mut page = load_page(cli.page.as_deref(), &input_id)?;

    if cli.headless {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        return run_headless(&mut page, &input_id, &profile, &cli.query, cli.format, &mut out);
    }

    livefilter_tui::run(page, &input_id, profile, config.ui)
}
