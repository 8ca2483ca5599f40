use docver_base::result::{Context, DocverResult};
use docver_logic::configuration::CONFIGURATION_FILE_NAME;
use std::env::current_dir;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;

const LOG_LEVEL_VARIABLE: &str = "DOCVER_LOG";

pub fn run_cli() -> DocverResult<()> {
    if let Err(err) = enable_ansi_support::enable_ansi_support() {
        eprintln!("Failed to enable ANSI support: {err}");
    }

    // stdout carries the resolved version, so logs go to stderr
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::ENTER)
        .with_filter(log_level());

    let registry = tracing_subscriber::registry().with(fmt_layer);

    tracing::subscriber::set_global_default(registry)
        .context("Setting default logging subscriber failed")?;
    let base_path = find_base_path()?;
    info!("Using base path: '{:?}'", base_path);
    let adapter = docver_real_adapter::RealAdapter::new(base_path);
    let runner = docver_logic::runner::DocverRunner::new(adapter);
    runner.run();
    Ok(())
}

fn log_level() -> LevelFilter {
    let Ok(level) = std::env::var(LOG_LEVEL_VARIABLE) else {
        return LevelFilter::WARN;
    };
    LevelFilter::from_str(&level).unwrap_or_else(|_| {
        eprintln!("Ignoring unknown log level '{level}' in {LOG_LEVEL_VARIABLE}");
        LevelFilter::WARN
    })
}

/// Nearest directory containing the configuration file, or the working directory if there is none
fn find_base_path() -> DocverResult<PathBuf> {
    let working_directory = current_dir().with_context(|| "Failed to get working directory")?;
    let mut candidate_path = working_directory.as_path();
    loop {
        if candidate_path.join(CONFIGURATION_FILE_NAME).is_file() {
            return Ok(candidate_path.to_path_buf());
        }
        let Some(parent_path) = candidate_path.parent() else {
            break;
        };
        candidate_path = parent_path;
    }
    Ok(working_directory)
}
