use std::path::PathBuf;
use std::time::Duration;

use geo_engine::GeneratorSettings;

use super::logging::LogDestination;

/// Selects where logs go: `file`, `terminal` or `both`.
pub const LOG_ENV: &str = "GEO_LOG";
/// Overrides every simulated generator delay, in milliseconds.
pub const DELAY_ENV: &str = "GEO_DELAY_MS";
/// Directory `download` writes dashboard reports to.
pub const REPORT_DIR_ENV: &str = "GEO_REPORT_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Location query the workspace opens on, as a deep link would carry it.
    pub initial_query: String,
    pub log_destination: LogDestination,
    pub generator: GeneratorSettings,
    pub report_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let log = std::env::var(LOG_ENV).ok();
        let delay = std::env::var(DELAY_ENV).ok();
        let mut config =
            Self::from_parts(std::env::args().skip(1), log.as_deref(), delay.as_deref());
        if let Some(dir) = std::env::var_os(REPORT_DIR_ENV) {
            config.report_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn from_parts<I>(args: I, log: Option<&str>, delay_ms: Option<&str>) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let initial_query = args.into_iter().next().unwrap_or_default();

        // The logger is not up yet.
        let log_destination = match log.map(|raw| (raw, LogDestination::parse(raw))) {
            Some((_, Some(destination))) => destination,
            Some((raw, None)) => {
                eprintln!("Warning: ignoring {LOG_ENV}={raw}, expected file, terminal or both");
                LogDestination::default()
            }
            None => LogDestination::default(),
        };

        let generator = match delay_ms.map(|raw| (raw, raw.trim().parse::<u64>())) {
            Some((_, Ok(millis))) => GeneratorSettings::with_delay(Duration::from_millis(millis)),
            Some((raw, Err(_))) => {
                eprintln!("Warning: ignoring {DELAY_ENV}={raw}, expected milliseconds");
                GeneratorSettings::default()
            }
            None => GeneratorSettings::default(),
        };

        Self {
            initial_query,
            log_destination,
            generator,
            report_dir: PathBuf::from("."),
        }
    }
}
