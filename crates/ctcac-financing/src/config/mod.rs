use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

const DEFAULT_LISTING_URL: &str =
    "https://www.treasurer.ca.gov/ctcac/2025/thirdround/4percent/application/index.asp";
const DEFAULT_BASE_ORIGIN: &str = "https://www.treasurer.ca.gov";
const DEFAULT_INPUT_DIR: &str = "applications";
const DEFAULT_OUTPUT_PATH: &str = "financing_costs_summary.xlsx";

const LISTING_TIMEOUT: Duration = Duration::from_secs(30);
const FILE_TIMEOUT: Duration = Duration::from_secs(60);

/// Top-level configuration for a summary run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub fetch: FetchConfig,
    pub paths: PathConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let listing_url = parse_url(
            "APP_LISTING_URL",
            env::var("APP_LISTING_URL").unwrap_or_else(|_| DEFAULT_LISTING_URL.to_string()),
        )?;
        let base_origin = parse_url(
            "APP_BASE_ORIGIN",
            env::var("APP_BASE_ORIGIN").unwrap_or_else(|_| DEFAULT_BASE_ORIGIN.to_string()),
        )?;

        let max_files = match env::var("APP_MAX_FILES") {
            Ok(raw) if !raw.trim().is_empty() => {
                let value = raw
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| ConfigError::InvalidMaxFiles)?;
                if value == 0 {
                    return Err(ConfigError::InvalidMaxFiles);
                }
                Some(value)
            }
            _ => None,
        };

        let input_dir = env::var("APP_INPUT_DIR").unwrap_or_else(|_| DEFAULT_INPUT_DIR.to_string());
        let output_path =
            env::var("APP_OUTPUT_PATH").unwrap_or_else(|_| DEFAULT_OUTPUT_PATH.to_string());

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            fetch: FetchConfig {
                listing_url,
                base_origin,
                max_files,
                listing_timeout: LISTING_TIMEOUT,
                file_timeout: FILE_TIMEOUT,
            },
            paths: PathConfig {
                input_dir: PathBuf::from(input_dir),
                output_path: PathBuf::from(output_path),
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where application workbooks come from and how long to wait for them.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub listing_url: Url,
    /// Origin prepended to root-relative links found on the listing page.
    pub base_origin: Url,
    pub max_files: Option<usize>,
    pub listing_timeout: Duration,
    pub file_timeout: Duration,
}

impl FetchConfig {
    pub fn new(listing_url: Url, base_origin: Url) -> Self {
        Self {
            listing_url,
            base_origin,
            max_files: None,
            listing_timeout: LISTING_TIMEOUT,
            file_timeout: FILE_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PathConfig {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidMaxFiles,
    InvalidUrl {
        variable: &'static str,
        source: url::ParseError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMaxFiles => {
                write!(f, "APP_MAX_FILES must be a positive integer")
            }
            ConfigError::InvalidUrl { variable, .. } => {
                write!(f, "{variable} must be an absolute http(s) URL")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidMaxFiles => None,
            ConfigError::InvalidUrl { source, .. } => Some(source),
        }
    }
}

fn parse_url(variable: &'static str, raw: String) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl { variable, source })
}
