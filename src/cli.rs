use crate::render::{print_missing_files_help, print_statistics};
use clap::Parser;
use ctcac_financing::config::{AppConfig, FetchConfig};
use ctcac_financing::error::AppError;
use ctcac_financing::fetch::{
    find_spreadsheets, FetchError, Fetcher, HttpGateway, ReqwestGateway,
};
use ctcac_financing::financing::{parse_applications, write_summary, SummaryStatistics};
use ctcac_financing::telemetry;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "financing-summary",
    about = "Download CTCAC applications and summarise their financing costs",
    version
)]
struct Cli {
    /// Use spreadsheets already in the input directory instead of downloading
    #[arg(short = 's', long, visible_alias = "no-download")]
    skip_download: bool,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    summarise(&cli, &config, ReqwestGateway::new)
}

fn summarise<G, F>(cli: &Cli, config: &AppConfig, connect: F) -> Result<(), AppError>
where
    G: HttpGateway,
    F: FnOnce() -> Result<G, FetchError>,
{
    let input_dir = &config.paths.input_dir;
    let files = collect_files(cli.skip_download, connect, &config.fetch, input_dir);

    if files.is_empty() {
        print_missing_files_help(input_dir);
        return Ok(());
    }

    info!(count = files.len(), "parsing applications");
    let applications = parse_applications(&files);

    write_summary(&applications, &config.paths.output_path)?;
    print_statistics(&SummaryStatistics::from_applications(&applications));

    Ok(())
}

/// Downloads unless told not to, then falls back to whatever is already in
/// `input_dir`. A gateway that cannot be built only disables the download.
fn collect_files<G, F>(
    skip_download: bool,
    connect: F,
    config: &FetchConfig,
    input_dir: &Path,
) -> Vec<PathBuf>
where
    G: HttpGateway,
    F: FnOnce() -> Result<G, FetchError>,
{
    if !skip_download {
        match connect() {
            Ok(gateway) => {
                info!(url = %config.listing_url, "downloading application workbooks");
                let files = Fetcher::new(gateway, config.clone()).download_all(input_dir);
                if !files.is_empty() {
                    return files;
                }
            }
            Err(err) => warn!("downloads unavailable: {err}"),
        }
    }

    info!(directory = %input_dir.display(), "checking for existing workbooks");
    find_spreadsheets(input_dir)
}
