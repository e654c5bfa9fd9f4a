use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hifi_playlist::loader::{load_requests, RejectedRecord};
use hifi_playlist::pipeline::{self, PlaylistChoice, RunOptions};
use hifi_playlist::progress::{format_elapsed, ProgressMode, RequestProgress};
use hifi_playlist::report::BatchReport;
use hifi_playlist::safety::validate_report_path;
use hifi_playlist::schedule::{self, DEFAULT_VENUE, DEFAULT_VENUE_DESCRIPTION};
use hifi_playlist::spotify::{AuthMethod, RefreshCredentials, SpotifyClient, DEFAULT_API_BASE};

#[derive(Parser)]
#[command(name = "hifi-playlist")]
#[command(about = "Build a Spotify playlist from a hi-fi listening room's album schedule")]
struct Args {
    /// Request list (.json array or .csv with artist,album[,date][,year] columns)
    #[arg(long)]
    input_file: PathBuf,

    /// Resolve and report without creating or modifying a playlist
    #[arg(long)]
    dry_run: bool,

    /// Playlist name (default: "<venue> - <Month Year>" of the first show)
    #[arg(long, conflicts_with = "playlist_id")]
    playlist_name: Option<String>,

    /// Append to an existing playlist instead of creating one
    #[arg(long)]
    playlist_id: Option<String>,

    #[arg(long, default_value = DEFAULT_VENUE)]
    venue: String,

    #[arg(long, default_value = DEFAULT_VENUE_DESCRIPTION)]
    venue_description: String,

    /// Write the run report as JSON
    #[arg(long)]
    report_json: Option<PathBuf>,

    /// Disable progress bars, print periodic progress lines instead
    #[arg(long)]
    log_only: bool,

    /// Pre-issued user access token
    #[arg(long, env = "SPOTIFY_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    #[arg(long, env = "SPOTIFY_CLIENT_ID")]
    client_id: Option<String>,

    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    #[arg(long, env = "SPOTIFY_REFRESH_TOKEN", hide_env_values = true)]
    refresh_token: Option<String>,

    #[arg(long, env = "SPOTIFY_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,
}

impl Args {
    /// A pre-issued token wins; otherwise all three refresh fields are required.
    fn auth_method(&self) -> Result<AuthMethod> {
        if let Some(token) = &self.access_token {
            return Ok(AuthMethod::AccessToken(token.clone()));
        }

        match (&self.client_id, &self.client_secret, &self.refresh_token) {
            (Some(client_id), Some(client_secret), Some(refresh_token)) => {
                Ok(AuthMethod::Refresh(RefreshCredentials {
                    client_id: client_id.clone(),
                    client_secret: client_secret.clone(),
                    refresh_token: refresh_token.clone(),
                }))
            }
            _ => bail!(
                "No Spotify credentials: set SPOTIFY_ACCESS_TOKEN, or SPOTIFY_CLIENT_ID, \
                 SPOTIFY_CLIENT_SECRET and SPOTIFY_REFRESH_TOKEN"
            ),
        }
    }
}

fn print_rejected(rejected: &[RejectedRecord]) {
    for r in rejected {
        println!("Skipped record {}: {}", r.index, r.reason);
    }
}

fn print_report(report: &BatchReport, rejected: usize, elapsed: std::time::Duration) {
    println!();
    for line in report.lines() {
        println!("{}", line);
    }

    println!("\n{:=<60}", "");
    println!("{}", report.summary_line());
    if rejected > 0 {
        println!("  Skipped records: {}", rejected);
    }
    println!("  Elapsed: {}", format_elapsed(elapsed));
    println!("{:=<60}", "");
}

fn write_report_json(path: &Path, report: &BatchReport) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create report file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .with_context(|| format!("Failed to write report file {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("hifi_playlist=info".parse()?))
        .init();

    let mode = ProgressMode::from_log_only(args.log_only);

    if let Some(report_path) = &args.report_json {
        validate_report_path(report_path, &args.input_file)?;
    }

    let start = Instant::now();

    println!("Loading requests: {:?}", args.input_file);
    let loaded = load_requests(&args.input_file)?;
    print_rejected(&loaded.rejected);

    if loaded.requests.is_empty() {
        println!("No albums to process.");
        return Ok(());
    }
    println!("Loaded {} album requests", loaded.requests.len());

    let playlist = match &args.playlist_id {
        Some(id) => PlaylistChoice::Existing { id: id.clone() },
        None => {
            let (default_name, description) = schedule::default_playlist(
                &loaded.requests,
                &args.venue,
                &args.venue_description,
                chrono::Local::now().date_naive(),
            );
            PlaylistChoice::Create {
                name: args.playlist_name.clone().unwrap_or(default_name),
                description,
            }
        }
    };

    if args.dry_run {
        println!("\n=== DRY RUN MODE ===");
        match &playlist {
            PlaylistChoice::Create { name, .. } => println!("Would create playlist: '{}'", name),
            PlaylistChoice::Existing { id } => println!("Would add to playlist: '{}'", id),
        }
    }

    let auth = args.auth_method()?;
    let spinner = mode.spinner("Connecting to Spotify");
    let client = SpotifyClient::connect(&auth, args.api_base.as_str())
        .context("Failed to authenticate with Spotify")?;
    spinner.finish_with_message("Connected to Spotify");
    info!("Using API base {}", client.base_url());

    let options = RunOptions {
        dry_run: args.dry_run,
        playlist,
    };
    let progress = RequestProgress::new(mode, loaded.requests.len());
    let report = pipeline::run_with_progress(&client, &loaded.requests, &options, &progress)
        .context("Playlist run stopped on a Spotify error")?;

    print_report(&report, loaded.rejected.len(), start.elapsed());

    if let Some(report_path) = &args.report_json {
        write_report_json(report_path, &report)?;
        println!("Report written to {:?}", report_path);
    }

    match &report.playlist {
        Some(target) if !target.name.is_empty() => {
            println!("\nPlaylist '{}' created successfully!", target.name)
        }
        Some(target) => println!("\nAdded albums to playlist '{}'", target.id),
        None => println!("\n=== DRY RUN COMPLETE ==="),
    }

    Ok(())
}
