//! ytkit - download videos, playlists and audio through yt-dlp

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use ytkit::{InfoDict, VideoSummary, WrapperSettings, YtDlpEngine, YtdlWrapper};

#[derive(Parser)]
#[command(name = "ytkit", version, about)]
struct Args {
    /// Default download directory
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Settings file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download a single video
    Download {
        url: String,
        /// Treat the URL as a playlist
        #[arg(long)]
        playlist: bool,
        /// Directory for this download only
        #[arg(long = "to")]
        to: Option<PathBuf>,
    },
    /// Download every item of a playlist
    Playlist {
        url: String,
        #[arg(long = "to")]
        to: Option<PathBuf>,
    },
    /// Download the audio track as mp3
    Audio {
        url: String,
        #[arg(long = "to")]
        to: Option<PathBuf>,
    },
    /// Print title, duration and description without downloading
    Info { url: String },
    /// Show which yt-dlp is used
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut settings = match &args.config {
        Some(path) => WrapperSettings::load(path)?,
        None => WrapperSettings::default(),
    };
    if let Some(dir) = args.dir {
        settings.download_dir = dir;
    }

    let ytdl = || YtdlWrapper::from_settings(&settings);

    match args.command {
        Command::Download { url, playlist, to } => {
            let info = ytdl()?.download(&url, playlist, to.as_deref()).await?;
            report_download(&url, &info);
        }
        Command::Playlist { url, to } => {
            let info = ytdl()?.download_playlist(&url, to.as_deref()).await?;
            report_download(&url, &info);
        }
        Command::Audio { url, to } => {
            let info = ytdl()?.download_audio(&url, to.as_deref()).await?;
            report_download(&url, &info);
        }
        Command::Info { url } => {
            let info = ytdl()?.get_video_info(&url).await?;
            print_info(&VideoSummary::from_info(&info));
        }
        Command::Check => check_ytdlp(&settings).await?,
    }

    Ok(())
}

fn report_download(url: &str, info: &InfoDict) {
    let summary = VideoSummary::from_info(info);
    match summary.entries {
        Some(count) => println!("Downloaded {} item(s) from {}", count, url),
        None => println!("Downloaded video from {}", url),
    }
    if let Some(title) = summary.title {
        println!("Title: {}", title);
    }
}

fn print_info(summary: &VideoSummary) {
    println!("Video Title: {}", summary.title.as_deref().unwrap_or("N/A"));
    match summary.duration {
        Some(secs) => println!("Video Duration: {} seconds", secs),
        None => println!("Video Duration: N/A seconds"),
    }
    println!(
        "Video Description: {}",
        summary.description.as_deref().unwrap_or("N/A")
    );
}

async fn check_ytdlp(settings: &WrapperSettings) -> Result<()> {
    let engine = match &settings.ytdlp_path {
        Some(path) => YtDlpEngine::with_path(path)?,
        None => YtDlpEngine::new()?,
    };
    println!("yt-dlp: {}", engine.ytdlp_path().display());
    println!("version: {}", engine.version().await?);
    Ok(())
}
