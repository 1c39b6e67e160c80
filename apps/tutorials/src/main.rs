use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    parse_ranges, seconds_to_time, TranscriptUpload, TutorialClient, TutorialStore, TutorialTable,
    UploadReport, VideoTutorial, VideoUpload,
};
use shared::domain::{uploader_profile_url, TutorialId, TutorialRecord};
use tracing_subscriber::EnvFilter;

mod config;
mod player;

use config::load_settings;
use player::SimulatedPlayer;

/// Interval of the simulated host's time-update notification.
const HOST_TICK: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(about = "Browse, edit and play generated tutorials")]
struct Args {
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[arg(long, global = true)]
    uploader: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tutorials for the uploader.
    List,
    /// Show the clips of a video tutorial.
    Clips { id: i64 },
    /// Replace a tutorial's text.
    Edit {
        id: i64,
        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,
        #[arg(long)]
        content_file: Option<PathBuf>,
    },
    /// Upload a JSON transcript to generate a text tutorial.
    UploadTranscript { path: PathBuf },
    /// Upload an MP4 recording to generate a video tutorial.
    UploadVideo { path: PathBuf },
    /// Download a tutorial's video.
    FetchVideo {
        id: i64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Play one step of a video tutorial against a simulated player.
    Play {
        id: i64,
        #[arg(long, default_value_t = 1)]
        step: usize,
        #[arg(long, default_value_t = 1.0)]
        speed: f64,
    },
    /// Save a text tutorial's transcript as JSON.
    ExportTranscript {
        id: i64,
        #[arg(long)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(uploader) = args.uploader {
        settings.uploader = Some(uploader);
    }

    let client = TutorialClient::with_timeout(&settings.server_url, settings.request_timeout())
        .context("failed to build http client")?;
    let store: Arc<dyn TutorialStore> = Arc::new(client);
    let mut table = TutorialTable::new(Arc::clone(&store), settings.uploader.clone());

    match args.command {
        Command::List => list(&mut table).await,
        Command::Clips { id } => show_clips(&mut table, TutorialId(id)).await,
        Command::Edit {
            id,
            content,
            content_file,
        } => {
            let content = match (content, content_file) {
                (Some(content), _) => content,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?,
                (None, None) => bail!("pass --content or --content-file"),
            };
            edit(&mut table, TutorialId(id), content).await
        }
        Command::UploadTranscript { path } => {
            let (file_name, mime, bytes) = read_upload(&path).await?;
            let upload = TranscriptUpload::new(file_name, &mime, bytes)?;
            let report = table.upload_transcript(upload).await?;
            report_upload(&table, &report);
            Ok(())
        }
        Command::UploadVideo { path } => {
            let (file_name, mime, bytes) = read_upload(&path).await?;
            let upload = VideoUpload::new(file_name, &mime, bytes)?;
            let report = table.upload_video(upload).await?;
            report_upload(&table, &report);
            Ok(())
        }
        Command::FetchVideo { id, out } => {
            let record = find_record(&mut table, TutorialId(id)).await?;
            let video = VideoTutorial::open(store.as_ref(), &record).await?;
            tokio::fs::write(&out, &video.asset)
                .await
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Saved {} ({} bytes)", out.display(), video.asset.len());
            Ok(())
        }
        Command::Play { id, step, speed } => {
            let record = find_record(&mut table, TutorialId(id)).await?;
            play(store.as_ref(), &record, step, speed).await
        }
        Command::ExportTranscript { id, out } => {
            let record = find_record(&mut table, TutorialId(id)).await?;
            let json = record
                .transcript_export()
                .ok_or_else(|| anyhow!("tutorial {id} has no transcript"))?;
            tokio::fs::write(&out, json)
                .await
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Saved {}", out.display());
            Ok(())
        }
    }
}

async fn list(table: &mut TutorialTable) -> Result<()> {
    table.refresh().await?;
    if table.is_empty() {
        println!("No tutorials available. Upload a transcript or a video to see them here.");
        return Ok(());
    }

    for record in table.rows() {
        let created = record
            .created_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| record.timestamp.clone());
        let kind = if record.has_video() { "video" } else { "text" };
        let uploader = match uploader_profile_url(record.uploader.as_deref()) {
            Some(url) => format!("{} <{url}>", record.uploader_display()),
            None => record.uploader_display().to_string(),
        };
        let headline = record.content.lines().next().unwrap_or_default();
        println!("#{:<5} {created}  {kind:<5}  {uploader}  {headline}", record.id);
    }
    Ok(())
}

async fn show_clips(table: &mut TutorialTable, id: TutorialId) -> Result<()> {
    let record = find_record(table, id).await?;
    let clips = parse_ranges(record.clip_encoding());
    if clips.is_empty() {
        println!("No timestamp ranges provided.");
        return Ok(());
    }
    for clip in clips {
        println!(
            "{:<8} {} -> {}  ({})",
            clip.label,
            seconds_to_time(clip.start_seconds),
            seconds_to_time(clip.end_seconds),
            clip.raw_range
        );
    }
    Ok(())
}

async fn edit(table: &mut TutorialTable, id: TutorialId, content: String) -> Result<()> {
    table.refresh().await?;
    table.begin_edit(id)?;
    table.update_draft(content)?;
    let report = table.save_edit().await?;

    if let Err(err) = &report.refresh {
        eprintln!("Could not refresh tutorials: {err}");
    }
    report
        .mutation
        .with_context(|| format!("error editing tutorial {id}"))?;
    println!("Tutorial {id} updated.");
    Ok(())
}

fn report_upload(table: &TutorialTable, report: &UploadReport) {
    match &report.refresh {
        Ok(()) => println!(
            "Upload successful! {} tutorial(s) listed.",
            table.rows().len()
        ),
        Err(err) => {
            println!("Upload successful! {} was accepted.", report.file_name);
            eprintln!("Could not refresh tutorials: {err}");
        }
    }
}

async fn find_record(table: &mut TutorialTable, id: TutorialId) -> Result<TutorialRecord> {
    table.refresh().await?;
    table
        .find(id)
        .cloned()
        .ok_or_else(|| anyhow!("tutorial {id} not found"))
}

async fn read_upload(path: &Path) -> Result<(String, String, Vec<u8>)> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    Ok((file_name, mime, bytes))
}

async fn play(
    store: &dyn TutorialStore,
    record: &TutorialRecord,
    step: usize,
    speed: f64,
) -> Result<()> {
    let video = VideoTutorial::open(store, record).await?;
    let mut controller = video.into_controller(SimulatedPlayer::with_rate(speed));
    let clip = step
        .checked_sub(1)
        .and_then(|index| controller.select_clip_by_index(index).cloned())
        .ok_or_else(|| anyhow!("tutorial {} has no step {step}", record.id))?;
    println!("Playing {clip}");

    let mut ticker = tokio::time::interval(HOST_TICK);
    ticker.tick().await;
    while controller.is_playing() {
        ticker.tick().await;
        controller.media_mut().advance(HOST_TICK);
        let position = controller.position();
        controller.on_progress(position);
    }

    println!(
        "Stopped at {} (end of {})",
        seconds_to_time(controller.position() as u32),
        clip.label
    );
    Ok(())
}
