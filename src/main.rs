use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracklist::{Project, Sequence, SequenceSettings, TrackKind};

/// Creates a project with one default sequence and writes it to disk
#[derive(Parser, Debug)]
#[command(name = "tracklist", version)]
struct Args {
    /// Default sequence settings (JSON)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Project file to write
    #[arg(short, long, default_value = "project.json")]
    output: PathBuf,

    /// Override the number of video tracks
    #[arg(long)]
    video_tracks: Option<usize>,

    /// Override the number of audio tracks
    #[arg(long)]
    audio_tracks: Option<usize>,
}

fn main() -> tracklist::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tracklist=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => SequenceSettings::load_or_default(path),
        None => SequenceSettings::default(),
    };
    if let Some(n) = args.video_tracks {
        settings.video_tracks = n;
    }
    if let Some(n) = args.audio_tracks {
        settings.audio_tracks = n;
    }

    let mut project = Project::new("Untitled Project");
    let id = project.add_sequence(Sequence::new("Default Sequence", settings));

    if let Some(sequence) = project.sequence(id) {
        info!(
            "Sequence '{}' {}x{} @ {} fps, {} video / {} audio tracks",
            sequence.name,
            sequence.settings.width,
            sequence.settings.height,
            sequence.settings.frame_rate,
            sequence.tracks(TrackKind::Video).count(),
            sequence.tracks(TrackKind::Audio).count(),
        );
    }

    project.save_to_file(&args.output)?;
    Ok(())
}
