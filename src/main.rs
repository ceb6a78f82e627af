use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voxpad=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Voxpad voice memo recorder");
    run()
}

#[cfg(feature = "audio-io")]
fn run() -> Result<()> {
    use voxpad::audio::{CpalCapture, Playback, WavPlayer};
    use voxpad::config::Config;
    use voxpad::storage::FsRecordingStore;
    use voxpad::ui::VoxpadApp;

    let config = Config::default();
    let store = FsRecordingStore::new(config.records_dir.clone())?;
    let capture = CpalCapture::new(config.temp_dir.clone())?;

    // The app degrades to review-without-listen when no output device exists.
    let player: Option<Box<dyn Playback>> = match WavPlayer::new() {
        Ok(player) => Some(Box::new(player)),
        Err(e) => {
            tracing::warn!("Playback unavailable: {}", e);
            None
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 720.0])
            .with_min_inner_size([360.0, 560.0])
            .with_title("Voxpad"),
        ..Default::default()
    };

    eframe::run_native(
        "Voxpad",
        options,
        Box::new(move |cc| Ok(Box::new(VoxpadApp::new(cc, capture, store, player)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    Ok(())
}

#[cfg(not(feature = "audio-io"))]
fn run() -> Result<()> {
    anyhow::bail!("built without the audio-io feature; no microphone backend available")
}
