use std::path::Path;

use log::info;

use crate::core::{ConfigError, VisionConfig};
use crate::detector::{
    FrameOutcome, FrameProcessor, FrameRecording, LogTelemetry, ReplaySource, TelemetrySink,
};

/// Errors produced by the replay helpers.
#[derive(thiserror::Error, Debug)]
pub enum ReplayError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid frame recording: {0}")]
    Recording(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Read a JSON frame recording from disk.
pub fn load_recording(path: impl AsRef<Path>) -> Result<FrameRecording, ReplayError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(FrameRecording::from_json_str(&text)?)
}

/// Run every recorded frame through a [`FrameProcessor`].
///
/// Returns one outcome per recorded entry, failed frames included, and the
/// sink so callers can inspect what was published.
pub fn replay<T: TelemetrySink>(
    recording: FrameRecording,
    config: VisionConfig,
    sink: T,
) -> (Vec<FrameOutcome>, T) {
    let mut processor = FrameProcessor::new(config, ReplaySource::new(recording), sink);
    let mut outcomes = Vec::with_capacity(processor.source().remaining());
    while processor.source().remaining() > 0 {
        outcomes.push(processor.process_frame());
    }
    let found = outcomes.iter().filter(|o| o.target.is_some()).count();
    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
    info!(
        "replayed {} frames: {} with tote, {} failed",
        outcomes.len(),
        found,
        failed
    );
    let (_, _, sink) = processor.into_parts();
    (outcomes, sink)
}

/// Load a recording and replay it, logging telemetry.
pub fn replay_file(
    path: impl AsRef<Path>,
    config: VisionConfig,
) -> Result<Vec<FrameOutcome>, ReplayError> {
    config.validate()?;
    let recording = load_recording(path)?;
    Ok(replay(recording, config, LogTelemetry).0)
}
