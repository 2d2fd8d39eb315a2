//! Particle sources: the boundary to camera capture and segmentation.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tote_vision_core::{ColorRanges, ImageSize, ParticleReport, VisionError};

/// Particles extracted from one camera frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub image: ImageSize,
    #[serde(default)]
    pub particles: Vec<ParticleReport>,
}

/// Produces one [`Frame`] per call, thresholding with the given colors.
///
/// Implementations wrap the camera and segmentation backend. Failures are
/// reported per frame; the caller decides whether to keep going.
pub trait ParticleSource {
    fn next_frame(&mut self, color: &ColorRanges) -> Result<Frame, VisionError>;
}

/// Failure recorded in place of a frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordedFailure {
    CameraOpen(String),
    Threshold(String),
    ParticleFilter(String),
}

impl From<RecordedFailure> for VisionError {
    fn from(f: RecordedFailure) -> Self {
        match f {
            RecordedFailure::CameraOpen(m) => VisionError::CameraOpen(m),
            RecordedFailure::Threshold(m) => VisionError::Threshold(m),
            RecordedFailure::ParticleFilter(m) => VisionError::ParticleFilter(m),
        }
    }
}

/// One entry of a recording: either a frame or the failure that replaced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordedFrame {
    Failed { error: RecordedFailure },
    Captured(Frame),
}

/// A JSON recording of particle frames.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameRecording {
    pub frames: Vec<RecordedFrame>,
}

impl FrameRecording {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Replays a [`FrameRecording`] in order.
#[derive(Clone, Debug, Default)]
pub struct ReplaySource {
    frames: VecDeque<RecordedFrame>,
    last_color: Option<ColorRanges>,
}

impl ReplaySource {
    pub fn new(recording: FrameRecording) -> Self {
        Self {
            frames: recording.frames.into(),
            last_color: None,
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    /// Color ranges passed with the most recent request.
    pub fn last_color(&self) -> Option<&ColorRanges> {
        self.last_color.as_ref()
    }
}

impl ParticleSource for ReplaySource {
    fn next_frame(&mut self, color: &ColorRanges) -> Result<Frame, VisionError> {
        self.last_color = Some(*color);
        match self.frames.pop_front() {
            Some(RecordedFrame::Captured(frame)) => Ok(frame),
            Some(RecordedFrame::Failed { error }) => Err(error.into()),
            None => Err(VisionError::CameraOpen("recording exhausted".to_owned())),
        }
    }
}
