use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    pub fn label(&self) -> &'static str {
        match self {
            HandSide::Left => "left",
            HandSide::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandDetection {
    pub side: HandSide,
    pub score: f32,
    pub landmarks: Vec<Landmark>,
}

/// One frame's raw detections from the perception layer. Any part may be
/// missing; downstream extraction zero-fills what is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameLandmarks {
    #[serde(default)]
    pub hands: Vec<HandDetection>,
    #[serde(default)]
    pub pose: Option<Vec<Landmark>>,
    #[serde(default)]
    pub face: Option<Vec<Landmark>>,
    #[serde(default)]
    pub timestamp_ms: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameStatus {
    Buffering { filled: usize, capacity: usize },
    Waiting,
    Recognized { label: String, confidence: f32 },
    Failed { message: String },
}

impl fmt::Display for FrameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameStatus::Buffering { filled, capacity } => {
                write!(f, "buffering {filled}/{capacity}")
            }
            FrameStatus::Waiting => write!(f, "waiting"),
            FrameStatus::Recognized { label, confidence } => {
                write!(f, "{label} ({:.0}%)", confidence * 100.0)
            }
            FrameStatus::Failed { message } => write!(f, "error: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameResult {
    pub status: FrameStatus,
    pub stable_label: String,
    pub timestamp_ms: u64,
}
