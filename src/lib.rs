//! Temporal gesture recognition: per-frame skeletal landmarks are packed
//! into fixed-width feature vectors, buffered into a sliding window, and
//! classified by a sequence model; a majority vote smooths the raw label
//! stream into a stable display value.

pub mod classifier;
pub mod features;
pub mod labels;
pub mod pipeline;
pub mod replay;
pub mod stabilizer;
pub mod types;
pub mod window;

pub use classifier::{
    CONFIDENCE_THRESHOLD, ClassifyError, GestureClassifier, LOW_CONFIDENCE_MARKER, OrtModel,
    SequenceModel,
};
pub use features::{FEATURE_DIM, FeatureVector, extract};
pub use labels::LabelTable;
pub use pipeline::{GesturePipeline, PipelineConfig, start_pipeline_worker};
pub use replay::{parse_session, read_session};
pub use stabilizer::{HISTORY_LEN, LabelStabilizer, QUORUM};
pub use types::{
    Classification, FrameLandmarks, FrameResult, FrameStatus, HandDetection, HandSide, Landmark,
};
pub use window::{FrameWindow, WINDOW_SIZE};
