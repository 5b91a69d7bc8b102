use std::sync::{Arc, Mutex};
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use crate::classifier::{
    CONFIDENCE_THRESHOLD, ClassifyError, GestureClassifier, SequenceModel,
};
use crate::features;
use crate::labels::LabelTable;
use crate::stabilizer::{HISTORY_LEN, LabelStabilizer, QUORUM};
use crate::types::{FrameLandmarks, FrameResult, FrameStatus};
use crate::window::{FrameWindow, WINDOW_SIZE};

#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    pub window_size: usize,
    pub confidence_threshold: f32,
    pub history_len: usize,
    pub quorum: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_size: WINDOW_SIZE,
            confidence_threshold: CONFIDENCE_THRESHOLD,
            history_len: HISTORY_LEN,
            quorum: QUORUM,
        }
    }
}

/// Owns the window, the classifier, and the vote history. Constructed
/// explicitly and shared by reference; there is no ambient global state.
pub struct GesturePipeline {
    inner: Mutex<PipelineInner>,
    stabilizer: LabelStabilizer,
    confidence_threshold: f32,
}

struct PipelineInner {
    window: FrameWindow,
    classifier: Result<GestureClassifier, String>,
}

impl GesturePipeline {
    pub fn new(config: PipelineConfig, model: Box<dyn SequenceModel>, labels: LabelTable) -> Self {
        let classifier =
            GestureClassifier::with_threshold(model, labels, config.confidence_threshold);
        Self::build(config, Ok(classifier))
    }

    /// Degraded mode for a model that failed to load: the frame path still
    /// runs, every full window reports the load failure.
    pub fn with_model_error(config: PipelineConfig, message: impl Into<String>) -> Self {
        Self::build(config, Err(message.into()))
    }

    fn build(config: PipelineConfig, classifier: Result<GestureClassifier, String>) -> Self {
        Self {
            inner: Mutex::new(PipelineInner {
                window: FrameWindow::with_capacity(config.window_size),
                classifier,
            }),
            stabilizer: LabelStabilizer::with_limits(config.history_len, config.quorum),
            confidence_threshold: config.confidence_threshold,
        }
    }

    pub fn process_frame(&self, frame: &FrameLandmarks) -> FrameResult {
        let vector = features::extract(frame);

        // One guard across push, the inference gate, and the snapshot: a
        // reader on another thread must never see inference run over a
        // half-updated window.
        let mut inner = self.inner.lock().unwrap();
        inner.window.push(vector);

        let status = if !inner.window.is_full() {
            FrameStatus::Buffering {
                filled: inner.window.len(),
                capacity: inner.window.capacity(),
            }
        } else if !inner.window.has_signal() {
            FrameStatus::Waiting
        } else {
            let snapshot = inner.window.snapshot();
            match &mut inner.classifier {
                Ok(classifier) => match classifier.classify(&snapshot) {
                    Ok(result) => FrameStatus::Recognized {
                        label: result.label,
                        confidence: result.confidence,
                    },
                    Err(err) => {
                        log::warn!("classification failed: {err}");
                        FrameStatus::Failed {
                            message: err.to_string(),
                        }
                    }
                },
                Err(message) => FrameStatus::Failed {
                    message: ClassifyError::ModelUnavailable(message.clone()).to_string(),
                },
            }
        };
        drop(inner);

        // Only accepted recognitions vote; tentative ones never enter history.
        if let FrameStatus::Recognized { label, confidence } = &status {
            if *confidence >= self.confidence_threshold {
                self.stabilizer.observe(label);
            }
        }

        FrameResult {
            status,
            stable_label: self.stabilizer.current(),
            timestamp_ms: frame.timestamp_ms,
        }
    }

    pub fn stable_label(&self) -> String {
        self.stabilizer.current()
    }
}

/// Runs the pipeline on its own thread: frames in, one result per frame out.
/// Exits when the frame sender disconnects or the result receiver hangs up.
/// Dropping frames under backpressure is the capture layer's concern; every
/// frame received here is processed.
pub fn start_pipeline_worker(
    pipeline: Arc<GesturePipeline>,
    frame_rx: Receiver<FrameLandmarks>,
    result_tx: Sender<FrameResult>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(frame) = frame_rx.recv() {
            let result = pipeline.process_frame(&frame);
            if result_tx.send(result).is_err() {
                break;
            }
        }
    })
}
