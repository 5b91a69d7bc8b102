use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

pub const HISTORY_LEN: usize = 5;
pub const QUORUM: usize = 3;

/// Majority vote over the most recent accepted labels. `current` only moves
/// when one label reaches the quorum; otherwise it holds its previous value,
/// so the displayed label lags the raw stream rather than flickering with it.
///
/// Carries its own lock: results may be observed from a different thread than
/// the one reading the stable value.
pub struct LabelStabilizer {
    state: Mutex<StabilizerState>,
    history_len: usize,
    quorum: usize,
}

struct StabilizerState {
    history: VecDeque<String>,
    current: String,
}

impl LabelStabilizer {
    pub fn new() -> Self {
        Self::with_limits(HISTORY_LEN, QUORUM)
    }

    pub fn with_limits(history_len: usize, quorum: usize) -> Self {
        Self {
            state: Mutex::new(StabilizerState {
                history: VecDeque::with_capacity(history_len),
                current: String::new(),
            }),
            history_len,
            quorum,
        }
    }

    pub fn observe(&self, raw_label: &str) {
        // Pipeline placeholders never enter history.
        if raw_label.is_empty() || raw_label == "waiting" || raw_label.starts_with("buffering") {
            return;
        }

        let mut state = self.state.lock().unwrap();
        state.history.push_back(raw_label.to_string());
        while state.history.len() > self.history_len {
            state.history.pop_front();
        }

        if let Some(label) = vote(&state.history, self.quorum) {
            state.current = label;
        }
    }

    pub fn current(&self) -> String {
        self.state.lock().unwrap().current.clone()
    }
}

/// Most frequent label in the history, if it reaches the quorum.
fn vote(history: &VecDeque<String>, quorum: usize) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in history {
        *counts.entry(label.as_str()).or_insert(0) += 1;
    }

    // Scan newest first so equal counts resolve to the most recently
    // observed label.
    let mut top: Option<(usize, &str)> = None;
    for label in history.iter().rev() {
        let count = counts[label.as_str()];
        match top {
            Some((best, _)) if count <= best => {}
            _ => top = Some((count, label.as_str())),
        }
    }

    match top {
        Some((count, label)) if count >= quorum => Some(label.to_string()),
        _ => None,
    }
}

impl Default for LabelStabilizer {
    fn default() -> Self {
        Self::new()
    }
}
