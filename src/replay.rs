use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::types::FrameLandmarks;

/// Reads a recorded landmark session: JSON Lines, one frame per line, blank
/// lines skipped.
pub fn read_session(path: &Path) -> Result<Vec<FrameLandmarks>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open session file {}", path.display()))?;
    parse_session(BufReader::new(file))
        .with_context(|| format!("failed to read session file {}", path.display()))
}

pub fn parse_session<R: BufRead>(reader: R) -> Result<Vec<FrameLandmarks>> {
    let mut frames = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line.context("failed to read session line")?;
        if line.trim().is_empty() {
            continue;
        }
        let frame: FrameLandmarks = serde_json::from_str(&line)
            .with_context(|| format!("malformed frame on line {}", number + 1))?;
        frames.push(frame);
    }

    Ok(frames)
}
