use std::path::Path;

use anyhow::{anyhow, Context, Result};
use ndarray::Array3;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;

use super::SequenceModel;

pub struct OrtModel {
    session: Session,
}

impl OrtModel {
    pub fn load(model_path: &Path) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(2)?
            .commit_from_file(model_path)
            .with_context(|| format!("failed to load ORT session from {}", model_path.display()))?;

        log::info!("sequence model ready using {}", model_path.display());

        Ok(Self { session })
    }
}

impl SequenceModel for OrtModel {
    fn predict(&mut self, input: Array3<f32>) -> Result<Vec<f32>> {
        let tensor = Tensor::from_array(input)?;
        let outputs = self
            .session
            .run(ort::inputs![tensor])
            .context("failed to run ORT session")?;

        if outputs.len() < 1 {
            return Err(anyhow!("model returned no outputs"));
        }

        let probs = outputs[0].try_extract_array::<f32>()?;
        Ok(probs.iter().copied().collect())
    }
}
