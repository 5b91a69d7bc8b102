use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use crossbeam_channel::bounded;

use signflow::{
    GesturePipeline, LabelTable, OrtModel, PipelineConfig, read_session, start_pipeline_worker,
};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 3 {
        bail!("usage: signflow <model.onnx> <labels.txt> <session.jsonl>");
    }
    let model_path = PathBuf::from(&args[0]);
    let label_path = PathBuf::from(&args[1]);
    let session_path = PathBuf::from(&args[2]);

    let labels = LabelTable::load(&label_path)?;
    log::info!("loaded {} labels from {}", labels.len(), label_path.display());

    let frames = read_session(&session_path)?;
    log::info!(
        "replaying {} frames from {}",
        frames.len(),
        session_path.display()
    );

    let config = PipelineConfig::default();
    let pipeline = match OrtModel::load(&model_path) {
        Ok(model) => GesturePipeline::new(config, Box::new(model), labels),
        Err(err) => {
            log::error!("failed to load sequence model: {err:?}");
            GesturePipeline::with_model_error(config, format!("{err:#}"))
        }
    };

    let (frame_tx, frame_rx) = bounded(1);
    let (result_tx, result_rx) = bounded(1);
    let worker = start_pipeline_worker(Arc::new(pipeline), frame_rx, result_tx);

    for frame in frames {
        frame_tx.send(frame).context("pipeline worker exited")?;
        let result = result_rx.recv().context("pipeline worker hung up")?;
        let stable = if result.stable_label.is_empty() {
            "-"
        } else {
            result.stable_label.as_str()
        };
        println!(
            "[{:>8} ms] {} | stable: {stable}",
            result.timestamp_ms, result.status
        );
    }

    drop(frame_tx);
    let _ = worker.join();

    Ok(())
}
