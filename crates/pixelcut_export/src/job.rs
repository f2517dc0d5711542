use crate::error::{ExportError, Result};
use crate::plan::ExportPlan;
use pixelcut_core::types::Micros;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Opaque media output handed back by the external processor.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaArtifact {
    pub data: Vec<u8>,
    pub mime: String,
}

/// External trim/concatenate service. Implementations wrap whatever does
/// the actual encoding (an ffmpeg sidecar, a wasm worker, a remote job
/// queue); the engine only hands over source urls and in/out timestamps.
#[allow(async_fn_in_trait)]
pub trait MediaProcessor {
    async fn trim(
        &self,
        source_url: &str,
        in_point: Micros,
        out_point: Micros,
    ) -> Result<MediaArtifact>;

    async fn concat(&self, parts: Vec<MediaArtifact>) -> Result<MediaArtifact>;
}

/// Progress update while an export runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExportProgress {
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
}

/// Run a compiled plan against the processor: trim every segment in order,
/// then concatenate. Progress is reported over the watch channel (one step
/// per segment plus the concat step); a send to a dropped receiver is
/// ignored.
pub async fn run_export<P: MediaProcessor>(
    plan: &ExportPlan,
    processor: &P,
    progress: watch::Sender<ExportProgress>,
) -> Result<MediaArtifact> {
    if plan.segments.is_empty() {
        return Err(ExportError::NoClips);
    }

    let total = plan.segments.len() + 1;
    let mut parts = Vec::with_capacity(plan.segments.len());

    for (i, segment) in plan.segments.iter().enumerate() {
        tracing::info!(
            source = %segment.source_url,
            in_point = %segment.in_point,
            out_point = %segment.out_point,
            "trimming segment {}/{}",
            i + 1,
            plan.segments.len()
        );
        let part = processor
            .trim(&segment.source_url, segment.in_point, segment.out_point)
            .await?;
        parts.push(part);

        let completed = i + 1;
        let _ = progress.send(ExportProgress {
            completed,
            total,
            percent: completed as f64 / total as f64 * 100.0,
        });
    }

    let output = if parts.len() == 1 {
        parts.into_iter().next().unwrap()
    } else {
        processor.concat(parts).await?
    };

    let _ = progress.send(ExportProgress {
        completed: total,
        total,
        percent: 100.0,
    });
    tracing::info!(bytes = output.data.len(), "export complete");
    Ok(output)
}
