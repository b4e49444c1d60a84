use std::collections::BTreeSet;
use std::time::Duration;

use crate::brand::model::Brand;
use crate::compose::composer::{ComposeOpts, compose};
use crate::compose::tree::RenderTree;
use crate::foundation::error::{AdmatError, AdmatResult};
use crate::layout::catalog::Catalog;
use crate::raster::capture::CaptureStage;
use crate::raster::encode::OutputFormat;
use crate::raster::service::{RenderService, ServiceRequest};
use crate::resolve::position::MasterOverrides;
use crate::sku::model::Sku;

/// Tunable bounds and output knobs for one rasterization request.
#[derive(Clone, Debug)]
pub struct RasterPolicy {
    /// Primary-path call bound; a timeout is a primary failure, never a
    /// same-path retry.
    pub primary_timeout: Duration,
    /// Bounded wait per image before the capture settles it as errored.
    pub image_wait: Duration,
    /// Fixed delay after readiness, covering paint latency the load signals
    /// cannot observe.
    pub settle_delay: Duration,
    pub upscale: f64,
    pub format: OutputFormat,
    /// JPEG quality, 1–100. Ignored by the lossless formats.
    pub quality: u8,
}

impl Default for RasterPolicy {
    fn default() -> Self {
        Self {
            primary_timeout: Duration::from_secs(45),
            image_wait: Duration::from_secs(5),
            settle_delay: Duration::from_millis(300),
            upscale: 1.0,
            format: OutputFormat::Png,
            quality: 90,
        }
    }
}

impl RasterPolicy {
    pub fn validate(&self) -> AdmatResult<()> {
        if !self.upscale.is_finite() || self.upscale <= 0.0 {
            return Err(AdmatError::validation("upscale must be finite and > 0"));
        }
        if self.quality == 0 || self.quality > 100 {
            return Err(AdmatError::validation("quality must be in 1..=100"));
        }
        Ok(())
    }
}

/// Which backend produced the final bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderPath {
    Primary,
    Fallback,
}

#[derive(Clone, Debug)]
pub struct RenderedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// The format the policy requested. The capture path encodes to it; the
    /// primary service chooses its own container, so sniff `bytes` when the
    /// actual encoding matters.
    pub format: OutputFormat,
    pub path: RenderPath,
}

/// One render request walks `Requested → PrimaryAttempt → {Success |
/// FallbackAttempt} → {Success | Failed}`; state transitions are traced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RequestState {
    Requested,
    PrimaryAttempt,
    FallbackAttempt,
}

/// The dual-path rasterization pipeline. Stateless between requests: every
/// call receives fully materialized inputs and no render state survives the
/// call.
pub struct RasterPipeline {
    service: Option<Box<dyn RenderService>>,
    /// Layouts ported to the primary renderer. Anything else routes straight
    /// to fallback.
    primary_layouts: BTreeSet<String>,
    capture: CaptureStage,
    policy: RasterPolicy,
}

impl RasterPipeline {
    pub fn new(capture: CaptureStage, policy: RasterPolicy) -> Self {
        Self {
            service: None,
            primary_layouts: BTreeSet::new(),
            capture,
            policy,
        }
    }

    pub fn with_service(
        mut self,
        service: Box<dyn RenderService>,
        primary_layouts: impl IntoIterator<Item = String>,
    ) -> Self {
        self.service = Some(service);
        self.primary_layouts = primary_layouts.into_iter().collect();
        self
    }

    pub fn policy(&self) -> &RasterPolicy {
        &self.policy
    }

    pub fn capture_mut(&mut self) -> &mut CaptureStage {
        &mut self.capture
    }

    /// Render one composed tree. The primary service is attempted first when
    /// this layout is eligible; any primary failure is logged and recovered
    /// by the capture fallback without surfacing to the caller. Only a
    /// fallback failure is terminal, and it carries the context of whichever
    /// path failed last.
    #[tracing::instrument(skip_all, fields(layout = tree.layout_key))]
    pub fn render(
        &mut self,
        tree: &RenderTree,
        brand: &Brand,
        sku: &Sku,
    ) -> AdmatResult<RenderedImage> {
        let mut state = RequestState::Requested;
        tracing::debug!(?state, "render requested");
        let mut primary_error: Option<AdmatError> = None;

        if let Some(service) = &self.service {
            if self.primary_layouts.contains(&tree.layout_key) {
                state = RequestState::PrimaryAttempt;
                tracing::debug!(?state, "submitting to primary render service");
                let request = ServiceRequest {
                    layout_key: &tree.layout_key,
                    brand,
                    sku,
                };
                match service.render(&request, self.policy.primary_timeout) {
                    Ok(bytes) if !bytes.is_empty() => {
                        return Ok(RenderedImage {
                            bytes,
                            width: tree.canvas.width,
                            height: tree.canvas.height,
                            format: self.policy.format,
                            path: RenderPath::Primary,
                        });
                    }
                    Ok(_) => {
                        primary_error =
                            Some(AdmatError::backend("render service returned an empty payload"));
                    }
                    Err(err) => primary_error = Some(err),
                }
                // Logged, not surfaced: fallback decides the request's fate.
                if let Some(err) = &primary_error {
                    tracing::warn!(error = %err, "primary path failed, falling back to capture");
                }
            } else {
                tracing::debug!("layout not ported to primary renderer, routing to fallback");
            }
        }

        state = RequestState::FallbackAttempt;
        tracing::debug!(?state, "capturing locally");
        match self.capture.capture(tree, &self.policy) {
            Ok(bytes) => Ok(RenderedImage {
                bytes,
                width: scaled_dim(tree.canvas.width, self.policy.upscale),
                height: scaled_dim(tree.canvas.height, self.policy.upscale),
                format: self.policy.format,
                path: RenderPath::Fallback,
            }),
            Err(capture_err) => {
                let context = match primary_error {
                    Some(primary) => format!("{capture_err} (after primary failure: {primary})"),
                    None => capture_err.to_string(),
                };
                Err(AdmatError::capture(context))
            }
        }
    }
}

/// Outcome of one layout within a batch export.
#[derive(Debug)]
pub enum BatchOutcome {
    Rendered(RenderedImage),
    Failed { error: String },
}

#[derive(Debug)]
pub struct BatchItem {
    pub layout_key: String,
    pub outcome: BatchOutcome,
}

/// Per-layout report of a batch export. Completed renders are kept even when
/// a later layout fails; `all_ok` reports whether the batch as a whole
/// succeeded (no partial silent success).
#[derive(Debug, Default)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    pub fn all_ok(&self) -> bool {
        self.items
            .iter()
            .all(|item| matches!(item.outcome, BatchOutcome::Rendered(_)))
    }
}

/// Sequentially render several layouts for one SKU. Each layout is
/// independently subject to the full primary → fallback chain; one layout's
/// failure never aborts the rest of the batch.
#[allow(clippy::too_many_arguments)]
pub fn render_batch(
    pipeline: &mut RasterPipeline,
    catalog: &Catalog,
    brand: &Brand,
    sku: &Sku,
    masters: &MasterOverrides,
    opts: &ComposeOpts,
    layout_keys: &[String],
) -> BatchReport {
    let mut report = BatchReport::default();
    for layout_key in layout_keys {
        let outcome = compose(catalog, layout_key, brand, sku, masters, opts)
            .and_then(|tree| pipeline.render(&tree, brand, sku));
        let outcome = match outcome {
            Ok(image) => BatchOutcome::Rendered(image),
            Err(err) => {
                tracing::warn!(layout = %layout_key, error = %err, "batch layout failed");
                BatchOutcome::Failed {
                    error: err.to_string(),
                }
            }
        };
        report.items.push(BatchItem {
            layout_key: layout_key.clone(),
            outcome,
        });
    }
    report
}

fn scaled_dim(dim: u32, upscale: f64) -> u32 {
    ((f64::from(dim) * upscale).round() as u32).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/pipeline.rs"]
mod tests;
