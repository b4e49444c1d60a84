use super::*;

use std::sync::{Arc, Mutex};

use crate::assets::fetch::ImageFetcher;
use crate::assets::fonts::FontBook;

struct NoFetch;

impl ImageFetcher for NoFetch {
    fn fetch(&self, url: &str, _timeout: Duration) -> AdmatResult<Vec<u8>> {
        Err(AdmatError::backend(format!("unexpected fetch of '{url}'")))
    }
}

struct StubService {
    response: Option<Vec<u8>>,
    calls: Arc<Mutex<u32>>,
}

impl StubService {
    fn ok(bytes: &[u8]) -> Self {
        Self {
            response: Some(bytes.to_vec()),
            calls: Arc::default(),
        }
    }

    fn failing() -> Self {
        Self {
            response: None,
            calls: Arc::default(),
        }
    }
}

impl RenderService for StubService {
    fn render(&self, _request: &ServiceRequest<'_>, _timeout: Duration) -> AdmatResult<Vec<u8>> {
        *self.calls.lock().unwrap() += 1;
        self.response
            .clone()
            .ok_or_else(|| AdmatError::backend("stub service down"))
    }
}

fn fast_policy() -> RasterPolicy {
    RasterPolicy {
        settle_delay: Duration::ZERO,
        ..RasterPolicy::default()
    }
}

fn fallback_pipeline(policy: RasterPolicy) -> RasterPipeline {
    RasterPipeline::new(CaptureStage::new(Box::new(NoFetch), FontBook::new()), policy)
}

fn hero_tree() -> (RenderTree, Brand, Sku) {
    let brand = Brand::new(1, "Acme");
    let sku = Sku::new(1, 1, "Runner");
    let tree = compose(
        &Catalog::builtin(),
        "hero1",
        &brand,
        &sku,
        &MasterOverrides::new(),
        &ComposeOpts::default(),
    )
    .unwrap();
    (tree, brand, sku)
}

#[test]
fn fallback_only_pipeline_captures_locally() {
    let (tree, brand, sku) = hero_tree();
    let mut pipeline = fallback_pipeline(fast_policy());
    let rendered = pipeline.render(&tree, &brand, &sku).unwrap();
    assert_eq!(rendered.path, RenderPath::Fallback);
    assert_eq!((rendered.width, rendered.height), (1200, 630));
    assert_eq!(rendered.format, OutputFormat::Png);
    let decoded = image::load_from_memory(&rendered.bytes).unwrap();
    assert_eq!(decoded.width(), 1200);
}

#[test]
fn upscale_scales_the_fallback_output() {
    let (tree, brand, sku) = hero_tree();
    let mut pipeline = fallback_pipeline(RasterPolicy {
        upscale: 2.0,
        ..fast_policy()
    });
    let rendered = pipeline.render(&tree, &brand, &sku).unwrap();
    assert_eq!((rendered.width, rendered.height), (2400, 1260));
}

#[test]
fn primary_path_serves_allow_listed_layouts() {
    let (tree, brand, sku) = hero_tree();
    let mut pipeline = fallback_pipeline(fast_policy()).with_service(
        Box::new(StubService::ok(b"primary bytes")),
        ["hero1".to_string()],
    );
    let rendered = pipeline.render(&tree, &brand, &sku).unwrap();
    assert_eq!(rendered.path, RenderPath::Primary);
    assert_eq!(rendered.bytes, b"primary bytes");
    // Primary output is canvas-sized, never upscaled locally.
    assert_eq!((rendered.width, rendered.height), (1200, 630));
}

#[test]
fn primary_bytes_pass_through_with_the_requested_format_label() {
    let (tree, brand, sku) = hero_tree();
    // JPEG magic bytes: the service picked its own container.
    let jpeg_ish = [0xff, 0xd8, 0xff, 0xe0, 0x00];
    let mut pipeline = fallback_pipeline(RasterPolicy {
        format: OutputFormat::Png,
        ..fast_policy()
    })
    .with_service(Box::new(StubService::ok(&jpeg_ish)), ["hero1".to_string()]);
    let rendered = pipeline.render(&tree, &brand, &sku).unwrap();
    // `format` is the requested format; the bytes are whatever the service
    // sent, untouched.
    assert_eq!(rendered.format, OutputFormat::Png);
    assert_eq!(rendered.bytes, jpeg_ish);
}

#[test]
fn layouts_off_the_allow_list_skip_the_service() {
    let (tree, brand, sku) = hero_tree();
    let service = StubService::ok(b"primary bytes");
    let calls = Arc::clone(&service.calls);
    let mut pipeline = fallback_pipeline(fast_policy())
        .with_service(Box::new(service), ["card1".to_string()]);
    let rendered = pipeline.render(&tree, &brand, &sku).unwrap();
    assert_eq!(rendered.path, RenderPath::Fallback);
    assert_eq!(*calls.lock().unwrap(), 0);
}

#[test]
fn primary_failure_recovers_through_the_fallback() {
    let (tree, brand, sku) = hero_tree();
    let mut pipeline = fallback_pipeline(fast_policy())
        .with_service(Box::new(StubService::failing()), ["hero1".to_string()]);
    let rendered = pipeline.render(&tree, &brand, &sku).unwrap();
    assert_eq!(rendered.path, RenderPath::Fallback);
    assert!(image::load_from_memory(&rendered.bytes).is_ok());
}

#[test]
fn empty_primary_payload_counts_as_a_failure() {
    let (tree, brand, sku) = hero_tree();
    let mut pipeline = fallback_pipeline(fast_policy())
        .with_service(Box::new(StubService::ok(b"")), ["hero1".to_string()]);
    let rendered = pipeline.render(&tree, &brand, &sku).unwrap();
    assert_eq!(rendered.path, RenderPath::Fallback);
}

#[test]
fn terminal_error_carries_the_primary_context() {
    let (tree, brand, sku) = hero_tree();
    // Invalid policy makes the fallback fail too.
    let mut pipeline = fallback_pipeline(RasterPolicy {
        upscale: 0.0,
        ..fast_policy()
    })
    .with_service(Box::new(StubService::failing()), ["hero1".to_string()]);
    let err = pipeline.render(&tree, &brand, &sku).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("after primary failure"), "{message}");
    assert!(message.contains("stub service down"), "{message}");
}

#[test]
fn policy_validation_bounds() {
    assert!(RasterPolicy::default().validate().is_ok());
    assert!(
        RasterPolicy {
            quality: 0,
            ..RasterPolicy::default()
        }
        .validate()
        .is_err()
    );
    assert!(
        RasterPolicy {
            quality: 101,
            ..RasterPolicy::default()
        }
        .validate()
        .is_err()
    );
    assert!(
        RasterPolicy {
            upscale: -1.0,
            ..RasterPolicy::default()
        }
        .validate()
        .is_err()
    );
}

#[test]
fn batch_keeps_completed_renders_when_one_layout_fails() {
    let catalog = Catalog::builtin();
    let brand = Brand::new(1, "Acme");
    let sku = Sku::new(1, 1, "Runner");
    let masters = MasterOverrides::new();
    let mut pipeline = fallback_pipeline(fast_policy());

    let keys = vec![
        "hero1".to_string(),
        "doesNotExist".to_string(),
        "card1".to_string(),
    ];
    let report = render_batch(
        &mut pipeline,
        &catalog,
        &brand,
        &sku,
        &masters,
        &ComposeOpts::default(),
        &keys,
    );

    assert_eq!(report.items.len(), 3);
    assert!(!report.all_ok());
    assert!(matches!(report.items[0].outcome, BatchOutcome::Rendered(_)));
    assert!(matches!(
        report.items[1].outcome,
        BatchOutcome::Failed { ref error } if error.contains("doesNotExist")
    ));
    assert!(matches!(report.items[2].outcome, BatchOutcome::Rendered(_)));
}

#[test]
fn all_ok_batch() {
    let catalog = Catalog::builtin();
    let brand = Brand::new(1, "Acme");
    let sku = Sku::new(1, 1, "Runner");
    let mut pipeline = fallback_pipeline(fast_policy());
    let keys = vec!["stat1".to_string(), "compare1".to_string()];
    let report = render_batch(
        &mut pipeline,
        &catalog,
        &brand,
        &sku,
        &MasterOverrides::new(),
        &ComposeOpts::default(),
        &keys,
    );
    assert!(report.all_ok());
}
