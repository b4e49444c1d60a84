//! Admat is a brand marketing-image composition and rendering engine.
//!
//! A brand's visual identity (color roles, typography presets, image roles)
//! is defined once and reused across fixed-canvas layouts, each populated
//! per SKU with copy and images and fine-tuned through a three-tier override
//! model (specification default < master override < instance override).
//!
//! The workflow is composition-oriented:
//!
//! - Look a layout up in the [`Catalog`]
//! - [`compose`] it against a [`Brand`] and [`Sku`] snapshot into a
//!   [`RenderTree`]
//! - Hand the tree to a [`RasterPipeline`], which tries the primary render
//!   service and falls back to local capture
#![forbid(unsafe_code)]

pub mod assets;
pub mod brand;
pub mod compose;
pub mod copygen;
pub mod foundation;
pub mod layout;
pub mod raster;
pub mod resolve;
pub mod sku;
pub mod store;

pub use crate::assets::fetch::{AssetFetcher, ImageFetcher};
pub use crate::assets::fonts::FontBook;
pub use crate::assets::library::{
    AssetLibrary, AssetPage, AssetQuery, AssetRecord, AssetUpload, DamCredentials,
    InMemoryAssetLibrary,
};
pub use crate::brand::model::{Brand, ColorRole, Palette, TextPreset, TypeStyle, Typography};
pub use crate::brand::variations::{ColorVariation, generate_variations};
pub use crate::compose::composer::{ComposeOpts, compose};
pub use crate::compose::tree::{BoxPaint, DrawBox, RenderTree};
pub use crate::copygen::completion::{CopyCompletion, CopyPrompt, conform_copy, prompt_for};
pub use crate::foundation::color::Rgba8;
pub use crate::foundation::error::{AdmatError, AdmatResult};
pub use crate::foundation::geom::{Canvas, ElementFrame, FrameOverride};
pub use crate::layout::catalog::{Catalog, CopyField, LayoutTemplate};
pub use crate::layout::spec::{
    ElementKindSpec, ElementSpec, LayoutSpecification, ObjectFit, TextAlign, TextTransform,
};
pub use crate::raster::capture::CaptureStage;
pub use crate::raster::encode::OutputFormat;
pub use crate::raster::pipeline::{
    BatchItem, BatchOutcome, BatchReport, RasterPipeline, RasterPolicy, RenderPath, RenderedImage,
    render_batch,
};
pub use crate::raster::service::{HttpRenderService, RenderService, ServiceRequest};
pub use crate::resolve::color::{resolve_color, resolve_role_name};
pub use crate::resolve::content::{
    ImageSource, PLACEHOLDER_IMAGE_URL, ResolvedImage, resolve_copy, resolve_image,
};
pub use crate::resolve::position::{MasterOverrides, resolve_position};
pub use crate::sku::custom::{
    CustomContent, CustomContentOverride, CustomElement, CustomKind, CustomStyle,
};
pub use crate::sku::model::Sku;
pub use crate::store::memory::{BrandStore, MemoryStore, SkuStore, Snapshot, TemplateStore};
