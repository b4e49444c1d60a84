use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "admat", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the layout catalog.
    Layouts(LayoutsArgs),
    /// List the color variation tables for a layout.
    Variations(VariationsArgs),
    /// Render one layout for a SKU to an image file.
    Render(RenderArgs),
    /// Batch-export several layouts for a SKU.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct LayoutsArgs {
    /// Store snapshot JSON; defaults to the built-in catalog.
    #[arg(long)]
    store: Option<PathBuf>,

    /// Include disabled layouts.
    #[arg(long)]
    all: bool,
}

#[derive(Parser, Debug)]
struct VariationsArgs {
    /// Layout key (e.g. hero1).
    #[arg(long)]
    layout: String,

    /// Brand JSON; defaults to a starter brand.
    #[arg(long)]
    brand: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Brand JSON.
    #[arg(long)]
    brand: PathBuf,

    /// SKU JSON.
    #[arg(long)]
    sku: PathBuf,

    /// Layout key (e.g. hero1).
    #[arg(long)]
    layout: String,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    raster: RasterArgs,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Brand JSON.
    #[arg(long)]
    brand: PathBuf,

    /// SKU JSON.
    #[arg(long)]
    sku: PathBuf,

    /// Layout keys to export; defaults to every enabled layout.
    #[arg(long, value_delimiter = ',')]
    layouts: Vec<String>,

    /// Output directory (one file per layout).
    #[arg(long)]
    out_dir: PathBuf,

    #[command(flatten)]
    raster: RasterArgs,
}

#[derive(Parser, Debug)]
struct RasterArgs {
    /// Master overrides JSON (masterOverrides[layout][element]).
    #[arg(long)]
    masters: Option<PathBuf>,

    /// Directory of .ttf/.otf brand fonts.
    #[arg(long)]
    fonts: Option<PathBuf>,

    /// Root for non-URL image references.
    #[arg(long, default_value = ".")]
    assets_root: PathBuf,

    /// Primary render service endpoint; unset routes everything to the
    /// local capture path.
    #[arg(long)]
    service_url: Option<String>,

    /// Layouts ported to the primary renderer (with --service-url).
    #[arg(long, value_delimiter = ',')]
    primary_layouts: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,

    /// JPEG quality (1-100).
    #[arg(long, default_value_t = 90)]
    quality: u8,

    /// Output upscale factor.
    #[arg(long, default_value_t = 1.0)]
    upscale: f64,

    /// Color variation name to apply (see `variations`).
    #[arg(long)]
    variation: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Jpeg,
    Webp,
}

impl From<FormatChoice> for admat::OutputFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Png => admat::OutputFormat::Png,
            FormatChoice::Jpeg => admat::OutputFormat::Jpeg,
            FormatChoice::Webp => admat::OutputFormat::Webp,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Layouts(args) => cmd_layouts(args),
        Command::Variations(args) => cmd_variations(args),
        Command::Render(args) => cmd_render(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f)).with_context(|| format!("parse {what} JSON"))
}

fn cmd_layouts(args: LayoutsArgs) -> anyhow::Result<()> {
    let catalog = match &args.store {
        Some(path) => admat::MemoryStore::load_json(path)?.catalog(),
        None => admat::Catalog::builtin(),
    };
    for template in &catalog.templates {
        if !template.enabled && !args.all {
            continue;
        }
        println!(
            "{:<16} {:>4}x{:<4} {:<10} {}{}",
            template.key,
            template.spec.canvas.width,
            template.spec.canvas.height,
            template.category,
            template.name,
            if template.enabled { "" } else { " (disabled)" },
        );
    }
    Ok(())
}

fn cmd_variations(args: VariationsArgs) -> anyhow::Result<()> {
    let brand = match &args.brand {
        Some(path) => read_json(path, "brand")?,
        None => admat::Brand::new(0, "preview"),
    };
    for variation in admat::generate_variations(&brand, &args.layout) {
        let remap: Vec<String> = variation
            .remap
            .iter()
            .map(|(role, takes)| format!("{} -> {}", role.as_str(), takes.as_str()))
            .collect();
        println!("{:<16} {}", variation.name, remap.join(", "));
    }
    Ok(())
}

fn load_inputs(
    brand_path: &Path,
    sku_path: &Path,
    raster: &RasterArgs,
) -> anyhow::Result<(admat::Brand, admat::Sku, admat::MasterOverrides)> {
    let brand: admat::Brand = read_json(brand_path, "brand")?;
    let sku: admat::Sku = read_json(sku_path, "sku")?;
    let masters = match &raster.masters {
        Some(path) => read_json(path, "master overrides")?,
        None => admat::MasterOverrides::new(),
    };
    Ok((brand, sku, masters))
}

fn build_pipeline(raster: &RasterArgs) -> anyhow::Result<admat::RasterPipeline> {
    let mut fonts = admat::FontBook::new();
    if let Some(dir) = &raster.fonts {
        let count = fonts.scan_dir(dir)?;
        eprintln!("registered {count} font file(s) from {}", dir.display());
    }

    let fetcher = admat::AssetFetcher::new(&raster.assets_root)?;
    let capture = admat::CaptureStage::new(Box::new(fetcher), fonts);

    let policy = admat::RasterPolicy {
        format: raster.format.into(),
        quality: raster.quality,
        upscale: raster.upscale,
        ..admat::RasterPolicy::default()
    };
    policy.validate()?;

    let mut pipeline = admat::RasterPipeline::new(capture, policy);
    if let Some(url) = &raster.service_url {
        let service = admat::HttpRenderService::new(url)?;
        pipeline = pipeline.with_service(Box::new(service), raster.primary_layouts.clone());
    }
    Ok(pipeline)
}

fn compose_opts(raster: &RasterArgs, brand: &admat::Brand, layout: &str) -> admat::ComposeOpts {
    let variation = raster.variation.as_ref().and_then(|name| {
        admat::generate_variations(brand, layout)
            .into_iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
    });
    admat::ComposeOpts {
        editor: false,
        variation,
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (brand, sku, masters) = load_inputs(&args.brand, &args.sku, &args.raster)?;
    let catalog = admat::Catalog::builtin();
    let opts = compose_opts(&args.raster, &brand, &args.layout);

    let tree = admat::compose(&catalog, &args.layout, &brand, &sku, &masters, &opts)?;
    let mut pipeline = build_pipeline(&args.raster)?;
    let image = pipeline.render(&tree, &brand, &sku)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &image.bytes)
        .with_context(|| format!("write image '{}'", args.out.display()))?;
    eprintln!(
        "wrote {} ({}x{}, {:?} path)",
        args.out.display(),
        image.width,
        image.height,
        image.path
    );
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let (brand, sku, masters) = load_inputs(&args.brand, &args.sku, &args.raster)?;
    let catalog = admat::Catalog::builtin();
    let layouts: Vec<String> = if args.layouts.is_empty() {
        catalog.enabled().map(|t| t.key.clone()).collect()
    } else {
        args.layouts.clone()
    };

    let mut pipeline = build_pipeline(&args.raster)?;
    let opts = admat::ComposeOpts::default();
    let report = admat::render_batch(
        &mut pipeline,
        &catalog,
        &brand,
        &sku,
        &masters,
        &opts,
        &layouts,
    );

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for item in &report.items {
        match &item.outcome {
            admat::BatchOutcome::Rendered(image) => {
                let out = args
                    .out_dir
                    .join(format!("{}.{}", item.layout_key, image.format.extension()));
                std::fs::write(&out, &image.bytes)
                    .with_context(|| format!("write image '{}'", out.display()))?;
                eprintln!("wrote {}", out.display());
            }
            admat::BatchOutcome::Failed { error } => {
                eprintln!("FAILED {}: {error}", item.layout_key);
            }
        }
    }

    if !report.all_ok() {
        anyhow::bail!("batch export finished with failures");
    }
    Ok(())
}
