use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "traytint", version, about = "Appearance-adaptive tray icons")]
struct Cli {
    /// Backend to rasterize with.
    #[arg(long, global = true, value_enum, default_value_t = BackendChoice::Auto)]
    backend: BackendChoice,

    /// Log pipeline diagnostics to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the colored and template halves of an icon.
    Split(SplitArgs),
    /// Write light and dark composites for every output scale.
    Render(RenderArgs),
    /// Compose several layers into light and dark composites.
    Layers(LayersArgs),
    /// Print a JSON summary of how an icon decomposes.
    Inspect(InspectArgs),
}

#[derive(clap::Args, Debug)]
struct ThresholdArgs {
    /// Near-black threshold in [0, 1] (linear luminance).
    #[arg(long, conflicts_with = "strict")]
    threshold: Option<f32>,

    /// Use the strict profile (threshold 0.02).
    #[arg(long)]
    strict: bool,
}

#[derive(Parser, Debug)]
struct SplitArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Pixel density of the input image.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    #[command(flatten)]
    threshold: ThresholdArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Pixel density of the input image.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Pipeline config JSON.
    #[arg(long, conflicts_with = "strict")]
    config: Option<PathBuf>,

    /// Use the strict profile (threshold 0.02).
    #[arg(long)]
    strict: bool,
}

#[derive(Parser, Debug)]
struct LayersArgs {
    /// Layer image, bottom first. Append `:template` to tint the layer.
    #[arg(long = "layer", required = true)]
    layers: Vec<String>,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Pixel density of the layer images.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Pixel density of the input image.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    #[command(flatten)]
    threshold: ThresholdArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Auto,
    Cpu,
    Gpu,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("traytint=debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let ctx = make_context(cli.backend);
    match cli.cmd {
        Command::Split(args) => cmd_split(args),
        Command::Render(args) => cmd_render(&ctx, args),
        Command::Layers(args) => cmd_layers(&ctx, args),
        Command::Inspect(args) => cmd_inspect(&ctx, args),
    }
}

fn make_context(choice: BackendChoice) -> traytint::RenderContext {
    let preference = match choice {
        BackendChoice::Auto => traytint::RenderSettings::from_env().preference,
        BackendChoice::Cpu => traytint::BackendPreference::Cpu,
        BackendChoice::Gpu => traytint::BackendPreference::Gpu,
    };
    traytint::RenderContext::new(&traytint::RenderSettings { preference })
}

fn pipeline_config(args: &ThresholdArgs) -> traytint::PipelineConfig {
    if args.strict {
        traytint::PipelineConfig::strict()
    } else if let Some(t) = args.threshold {
        traytint::PipelineConfig::with_threshold(t)
    } else {
        traytint::PipelineConfig::default()
    }
}

fn read_bitmap(path: &Path, scale: f64) -> anyhow::Result<traytint::Bitmap> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let buf = traytint::decode_image(&bytes, scale)
        .with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(traytint::Bitmap::from_buffer(buf))
}

fn write_png(path: &Path, buf: &traytint::PixelBuffer) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        buf.data(),
        buf.width(),
        buf.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn scale_label(scale: f64) -> String {
    if scale.fract() == 0.0 {
        format!("{scale:.0}")
    } else {
        format!("{scale}")
    }
}

fn write_adaptive(out_dir: &Path, img: &traytint::AdaptiveImage) -> anyhow::Result<()> {
    for (name, bitmap) in [("light", img.light()), ("dark", img.dark())] {
        for rep in bitmap.representations() {
            let file = format!("{name}@{}x.png", scale_label(rep.scale()));
            write_png(&out_dir.join(file), rep)?;
        }
    }
    Ok(())
}

fn cmd_split(args: SplitArgs) -> anyhow::Result<()> {
    let source = read_bitmap(&args.in_path, args.scale)?;
    let config = pipeline_config(&args.threshold);
    config.validate()?;

    let pair = traytint::decompose(&source, config.effective_threshold())?;
    for (name, bitmap) in [("colored", &pair.colored), ("template", &pair.template)] {
        let rep = bitmap
            .representation(args.scale)
            .with_context(|| format!("{name} half is missing the {}x representation", args.scale))?;
        write_png(&args.out_dir.join(format!("{name}.png")), rep)?;
    }
    Ok(())
}

fn cmd_render(ctx: &traytint::RenderContext, args: RenderArgs) -> anyhow::Result<()> {
    let source = read_bitmap(&args.in_path, args.scale)?;
    let config = match (&args.config, args.strict) {
        (Some(path), _) => traytint::PipelineConfig::from_path(path)?,
        (None, true) => traytint::PipelineConfig::strict(),
        (None, false) => traytint::PipelineConfig::default(),
    };

    let img = traytint::build_adaptive_icon(ctx, &source, &config)?;
    write_adaptive(&args.out_dir, &img)
}

fn cmd_layers(ctx: &traytint::RenderContext, args: LayersArgs) -> anyhow::Result<()> {
    let mut layers = Vec::with_capacity(args.layers.len());
    for spec in &args.layers {
        let (path, is_template) = match spec.rsplit_once(':') {
            Some((path, "template")) => (path, true),
            _ => (spec.as_str(), false),
        };
        let bitmap = read_bitmap(Path::new(path), args.scale)?;
        layers.push(traytint::Layer {
            bitmap,
            is_template,
        });
    }

    let img = traytint::compose_layers(ctx, &layers)?;
    write_adaptive(&args.out_dir, &img)
}

fn cmd_inspect(ctx: &traytint::RenderContext, args: InspectArgs) -> anyhow::Result<()> {
    let source = read_bitmap(&args.in_path, args.scale)?;
    let config = pipeline_config(&args.threshold);
    config.validate()?;
    let threshold = config.effective_threshold();

    let pair = traytint::decompose(&source, threshold)?;
    let count = |b: &traytint::Bitmap| {
        b.representation(args.scale)
            .map(traytint::PixelBuffer::visible_pixel_count)
            .unwrap_or(0)
    };
    let size = source.size();
    let summary = serde_json::json!({
        "width": size.width,
        "height": size.height,
        "scale": args.scale,
        "threshold": threshold,
        "template_px": count(&pair.template),
        "colored_px": count(&pair.colored),
        "backend": format!("{:?}", ctx.backend_kind()),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
