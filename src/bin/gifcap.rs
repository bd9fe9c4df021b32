use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use gifcap::{
    CaptionOptions, CaptionPosition, CaptionStyle, Captioner, Color, EncoderOptions, FileSource,
    GifSource, SizePolicy,
};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gifcap", version, about = "Burn text captions into animated GIFs")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Caption every frame and write a new GIF.
    Caption(CaptionArgs),
    /// Caption the first frame only and write it as a PNG.
    Preview(PreviewArgs),
    /// Print frame count, dimensions and duration of a GIF.
    Info(InfoArgs),
}

#[derive(Parser, Debug)]
struct CaptionArgs {
    /// Source GIF: a path, a `file://` URL or (with the `http` feature) an http(s) URL.
    #[arg(long = "in")]
    input: String,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    caption: CaptionFlags,

    /// NeuQuant sampling factor, 1 (best) to 30 (fastest).
    #[arg(long)]
    quality: Option<u8>,

    /// Encoder worker threads.
    #[arg(long)]
    workers: Option<usize>,

    /// Output width; frames are resized when set.
    #[arg(long)]
    width: Option<u32>,

    /// Output height; frames are resized when set.
    #[arg(long)]
    height: Option<u32>,

    /// Size budget in bytes.
    #[arg(long)]
    max_bytes: Option<usize>,

    /// Fail instead of warning when the output is over the size budget.
    #[arg(long)]
    strict_size: bool,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Source GIF.
    #[arg(long = "in")]
    input: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    caption: CaptionFlags,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Source GIF.
    #[arg(long = "in")]
    input: String,
}

#[derive(Args, Debug)]
struct CaptionFlags {
    /// Caption text.
    #[arg(long)]
    text: Option<String>,

    #[arg(long, value_enum)]
    position: Option<PositionChoice>,

    #[arg(long, value_enum)]
    style: Option<StyleChoice>,

    #[arg(long)]
    font_size: Option<f32>,

    /// Fill color as #RGB, #RRGGBB or #RRGGBBAA.
    #[arg(long)]
    text_color: Option<Color>,

    /// Outline color as #RGB, #RRGGBB or #RRGGBBAA.
    #[arg(long)]
    stroke_color: Option<Color>,

    /// Outline width in pixels; 0 disables the outline.
    #[arg(long)]
    stroke_width: Option<f32>,

    #[arg(long)]
    padding: Option<f32>,

    /// JSON file with `caption` and `encoder` sections. Flags win over file values.
    #[arg(long)]
    options: Option<PathBuf>,

    /// TrueType/OpenType font to render with instead of the built-in bitmap face
    /// (requires the `truetype` feature).
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PositionChoice {
    Top,
    Bottom,
    Center,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleChoice {
    Classic,
    Modern,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct OptionsFile {
    caption: CaptionOptions,
    encoder: EncoderOptions,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Caption(args) => cmd_caption(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Info(args) => cmd_info(args),
    }
}

fn cmd_caption(args: CaptionArgs) -> anyhow::Result<()> {
    let file = read_options_file(args.caption.options.as_deref())?;
    let caption = args.caption.apply(file.caption);

    let mut encoder = file.encoder;
    if let Some(q) = args.quality {
        encoder.quality = q;
    }
    if let Some(n) = args.workers {
        encoder.workers = n;
    }
    if args.width.is_some() {
        encoder.width = args.width;
    }
    if args.height.is_some() {
        encoder.height = args.height;
    }
    if let Some(max) = args.max_bytes {
        encoder.size_budget.max_bytes = max;
    }
    if args.strict_size {
        encoder.size_budget.policy = SizePolicy::Reject;
    }

    let captioner = make_captioner(&args.input, &args.caption)?.with_encoder_options(encoder);
    let mut last_pct = -1.0f32;
    let out = captioner.create_captioned_gif(&args.input, &caption, |stage, pct| {
        if pct.floor() > last_pct.floor() {
            tracing::info!(stage, percent = pct.floor(), "progress");
        }
        last_pct = pct;
    })?;

    create_parent_dir(&args.out)?;
    std::fs::write(&args.out, &out.bytes)
        .with_context(|| format!("write gif '{}'", args.out.display()))?;

    if let Some(warning) = out.size_warning {
        eprintln!("warning: {warning}");
    }
    eprintln!(
        "wrote {} ({} frames, {}x{}, {} ms, {} bytes)",
        args.out.display(),
        out.frame_count,
        out.width,
        out.height,
        out.duration_ms,
        out.file_size
    );
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let file = read_options_file(args.caption.options.as_deref())?;
    let caption = args.caption.apply(file.caption);

    let captioner = make_captioner(&args.input, &args.caption)?;
    let preview = captioner.preview_caption(&args.input, &caption)?;
    let png = gifcap::encode_png(&preview)?;

    create_parent_dir(&args.out)?;
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let source = make_source(&args.input)?;
    let bytes = source.fetch(&args.input)?;
    let decoded = gifcap::decode_gif(&bytes)?;

    println!("frames:   {}", decoded.frames.len());
    println!("size:     {}x{}", decoded.width, decoded.height);
    println!("duration: {} ms", decoded.duration_ms());
    println!("bytes:    {}", bytes.len());
    Ok(())
}

impl CaptionFlags {
    fn apply(&self, mut base: CaptionOptions) -> CaptionOptions {
        if let Some(text) = &self.text {
            base.text = text.clone();
        }
        if let Some(p) = self.position {
            base.position = match p {
                PositionChoice::Top => CaptionPosition::Top,
                PositionChoice::Bottom => CaptionPosition::Bottom,
                PositionChoice::Center => CaptionPosition::Center,
            };
        }
        if let Some(s) = self.style {
            base.style = match s {
                StyleChoice::Classic => CaptionStyle::Classic,
                StyleChoice::Modern => CaptionStyle::Modern,
            };
        }
        base.font_size = self.font_size.or(base.font_size);
        base.text_color = self.text_color.or(base.text_color);
        base.stroke_color = self.stroke_color.or(base.stroke_color);
        base.stroke_width = self.stroke_width.or(base.stroke_width);
        base.padding = self.padding.or(base.padding);
        base
    }
}

fn read_options_file(path: Option<&Path>) -> anyhow::Result<OptionsFile> {
    let Some(path) = path else {
        return Ok(OptionsFile::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("open options '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse options '{}'", path.display()))
}

fn make_source(location: &str) -> anyhow::Result<Box<dyn GifSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        #[cfg(feature = "http")]
        return Ok(Box::new(gifcap::HttpSource::new()?));
        #[cfg(not(feature = "http"))]
        anyhow::bail!("'{location}' is a url but gifcap was built without the `http` feature");
    }
    Ok(Box::new(FileSource::new()))
}

fn make_captioner(
    location: &str,
    flags: &CaptionFlags,
) -> anyhow::Result<Captioner<Box<dyn GifSource>>> {
    let captioner = Captioner::new(make_source(location)?);
    match &flags.font {
        Some(path) => load_font(captioner, path),
        None => Ok(captioner),
    }
}

#[cfg(feature = "truetype")]
fn load_font(
    captioner: Captioner<Box<dyn GifSource>>,
    path: &Path,
) -> anyhow::Result<Captioner<Box<dyn GifSource>>> {
    let bytes = std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
    let family = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "custom".to_string());
    let face = gifcap::TrueTypeFace::from_bytes(family, &bytes)?;
    Ok(captioner.with_typeface(face))
}

#[cfg(not(feature = "truetype"))]
fn load_font(
    _captioner: Captioner<Box<dyn GifSource>>,
    path: &Path,
) -> anyhow::Result<Captioner<Box<dyn GifSource>>> {
    anyhow::bail!(
        "--font '{}' needs gifcap built with the `truetype` feature",
        path.display()
    )
}

fn create_parent_dir(out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
