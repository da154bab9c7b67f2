use clap::Parser;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  panelpress input.png output.jpg --width 1200 --quality 85
  panelpress cover.png --thumbnail --thumb-size 400x600
  panelpress pages/ --batch --jobs 4";

#[derive(Parser, Debug)]
#[command(
    name = "panelpress",
    version,
    about = "Resize, compress and thumbnail comic page images",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Image to process, or a directory of images with --batch
    pub input: PathBuf,

    /// Output file, or output directory with --batch
    pub output: Option<PathBuf>,

    /// Maximum output width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Maximum output height in pixels
    #[arg(long, default_value_t = 1800)]
    pub height: u32,

    /// JPEG quality (1-100)
    #[arg(long, default_value_t = 85)]
    pub quality: u8,

    /// Optimize every supported image in the input directory
    #[arg(long, conflicts_with_all = ["thumbnail", "info"])]
    pub batch: bool,

    /// Write a cover thumbnail instead of an optimized page
    #[arg(long, conflicts_with = "info")]
    pub thumbnail: bool,

    /// Thumbnail bounding box as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_thumb_size, default_value = "400x600")]
    pub thumb_size: (u32, u32),

    /// Print dimensions, format and size of the input and exit
    #[arg(long)]
    pub info: bool,

    /// Number of images processed at once in batch mode
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn examples() -> &'static str {
        EXAMPLES
    }
}

/// Parses `WIDTHxHEIGHT`, e.g. `400x600`.
pub fn parse_thumb_size(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(|c| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", value))?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width in '{}'", value))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height in '{}'", value))?;

    if width == 0 || height == 0 {
        return Err(format!("thumbnail size must be positive, got '{}'", value));
    }

    Ok((width, height))
}
