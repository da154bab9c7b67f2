// panelpress/src/core/mod.rs
pub mod processor;

use image::{ColorType, ImageFormat};
use std::path::PathBuf;
use thiserror::Error;

pub use processor::ImageProcessor;

/// Quality used for thumbnails, independent of the policy quality.
pub const THUMBNAIL_QUALITY: u8 = 90;

/// Bounding box `(width, height)` used when no thumbnail size is given.
pub const DEFAULT_THUMBNAIL_SIZE: (u32, u32) = (400, 600);

const MAX_DIMENSION: u32 = 100_000;

/// Resize and encode bounds applied to every optimized page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingPolicy {
    pub max_width: u32,
    pub max_height: u32,
    pub quality: u8,
}

impl Default for ProcessingPolicy {
    fn default() -> Self {
        Self {
            max_width: 1200,
            max_height: 1800,
            quality: 85,
        }
    }
}

impl ProcessingPolicy {
    pub fn new(max_width: u32, max_height: u32, quality: u8) -> Result<Self> {
        let policy = Self {
            max_width,
            max_height,
            quality,
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(ComicImageError::InvalidParameter(
                "Maximum width and height must be positive".to_string(),
            ));
        }

        if self.max_width > MAX_DIMENSION || self.max_height > MAX_DIMENSION {
            return Err(ComicImageError::InvalidParameter(
                "Dimensions too large (max 100,000 pixels)".to_string(),
            ));
        }

        if self.quality == 0 || self.quality > 100 {
            return Err(ComicImageError::InvalidParameter(
                "Quality must be between 1 and 100".to_string(),
            ));
        }

        Ok(())
    }
}

/// Snapshot of an image file on disk, taken at the moment of the call.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: Option<ImageFormat>,
    pub color: ColorType,
    pub file_size: u64,
    pub has_exif: bool,
}

impl ImageInfo {
    pub fn format_name(&self) -> String {
        self.format
            .map(crate::utils::image_format_to_string)
            .unwrap_or_else(|| "Unknown".to_string())
    }

    pub fn color_mode(&self) -> &'static str {
        crate::utils::color_mode_name(self.color)
    }
}

#[derive(Error, Debug)]
pub enum ComicImageError {
    #[error("Dependency missing: {0}")]
    DependencyMissing(String),

    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write {}: {reason}", .path.display())]
    Encode { path: PathBuf, reason: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ComicImageError>;
