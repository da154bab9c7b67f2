// panelpress/src/processors/compressor.rs
use crate::core::{ComicImageError, Result};
use image::{DynamicImage, ImageFormat};
use jpeg_encoder::{ColorType, Encoder, EncodingError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Largest width or height a baseline JPEG frame can carry.
pub const MAX_JPEG_DIMENSION: u32 = u16::MAX as u32;

#[derive(Debug, thiserror::Error)]
pub enum CompressError {
    #[error("{width}x{height} exceeds the JPEG limit of 65535 pixels per side")]
    TooLarge { width: u32, height: u32 },
    #[error(transparent)]
    Jpeg(#[from] EncodingError),
}

pub struct Compressor {
    quality: u8,
}

impl Compressor {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Fails when the `image` crate cannot read back the JPEGs written here.
    pub fn ensure_available() -> Result<()> {
        if ImageFormat::Jpeg.reading_enabled() {
            Ok(())
        } else {
            Err(ComicImageError::DependencyMissing(
                "image crate was built without the JPEG decoder".to_string(),
            ))
        }
    }

    /// Encodes `image` as JPEG and writes it to `path`.
    ///
    /// The output is staged in a temporary file beside `path` and renamed into
    /// place only after the encoder finished.
    pub fn save_jpeg(&self, image: &DynamicImage, path: &Path) -> Result<()> {
        log::debug!(
            "Saving image to {} as JPEG, quality: {}",
            path.display(),
            self.quality
        );

        let bytes = self.compress_to_bytes(image).map_err(|e| encode_error(path, e))?;
        write_atomic(path, &bytes)?;

        log::info!("Saved image: {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    /// Encodes with optimized Huffman tables. Grey input stays single-channel;
    /// anything else is encoded from its RGB8 form.
    pub fn compress_to_bytes(&self, image: &DynamicImage) -> std::result::Result<Vec<u8>, CompressError> {
        self.encode(image, true)
    }

    fn encode(&self, image: &DynamicImage, optimize: bool) -> std::result::Result<Vec<u8>, CompressError> {
        let (width, height) = (image.width(), image.height());
        let too_large = || CompressError::TooLarge { width, height };
        let w = u16::try_from(width).map_err(|_| too_large())?;
        let h = u16::try_from(height).map_err(|_| too_large())?;

        let mut buffer = Vec::new();
        let mut encoder = Encoder::new(&mut buffer, self.quality);
        encoder.set_optimized_huffman_tables(optimize);

        match image {
            DynamicImage::ImageLuma8(grey) => encoder.encode(grey.as_raw(), w, h, ColorType::Luma)?,
            DynamicImage::ImageRgb8(rgb) => encoder.encode(rgb.as_raw(), w, h, ColorType::Rgb)?,
            other => encoder.encode(other.to_rgb8().as_raw(), w, h, ColorType::Rgb)?,
        }

        Ok(buffer)
    }
}

fn encode_error(path: &Path, reason: impl std::fmt::Display) -> ComicImageError {
    ComicImageError::Encode {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    std::fs::create_dir_all(&parent).map_err(|e| encode_error(path, e))?;

    let mut staged = NamedTempFile::new_in(&parent).map_err(|e| encode_error(path, e))?;
    staged.write_all(bytes).map_err(|e| encode_error(path, e))?;
    staged.flush().map_err(|e| encode_error(path, e))?;
    staged.persist(path).map_err(|e| encode_error(path, e.error))?;

    Ok(())
}
