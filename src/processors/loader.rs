// panelpress/src/processors/loader.rs
use crate::core::{ComicImageError, Result};
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::io::ErrorKind;
use std::path::Path;

/// A decoded page together with the container format it was read from.
pub struct LoadedImage {
    pub image: DynamicImage,
    pub format: Option<ImageFormat>,
}

#[derive(Clone, Default)]
pub struct Loader;

impl Loader {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, path: &Path) -> Result<DynamicImage> {
        Ok(self.load_with_format(path)?.image)
    }

    pub fn load_with_format(&self, path: &Path) -> Result<LoadedImage> {
        log::debug!("Loading image from: {}", path.display());

        self.validate_path(path)?;

        let reader = ImageReader::open(path)
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ComicImageError::InputNotFound(path.to_path_buf()),
                _ => ComicImageError::Io(e),
            })?
            .with_guessed_format()?;

        let format = reader.format();
        let image = reader.decode().map_err(|source| ComicImageError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let (width, height) = image.dimensions();
        log::info!(
            "Loaded image: {}x{} pixels, color: {:?}",
            width,
            height,
            image.color()
        );

        Ok(LoadedImage { image, format })
    }

    /// Converts the decoded image to a colour type the JPEG encoder accepts.
    ///
    /// Alpha is dropped rather than composited. Palette images never reach
    /// this point as the PNG decoder expands them to RGB(A).
    pub fn normalize_color(&self, image: DynamicImage) -> DynamicImage {
        match image.color() {
            ColorType::L8 | ColorType::Rgb8 => image,
            ColorType::L16 => DynamicImage::ImageLuma8(image.to_luma8()),
            other => {
                log::debug!("Converting {:?} to RGB8", other);
                DynamicImage::ImageRgb8(image.to_rgb8())
            }
        }
    }

    fn validate_path(&self, path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(ComicImageError::InputNotFound(path.to_path_buf()));
        }

        Ok(())
    }
}
