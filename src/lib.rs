mod cli;
mod core;
mod processors;
mod utils;

pub use crate::cli::{parse_thumb_size, Cli};
pub use crate::core::{
    ComicImageError, ImageInfo, ImageProcessor, ProcessingPolicy, Result,
    DEFAULT_THUMBNAIL_SIZE, THUMBNAIL_QUALITY,
};
pub use crate::processors::{
    BatchOutcome, BatchProcessor, BatchReport, CompressError, Compressor, LoadedImage, Loader,
    MetadataProcessor, ResizeMode, Resizer, DEFAULT_OUTPUT_DIR, MAX_JPEG_DIMENSION,
};
pub use crate::utils::{
    batch_output_path, color_mode_name, format_kilobytes,
    generate_output_path, image_format_to_string, is_supported_format, SUPPORTED_EXTENSIONS,
};

pub mod prelude {
    pub use crate::{
        BatchProcessor, Compressor, ImageProcessor, Loader, MetadataProcessor, ProcessingPolicy,
        Resizer,
    };
}

// Re-export commonly used types
pub use image::DynamicImage;
