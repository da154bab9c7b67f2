// panelpress/src/processors/mod.rs
mod batch;
mod compressor;
mod loader;
mod metadata;
mod resizer;

pub use batch::{BatchOutcome, BatchProcessor, BatchReport, DEFAULT_OUTPUT_DIR};
pub use compressor::{CompressError, Compressor, MAX_JPEG_DIMENSION};
pub use loader::{LoadedImage, Loader};
pub use metadata::MetadataProcessor;
pub use resizer::{ResizeMode, Resizer};

