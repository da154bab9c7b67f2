// panelpress/src/core/processor.rs
use super::{
    ComicImageError, ImageInfo, ProcessingPolicy, Result, DEFAULT_THUMBNAIL_SIZE,
    THUMBNAIL_QUALITY,
};
use crate::processors::{BatchProcessor, BatchReport, Compressor, Loader, MetadataProcessor, ResizeMode, Resizer};
use crate::utils::{generate_output_path, is_jpeg_path};
use std::path::{Path, PathBuf};

const OPTIMIZED_SUFFIX: &str = "_optimized";
const THUMBNAIL_SUFFIX: &str = "_thumb";

pub struct ImageProcessor {
    policy: ProcessingPolicy,
    jobs: usize,
    loader: Loader,
    resizer: Resizer,
    compressor: Compressor,
    thumbnail_compressor: Compressor,
    metadata_processor: MetadataProcessor,
}

impl ImageProcessor {
    pub fn new(policy: ProcessingPolicy) -> Result<Self> {
        policy.validate()?;

        Ok(Self {
            policy,
            jobs: 1,
            loader: Loader::new(),
            resizer: Resizer::new(),
            compressor: Compressor::new(policy.quality),
            thumbnail_compressor: Compressor::new(THUMBNAIL_QUALITY),
            metadata_processor: MetadataProcessor::new(),
        })
    }

    /// Number of files `batch_optimize` works on at once.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn policy(&self) -> &ProcessingPolicy {
        &self.policy
    }

    /// Shrinks a page to fit the policy bounds and re-encodes it as JPEG.
    ///
    /// Without `output_path` the result goes next to the input as
    /// `<stem>_optimized.jpg`. Returns the path that was written.
    pub fn optimize_image<P: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Option<&Path>,
    ) -> Result<PathBuf> {
        Compressor::ensure_available()?;

        let input_path = input_path.as_ref();
        let output_path = generate_output_path(input_path, output_path, OPTIMIZED_SUFFIX);
        warn_on_foreign_extension(&output_path);

        let image = self.loader.load(input_path)?;
        let image = self.loader.normalize_color(image);

        let image = self.resizer.resize(
            image,
            ResizeMode::Bounded(self.policy.max_width, self.policy.max_height),
        );

        self.compressor.save_jpeg(&image, &output_path)?;

        Ok(output_path)
    }

    /// Writes a cover thumbnail that fits inside `size`, at quality 90.
    ///
    /// Without `output_path` the result is `<stem>_thumb.jpg` next to the input.
    pub fn create_thumbnail<P: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Option<&Path>,
        size: (u32, u32),
    ) -> Result<PathBuf> {
        Compressor::ensure_available()?;

        let (box_w, box_h) = size;
        if box_w == 0 || box_h == 0 {
            return Err(ComicImageError::InvalidParameter(format!(
                "Thumbnail size must be positive, got {}x{}",
                box_w, box_h
            )));
        }

        let input_path = input_path.as_ref();
        let output_path = generate_output_path(input_path, output_path, THUMBNAIL_SUFFIX);
        warn_on_foreign_extension(&output_path);

        let image = self.loader.load(input_path)?;
        let image = self.loader.normalize_color(image);
        let image = self.resizer.resize(image, ResizeMode::Thumbnail(box_w, box_h));

        self.thumbnail_compressor.save_jpeg(&image, &output_path)?;

        Ok(output_path)
    }

    /// [`create_thumbnail`](Self::create_thumbnail) with the 400x600 box.
    pub fn create_default_thumbnail<P: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Option<&Path>,
    ) -> Result<PathBuf> {
        self.create_thumbnail(input_path, output_path, DEFAULT_THUMBNAIL_SIZE)
    }

    /// Optimizes every supported image directly inside `input_dir`.
    ///
    /// Outputs go to `output_dir`, or `<input_dir>/optimized`, as
    /// `<stem>.jpg`. A file that fails is recorded in the report and the
    /// batch moves on.
    pub fn batch_optimize<P: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Option<&Path>,
    ) -> Result<BatchReport> {
        Compressor::ensure_available()?;

        BatchProcessor::new(self.policy, self.jobs)?.process_directory(input_dir.as_ref(), output_dir)
    }

    pub fn get_image_info<P: AsRef<Path>>(&self, path: P) -> Result<ImageInfo> {
        Compressor::ensure_available()?;

        let path = path.as_ref();
        let loaded = self.loader.load_with_format(path)?;
        let file_size = std::fs::metadata(path)?.len();

        Ok(ImageInfo {
            width: loaded.image.width(),
            height: loaded.image.height(),
            format: loaded.format,
            color: loaded.image.color(),
            file_size,
            has_exif: self.metadata_processor.has_metadata(path),
        })
    }
}

fn warn_on_foreign_extension(output_path: &Path) {
    if !is_jpeg_path(output_path) {
        log::warn!(
            "{} will contain JPEG data regardless of its extension",
            output_path.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};

    #[test]
    fn rejects_invalid_policy() {
        let policy = ProcessingPolicy {
            quality: 0,
            ..Default::default()
        };
        assert!(ImageProcessor::new(policy).is_err());
    }

    #[test]
    fn jobs_never_drop_below_one() {
        let processor = ImageProcessor::new(ProcessingPolicy::default())
            .unwrap()
            .with_jobs(0);
        assert_eq!(processor.jobs, 1);
    }

    #[test]
    fn zero_thumbnail_box_is_rejected() {
        let processor = ImageProcessor::new(ProcessingPolicy::default()).unwrap();
        let result = processor.create_thumbnail("cover.png", None, (0, 600));
        assert!(matches!(result, Err(ComicImageError::InvalidParameter(_))));
    }

    #[test]
    fn transparent_png_becomes_rgb_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("splash.png");
        RgbaImage::from_pixel(30, 20, Rgba([255, 0, 0, 64]))
            .save(&input)
            .unwrap();

        let processor = ImageProcessor::new(ProcessingPolicy::default()).unwrap();
        let output = processor.optimize_image(&input, None).unwrap();

        assert_eq!(output, dir.path().join("splash_optimized.jpg"));
        let decoded = image::open(&output).unwrap();
        assert_eq!(decoded.dimensions(), (30, 20));
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
    }
}
