use crate::core::{ComicImageError, ImageProcessor, ProcessingPolicy, Result};
use crate::utils::{batch_output_path, is_supported_format};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the directory created inside the input directory when no output
/// directory is given.
pub const DEFAULT_OUTPUT_DIR: &str = "optimized";

/// Result of optimizing one file of a batch.
#[derive(Debug)]
pub struct BatchOutcome {
    pub input: PathBuf,
    pub result: Result<PathBuf>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn file_name(&self) -> String {
        self.input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.display().to_string())
    }
}

/// Per-file outcomes of a batch, in processing order.
#[derive(Debug)]
pub struct BatchReport {
    pub output_dir: PathBuf,
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchReport {
    /// Output paths of the files that were written, in processing order.
    pub fn optimized_paths(&self) -> Vec<PathBuf> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok().cloned())
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &ComicImageError)> {
        self.outcomes.iter().filter_map(|outcome| match &outcome.result {
            Ok(_) => None,
            Err(e) => Some((outcome.input.as_path(), e)),
        })
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }
}

pub struct BatchProcessor {
    policy: ProcessingPolicy,
    thread_pool: Option<rayon::ThreadPool>,
}

impl BatchProcessor {
    /// `jobs <= 1` processes files one after another on the calling thread.
    pub fn new(policy: ProcessingPolicy, jobs: usize) -> Result<Self> {
        policy.validate()?;

        let thread_pool = if jobs > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .map_err(|e| {
                    ComicImageError::InvalidParameter(format!(
                        "Failed to create thread pool: {}",
                        e
                    ))
                })?;
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            policy,
            thread_pool,
        })
    }

    pub fn process_directory(
        &self,
        input_dir: &Path,
        output_dir: Option<&Path>,
    ) -> Result<BatchReport> {
        let output_dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => input_dir.join(DEFAULT_OUTPUT_DIR),
        };

        self.prepare_output_dir(input_dir, &output_dir)?;

        let image_paths = self.collect_image_paths(input_dir)?;

        if image_paths.is_empty() {
            log::warn!("No image files found in {}", input_dir.display());
            return Ok(BatchReport {
                output_dir,
                outcomes: Vec::new(),
            });
        }

        log::info!(
            "Processing {} images from {}",
            image_paths.len(),
            input_dir.display()
        );

        let processor = ImageProcessor::new(self.policy)?;
        let targets = Self::assign_output_paths(&image_paths, &output_dir);
        let pb = self.create_progress_bar(image_paths.len());

        let run = |(input_path, target): (&PathBuf, &std::result::Result<PathBuf, String>)| {
            let result = match target {
                Ok(output_path) => processor.optimize_image(input_path, Some(output_path.as_path())),
                Err(reason) => Err(ComicImageError::InvalidParameter(reason.clone())),
            };
            let outcome = BatchOutcome {
                input: input_path.clone(),
                result,
            };
            Self::report_outcome(&pb, &outcome);
            pb.inc(1);
            outcome
        };

        // Indexed collect keeps the sorted order on both paths.
        let outcomes: Vec<BatchOutcome> = match &self.thread_pool {
            Some(pool) => pool.install(|| {
                image_paths
                    .par_iter()
                    .zip(targets.par_iter())
                    .map(run)
                    .collect()
            }),
            None => image_paths.iter().zip(targets.iter()).map(run).collect(),
        };

        let report = BatchReport {
            output_dir,
            outcomes,
        };

        pb.finish_with_message(format!(
            "Optimized {} of {} images",
            report.success_count(),
            report.outcomes.len()
        ));

        Ok(report)
    }

    /// Maps each input to `<output_dir>/<stem>.jpg`. When two inputs share a
    /// stem the first one in sorted order keeps the name and the rest fail.
    fn assign_output_paths(
        image_paths: &[PathBuf],
        output_dir: &Path,
    ) -> Vec<std::result::Result<PathBuf, String>> {
        let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();

        image_paths
            .iter()
            .map(|input_path| {
                let output_path = batch_output_path(input_path, output_dir)
                    .ok_or_else(|| format!("Invalid file name: {}", input_path.display()))?;

                if let Some(owner) = claimed.get(&output_path) {
                    return Err(format!(
                        "Output {} is already produced from {}",
                        output_path.display(),
                        owner.display()
                    ));
                }

                claimed.insert(output_path.clone(), input_path.as_path());
                Ok(output_path)
            })
            .collect()
    }

    fn report_outcome(pb: &ProgressBar, outcome: &BatchOutcome) {
        let name = outcome.file_name();
        match &outcome.result {
            Ok(output_path) => {
                pb.suspend(|| println!("Optimized: {} -> {}", name, output_path.display()));
            }
            Err(e) => {
                log::warn!("Error processing {}: {}", name, e);
                pb.suspend(|| println!("Error processing {}: {}", name, e));
            }
        }
    }

    /// Supported images directly inside `input_dir`, sorted by file name.
    fn collect_image_paths(&self, input_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();

        for entry in WalkDir::new(input_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry in {}: {}", input_dir.display(), e);
                    continue;
                }
            };

            if entry.file_type().is_file() && is_supported_format(entry.path()) {
                paths.push(entry.into_path());
            }
        }

        Ok(paths)
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }

    /// Checks the directory pair and creates `output_dir`.
    ///
    /// The pair is compared after creation so that aliases such as
    /// `pages/../pages` or `pages/new/..` resolve to the same directory.
    pub fn prepare_output_dir(&self, input_dir: &Path, output_dir: &Path) -> Result<()> {
        if !input_dir.is_dir() {
            return Err(ComicImageError::InputNotFound(input_dir.to_path_buf()));
        }

        if output_dir.exists() && !output_dir.is_dir() {
            return Err(ComicImageError::InvalidParameter(format!(
                "Output path exists but is not a directory: {}",
                output_dir.display()
            )));
        }

        fs::create_dir_all(output_dir).map_err(|e| ComicImageError::Encode {
            path: output_dir.to_path_buf(),
            reason: e.to_string(),
        })?;

        // Outputs are named `<stem>.jpg`, so writing into the input directory
        // would overwrite the source pages.
        if fs::canonicalize(input_dir)? == fs::canonicalize(output_dir)? {
            return Err(ComicImageError::InvalidParameter(
                "Input and output directories cannot be the same".to_string(),
            ));
        }

        Ok(())
    }
}
