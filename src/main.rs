use anyhow::{bail, Context};
use clap::error::ErrorKind;
use clap::Parser;
use log::LevelFilter;
use panelpress::{format_kilobytes, Cli, ImageInfo, ImageProcessor, ProcessingPolicy};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                println!("{}", e.render());
                println!("{}", Cli::examples());
                return ExitCode::from(1);
            }
        },
    };

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.batch && !cli.input.is_dir() {
        bail!("Batch mode requires a directory path");
    }
    if !cli.batch && !cli.input.is_file() {
        bail!("Input file not found: {}", cli.input.display());
    }

    let policy = ProcessingPolicy::new(cli.width, cli.height, cli.quality)?;
    let processor = ImageProcessor::new(policy)?.with_jobs(cli.jobs);

    if cli.batch {
        process_batch(&processor, &cli.input, cli.output.as_deref())
    } else if cli.info {
        let info = processor.get_image_info(&cli.input)?;
        print_info(&cli.input, &info);
        Ok(())
    } else if cli.thumbnail {
        let result = processor.create_thumbnail(&cli.input, cli.output.as_deref(), cli.thumb_size)?;
        println!("Thumbnail created successfully: {}", result.display());
        report_output(&processor, &result)
    } else {
        let result = processor.optimize_image(&cli.input, cli.output.as_deref())?;
        println!("Image optimized successfully: {}", result.display());
        report_output(&processor, &result)
    }
}

fn process_batch(
    processor: &ImageProcessor,
    input: &Path,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let report = processor
        .batch_optimize(input, output)
        .with_context(|| format!("Batch processing of {} failed", input.display()))?;

    println!();
    println!("Successfully optimized {} images", report.success_count());
    if report.failure_count() > 0 {
        println!("Failed: {} images", report.failure_count());
    }

    Ok(())
}

fn report_output(processor: &ImageProcessor, output: &Path) -> anyhow::Result<()> {
    let info = processor
        .get_image_info(output)
        .with_context(|| format!("Failed to inspect {}", output.display()))?;
    print_info(output, &info);
    Ok(())
}

fn print_info(path: &Path, info: &ImageInfo) {
    println!();
    println!("Image Info: {}", path.display());
    println!("  Dimensions: {}x{}", info.width, info.height);
    println!("  Format: {}", info.format_name());
    println!("  Color Mode: {}", info.color_mode());
    println!("  File Size: {}", format_kilobytes(info.file_size));
    println!("  Has EXIF metadata: {}", info.has_exif);
}
