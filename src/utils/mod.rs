use image::{ColorType, ImageFormat};
use std::path::{Path, PathBuf};

/// Extensions picked up by batch mode, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "bmp"];

/// Derives `<parent>/<stem><suffix>.jpg` from the input path.
pub fn generate_output_path(input_path: &Path, output: Option<&Path>, suffix: &str) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => {
            let stem = input_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());

            input_path.with_file_name(format!("{}{}.jpg", stem, suffix))
        }
    }
}

/// Output path for a batch member: `<output_dir>/<stem>.jpg`.
pub fn batch_output_path(input_path: &Path, output_dir: &Path) -> Option<PathBuf> {
    let stem = input_path.file_stem()?;
    let mut file_name = stem.to_os_string();
    file_name.push(".jpg");
    Some(output_dir.join(file_name))
}

pub fn is_supported_format(path: &Path) -> bool {
    get_file_extension(path)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

pub fn is_jpeg_path(path: &Path) -> bool {
    matches!(get_file_extension(path).as_deref(), Some("jpg") | Some("jpeg"))
}

pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

/// Size in kilobytes with two decimals, as printed in the info block.
pub fn format_kilobytes(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

pub fn image_format_to_string(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "JPEG",
        ImageFormat::Png => "PNG",
        ImageFormat::Gif => "GIF",
        ImageFormat::WebP => "WebP",
        ImageFormat::Pnm => "PNM",
        ImageFormat::Tiff => "TIFF",
        ImageFormat::Tga => "TGA",
        ImageFormat::Dds => "DDS",
        ImageFormat::Bmp => "BMP",
        ImageFormat::Ico => "ICO",
        ImageFormat::Hdr => "HDR",
        ImageFormat::OpenExr => "OpenEXR",
        ImageFormat::Farbfeld => "Farbfeld",
        ImageFormat::Avif => "AVIF",
        ImageFormat::Qoi => "QOI",
        _ => "Unknown",
    }
    .to_string()
}

/// Short colour-mode label for a decoded colour type.
pub fn color_mode_name(color: ColorType) -> &'static str {
    match color {
        ColorType::L8 => "L",
        ColorType::La8 => "LA",
        ColorType::Rgb8 => "RGB",
        ColorType::Rgba8 => "RGBA",
        ColorType::L16 => "L16",
        ColorType::La16 => "LA16",
        ColorType::Rgb16 => "RGB16",
        ColorType::Rgba16 => "RGBA16",
        ColorType::Rgb32F => "RGB32F",
        ColorType::Rgba32F => "RGBA32F",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_path_swaps_extension_and_appends_suffix() {
        let out = generate_output_path(Path::new("pages/foo.png"), None, "_optimized");
        assert_eq!(out, PathBuf::from("pages/foo_optimized.jpg"));

        let thumb = generate_output_path(Path::new("cover.webp"), None, "_thumb");
        assert_eq!(thumb, PathBuf::from("cover_thumb.jpg"));
    }

    #[test]
    fn explicit_output_path_is_kept() {
        let out = generate_output_path(
            Path::new("foo.png"),
            Some(Path::new("out/bar.jpg")),
            "_optimized",
        );
        assert_eq!(out, PathBuf::from("out/bar.jpg"));
    }

    #[test]
    fn batch_output_uses_stem_with_jpg() {
        let out = batch_output_path(Path::new("in/page01.PNG"), Path::new("in/optimized"));
        assert_eq!(out, Some(PathBuf::from("in/optimized/page01.jpg")));
    }

    #[test]
    fn supported_format_is_case_insensitive() {
        assert!(is_supported_format(Path::new("a.JPG")));
        assert!(is_supported_format(Path::new("a.Jpeg")));
        assert!(is_supported_format(Path::new("a.webp")));
        assert!(is_supported_format(Path::new("a.bmp")));
        assert!(!is_supported_format(Path::new("a.gif")));
        assert!(!is_supported_format(Path::new("notes.txt")));
        assert!(!is_supported_format(Path::new("README")));
    }

    #[test]
    fn formats_sizes() {
        assert_eq!(format_kilobytes(2048), "2.00 KB");
        assert_eq!(format_kilobytes(1536), "1.50 KB");
    }

    #[test]
    fn names_color_modes() {
        assert_eq!(color_mode_name(ColorType::Rgb8), "RGB");
        assert_eq!(color_mode_name(ColorType::Rgba8), "RGBA");
        assert_eq!(color_mode_name(ColorType::L8), "L");
    }
}
