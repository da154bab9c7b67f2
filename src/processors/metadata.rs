// panelpress/src/processors/metadata.rs
use crate::core::Result;
use exif::{Exif, Reader};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Default)]
pub struct MetadataProcessor;

impl MetadataProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn read_metadata(&self, path: &Path) -> Result<Option<Exif>> {
        let file = File::open(path)?;
        let mut bufreader = BufReader::new(&file);

        match Reader::new().read_from_container(&mut bufreader) {
            Ok(exif) => {
                log::debug!("Found EXIF data in {}", path.display());
                Ok(Some(exif))
            }
            Err(exif::Error::NotFound(_)) => {
                log::debug!("No EXIF data found in {}", path.display());
                Ok(None)
            }
            Err(e) => {
                log::debug!("Unreadable EXIF in {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    /// True when the file carries a readable EXIF block.
    ///
    /// Formats without EXIF support and malformed blocks both count as absent.
    pub fn has_metadata(&self, path: &Path) -> bool {
        match self.read_metadata(path) {
            Ok(found) => found.is_some(),
            Err(e) => {
                log::debug!("Ignoring EXIF for {}: {}", path.display(), e);
                false
            }
        }
    }
}
