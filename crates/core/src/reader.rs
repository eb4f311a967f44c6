use anyhow::{Context, Result};
use exif::{In, Tag, Value};
use image::ImageReader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

pub trait MetadataReader {
    fn probe(&self, path: &Path) -> Result<()>;

    /// Raw `DateTimeOriginal` text, or `None` when the image carries no such
    /// tag. Only called on paths that already passed [`MetadataReader::probe`].
    fn read_capture_timestamp(&self, path: &Path) -> Result<Option<String>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExifReader;

impl MetadataReader for ExifReader {
    fn probe(&self, path: &Path) -> Result<()> {
        let reader = ImageReader::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?
            .with_guessed_format()
            .with_context(|| format!("failed to sniff {}", path.display()))?;
        // Header only: dimensions are enough to prove the file decodes.
        reader
            .into_dimensions()
            .with_context(|| format!("not a decodable image: {}", path.display()))?;
        Ok(())
    }

    fn read_capture_timestamp(&self, path: &Path) -> Result<Option<String>> {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        let mut buf = BufReader::new(file);
        let exif = match exif::Reader::new().read_from_container(&mut buf) {
            Ok(exif) => exif,
            Err(exif::Error::Io(err)) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()))
            }
            Err(err) => {
                debug!(path = %path.display(), error = %err, "no EXIF block");
                return Ok(None);
            }
        };

        let Some(field) = exif.get_field(Tag::DateTimeOriginal, In::PRIMARY) else {
            return Ok(None);
        };

        match &field.value {
            Value::Ascii(values) => Ok(values
                .first()
                .map(|v| String::from_utf8_lossy(v).trim_end_matches('\0').to_string())),
            other => Ok(Some(format!("{other:?}"))),
        }
    }
}
