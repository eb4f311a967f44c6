use crate::reader::MetadataReader;
use std::path::Path;
use tracing::debug;

pub fn is_image_file<M: MetadataReader + ?Sized>(reader: &M, path: &Path) -> bool {
    match reader.probe(path) {
        Ok(()) => true,
        Err(err) => {
            debug!(path = %path.display(), error = %format!("{err:#}"), "not an image");
            false
        }
    }
}
