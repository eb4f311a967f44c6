use crate::error::PathError;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

pub struct FileWalker {
    root: PathBuf,
    inner: walkdir::IntoIter,
}

impl FileWalker {
    pub fn new(root: impl Into<PathBuf>, recursive: bool) -> Result<Self, PathError> {
        let root = root.into();
        if fs::symlink_metadata(&root).is_err() {
            return Err(PathError::NotFound(root));
        }

        let max_depth = if recursive { usize::MAX } else { 1 };
        let inner = WalkDir::new(&root)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter();

        Ok(Self { root, inner })
    }
}

impl Iterator for FileWalker {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let at = err
                        .path()
                        .unwrap_or(self.root.as_path())
                        .display()
                        .to_string();
                    return Some(Err(err).with_context(|| format!("failed to read {at}")));
                }
            };
            if entry.path().is_file() {
                return Some(Ok(entry.into_path()));
            }
        }
    }
}
