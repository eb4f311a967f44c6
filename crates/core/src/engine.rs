use crate::classifier::is_image_file;
use crate::confirm::{Answer, Confirm};
use crate::error::PathError;
use crate::options::RenameOptions;
use crate::reader::MetadataReader;
use crate::timestamp::format_timestamp;
use crate::walker::FileWalker;
use anyhow::{Context, Result};
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Renamed { from: PathBuf, to: PathBuf },
    NotImage,
    NoDateTaken,
    MalformedDate,
    Unchanged,
    Declined,
    TargetExists,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct RenameStats {
    pub examined: usize,
    pub renamed: usize,
    pub skipped_non_image: usize,
    pub skipped_no_date: usize,
    pub skipped_malformed: usize,
    pub unchanged: usize,
    pub declined: usize,
    pub target_exists: usize,
    pub failed: usize,
    pub cancelled: bool,
}

impl RenameStats {
    fn record(&mut self, outcome: &FileOutcome) {
        self.examined += 1;
        match outcome {
            FileOutcome::Renamed { .. } => self.renamed += 1,
            FileOutcome::NotImage => self.skipped_non_image += 1,
            FileOutcome::NoDateTaken => self.skipped_no_date += 1,
            FileOutcome::MalformedDate => self.skipped_malformed += 1,
            FileOutcome::Unchanged => self.unchanged += 1,
            FileOutcome::Declined => self.declined += 1,
            FileOutcome::TargetExists => self.target_exists += 1,
            FileOutcome::Failed => self.failed += 1,
            FileOutcome::Cancelled => self.cancelled = true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    File,
    Directory,
}

pub fn classify_target(path: &Path) -> Result<TargetKind, PathError> {
    let meta = fs::metadata(path).map_err(|_| PathError::NotFound(path.to_path_buf()))?;
    if meta.is_dir() {
        Ok(TargetKind::Directory)
    } else if meta.is_file() {
        Ok(TargetKind::File)
    } else {
        Err(PathError::Unsupported(path.to_path_buf()))
    }
}

/// `dir/<canonical timestamp><.ext>` next to the source file. The extension
/// is carried over byte for byte.
pub fn target_path_for(source: &Path, canonical: &str) -> PathBuf {
    let mut name = OsString::from(canonical);
    if let Some(ext) = source.extension() {
        name.push(".");
        name.push(ext);
    }
    match source.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

pub struct RenameEngine<'a> {
    reader: &'a dyn MetadataReader,
    confirm: &'a mut dyn Confirm,
    out: &'a mut dyn Write,
    options: RenameOptions,
    stats: RenameStats,
}

impl<'a> RenameEngine<'a> {
    pub fn new(
        reader: &'a dyn MetadataReader,
        confirm: &'a mut dyn Confirm,
        out: &'a mut dyn Write,
        options: RenameOptions,
    ) -> Self {
        Self {
            reader,
            confirm,
            out,
            options,
            stats: RenameStats::default(),
        }
    }

    pub fn into_stats(self) -> RenameStats {
        self.stats
    }

    pub fn rename_path(&mut self, path: &Path, recursive: bool) -> Result<Flow> {
        match classify_target(path)? {
            TargetKind::Directory => self.rename_directory(path, recursive),
            TargetKind::File => self.rename_file(path),
        }
    }

    pub fn rename_directory(&mut self, root: &Path, recursive: bool) -> Result<Flow> {
        let walker = FileWalker::new(root, recursive)?;

        // Snapshot first: moves below change the listing being walked.
        let mut files = Vec::new();
        for entry in walker {
            match entry {
                Ok(path) => files.push(path),
                Err(err) => {
                    warn!(error = %format!("{err:#}"), "skipping unreadable entry");
                    self.notice(format_args!("skipping unreadable entry: {err:#}"))?;
                }
            }
        }

        for path in files {
            if self.process(&path)? == FileOutcome::Cancelled {
                return Ok(Flow::Cancelled);
            }
        }
        Ok(Flow::Continue)
    }

    pub fn rename_file(&mut self, path: &Path) -> Result<Flow> {
        match classify_target(path)? {
            TargetKind::File => {}
            TargetKind::Directory => return Err(PathError::Unsupported(path.to_path_buf()).into()),
        }
        match self.process(path)? {
            FileOutcome::Cancelled => Ok(Flow::Cancelled),
            _ => Ok(Flow::Continue),
        }
    }

    fn process(&mut self, path: &Path) -> Result<FileOutcome> {
        let outcome = self.decide(path)?;
        self.stats.record(&outcome);
        Ok(outcome)
    }

    fn decide(&mut self, path: &Path) -> Result<FileOutcome> {
        if !is_image_file(self.reader, path) {
            if self.options.verbose {
                self.notice(format_args!("skipping {}: not an image", path.display()))?;
            }
            return Ok(FileOutcome::NotImage);
        }

        let raw = match self.reader.read_capture_timestamp(path) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.notice(format_args!(
                    "no date taken information available for {}",
                    path.display()
                ))?;
                return Ok(FileOutcome::NoDateTaken);
            }
            Err(err) => {
                warn!(path = %path.display(), error = %format!("{err:#}"), "metadata unreadable");
                self.notice(format_args!(
                    "unreadable date taken information for {}: {err:#}",
                    path.display()
                ))?;
                return Ok(FileOutcome::MalformedDate);
            }
        };

        let canonical = match format_timestamp(&raw) {
            Ok(canonical) => canonical,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "malformed date taken");
                self.notice(format_args!(
                    "malformed date taken information for {}: {err}",
                    path.display()
                ))?;
                return Ok(FileOutcome::MalformedDate);
            }
        };

        let target = target_path_for(path, &canonical);
        if target == path {
            if self.options.verbose {
                self.notice(format_args!("{} is already named by date taken", path.display()))?;
            }
            return Ok(FileOutcome::Unchanged);
        }
        if fs::symlink_metadata(&target).is_ok() {
            self.notice(format_args!(
                "not renaming {}: {} already exists",
                path.display(),
                target.display()
            ))?;
            return Ok(FileOutcome::TargetExists);
        }

        if self.options.force {
            self.notice(format_args!("{} -> {}", path.display(), target.display()))?;
        } else {
            // Prompts share the terminal with our notices.
            self.out.flush().context("failed to flush output")?;
            match self.confirm.confirm(path, &target)? {
                Answer::Yes => {}
                Answer::No => {
                    if self.options.verbose {
                        self.notice(format_args!("skipping {}: declined", path.display()))?;
                    }
                    return Ok(FileOutcome::Declined);
                }
                Answer::Cancelled => return Ok(FileOutcome::Cancelled),
            }
        }

        if let Err(err) = move_no_clobber(path, &target) {
            if err.kind() == io::ErrorKind::AlreadyExists {
                self.notice(format_args!(
                    "not renaming {}: {} already exists",
                    path.display(),
                    target.display()
                ))?;
                return Ok(FileOutcome::TargetExists);
            }
            warn!(from = %path.display(), to = %target.display(), error = %err, "rename failed");
            self.notice(format_args!(
                "failed to rename {} -> {}: {err}",
                path.display(),
                target.display()
            ))?;
            return Ok(FileOutcome::Failed);
        }

        info!(from = %path.display(), to = %target.display(), "renamed");
        Ok(FileOutcome::Renamed {
            from: path.to_path_buf(),
            to: target,
        })
    }

    fn notice(&mut self, line: std::fmt::Arguments<'_>) -> Result<()> {
        writeln!(self.out, "{line}").context("failed to write output")
    }
}

// The target may have appeared while a prompt was open. A hard link fails on
// an existing name; filesystems without links fall back to check-then-rename.
fn move_no_clobber(from: &Path, to: &Path) -> io::Result<()> {
    match fs::hard_link(from, to) {
        Ok(()) => fs::remove_file(from),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Err(err),
        Err(_) => {
            if fs::symlink_metadata(to).is_ok() {
                return Err(io::ErrorKind::AlreadyExists.into());
            }
            fs::rename(from, to)
        }
    }
}
