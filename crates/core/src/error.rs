use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("cannot find the path specified: '{}'", .0.display())]
    NotFound(PathBuf),
    #[error("not a file or directory: '{}'", .0.display())]
    Unsupported(PathBuf),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("timestamp does not match YYYY:MM:DD HH:MM:SS: {0:?}")]
    Shape(String),
    #[error("timestamp is not a valid calendar date: {0:?}")]
    Calendar(String),
}
