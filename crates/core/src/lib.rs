mod classifier;
mod confirm;
mod engine;
mod error;
mod options;
mod reader;
#[cfg(any(test, feature = "test-fixtures"))]
pub mod test_support;
mod timestamp;
mod walker;

pub use classifier::is_image_file;
pub use confirm::{parse_answer, Answer, Confirm, LinePrompt};
pub use engine::{
    classify_target, target_path_for, FileOutcome, Flow, RenameEngine, RenameStats, TargetKind,
};
pub use error::{FormatError, PathError};
pub use options::{DefaultAnswer, RenameOptions};
pub use reader::{ExifReader, MetadataReader};
pub use timestamp::{format_timestamp, parse_raw, CANONICAL_FORMAT, RAW_FORMAT};
pub use walker::FileWalker;
