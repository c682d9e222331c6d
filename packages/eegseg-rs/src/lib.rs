pub mod config;
pub mod error;
pub mod export;
pub mod reader;
pub mod rename;
pub mod segment;
pub mod types;
pub mod writers;

pub use config::{ProjectConfig, SegmentParams, SubjectLayout};
pub use error::{EegSegError, Result};
pub use export::{build_subject, export_recording, ExportOptions};
pub use reader::{read_recording, ReaderFactory, RecordingReader};
pub use rename::{apply_renames, plan_renames, rename_files, RenamePlan};
pub use segment::{segment_recording, SegmentSet};
pub use types::*;
