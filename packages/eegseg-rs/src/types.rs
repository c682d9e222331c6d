use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Microvolts per volt; EEGLAB stores amplitudes in µV.
pub const MICROVOLTS_PER_VOLT: f64 = 1e6;

/// One continuous EEG capture loaded into memory.
///
/// `data` is laid out channels × samples and is always in volts, whatever
/// unit the source file used.
#[derive(Debug, Clone)]
pub struct Recording {
    pub source: PathBuf,
    pub sample_rate: f64,
    pub channels: Vec<String>,
    pub data: Array2<f64>,
}

impl Recording {
    pub fn num_channels(&self) -> usize {
        self.data.nrows()
    }

    pub fn num_samples(&self) -> usize {
        self.data.ncols()
    }

    pub fn duration(&self) -> f64 {
        if self.sample_rate > 0.0 {
            self.num_samples() as f64 / self.sample_rate
        } else {
            0.0
        }
    }

    /// File name without extension, used to name the exported matrix.
    pub fn stem(&self) -> String {
        file_stem(&self.source)
    }
}

/// Header-level description of a recording file, available without loading samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingInfo {
    pub file_path: String,
    pub file_name: String,
    pub file_size: u64,
    pub format: String,
    pub sample_rate: f64,
    pub num_channels: usize,
    pub num_samples: usize,
    pub duration: f64,
    pub channels: Vec<String>,
    pub data_file: Option<String>,
}

/// Outcome of exporting one recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingReport {
    pub source: String,
    pub number: String,
    pub sample_rate: f64,
    pub num_channels: usize,
    pub segment_length: usize,
    pub num_segments: usize,
    pub mat_path: String,
    pub csv_dir: String,
    pub csv_written: bool,
}

/// A recording left untouched, with the reason it was passed over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedRecording {
    pub source: String,
    pub reason: String,
}

/// Everything one subject's export produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectReport {
    pub subject: String,
    pub exported: Vec<RecordingReport>,
    pub skipped: Vec<SkippedRecording>,
}

impl SubjectReport {
    pub fn new(subject: &str) -> Self {
        Self {
            subject: subject.to_string(),
            ..Default::default()
        }
    }

    pub fn total_segments(&self) -> usize {
        self.exported.iter().map(|r| r.num_segments).sum()
    }
}

/// A single file move performed (or planned) by the renamer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameEntry {
    pub original_number: u64,
    pub new_number: u64,
    pub from: String,
    pub to: String,
}

/// A planned move that was not performed because the target already exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameSkip {
    pub from: String,
    pub to: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenameReport {
    pub folder: String,
    pub groups: usize,
    pub renamed: Vec<RenameEntry>,
    pub skipped: Vec<RenameSkip>,
}

pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}
