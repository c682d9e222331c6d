use crate::error::{EegSegError, Result};
use crate::types::MICROVOLTS_PER_VOLT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SEGMENT_SECONDS: f64 = 2.0;
pub const DEFAULT_MAX_SAMPLES: usize = 90_000;
pub const DEFAULT_PRECISION: usize = 4;
pub const DEFAULT_MAT_TAG: &str = "1000";
/// Largest window a MAT dimension can hold.
pub const MAX_SEGMENT_SAMPLES: usize = i32::MAX as usize;

/// Windowing and unit parameters applied to every recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentParams {
    /// Window duration in seconds
    pub segment_seconds: f64,
    /// Samples kept from the start of each recording before windowing
    pub max_samples: usize,
    /// Multiplier applied to the volt-valued data (1e6 gives µV)
    pub scale: f64,
    /// Decimal places in CSV output
    pub precision: usize,
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self {
            segment_seconds: DEFAULT_SEGMENT_SECONDS,
            max_samples: DEFAULT_MAX_SAMPLES,
            scale: MICROVOLTS_PER_VOLT,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl SegmentParams {
    /// Window size in samples for the given sampling rate, truncated toward zero.
    /// Fails past [`MAX_SEGMENT_SAMPLES`].
    pub fn segment_length(&self, sample_rate: f64) -> Result<usize> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(EegSegError::InvalidParameter(format!(
                "sampling rate must be positive, got {}",
                sample_rate
            )));
        }
        let samples = self.segment_seconds * sample_rate;
        if samples > MAX_SEGMENT_SAMPLES as f64 {
            return Err(EegSegError::InvalidParameter(format!(
                "segment of {}s at {} Hz exceeds {} samples",
                self.segment_seconds, sample_rate, MAX_SEGMENT_SAMPLES
            )));
        }
        let length = samples as usize;
        if length == 0 {
            return Err(EegSegError::InvalidParameter(format!(
                "segment of {}s at {} Hz has no samples",
                self.segment_seconds, sample_rate
            )));
        }
        Ok(length)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.segment_seconds.is_finite() || self.segment_seconds <= 0.0 {
            return Err(EegSegError::Config(format!(
                "segment_seconds must be positive, got {}",
                self.segment_seconds
            )));
        }
        if !self.scale.is_finite() {
            return Err(EegSegError::Config("scale must be finite".to_string()));
        }
        Ok(())
    }
}

/// Folder names under `<base_dir>/<subject>/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectLayout {
    /// Where the `.set` recordings live
    pub input_dir: String,
    /// Where combined MAT files are written
    pub mat_dir: String,
    /// Root of the per-recording CSV folders
    pub csv_dir: String,
    /// Folder holding `Acquisition N.ext` files for the renamer
    pub acquisition_dir: String,
}

impl Default for SubjectLayout {
    fn default() -> Self {
        Self {
            input_dir: "re".to_string(),
            mat_dir: "re_mat".to_string(),
            csv_dir: "file5".to_string(),
            acquisition_dir: "EEG".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub base_dir: PathBuf,
    pub subjects: Vec<String>,
    pub layout: SubjectLayout,
    pub segment: SegmentParams,
    /// Suffix joined to the recording stem for the MAT variable and file name
    pub mat_tag: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            subjects: Vec::new(),
            layout: SubjectLayout::default(),
            segment: SegmentParams::default(),
            mat_tag: DEFAULT_MAT_TAG.to_string(),
        }
    }
}

impl ProjectConfig {
    /// Load a JSON config file. Fields left out keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            EegSegError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: ProjectConfig = serde_json::from_str(&text).map_err(|e| {
            EegSegError::Config(format!("cannot parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.segment.validate()?;
        if let Some(bad) = self
            .subjects
            .iter()
            .find(|s| s.is_empty() || s.contains(['/', '\\']))
        {
            return Err(EegSegError::Config(format!(
                "subject name '{}' must be a single folder name",
                bad
            )));
        }
        Ok(())
    }

    pub fn subject_dir(&self, subject: &str) -> PathBuf {
        self.base_dir.join(subject)
    }

    pub fn input_dir(&self, subject: &str) -> PathBuf {
        self.subject_dir(subject).join(&self.layout.input_dir)
    }

    pub fn mat_dir(&self, subject: &str) -> PathBuf {
        self.subject_dir(subject).join(&self.layout.mat_dir)
    }

    pub fn csv_root(&self, subject: &str) -> PathBuf {
        self.subject_dir(subject).join(&self.layout.csv_dir)
    }

    pub fn acquisition_dir(&self, subject: &str) -> PathBuf {
        self.subject_dir(subject).join(&self.layout.acquisition_dir)
    }

    /// Variable name stored inside the MAT file for a recording stem.
    pub fn mat_variable_name(&self, stem: &str) -> String {
        if self.mat_tag.is_empty() {
            stem.to_string()
        } else {
            format!("{}_{}", stem, self.mat_tag)
        }
    }
}
