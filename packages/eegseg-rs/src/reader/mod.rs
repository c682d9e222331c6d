/// Recording readers
///
/// Every supported container implements [`RecordingReader`]; the factory picks
/// one from the file extension. Readers always hand back data in volts.
use crate::error::{EegSegError, Result};
use crate::types::{Recording, RecordingInfo};
use ndarray::Array2;
use std::path::Path;

pub mod eeglab_reader;

pub use eeglab_reader::EeglabReader;

pub trait RecordingReader {
    /// Header information, available without loading samples
    fn info(&self) -> &RecordingInfo;

    /// Load the full channels × samples matrix, in volts
    fn read_data(&self) -> Result<Array2<f64>>;

    /// Format name (e.g. "EEGLAB")
    fn format_name(&self) -> &str;
}

pub struct ReaderFactory;

impl ReaderFactory {
    pub fn create_reader(path: &Path) -> Result<Box<dyn RecordingReader>> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension.to_lowercase().as_str() {
            "set" => Ok(Box::new(EeglabReader::new(path)?)),
            _ => Err(EegSegError::UnsupportedFormat(format!(
                "Unsupported file extension: '{}'. Supported: {}",
                extension,
                Self::supported_extensions().join(", ")
            ))),
        }
    }

    pub fn supported_extensions() -> Vec<&'static str> {
        vec!["set"]
    }

    pub fn is_supported(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| Self::supported_extensions().contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false)
    }
}

/// Read a whole recording into memory.
pub fn read_recording(path: &Path) -> Result<Recording> {
    let reader = ReaderFactory::create_reader(path)?;
    let data = reader.read_data()?;
    let info = reader.info();

    log::info!(
        "Loaded {} recording {}: {} channels × {} samples at {} Hz",
        reader.format_name(),
        info.file_name,
        data.nrows(),
        data.ncols(),
        info.sample_rate
    );

    Ok(Recording {
        source: path.to_path_buf(),
        sample_rate: info.sample_rate,
        channels: info.channels.clone(),
        data,
    })
}
