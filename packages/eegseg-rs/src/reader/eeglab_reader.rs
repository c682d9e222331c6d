/// EEGLAB File Reader
///
/// EEGLAB saves datasets in a few layouts:
/// 1. .set + .fdt pair: header in .set (MATLAB v5), samples in .fdt (float32)
/// 2. Single .set file with the samples in a `data` variable
/// 3. MATLAB v7.3 (HDF5), which is not supported
///
/// The .set header is parsed with the `matfile` crate. Only top-level numeric
/// variables are visible to it, so `srate`, `nbchan`, `pnts` and `trials` are
/// looked up by name and channel labels fall back to `Ch1..ChN`.
///
/// EEGLAB amplitudes are microvolts; `read_data` converts them to volts.
use super::RecordingReader;
use crate::error::{EegSegError, Result};
use crate::types::{RecordingInfo, MICROVOLTS_PER_VOLT};
use matfile::{MatFile, NumericData};
use ndarray::{Array2, ShapeBuilder};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

const HDF5_MAGIC: [u8; 8] = [0x89, 0x48, 0x44, 0x46, 0x0d, 0x0a, 0x1a, 0x0a];

/// Where the samples come from
enum DataSource {
    /// Matrix embedded in the .set file, channels × samples, in µV
    Embedded(Array2<f64>),
    /// Sibling .fdt file, frame-interleaved float32
    Fdt {
        fdt_path: PathBuf,
        num_channels: usize,
        num_samples: usize,
    },
}

pub struct EeglabReader {
    source: DataSource,
    info: RecordingInfo,
}

/// Scalars pulled from the .set header
#[derive(Debug, Default)]
struct EeglabHeader {
    srate: f64,
    nbchan: usize,
    pnts: usize,
    trials: usize,
}

impl EeglabReader {
    pub fn new(path: &Path) -> Result<Self> {
        if Self::is_hdf5_file(path)? {
            return Err(EegSegError::UnsupportedFormat(format!(
                "{} uses MATLAB v7.3 (HDF5). Re-save it in EEGLAB with \
                 pop_saveset(EEG, 'savemode', 'twofiles', 'version', '7')",
                path.display()
            )));
        }

        let file = File::open(path)?;
        let mat_file = MatFile::parse(BufReader::new(file)).map_err(|e| EegSegError::MatParse {
            path: path.to_path_buf(),
            message: format!("{:?}", e),
        })?;

        let header = Self::read_header(&mat_file);
        if !(header.srate > 0.0) {
            return Err(EegSegError::InvalidData(format!(
                "{} has no usable sampling rate (srate)",
                path.display()
            )));
        }

        let source = Self::determine_data_source(path, &mat_file, &header)?;
        let (num_channels, num_samples) = match &source {
            DataSource::Embedded(data) => data.dim(),
            DataSource::Fdt {
                num_channels,
                num_samples,
                ..
            } => (*num_channels, *num_samples),
        };
        let data_file = match &source {
            DataSource::Fdt { fdt_path, .. } => Some(fdt_path.to_string_lossy().to_string()),
            DataSource::Embedded(_) => None,
        };

        let info = RecordingInfo {
            file_path: path.to_string_lossy().to_string(),
            file_name: path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown")
                .to_string(),
            file_size: std::fs::metadata(path)?.len(),
            format: "EEGLAB".to_string(),
            sample_rate: header.srate,
            num_channels,
            num_samples,
            duration: num_samples as f64 / header.srate,
            channels: (0..num_channels).map(|i| format!("Ch{}", i + 1)).collect(),
            data_file,
        };

        Ok(Self { source, info })
    }

    fn is_hdf5_file(path: &Path) -> Result<bool> {
        let mut file = File::open(path)?;
        let mut magic = [0u8; 8];
        if file.read_exact(&mut magic).is_ok() {
            return Ok(magic == HDF5_MAGIC);
        }
        Ok(false)
    }

    fn read_header(mat_file: &MatFile) -> EeglabHeader {
        let scalar = |name: &str| {
            mat_file
                .find_by_name(name)
                .and_then(|arr| Self::extract_scalar(arr.data()))
        };
        let count = |name: &str| {
            scalar(name)
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v as usize)
                .unwrap_or(0)
        };

        EeglabHeader {
            srate: scalar("srate").unwrap_or(0.0),
            nbchan: count("nbchan"),
            pnts: count("pnts"),
            trials: count("trials").max(1),
        }
    }

    fn extract_scalar(data: &NumericData) -> Option<f64> {
        match data {
            NumericData::Double { real, .. } => real.first().copied(),
            NumericData::Single { real, .. } => real.first().map(|&v| v as f64),
            NumericData::Int8 { real, .. } => real.first().map(|&v| v as f64),
            NumericData::Int16 { real, .. } => real.first().map(|&v| v as f64),
            NumericData::Int32 { real, .. } => real.first().map(|&v| v as f64),
            NumericData::Int64 { real, .. } => real.first().map(|&v| v as f64),
            NumericData::UInt8 { real, .. } => real.first().map(|&v| v as f64),
            NumericData::UInt16 { real, .. } => real.first().map(|&v| v as f64),
            NumericData::UInt32 { real, .. } => real.first().map(|&v| v as f64),
            NumericData::UInt64 { real, .. } => real.first().map(|&v| v as f64),
        }
    }

    fn determine_data_source(
        path: &Path,
        mat_file: &MatFile,
        header: &EeglabHeader,
    ) -> Result<DataSource> {
        let fdt_path = path.with_extension("fdt");
        if fdt_path.exists() && header.nbchan > 0 && header.pnts > 0 {
            let num_samples = header.pnts * header.trials;
            Self::validate_fdt_file(&fdt_path, header.nbchan, num_samples)?;
            log::debug!("{}: samples in {}", path.display(), fdt_path.display());
            return Ok(DataSource::Fdt {
                fdt_path,
                num_channels: header.nbchan,
                num_samples,
            });
        }

        if let Some(data_arr) = mat_file.find_by_name("data") {
            return Ok(DataSource::Embedded(Self::extract_matrix(
                data_arr.data(),
                data_arr.size(),
            )?));
        }

        // Some exporters store the matrix under another name; take the first
        // plausible channels × samples array.
        for arr in mat_file.arrays() {
            let size = arr.size();
            if size.len() == 2 && size[0] > 1 && size[1] > 100 {
                if let Ok(data) = Self::extract_matrix(arr.data(), size) {
                    log::debug!("{}: using variable '{}' as data", path.display(), arr.name());
                    return Ok(DataSource::Embedded(data));
                }
            }
        }

        Err(EegSegError::UnsupportedFormat(format!(
            "Could not find EEG samples in {}. Save the dataset from EEGLAB with \
             pop_saveset(EEG, 'savemode', 'twofiles') to get a .set + .fdt pair",
            path.display()
        )))
    }

    fn validate_fdt_file(fdt_path: &Path, num_channels: usize, num_samples: usize) -> Result<()> {
        let file_size = std::fs::metadata(fdt_path)?.len();
        let expected_size = (num_channels * num_samples * 4) as u64;

        if file_size < expected_size {
            return Err(EegSegError::InvalidData(format!(
                ".fdt file size ({} bytes) is smaller than expected ({} bytes) for {} channels × {} samples",
                file_size, expected_size, num_channels, num_samples
            )));
        }
        Ok(())
    }

    /// Read the .fdt samples into a channels × samples matrix (µV).
    fn read_fdt(fdt_path: &Path, num_channels: usize, num_samples: usize) -> Result<Array2<f64>> {
        let mut reader = BufReader::new(File::open(fdt_path)?);
        let mut bytes = vec![0u8; num_channels * num_samples * 4];
        reader.read_exact(&mut bytes)?;

        let raw: Vec<f64> = bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as f64)
            .collect();

        // One frame holds every channel for a single time point.
        let frames = Array2::from_shape_vec((num_samples, num_channels), raw)
            .map_err(|e| EegSegError::InvalidData(e.to_string()))?;
        Ok(frames.reversed_axes())
    }

    /// Turn a column-major MATLAB array into channels × samples.
    ///
    /// Epoched data (channels × points × trials) is flattened so the trials
    /// follow one another along the sample axis.
    fn extract_matrix(data: &NumericData, size: &[usize]) -> Result<Array2<f64>> {
        let flat: Vec<f64> = match data {
            NumericData::Double { real, .. } => real.clone(),
            NumericData::Single { real, .. } => real.iter().map(|&v| v as f64).collect(),
            NumericData::Int16 { real, .. } => real.iter().map(|&v| v as f64).collect(),
            NumericData::Int32 { real, .. } => real.iter().map(|&v| v as f64).collect(),
            _ => {
                return Err(EegSegError::InvalidData(
                    "Unsupported data type for EEG samples".to_string(),
                ))
            }
        };

        if size.len() < 2 {
            return Err(EegSegError::InvalidData(format!(
                "EEG data must have at least 2 dimensions, got {:?}",
                size
            )));
        }
        let rows = size[0];
        let cols: usize = size[1..].iter().product();
        if flat.len() < rows * cols {
            return Err(EegSegError::InvalidData(format!(
                "Data size mismatch: expected {} elements, got {}",
                rows * cols,
                flat.len()
            )));
        }

        let mut flat = flat;
        flat.truncate(rows * cols);
        Array2::from_shape_vec((rows, cols).f(), flat)
            .map_err(|e| EegSegError::InvalidData(e.to_string()))
    }
}

impl RecordingReader for EeglabReader {
    fn info(&self) -> &RecordingInfo {
        &self.info
    }

    fn read_data(&self) -> Result<Array2<f64>> {
        let microvolts = match &self.source {
            DataSource::Embedded(data) => data.clone(),
            DataSource::Fdt {
                fdt_path,
                num_channels,
                num_samples,
            } => Self::read_fdt(fdt_path, *num_channels, *num_samples)?,
        };
        Ok(microvolts.mapv(|v| v / MICROVOLTS_PER_VOLT))
    }

    fn format_name(&self) -> &str {
        "EEGLAB"
    }
}
