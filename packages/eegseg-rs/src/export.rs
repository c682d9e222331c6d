use crate::config::ProjectConfig;
use crate::error::{EegSegError, Result};
use crate::reader::{read_recording, ReaderFactory};
use crate::segment::segment_recording;
use crate::types::{file_stem, Recording, RecordingReport, SkippedRecording, SubjectReport};
use crate::writers::{sanitize_variable_name, write_segment_folder, MatArray, MatWriter};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Write CSV segments even when the recording's folder already exists
    pub force: bool,
}

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+").expect("static regex is valid"))
}

/// First run of ASCII digits in a file stem, e.g. `re12_clean` -> `12`.
pub fn extract_number(stem: &str) -> Option<String> {
    number_pattern().find(stem).map(|m| m.as_str().to_string())
}

/// Readable recordings directly inside `dir`, sorted by file name.
pub fn list_recordings(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(EegSegError::FolderNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && ReaderFactory::is_supported(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Segment one loaded recording and write its MAT file and CSV folder.
///
/// The MAT file is always (re)written. The CSV folder `<csv_root>/<number>`
/// is only filled when it does not exist yet, unless `options.force` is set.
pub fn export_recording(
    recording: &Recording,
    number: &str,
    mat_dir: &Path,
    csv_root: &Path,
    config: &ProjectConfig,
    options: &ExportOptions,
) -> Result<RecordingReport> {
    log::info!(
        "Segmenting {}: {} channel(s), {:.2}s at {} Hz",
        recording.source.display(),
        recording.num_channels(),
        recording.duration(),
        recording.sample_rate
    );
    let set = segment_recording(recording, &config.segment)?;
    if set.num_segments() == 0 {
        log::warn!(
            "{}: {} samples is shorter than one {}-sample segment",
            recording.source.display(),
            recording.num_samples(),
            set.segment_length
        );
    }

    let label = config.mat_variable_name(&recording.stem());
    let mat_path = mat_dir.join(format!("{}.mat", label));
    MatWriter::new().write_file(
        &mat_path,
        &[MatArray::from_ndarray(&sanitize_variable_name(&label), &set.segments)],
    )?;
    log::info!("Saved MAT file: {}", mat_path.display());

    let csv_dir = csv_root.join(number);
    let csv_written = if csv_dir.exists() && !options.force {
        log::warn!(
            "Folder {} already exists, skipping CSV export to avoid overwriting",
            csv_dir.display()
        );
        false
    } else {
        if !csv_dir.exists() {
            std::fs::create_dir_all(&csv_dir)?;
            log::info!("Created folder: {}", csv_dir.display());
        }
        write_segment_folder(&csv_dir, &set, config.segment.precision)?;
        true
    };

    Ok(RecordingReport {
        source: recording.source.to_string_lossy().to_string(),
        number: number.to_string(),
        sample_rate: recording.sample_rate,
        num_channels: recording.num_channels(),
        segment_length: set.segment_length,
        num_segments: set.num_segments(),
        mat_path: mat_path.to_string_lossy().to_string(),
        csv_dir: csv_dir.to_string_lossy().to_string(),
        csv_written,
    })
}

/// Export every recording of one subject.
///
/// Recordings whose name carries no number are skipped; any other failure
/// stops the subject and is returned.
pub fn build_subject(
    config: &ProjectConfig,
    subject: &str,
    options: &ExportOptions,
) -> Result<SubjectReport> {
    let input_dir = config.input_dir(subject);
    let recordings = list_recordings(&input_dir)?;

    let mat_dir = config.mat_dir(subject);
    std::fs::create_dir_all(&mat_dir)?;
    let csv_root = config.csv_root(subject);

    let mut report = SubjectReport::new(subject);
    for path in recordings {
        let stem = file_stem(&path);
        log::info!("Processing {}", stem);

        let Some(number) = extract_number(&stem) else {
            log::warn!("No number in file name '{}', skipping", stem);
            report.skipped.push(SkippedRecording {
                source: path.to_string_lossy().to_string(),
                reason: format!("no number in file name '{}'", stem),
            });
            continue;
        };

        let recording = read_recording(&path)?;
        let exported = export_recording(&recording, &number, &mat_dir, &csv_root, config, options)?;
        log::info!(
            "{} done: {} segments",
            stem,
            exported.num_segments
        );
        report.exported.push(exported);
    }

    Ok(report)
}
