use crate::cli::{ProjectArgs, RenameArgs, SegmentArgs};
use eegseg_rs::ProjectConfig;
use std::path::{Path, PathBuf};

/// Load the config file (if any) and apply the shared command-line overrides.
pub fn resolve_project(args: &ProjectArgs) -> Result<ProjectConfig, String> {
    let mut config = match &args.config {
        Some(path) => ProjectConfig::from_file(Path::new(path)).map_err(|e| e.to_string())?,
        None => ProjectConfig::default(),
    };

    if let Some(ref base_dir) = args.base_dir {
        config.base_dir = PathBuf::from(base_dir);
    }
    if !args.subjects.is_empty() {
        config.subjects = args.subjects.clone();
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

pub fn resolve_segment_config(args: &SegmentArgs) -> Result<ProjectConfig, String> {
    let mut config = resolve_project(&args.project)?;

    if let Some(seconds) = args.segment_seconds {
        config.segment.segment_seconds = seconds;
    }
    if let Some(max_samples) = args.max_samples {
        config.segment.max_samples = max_samples;
    }
    if let Some(scale) = args.scale {
        config.segment.scale = scale;
    }
    if let Some(precision) = args.precision {
        config.segment.precision = precision;
    }
    if let Some(ref tag) = args.mat_tag {
        config.mat_tag = tag.clone();
    }
    if let Some(ref dir) = args.input_dir {
        config.layout.input_dir = dir.clone();
    }
    if let Some(ref dir) = args.mat_dir {
        config.layout.mat_dir = dir.clone();
    }
    if let Some(ref dir) = args.csv_dir {
        config.layout.csv_dir = dir.clone();
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Folders the renamer should visit, in order.
pub fn resolve_rename_folders(args: &RenameArgs) -> Result<Vec<PathBuf>, String> {
    if let Some(ref folder) = args.folder {
        return Ok(vec![PathBuf::from(folder)]);
    }

    let mut config = resolve_project(&args.project)?;
    if let Some(ref dir) = args.acquisition_dir {
        config.layout.acquisition_dir = dir.clone();
    }
    if config.subjects.is_empty() {
        return Err("No subjects given. Use --subjects, a config file, or --folder".to_string());
    }

    Ok(config
        .subjects
        .iter()
        .map(|s| config.acquisition_dir(s))
        .collect())
}
