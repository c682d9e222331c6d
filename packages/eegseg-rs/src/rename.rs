use crate::error::{EegSegError, Result};
use crate::types::{RenameEntry, RenameReport, RenameSkip};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Extensions an acquisition device writes for one session.
pub const ACQUISITION_EXTENSIONS: &[&str] = &["rs3", "dap", "dat"];

fn acquisition_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^Acquisition ([0-9]+)\.(rs3|dap|dat)$").expect("static regex is valid")
    })
}

/// Original number -> (lowercase extension -> file name).
pub type AcquisitionGroups = BTreeMap<u64, BTreeMap<String, String>>;

/// Ordered set of moves that renumbers a folder's acquisitions to 1..K.
#[derive(Debug, Clone, Default)]
pub struct RenamePlan {
    pub folder: PathBuf,
    pub groups: usize,
    pub entries: Vec<RenameEntry>,
}

impl RenamePlan {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Group `Acquisition N.ext` names by N, where N is ASCII digits. Other
/// names are ignored.
///
/// Names are taken in the order given; when two names in a group share an
/// extension up to case, the later one wins.
pub fn group_acquisitions<I, S>(names: I) -> AcquisitionGroups
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut groups = AcquisitionGroups::new();
    for name in names {
        let name = name.as_ref();
        let Some(caps) = acquisition_pattern().captures(name) else {
            continue;
        };
        let Ok(number) = caps[1].parse::<u64>() else {
            log::warn!("Acquisition number in '{}' is out of range, ignoring", name);
            continue;
        };
        log::debug!("Matched acquisition {} in '{}'", number, name);
        groups
            .entry(number)
            .or_default()
            .insert(caps[2].to_lowercase(), name.to_string());
    }
    groups
}

/// Work out the renames for `folder` without touching it.
pub fn plan_renames(folder: &Path) -> Result<RenamePlan> {
    if !folder.is_dir() {
        return Err(EegSegError::FolderNotFound(folder.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let entry = entry?;
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();

    let groups = group_acquisitions(&names);
    let mut entries = Vec::new();
    for (new_number, (&original_number, files)) in (1u64..).zip(groups.iter()) {
        for (ext, old_name) in files {
            entries.push(RenameEntry {
                original_number,
                new_number,
                from: old_name.clone(),
                to: format!("{}.{}", new_number, ext),
            });
        }
    }

    Ok(RenamePlan {
        folder: folder.to_path_buf(),
        groups: groups.len(),
        entries,
    })
}

/// Carry out a plan. A rename whose target already exists is skipped and
/// reported; the rest of the plan still runs.
///
/// With `dry_run` nothing is moved, but the report shows what would happen.
pub fn apply_renames(plan: &RenamePlan, dry_run: bool) -> Result<RenameReport> {
    let mut report = RenameReport {
        folder: plan.folder.to_string_lossy().to_string(),
        groups: plan.groups,
        ..Default::default()
    };

    for entry in &plan.entries {
        let old_path = plan.folder.join(&entry.from);
        let new_path = plan.folder.join(&entry.to);

        if new_path.exists() {
            log::warn!(
                "File '{}' already exists, skipping rename of '{}'",
                entry.to,
                entry.from
            );
            report.skipped.push(RenameSkip {
                from: entry.from.clone(),
                to: entry.to.clone(),
                reason: "target already exists".to_string(),
            });
            continue;
        }

        if !dry_run {
            std::fs::rename(&old_path, &new_path)?;
            log::info!("Renamed: {} -> {}", entry.from, entry.to);
        }
        report.renamed.push(entry.clone());
    }

    Ok(report)
}

/// Renumber the acquisition files in `folder` to a dense 1..K sequence.
pub fn rename_files(folder: &Path, dry_run: bool) -> Result<RenameReport> {
    let plan = plan_renames(folder)?;
    if plan.is_empty() {
        log::info!("No acquisition files found in {}", folder.display());
    }
    apply_renames(&plan, dry_run)
}
