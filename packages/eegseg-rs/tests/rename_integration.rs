use eegseg_rs::{plan_renames, rename_files};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn touch(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), name.as_bytes()).unwrap();
    }
}

fn listing(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect()
}

#[test]
fn test_renumbers_in_ascending_order() {
    let tmp = TempDir::new().unwrap();
    touch(
        tmp.path(),
        &[
            "Acquisition 7.dat",
            "Acquisition 7.rs3",
            "Acquisition 2.dat",
            "Acquisition 2.DAP",
            "Acquisition 9.dat",
            "notes.txt",
        ],
    );

    let report = rename_files(tmp.path(), false).unwrap();

    assert_eq!(report.groups, 3);
    assert_eq!(report.renamed.len(), 5);
    assert!(report.skipped.is_empty());

    let expected: BTreeSet<String> = ["1.dat", "1.dap", "2.dat", "2.rs3", "3.dat", "notes.txt"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(listing(tmp.path()), expected);

    // contents travel with the file
    assert_eq!(fs::read_to_string(tmp.path().join("1.dap")).unwrap(), "Acquisition 2.DAP");
    assert_eq!(fs::read_to_string(tmp.path().join("2.rs3")).unwrap(), "Acquisition 7.rs3");
    assert_eq!(fs::read_to_string(tmp.path().join("3.dat")).unwrap(), "Acquisition 9.dat");
}

#[test]
fn test_collision_skips_only_that_file() {
    let tmp = TempDir::new().unwrap();
    touch(
        tmp.path(),
        &[
            "2.dat",
            "Acquisition 3.dat",
            "Acquisition 5.dat",
            "Acquisition 5.rs3",
            "Acquisition 8.dat",
        ],
    );

    let report = rename_files(tmp.path(), false).unwrap();

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].from, "Acquisition 5.dat");
    assert_eq!(report.skipped[0].to, "2.dat");
    assert_eq!(report.renamed.len(), 3);

    let files = listing(tmp.path());
    assert!(files.contains("Acquisition 5.dat"));
    assert!(files.contains("1.dat"));
    assert!(files.contains("2.rs3"));
    assert!(files.contains("3.dat"));
    assert_eq!(fs::read_to_string(tmp.path().join("2.dat")).unwrap(), "2.dat");
}

#[test]
fn test_second_run_changes_nothing() {
    let tmp = TempDir::new().unwrap();
    touch(tmp.path(), &["Acquisition 4.dat", "Acquisition 11.dat", "Acquisition 11.dap"]);

    rename_files(tmp.path(), false).unwrap();
    let after_first = listing(tmp.path());

    let report = rename_files(tmp.path(), false).unwrap();
    assert!(report.renamed.is_empty());
    assert!(report.skipped.is_empty());
    assert_eq!(listing(tmp.path()), after_first);
    assert!(plan_renames(tmp.path()).unwrap().is_empty());
}
