use crate::cli::RenameArgs;
use crate::exit_codes;
use crate::output;
use crate::params;
use eegseg_rs::{rename_files, RenameReport};

pub fn execute(args: RenameArgs) -> i32 {
    let folders = match params::resolve_rename_folders(&args) {
        Ok(f) => f,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    let total = folders.len();
    let mut succeeded = 0usize;
    let mut failed = 0usize;
    let mut reports: Vec<RenameReport> = Vec::new();
    let print_moves = !args.json;

    for (i, folder) in folders.iter().enumerate() {
        if !args.quiet {
            eprintln!("[{}/{}] Renaming in {}...", i + 1, total, folder.display());
        }

        match rename_files(folder, args.dry_run) {
            Ok(report) => {
                if print_moves {
                    for entry in &report.renamed {
                        if args.dry_run {
                            println!("Would rename: {} -> {}", entry.from, entry.to);
                        } else {
                            println!("Renamed: {} -> {}", entry.from, entry.to);
                        }
                    }
                }
                if !args.quiet && report.groups == 0 {
                    eprintln!("  No matching acquisition files found");
                }
                reports.push(report);
                succeeded += 1;
            }
            Err(e) => {
                eprintln!("  Error: {}", e);
                failed += 1;
                if !args.continue_on_error {
                    break;
                }
            }
        }
    }

    if args.json || args.output.is_some() {
        let written = output::to_json(&reports)
            .and_then(|json| output::write_output(&json, args.output.as_deref()));
        if let Err(e) = written {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    }

    if !args.quiet {
        let renamed: usize = reports.iter().map(|r| r.renamed.len()).sum();
        let skipped: usize = reports.iter().map(|r| r.skipped.len()).sum();
        eprintln!(
            "Rename complete: {} file(s) {}, {} skipped, {}/{} folder(s) failed",
            renamed,
            if args.dry_run { "to rename" } else { "renamed" },
            skipped,
            failed,
            total
        );
    }

    exit_codes::for_batch(succeeded, failed)
}
