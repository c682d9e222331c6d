use crate::cli::SegmentArgs;
use crate::exit_codes;
use crate::output;
use crate::params;
use eegseg_rs::{build_subject, ExportOptions, SubjectReport};
use std::time::Instant;

pub fn execute(args: SegmentArgs) -> i32 {
    let config = match params::resolve_segment_config(&args) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    if config.subjects.is_empty() {
        eprintln!("Error: No subjects given. Use --subjects or a config file");
        return exit_codes::INPUT_ERROR;
    }

    let options = ExportOptions { force: args.force };
    let total = config.subjects.len();
    let mut succeeded = 0usize;
    let mut failed = 0usize;
    let mut reports: Vec<SubjectReport> = Vec::new();
    let start_time = Instant::now();

    for (i, subject) in config.subjects.iter().enumerate() {
        if !args.quiet {
            eprintln!("[{}/{}] Processing subject {}...", i + 1, total, subject);
        }

        match build_subject(&config, subject, &options) {
            Ok(report) => {
                if !args.quiet {
                    let kept_folders = report.exported.iter().filter(|r| !r.csv_written).count();
                    eprintln!(
                        "  {} recording(s), {} segment(s), {} skipped, {} CSV folder(s) left untouched",
                        report.exported.len(),
                        report.total_segments(),
                        report.skipped.len(),
                        kept_folders
                    );
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
        eprintln!(
            "Segmentation complete: {}/{} subject(s) succeeded, {}/{} failed, {:.1}s",
            succeeded,
            total,
            failed,
            total,
            start_time.elapsed().as_secs_f64()
        );
    }

    exit_codes::for_batch(succeeded, failed)
}
