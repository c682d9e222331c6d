use crate::cli::InspectArgs;
use crate::exit_codes;
use crate::output;
use eegseg_rs::{EegSegError, ReaderFactory};
use std::path::Path;

pub fn execute(args: InspectArgs) -> i32 {
    let path = Path::new(&args.file);
    if !path.is_file() {
        eprintln!("Error: File not found: {}", args.file);
        return exit_codes::INPUT_ERROR;
    }

    let reader = match ReaderFactory::create_reader(path) {
        Ok(r) => r,
        Err(e @ EegSegError::UnsupportedFormat(_)) => {
            eprintln!("Error: {}", e);
            return exit_codes::INPUT_ERROR;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    };
    let info = reader.info();

    if args.json {
        if let Err(e) = output::print_json(info) {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    } else {
        println!("File: {}", info.file_name);
        println!("Format: {}", info.format);
        println!("Sampling rate: {} Hz", info.sample_rate);
        println!("Channels: {}", info.num_channels);
        println!("Samples: {} ({:.2} s)", info.num_samples, info.duration);
        if let Some(ref data_file) = info.data_file {
            println!("Data file: {}", data_file);
        }
        println!("Size: {} bytes", info.file_size);
    }

    exit_codes::SUCCESS
}
