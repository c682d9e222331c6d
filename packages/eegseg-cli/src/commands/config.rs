use crate::cli::ConfigArgs;
use crate::exit_codes;
use crate::output;
use crate::params;

pub fn execute(args: ConfigArgs) -> i32 {
    let config = match params::resolve_project(&args.project) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    match output::print_json(&config) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_codes::EXECUTION_ERROR
        }
    }
}
