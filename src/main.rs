//! find_duplicates - duplicate file finder
//!
//! Entry point for the find_duplicates CLI application.

use clap::Parser;
use find_duplicates::{
    cli::{Cli, OutputFormat},
    error::{ExitCode, StructuredError},
    logging::init_logging,
};

fn main() {
    // Parse command-line arguments; clap exits with status 2 on usage errors
    let cli = Cli::parse();
    let json_errors = cli.output == Some(OutputFormat::Json);

    let result = init_logging(cli.debug, cli.log_file.as_deref())
        .and_then(|()| find_duplicates::run_app(cli));

    match result {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::for_error(&err);

            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                if let Ok(json) = serde_json::to_string_pretty(&structured) {
                    eprintln!("{}", json);
                } else {
                    eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
                }
            } else {
                eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
            }

            std::process::exit(exit_code.as_i32());
        }
    }
}
