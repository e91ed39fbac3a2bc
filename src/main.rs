use clap::{CommandFactory, Parser};
use incident_normalizer::ErrorReport;
use incident_normalizer::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // No subcommand: show help
    let Some(command) = args.command else {
        let _ = Args::command().print_help();
        println!();
        process::exit(0);
    };

    match commands::run(command) {
        Ok(()) => process::exit(0),
        Err(error) => {
            tracing::error!("{:#}", error);

            let report = ErrorReport::from_error(&error);
            eprintln!("Error: {}", report.message);
            if let Some(details) = &report.details {
                eprintln!("  {}", details);
            }
            process::exit(commands::exit_code(&error));
        }
    }
}
