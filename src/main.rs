use std::process::ExitCode;

use clap::Parser;
use patgen::cli::{Cli, Commands, Summary};
use patgen::output::Printer;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let printer = Printer::new();

    let result = match cli.command {
        None => patgen::cli::build::run(cli.build, &printer),
        Some(Commands::Build(args)) => patgen::cli::build::run(args, &printer),
        Some(Commands::Validate(args)) => patgen::cli::validate::run(args, &printer),
        Some(Commands::List(args)) => patgen::cli::list::run(args).map(|()| Summary::default()),
        Some(Commands::Completions(args)) => {
            patgen::cli::completions::run(args).map(|()| Summary::default())
        }
    };

    match result {
        Ok(summary) => ExitCode::from(summary.exit_status()),
        Err(err) => {
            let status = patgen::cli::error_exit_status(&err);
            if err.is_fatal() {
                printer.error("Aborted", "insufficient memory");
            }
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::from(status)
        }
    }
}
