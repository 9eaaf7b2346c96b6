use std::process::ExitCode;

use clap::Parser;
use submission_gen::app;
use submission_gen::cli::Cli;
use submission_gen::config::RunConfig;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RunConfig::from(Cli::parse());
    match app::run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
