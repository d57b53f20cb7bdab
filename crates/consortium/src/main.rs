use std::process::ExitCode;

use clap::Parser;

mod cli;
mod logging;

use cli::RootCommand;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = color_eyre::install() {
        eprintln!("Failed to install color_eyre: {err}");
        return ExitCode::FAILURE;
    }

    let command = RootCommand::parse();

    if let Err(err) = logging::setup(&command.logging) {
        eprintln!("Failed to set up logging: {err:?}");
        return ExitCode::FAILURE;
    }

    match command.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:?}");
            ExitCode::FAILURE
        }
    }
}
