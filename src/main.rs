use clap::Parser;
use color_eyre::eyre::WrapErr;

use release_butler::{
    Args,
    command::{self, common::CommandOutput},
    result::Result,
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("release_butler")
        .build();

    // stdout is reserved for the JSON result line
    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = Args::parse();

    initialize_logger(cli_args.debug)?;

    match command::run(cli_args).await {
        Ok(output) => {
            println!("{}", output.to_json()?);
            Ok(())
        }
        Err(err) => {
            println!("{}", CommandOutput::failure(err.to_string()).to_json()?);
            Err(err).wrap_err("release-butler failed")
        }
    }
}
