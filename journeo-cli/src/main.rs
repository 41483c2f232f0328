//! Entry point for the `journeo` binary.
#![forbid(unsafe_code)]

use journeo_cli::CliError;

fn main() -> eyre::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match journeo_cli::run() {
        // Help, version and usage errors print and exit the way clap intends.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        result => result.map_err(eyre::Report::from),
    }
}
