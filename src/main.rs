use anyhow::Result;
use clap::Parser;

use speechkit_voiceover::{
    cli::{handle_command, is_clean_exit, Cli},
    utils::init_logger,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_logger(cli.verbose);

    match handle_command(&cli).await {
        Err(e) if is_clean_exit(&e) => {
            eprintln!("{}", e);
            Ok(())
        }
        result => result,
    }
}
