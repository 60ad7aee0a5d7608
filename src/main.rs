use clap::error::ErrorKind;
use clap::Parser;
use goose_convert::{convert_directory, GitCli};
use std::path::PathBuf;

const USAGE: &str = "Usage: convert-to-goose DIRECTORY";

#[derive(Parser)]
#[command(name = "convert-to-goose")]
#[command(about = "Convert paired up/down SQL migrations into goose migration files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Directory holding the *.up.sql / *.down.sql migrations
    #[arg(allow_hyphen_values = true)]
    directory: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => {
            println!("{}", USAGE);
            std::process::exit(2);
        }
    };

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let report = convert_directory(&cli.directory, &GitCli::new())?;
    println!("{}", report);

    Ok(())
}
