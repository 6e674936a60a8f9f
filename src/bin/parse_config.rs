use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use richpid::read_config_file;

/// Parse a PID configuration file and echo the result
#[derive(Parser, Debug, Clone)]
struct Cli {
    /// Configuration file
    config_file: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();
    let config = read_config_file(&args.config_file);
    println!("{config:#?}");
    Ok(())
}
