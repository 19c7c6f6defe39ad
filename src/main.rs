use anyhow::{Context, Result};
use clap::Parser;

use fastq_validator::config::{Args, Config};
use fastq_validator::validation::Validator;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logger first, so config discovery can report which file it used
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level.as_str()),
    )
    .init();

    let config = Config::from_args_and_env(args)?;

    let validator = Validator::from_command(config.command.clone());

    // Only an execution failure is an error exit; INVALID is a normal result
    let report = validator
        .validate(&config.file)
        .await
        .with_context(|| format!("Could not validate {}", config.file.display()))?;

    let json = if config.pretty {
        report.to_json_pretty()?
    } else {
        report.to_json()?
    };
    println!("{}", json);

    Ok(())
}
