use clap::Parser;

use transvox::cli::Cli;
use transvox::TvResult;

/// Exit code for fatal input/provisioning errors (and resource-exhaustion
/// aborts). Per-file skips and failures still exit 0.
const EXIT_FATAL: i32 = 2;

fn main() {
    transvox::logging::init();

    let cli = Cli::parse();
    if let Err(error) = run(&cli) {
        eprintln!("error: {error}");
        std::process::exit(EXIT_FATAL);
    }
}

fn run(cli: &Cli) -> TvResult<()> {
    let config = cli.to_config();
    let report = transvox::batch::run_batch(&cli.input, &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
