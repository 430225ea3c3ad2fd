// src/main.rs

use mcpshim::config::LaunchConfig;
use mcpshim::{cli, logging, run};

#[tokio::main]
async fn main() {
    match run_main().await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("mcpshim error: {err:?}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> anyhow::Result<i32> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;

    // Resolved before anything is spawned; bad values are fatal here.
    let config = LaunchConfig::from_env()?;

    run(config).await
}
