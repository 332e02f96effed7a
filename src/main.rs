use std::process::ExitCode;

use kube_connect::{cli::Cli, config::Config, env::ProcessEnv, errors::AppResult};

#[tokio::main]
async fn main() -> ExitCode {
    kube_connect::logging::init();

    match try_main().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn try_main() -> AppResult<()> {
    let cli = <Cli as clap::Parser>::parse();
    let config = Config::try_from(cli)?;

    kube_connect::run(config, &ProcessEnv).await
}
