// src/main.rs

use stylewatch::{cli, exit_code, logging, run};

#[tokio::main]
async fn main() {
    match run_main().await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("stylewatch error: {err:?}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> anyhow::Result<i32> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    let fail_on_error = args.fail_on_error;
    let summary = run(args).await?;
    Ok(exit_code(&summary, fail_on_error))
}
