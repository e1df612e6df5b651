//! Entry point: parse one order, confirm it, and place it.

use clap::Parser;
use tracing::{error, info};
use usdm_bot::{cli, config, AppError, AppResult, Application, Args};
use usdm_core::OrderType;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let code = run(args).await;
    std::process::exit(code);
}

/// Run the order flow and map the outcome to an exit code. User-facing
/// failures print a tagged line and exit 1; a declined confirmation
/// exits 0.
async fn run(args: Args) -> i32 {
    match execute(args).await {
        Ok(code) => code,
        Err(AppError::Config(msg)) => {
            println!("Configuration Error: {msg}");
            1
        }
        Err(err) => {
            error!(error = %err, "Startup failed");
            println!("\n[Unexpected Error] An internal error occurred. See logs for details.");
            1
        }
    }
}

async fn execute(args: Args) -> AppResult<i32> {
    let app_config = config::AppConfig::load(args.config.as_deref())?;
    let _guard = usdm_telemetry::init_logging(
        &app_config.logging.dir,
        &app_config.logging.file_prefix,
        &app_config.logging.level,
    )?;
    info!("Starting usdm-bot v{}", env!("CARGO_PKG_VERSION"));

    let credentials = config::credentials_from_env()?;

    let request = match args.to_request() {
        Ok(request) => request,
        Err(err) => {
            cli::print_failure(&err);
            return Ok(1);
        }
    };

    // Cheap sanity checks before bothering the user with a summary.
    if !request.quantity.is_positive() {
        println!("Error: Quantity must be positive.");
        return Ok(1);
    }
    if request.order_type == OrderType::Limit && request.price.is_none() {
        println!("Error: --price is required for LIMIT orders.");
        return Ok(1);
    }

    cli::print_summary(&request);
    if !args.yes && !cli::confirm_order()? {
        println!("Order cancelled by user.");
        return Ok(0);
    }

    let app = Application::new(&app_config, credentials)?;
    app.sync_clock().await;

    println!("\nSending order to Binance Futures Testnet...");
    match app.place_order(&request).await {
        Ok(result) => {
            cli::print_success(&result);
            Ok(0)
        }
        Err(err) => {
            cli::print_failure(&err);
            Ok(1)
        }
    }
}
