//! Command-line interface: argument parsing and terminal output.
//!
//! Side and type tokens are passed through as raw strings and validated by
//! the order layer, so a bad token produces the same `[Validation Error]`
//! line a bad symbol does.

use std::io::{self, Write};

use clap::Parser;
use rust_decimal::Decimal;
use usdm_core::{OrderError, OrderRequest, OrderResult, Price, Quantity};

use crate::error::AppResult;

/// Place a single order on Binance USDT-M futures testnet.
#[derive(Parser, Debug)]
#[command(name = "usdm-bot", version, about = "Binance Futures Testnet Trading Bot (USDT-M)")]
pub struct Args {
    /// Trading pair symbol (e.g., BTCUSDT)
    #[arg(long)]
    pub symbol: String,

    /// Order side: BUY or SELL
    #[arg(long)]
    pub side: String,

    /// Order type: MARKET or LIMIT
    #[arg(long = "type")]
    pub order_type: String,

    /// Order quantity
    #[arg(long)]
    pub quantity: Decimal,

    /// Limit price (required for LIMIT orders)
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,

    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

impl Args {
    /// Validate the side/type tokens and assemble an order request.
    pub fn to_request(&self) -> Result<OrderRequest, OrderError> {
        let side = self.side.parse()?;
        let order_type = self.order_type.parse()?;
        Ok(OrderRequest {
            symbol: self.symbol.clone(),
            side,
            order_type,
            quantity: Quantity::new(self.quantity),
            price: self.price.map(Price::new),
        })
    }
}

/// Print the pre-confirmation order summary.
pub fn print_summary(request: &OrderRequest) {
    println!("\nOrder Summary");
    println!("{}", "=".repeat(30));
    println!("Symbol:   {}", request.symbol);
    println!("Side:     {}", request.side);
    println!("Type:     {}", request.order_type);
    println!("Quantity: {}", request.quantity);
    if let Some(price) = request.price {
        println!("Price:    {price}");
    }
    println!("{}", "-".repeat(30));
}

/// Prompt for confirmation; anything other than `y` cancels.
pub fn confirm_order() -> AppResult<bool> {
    print!("Confirm order? (y/n): ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

/// Print the exchange acknowledgement.
pub fn print_success(result: &OrderResult) {
    println!("\nOrder Placed Successfully");
    println!("{}", "=".repeat(30));
    println!("Order ID:      {}", result.order_id);
    println!("Status:        {}", result.status);
    println!("Executed Qty:  {}", result.executed_qty);
    println!("Avg Price:     {}", result.avg_price);
    println!("{}", "=".repeat(30));
}

/// Print the failure line for an order error, tagged by kind.
pub fn print_failure(err: &OrderError) {
    match err {
        OrderError::Validation(_) => println!("\n[Validation Error] {err}"),
        OrderError::Precision(_) => println!("\n[Precision Error] {err}"),
        OrderError::Api { .. } => println!("\n[API Error] {err}"),
        OrderError::Network(_) => println!("\n[Network Error] {err}"),
    }
}
