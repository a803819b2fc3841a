//! # Pizzeria: a day of orders
//!
//! Runs one ten-order pipeline with the coloured [`LogWriter`]:
//! - every order takes 1-5 seconds to make (pass `--fast` to skip the wait)
//! - roughly a third of them fail
//! - the kitchen shuts down once the quota is reached
//!
//! ```text
//! cargo run --example pizzeria --features logging -- --fast
//! ```

use std::sync::Arc;

use colored::Colorize;
use quotaflow::{Config, DelayPolicy, Driver, LogWriter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = Config::default();
    if std::env::args().any(|a| a == "--fast") {
        cfg.delay = DelayPolicy::None;
    }

    println!("{}", "Welcome to the Pizza Byte Cafe".cyan());
    println!("{}", "______________________________".cyan());

    let summary = Driver::builder(cfg)
        .with_subscriber(Arc::new(LogWriter::new()))
        .build()
        .run()
        .await?;

    println!("{}", "_______________".cyan());
    println!("{}", "Done for the day!".cyan());
    println!("{}", " ***** Summary for the day: *****".magenta());
    println!(
        "{}",
        format!(
            "We made {} pizzas and failed {} pizzas today.",
            summary.succeeded, summary.failed
        )
        .bright_magenta()
    );
    Ok(())
}
