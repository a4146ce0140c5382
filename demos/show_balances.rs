//! Print native and token balances for one address across every configured network
//!
//! Usage:
//! ```text
//! cargo run --example show_balances -- oathstone.json 0x28C6c06298d514Db089934071355E5743bf21d60
//! ```
//!
//! Set `RUST_LOG=debug` to see connection and lookup logs.

use anyhow::{bail, Result};
use colored::*;
use oathstone::Oathstone;
use prettytable::{format, Cell, Row, Table};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(config_path), Some(owner)) = (args.next(), args.next()) else {
        bail!("usage: show_balances <config.json> <address>");
    };

    let mut client = Oathstone::from_path(&config_path)?;
    println!("{}", format!("🔍 Loading networks from {config_path}\n").cyan().bold());
    client.load_contracts().await?;

    for (network, token) in client.incomplete_tokens() {
        println!("{}", format!("⚠️  {network}/{token} has no contract address, skipped").yellow());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.add_row(Row::new(vec![
        Cell::new("Network").style_spec("Fb"),
        Cell::new("Asset").style_spec("Fb"),
        Cell::new("Balance").style_spec("Fb"),
    ]));

    let networks: Vec<String> = client.network_names().map(str::to_string).collect();
    for network in &networks {
        let native = client
            .get_native_balance(network, &owner)
            .await
            .unwrap_or_else(|e| format!("error: {e}"));
        table.add_row(Row::new(vec![
            Cell::new(network),
            Cell::new("(native)"),
            Cell::new(&native),
        ]));

        let tokens: Vec<String> = client.config().networks[network]
            .tokens
            .keys()
            .filter(|token| client.binding(network, token).is_some())
            .cloned()
            .collect();
        for token in tokens {
            let balance = client
                .get_token_balance(network, &token, &owner)
                .await
                .unwrap_or_else(|e| format!("error: {e}"));
            table.add_row(Row::new(vec![
                Cell::new(network),
                Cell::new(&token),
                Cell::new(&balance),
            ]));
        }
    }

    println!("Balances of {}:", owner.bold());
    table.printstd();
    println!("\n{}", "✅ Done".green().bold());
    Ok(())
}
