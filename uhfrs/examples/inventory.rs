//! Inventory loop
//!
//! Reads `UHFRS_*` settings from the environment, e.g.
//! `UHFRS_HOST=192.168.0.178 UHFRS_EPC_FORMAT=ascii cargo run --example inventory`

use std::time::Duration;

use tokio::time::sleep;
use tracing_subscriber::EnvFilter;
use uhfrs::{Reader, ReaderConfig, TagTable};

const ROUNDS: usize = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("uhfrs=info".parse()?))
        .init();

    let config = ReaderConfig::from_env()?;
    println!("Decoding EPCs as {}", config.epc_format);

    let mut reader = Reader::new(config)?;
    reader.connect().await?;
    println!("{}", reader.reader_info().await?);

    let mut table = TagTable::new();
    for _ in 0..ROUNDS {
        match reader.inventory(1).await {
            Ok(tags) => {
                for tag in tags {
                    if table.record(tag.clone()) {
                        println!("New tag: {}", tag);
                    }
                }
            }
            Err(e) if e.is_recoverable() => println!("Round failed: {}", e),
            Err(e) => return Err(e.into()),
        }
        sleep(Duration::from_millis(200)).await;
    }

    println!("\n{} unique tags in {}s", table.len(), table.elapsed().num_seconds());
    for row in table.rows() {
        println!("{:>5}x  {}", row.count, row.record);
    }

    reader.disconnect().await?;
    Ok(())
}
