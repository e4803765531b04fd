//! Decode EPC hex strings offline in every supported format
//!
//! `cargo run --example decode_epc -- 30004142 3074257BF7194E4000001A85`

use tracing_subscriber::EnvFilter;
use uhfrs::{EpcFormat, ReaderConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Cipher seeds come from UHFRS_CUSTOM_CODE / UHFRS_APPLICATION_CODE
    let codec = ReaderConfig::from_env()?.codec()?;
    println!("Cipher key: {:?}", codec.key());

    let epcs: Vec<String> = std::env::args().skip(1).collect();
    if epcs.is_empty() {
        anyhow::bail!("usage: decode_epc <EPC hex>...");
    }

    for epc in &epcs {
        println!("{}", epc);
        for format in EpcFormat::ALL {
            let decoded = codec.decode(format, epc);
            println!("  {:<13} {}", format, decoded.as_deref().unwrap_or("-"));
        }

        let barcode = codec.to_barcode(epc);
        if !barcode.is_empty() {
            println!("  barcode type  {}", barcode.header_type());
        }
    }

    Ok(())
}
