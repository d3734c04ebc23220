//! # scrape-supports
//!
//! Scrapes support card pages, scores the options of every event and writes
//! all cards to a single JSON file.

use anyhow::Result;
use clap::Parser;
use uma_scrape::cli::SupportArgs;
use uma_scrape::{logging, runtime};

fn main() -> Result<()> {
    let args = SupportArgs::parse();
    logging::init(args.debug);

    let cards = runtime::supports::run(&args)?;
    println!(
        "[OK] Wrote {} support card entries → {}",
        cards.len(),
        args.out.display()
    );
    Ok(())
}
