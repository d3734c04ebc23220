//! # scrape-skills
//!
//! Downloads the gametora skill list and writes the skills that have an id
//! and an English name.

use anyhow::Result;
use clap::Parser;
use uma_scrape::cli::SkillArgs;
use uma_scrape::{logging, runtime};

fn main() -> Result<()> {
    let args = SkillArgs::parse();
    logging::init(args.debug);

    let skills = runtime::skills::run(&args)?;
    println!("[OK] Wrote {} skill entries → {}", skills.len(), args.out.display());
    Ok(())
}
