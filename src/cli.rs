//! Command-line arguments for both scrapers.

use crate::config::{DEFAULT_IMAGE_DIR, DEFAULT_SKILLS_OUT, DEFAULT_SUPPORTS_OUT};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "scrape-skills",
    version,
    about = "Fetch the gametora skill list and keep the id and English name of each skill.",
    long_about = None
)]
pub struct SkillArgs {
    /// Skill data URL. Find it on https://gametora.com/umamusume/skills under
    /// Inspector -> Network -> XHR as `skills.<hash>.json`.
    #[arg(long)]
    pub url: String,

    /// Output JSON file
    #[arg(long, default_value = DEFAULT_SKILLS_OUT)]
    pub out: PathBuf,

    /// Add icon, description, rarity, color class and grade symbol to each skill
    #[arg(long)]
    pub enrich: bool,

    /// Verbose debug logging to stderr
    #[arg(long)]
    pub debug: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "scrape-supports",
    version,
    about = "Scrape support card event data from gametora and score each event's options.",
    long_about = None
)]
pub struct SupportArgs {
    /// Skills JSON file used to translate skill ids (output of scrape-skills)
    #[arg(long, default_value = DEFAULT_SKILLS_OUT)]
    pub skills: PathBuf,

    /// Comma-separated support card slugs (e.g. 30062-silence-suzuka,30063-taiki-shuttle)
    #[arg(long = "supports-card")]
    pub supports_card: String,

    /// Output JSON file (array of support card objects)
    #[arg(long, default_value = DEFAULT_SUPPORTS_OUT)]
    pub out: PathBuf,

    /// Directory to save card images to; emptied at the start of each run
    #[arg(long, default_value = DEFAULT_IMAGE_DIR)]
    pub img_dir: PathBuf,

    /// Verbose debug logging to stderr
    #[arg(long)]
    pub debug: bool,
}

impl SupportArgs {
    pub fn card_slugs(&self) -> Vec<String> {
        split_slugs(&self.supports_card)
    }
}

/// Splits a comma-separated list, trimming entries and dropping empty ones.
pub fn split_slugs(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|slug| !slug.is_empty())
        .map(str::to_string)
        .collect()
}
