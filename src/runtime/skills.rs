//! `scrape-skills`: fetch the skill list, filter it, write it out.

use crate::cli::SkillArgs;
use crate::config::PAGE_TIMEOUT;
use crate::model::SkillRecord;
use crate::net;
use crate::output::write_json;
use crate::skills::filter_skills;
use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info};

/// Runs the whole pipeline; any failure aborts the run.
pub fn run(args: &SkillArgs) -> Result<Vec<SkillRecord>> {
    let client = net::http_client()?;
    let raw = net::fetch_json(&client, &args.url, PAGE_TIMEOUT)?;
    let skills = process(&raw, args.enrich)?;

    write_json(&args.out, &skills)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    info!("wrote {} skills to {}", skills.len(), args.out.display());
    Ok(skills)
}

/// Filters the decoded skill list; the document must be a JSON array.
pub fn process(raw: &Value, enrich: bool) -> Result<Vec<SkillRecord>> {
    let entries = raw.as_array().context("skill data is not a JSON array")?;
    debug!("found {} skills", entries.len());

    let skills = filter_skills(entries, enrich);
    debug!("{} skills have an id and name_en", skills.len());
    Ok(skills)
}
