//! `scrape-supports`: fetch each card page, save its art, collect its events.

use crate::card::{ParsedPage, parse_page};
use crate::cli::SupportArgs;
use crate::config::{IMAGE_TIMEOUT, PAGE_TIMEOUT, support_url};
use crate::model::SupportCard;
use crate::net;
use crate::output::{prepare_output_dir, write_json};
use crate::skills::SkillLookup;
use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Scrapes every requested card in order. A card that cannot be fetched or
/// decoded is logged and skipped; setup and the final write are fatal.
pub fn run(args: &SupportArgs) -> Result<Vec<SupportCard>> {
    let skills = SkillLookup::load(&args.skills);

    let slugs = args.card_slugs();
    if slugs.is_empty() {
        bail!("no support cards specified");
    }

    let removed = prepare_output_dir(&args.img_dir)?;
    if removed > 0 {
        info!("cleared {removed} entries from {}", args.img_dir.display());
    }

    let client = net::http_client()?;
    let mut cards = Vec::with_capacity(slugs.len());
    let mut images = 0;

    for slug in &slugs {
        match scrape_card(&client, slug, &skills) {
            Ok(parsed) => {
                if save_image(&client, &parsed, &args.img_dir).is_some() {
                    images += 1;
                }
                let card = parsed.card;
                info!(
                    "parsed support card: {} ({} events)",
                    card.name,
                    card.choice_events.len()
                );
                cards.push(card);
            }
            Err(e) => warn!("skipping {slug}: {e:#}"),
        }
    }

    info!(
        "downloaded {images} of {} card images to {}",
        cards.len(),
        args.img_dir.display()
    );
    write_json(&args.out, &cards)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    Ok(cards)
}

fn scrape_card(client: &Client, slug: &str, skills: &SkillLookup) -> Result<ParsedPage> {
    let url = support_url(slug);
    let html = net::fetch_text(client, &url, PAGE_TIMEOUT)?;
    let parsed = parse_page(&html, skills).with_context(|| format!("failed to parse page for {slug}"))?;
    debug!("extracted page data for {}", parsed.card.name);
    Ok(parsed)
}

/// Downloads the card art next to the other images. Never fails the card.
fn save_image(client: &Client, parsed: &ParsedPage, img_dir: &Path) -> Option<PathBuf> {
    let (Some(url), Some(filename)) = (parsed.image_url.as_ref(), parsed.image_filename()) else {
        debug!("no card image found for {}", parsed.card.id);
        return None;
    };
    debug!("found image URL: {url}");

    let path = img_dir.join(filename);
    match net::download_to_path(client, url.as_str(), &path, IMAGE_TIMEOUT) {
        Ok(bytes) => {
            info!("downloaded image to {} ({bytes} bytes)", path.display());
            Some(path)
        }
        Err(e) => {
            warn!("failed to download image for {} from {url}: {e:#}", parsed.card.id);
            None
        }
    }
}
