//! Support card page handling: the embedded Next.js payload, card metadata
//! and the infobox image.

use crate::config::BASE_URL;
use crate::events::parse_events;
use crate::model::{CardKind, SupportCard};
use crate::skills::{SkillLookup, scalar_to_string};
use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use scraper::{Html, Selector};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// Element id of the script tag holding the page's JSON payload.
pub const NEXT_DATA_ID: &str = "__NEXT_DATA__";

/// Class prefix of the card art in the page infobox.
pub const IMAGE_CLASS_PREFIX: &str = "supports_infobox_top_image__";

const ATTRIBUTES: [(&str, &str); 6] = [
    ("speed", "SPD"),
    ("stamina", "STA"),
    ("power", "PWR"),
    ("guts", "GUTS"),
    ("intelligence", "WIT"),
    ("friend", "PAL"),
];

/// Short attribute code for a raw card type, e.g. `intelligence` → `WIT`.
/// Unknown types are upper-cased.
pub fn attribute_code(raw: &str) -> String {
    let raw = raw.to_lowercase();
    ATTRIBUTES
        .iter()
        .find(|(name, _)| *name == raw)
        .map(|(_, code)| code.to_string())
        .unwrap_or_else(|| raw.to_uppercase())
}

/// Rarity label; only code 3 has a name.
pub fn rarity_label(code: Option<&Value>) -> String {
    match code {
        Some(v) if v.as_i64() == Some(3) => "SSR".to_string(),
        Some(v) => format!("Rarity_{}", scalar_to_string(v).unwrap_or_else(|| v.to_string())),
        None => "Rarity_None".to_string(),
    }
}

/// `<name>_<attribute>_<rarity>` with spaces replaced by underscores.
pub fn composite_id(name: &str, attribute: &str, rarity: &str) -> String {
    format!("{name}_{attribute}_{rarity}").replace(' ', "_")
}

/// Identity fields of a card, taken from `itemData`.
#[derive(Debug, Clone, PartialEq)]
pub struct CardMeta {
    pub name: String,
    pub rarity: String,
    pub attribute: String,
    pub id: String,
}

impl CardMeta {
    pub fn from_item_data(item: &Value) -> Self {
        let name = item
            .get("char_name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();
        let rarity = rarity_label(item.get("rarity").filter(|v| !v.is_null()));
        let attribute = attribute_code(item.get("type").and_then(Value::as_str).unwrap_or("unknown"));
        let id = composite_id(&name, &attribute, &rarity);
        Self {
            name,
            rarity,
            attribute,
            id,
        }
    }
}

/// Everything extracted from one card page, before any image download.
#[derive(Debug, Clone)]
pub struct ParsedPage {
    pub card: SupportCard,
    /// Absolute URL of the card art, when the page has one.
    pub image_url: Option<Url>,
}

impl ParsedPage {
    /// File name for the card art: the composite id plus the URL's extension.
    pub fn image_filename(&self) -> Option<String> {
        self.image_url
            .as_ref()
            .map(|url| format!("{}{}", self.card.id, url_extension(url)))
    }
}

/// Parses a support card page into a card record and its image URL.
pub fn parse_page(html: &str, skills: &SkillLookup) -> Result<ParsedPage> {
    let document = Html::parse_document(html);

    let payload = next_data(&document)?;
    let page_props = payload
        .pointer("/props/pageProps")
        .context("missing props.pageProps")?;
    let item_data = page_props
        .get("itemData")
        .context("missing pageProps.itemData")?;
    let event_data = page_props
        .get("eventData")
        .context("missing pageProps.eventData")?;

    let meta = CardMeta::from_item_data(item_data);
    let choice_events = parse_events(event_data, skills);

    Ok(ParsedPage {
        card: SupportCard {
            kind: CardKind::Support,
            name: meta.name,
            rarity: meta.rarity,
            attribute: meta.attribute,
            id: meta.id,
            choice_events,
        },
        image_url: find_image_url(&document)?,
    })
}

/// Decodes the JSON held by the `__NEXT_DATA__` element.
pub fn next_data(document: &Html) -> Result<Value> {
    let selector = selector(&format!("#{NEXT_DATA_ID}"))?;
    let element = document
        .select(&selector)
        .next()
        .with_context(|| format!("could not find {NEXT_DATA_ID} tag"))?;

    let content: String = element.text().collect();
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {NEXT_DATA_ID}"))
}

/// Locates the infobox image and resolves its `src` against the site root.
///
/// Only the first image carrying the infobox class is considered. A missing
/// or unresolvable `src` yields `None`; the card itself is still usable.
pub fn find_image_url(document: &Html) -> Result<Option<Url>> {
    let selector = selector("img")?;
    let Some(img) = document.select(&selector).find(|img| {
        img.value()
            .classes()
            .any(|class| class.starts_with(IMAGE_CLASS_PREFIX))
    }) else {
        return Ok(None);
    };

    let Some(src) = img
        .value()
        .attr("src")
        .map(str::trim)
        .filter(|src| !src.is_empty())
    else {
        debug!("infobox image has no src");
        return Ok(None);
    };

    let base = Url::parse(BASE_URL)?;
    match base.join(src) {
        Ok(url) => Ok(Some(url)),
        Err(e) => {
            warn!("ignoring invalid image src {src:?}: {e}");
            Ok(None)
        }
    }
}

/// `.png`-style extension of the URL path, or an empty string.
pub fn url_extension(url: &Url) -> String {
    Path::new(url.path())
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {css:?}: {e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventKind;
    use serde_json::json;

    fn page(payload: &Value, image: &str) -> String {
        format!(
            r#"<!DOCTYPE html><html><head><title>Support</title></head><body>
<div class="supports_infobox_top__x1"><img class="foo supports_infobox_top_image__AbC12" src="{image}" alt="card"></div>
<script id="__NEXT_DATA__" type="application/json">{payload}</script>
</body></html>"#
        )
    }

    fn payload() -> Value {
        let events = json!({
            "random": [{"n": "Hot Topic", "c": [{"r": [{"t": "en", "v": "+10"}]}]}],
            "arrows": [
                {"n": "Step One", "c": [{"r": [{"t": "sp", "v": "+5"}]}]},
                {"n": "Step Two", "c": [{"r": [{"t": "sk", "v": "+1", "d": 200332}]}]},
            ],
        });
        json!({
            "props": {"pageProps": {
                "itemData": {"char_name": "Silence Suzuka", "rarity": 3, "type": "speed"},
                "eventData": {"en": events.to_string()},
            }},
        })
    }

    #[test]
    fn test_attribute_code() {
        assert_eq!(attribute_code("speed"), "SPD");
        assert_eq!(attribute_code("Intelligence"), "WIT");
        assert_eq!(attribute_code("friend"), "PAL");
        assert_eq!(attribute_code("group"), "GROUP");
    }

    #[test]
    fn test_rarity_label() {
        assert_eq!(rarity_label(Some(&json!(3))), "SSR");
        assert_eq!(rarity_label(Some(&json!(2))), "Rarity_2");
        assert_eq!(rarity_label(Some(&json!(1))), "Rarity_1");
        assert_eq!(rarity_label(None), "Rarity_None");
    }

    #[test]
    fn test_card_meta() {
        let meta = CardMeta::from_item_data(&json!({"char_name": "Taiki Shuttle", "rarity": 2, "type": "power"}));
        assert_eq!(meta.id, "Taiki_Shuttle_PWR_Rarity_2");

        let meta = CardMeta::from_item_data(&json!({}));
        assert_eq!(meta.name, "Unknown");
        assert_eq!(meta.attribute, "UNKNOWN");
        assert_eq!(meta.id, "Unknown_UNKNOWN_Rarity_None");
    }

    #[test]
    fn test_parse_page() {
        let mut skills = SkillLookup::new();
        skills.insert("200332", "Corner Adept ○");
        let html = page(&payload(), "/images/umamusume/supports/tex_support_card_30028.png?v=2");

        let parsed = parse_page(&html, &skills).unwrap();
        let card = &parsed.card;
        assert_eq!(card.name, "Silence Suzuka");
        assert_eq!(card.rarity, "SSR");
        assert_eq!(card.attribute, "SPD");
        assert_eq!(card.id, "Silence_Suzuka_SPD_SSR");
        assert_eq!(card.choice_events.len(), 3);
        assert_eq!(card.choice_events[2].kind, EventKind::Chain);
        assert_eq!(card.choice_events[2].chain_step, 2);
        assert_eq!(card.choice_events[2].options[&1][0].hints, vec!["Corner Adept ○"]);

        assert_eq!(
            parsed.image_url.as_ref().map(Url::as_str),
            Some("https://gametora.com/images/umamusume/supports/tex_support_card_30028.png?v=2")
        );
        assert_eq!(parsed.image_filename().as_deref(), Some("Silence_Suzuka_SPD_SSR.png"));

        let value = serde_json::to_value(card).unwrap();
        assert_eq!(value["type"], "support");
    }

    #[test]
    fn test_relative_and_absolute_image_src() {
        let html = page(&payload(), "images/card.webp");
        let parsed = parse_page(&html, &SkillLookup::new()).unwrap();
        assert_eq!(
            parsed.image_url.unwrap().as_str(),
            "https://gametora.com/images/card.webp"
        );

        let html = page(&payload(), "https://cdn.example.com/a/b/card");
        let parsed = parse_page(&html, &SkillLookup::new()).unwrap();
        assert_eq!(parsed.image_filename().as_deref(), Some("Silence_Suzuka_SPD_SSR"));
    }

    #[test]
    fn test_page_without_image_still_parses() {
        let html = format!(
            r#"<html><body><img class="avatar" src="/x.png"><script id="__NEXT_DATA__">{}</script></body></html>"#,
            payload()
        );
        let parsed = parse_page(&html, &SkillLookup::new()).unwrap();
        assert!(parsed.image_url.is_none());
        assert!(parsed.image_filename().is_none());
        assert_eq!(parsed.card.choice_events.len(), 3);
    }

    #[test]
    fn test_invalid_image_src_keeps_card() {
        let html = page(&payload(), "http://[bad/x.png");
        let parsed = parse_page(&html, &SkillLookup::new()).unwrap();
        assert!(parsed.image_url.is_none());
        assert_eq!(parsed.card.id, "Silence_Suzuka_SPD_SSR");
        assert_eq!(parsed.card.choice_events.len(), 3);
    }

    #[test]
    fn test_first_infobox_image_without_src_wins() {
        let html = format!(
            r#"<html><body>
<img class="supports_infobox_top_image__A">
<img class="supports_infobox_top_image__B" src="/later.png">
<script id="__NEXT_DATA__">{}</script></body></html>"#,
            payload()
        );
        let parsed = parse_page(&html, &SkillLookup::new()).unwrap();
        assert!(parsed.image_url.is_none());
    }

    #[test]
    fn test_missing_marker_fails() {
        let err = parse_page("<html><body></body></html>", &SkillLookup::new()).unwrap_err();
        assert!(err.to_string().contains(NEXT_DATA_ID));
    }

    #[test]
    fn test_missing_keys_fail() {
        let html = page(&json!({"props": {"pageProps": {"itemData": {}}}}), "/x.png");
        let err = parse_page(&html, &SkillLookup::new()).unwrap_err();
        assert!(err.to_string().contains("eventData"));
    }
}
