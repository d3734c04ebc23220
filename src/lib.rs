//! uma-scrape library: skill and support-card scrapers for gametora.com.

pub mod card;
pub mod cli;
pub mod config;
pub mod effects;
pub mod events;
pub mod logging;
pub mod model;
pub mod net;
pub mod output;
pub mod runtime;
pub mod scoring;
pub mod skills;
