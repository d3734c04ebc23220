//! JSON output files and the image output directory.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::warn;

/// Writes `value` as pretty-printed JSON (2-space indent, Unicode kept as-is),
/// creating missing parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let file = fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = io::BufReader::new(file);
    serde_json::from_reader(reader).with_context(|| format!("failed to decode {}", path.display()))
}

/// Makes `dir` an existing, empty directory.
///
/// Safe to call on every run: an existing directory is emptied (files,
/// symlinks and subdirectories), a missing one is created. Entries that cannot
/// be removed are logged and left in place. Returns the number of entries
/// removed.
pub fn prepare_output_dir(dir: &Path) -> Result<usize> {
    if dir.exists() && !dir.is_dir() {
        bail!("path exists but is not a directory: {}", dir.display());
    }

    let mut removed = 0;
    if dir.is_dir() {
        for entry in fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))? {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    warn!("failed to read an entry of {}: {e}", dir.display());
                    continue;
                }
            };
            match remove_entry(&path) {
                Ok(()) => removed += 1,
                Err(e) => warn!("failed to delete {}: {e}", path.display()),
            }
        }
    }

    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    Ok(removed)
}

fn remove_entry(path: &Path) -> io::Result<()> {
    // symlink_metadata so a link to a directory is unlinked, not followed.
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CardKind, EffectMap, Event, EventKind, EventOptions, SupportCard};

    #[test]
    fn test_write_json_is_pretty_and_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.json");

        write_json(&path, &vec!["スペシャルウィーク"]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "[\n  \"スペシャルウィーク\"\n]\n");
    }

    #[test]
    fn test_support_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("supports_events.json");

        let mut options = EventOptions::new();
        options.insert(
            1,
            vec![EffectMap {
                energy: -10,
                hints: vec!["Skill ID: 42".into(), "Corner Adept ○".into()],
                ..Default::default()
            }],
        );
        options.insert(2, vec![EffectMap::default()]);
        let cards = vec![SupportCard {
            kind: CardKind::Support,
            name: "Kitasan Black".into(),
            rarity: "SSR".into(),
            attribute: "SPD".into(),
            id: "Kitasan_Black_SPD_SSR".into(),
            choice_events: vec![Event {
                kind: EventKind::Chain,
                chain_step: 2,
                name: "Festival".into(),
                options,
                default_preference: 2,
            }],
        }];

        write_json(&path, &cards).unwrap();
        let back: Vec<SupportCard> = read_json(&path).unwrap();
        assert_eq!(back, cards);

        let raw: serde_json::Value = read_json(&path).unwrap();
        assert_eq!(raw[0]["choice_events"][0]["options"]["2"], serde_json::json!([{}]));
    }

    #[test]
    fn test_prepare_output_dir_creates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("images");

        assert_eq!(prepare_output_dir(&images).unwrap(), 0);
        assert!(images.is_dir());
        // Second run on the now-existing directory.
        assert_eq!(prepare_output_dir(&images).unwrap(), 0);
    }

    #[test]
    fn test_prepare_output_dir_empties_existing() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("images");
        fs::create_dir_all(images.join("old/deeper")).unwrap();
        fs::write(images.join("a.png"), b"png").unwrap();
        fs::write(images.join("old/b.png"), b"png").unwrap();

        assert_eq!(prepare_output_dir(&images).unwrap(), 2);
        assert!(images.is_dir());
        assert_eq!(fs::read_dir(&images).unwrap().count(), 0);
    }

    #[test]
    fn test_prepare_output_dir_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("images");
        fs::write(&path, b"not a dir").unwrap();

        assert!(prepare_output_dir(&path).is_err());
        assert!(path.is_file());
    }
}
