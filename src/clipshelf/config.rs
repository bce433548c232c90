//! # Configuration
//!
//! Settings live in `settings.json` inside the data directory. Every field has a default,
//! so a partial or missing file is fine.
//!
//! | Key (CLI) | JSON field | Default | Description |
//! |-----------|------------|---------|-------------|
//! | `hotkey` | `hotkeyKeyCode` + `hotkeyModifierMask` | `Scroll Lock` | Chord that toggles the panel |
//! | `max-entries` | `maxEntries` | `100` | History capacity (minimum 1) |
//! | `poll-interval` | `pollIntervalMs` | `500` | Clipboard sampling period in ms (minimum 50) |
//!
//! The modifier mask uses Alt=1, Control=2, Shift=4, Windows=8.

use crate::error::{ClipError, Result};
use crate::history::DEFAULT_MAX_ENTRIES;
use crate::hotkey::{Hotkey, Modifiers, VK_SCROLL};
use crate::store::SETTINGS_FILENAME;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

pub const MIN_POLL_INTERVAL_MS: u64 = 50;
const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

pub const KEYS: &[&str] = &["hotkey", "max-entries", "poll-interval"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_key_code")]
    pub hotkey_key_code: u32,

    #[serde(default)]
    pub hotkey_modifier_mask: u32,

    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_key_code() -> u32 {
    VK_SCROLL
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hotkey_key_code: VK_SCROLL,
            hotkey_modifier_mask: 0,
            max_entries: DEFAULT_MAX_ENTRIES,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// Load settings from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let path = data_dir.as_ref().join(SETTINGS_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Like [`Settings::load`], but an unreadable file yields defaults.
    pub fn load_or_default<P: AsRef<Path>>(data_dir: P) -> Self {
        Self::load(data_dir).unwrap_or_else(|e| {
            warn!("Could not load settings, using defaults: {}", e);
            Self::default()
        })
    }

    pub fn save<P: AsRef<Path>>(&self, data_dir: P) -> Result<()> {
        let data_dir = data_dir.as_ref();
        if !data_dir.exists() {
            fs::create_dir_all(data_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(data_dir.join(SETTINGS_FILENAME), content)?;
        Ok(())
    }

    /// Unknown modifier bits are ignored.
    pub fn hotkey(&self) -> Hotkey {
        Hotkey::new(
            self.hotkey_key_code,
            Modifiers::from_bits_truncate(self.hotkey_modifier_mask),
        )
    }

    pub fn set_hotkey(&mut self, hotkey: Hotkey) {
        self.hotkey_key_code = hotkey.key_code;
        self.hotkey_modifier_mask = hotkey.modifiers.bits();
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries.max(1)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }

    /// Display value of a CLI key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "hotkey" => Some(self.hotkey().to_string()),
            "max-entries" => Some(self.max_entries().to_string()),
            "poll-interval" => Some(format!("{}ms", self.poll_interval().as_millis())),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "hotkey" => {
                self.set_hotkey(Hotkey::parse(value)?);
            }
            "max-entries" => {
                let max: usize = value
                    .trim()
                    .parse()
                    .map_err(|_| ClipError::Config(format!("not a number: {}", value)))?;
                if max == 0 {
                    return Err(ClipError::Config("max-entries must be at least 1".into()));
                }
                self.max_entries = max;
            }
            "poll-interval" => {
                let raw = value.trim();
                let ms: u64 = raw
                    .strip_suffix("ms")
                    .unwrap_or(raw)
                    .trim()
                    .parse()
                    .map_err(|_| ClipError::Config(format!("not a duration: {}", value)))?;
                if ms < MIN_POLL_INTERVAL_MS {
                    return Err(ClipError::Config(format!(
                        "poll-interval must be at least {}ms",
                        MIN_POLL_INTERVAL_MS
                    )));
                }
                self.poll_interval_ms = ms;
            }
            _ => return Err(ClipError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.hotkey(), Hotkey::default());
        assert_eq!(settings.max_entries(), 100);
        assert_eq!(settings.poll_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = tempdir().unwrap();
        assert_eq!(Settings::load(temp.path()).unwrap(), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("nested");

        let mut settings = Settings::default();
        settings.set("hotkey", "Ctrl + Shift + V").unwrap();
        settings.set("max-entries", "25").unwrap();
        settings.save(&dir).unwrap();

        let loaded = Settings::load(&dir).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.hotkey().to_string(), "Ctrl + Shift + V");
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["hotkeyKeyCode"], 0x91);
        assert_eq!(json["hotkeyModifierMask"], 0);
        assert_eq!(json["maxEntries"], 100);
        assert_eq!(json["pollIntervalMs"], 500);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join(SETTINGS_FILENAME),
            r#"{"hotkeyKeyCode": 112, "hotkeyModifierMask": 3}"#,
        )
        .unwrap();

        let settings = Settings::load(temp.path()).unwrap();
        assert_eq!(settings.hotkey().to_string(), "Ctrl + Alt + F1");
        assert_eq!(settings.max_entries(), 100);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(SETTINGS_FILENAME), "{ not json").unwrap();

        assert!(Settings::load(temp.path()).is_err());
        assert_eq!(Settings::load_or_default(temp.path()), Settings::default());
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let settings = Settings {
            max_entries: 0,
            poll_interval_ms: 1,
            hotkey_modifier_mask: 0xFF,
            ..Default::default()
        };
        assert_eq!(settings.max_entries(), 1);
        assert_eq!(settings.poll_interval(), Duration::from_millis(50));
        assert_eq!(settings.hotkey().modifiers, Modifiers::all());
    }

    #[test]
    fn test_get_and_set_keys() {
        let mut settings = Settings::default();
        assert_eq!(settings.get("hotkey").as_deref(), Some("Scroll Lock"));
        assert_eq!(settings.get("poll-interval").as_deref(), Some("500ms"));
        assert!(settings.get("colour").is_none());

        settings.set("poll-interval", "250ms").unwrap();
        assert_eq!(settings.poll_interval_ms, 250);
        settings.set("poll-interval", "300").unwrap();
        assert_eq!(settings.poll_interval_ms, 300);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(settings.set("max-entries", "0").is_err());
        assert!(settings.set("max-entries", "lots").is_err());
        assert!(settings.set("poll-interval", "10").is_err());
        assert!(settings.set("hotkey", "Ctrl + Nope").is_err());
        assert!(settings.set("colour", "blue").is_err());
        assert_eq!(settings, Settings::default());
    }
}
