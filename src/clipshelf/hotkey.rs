//! # Hotkey
//!
//! The OS keyboard hook lives outside this crate. It runs on its own thread and hands raw
//! key-down events ([`KeyPress`]) over a [`HotkeySource`], usually the receiving end of a
//! channel. [`HotkeyListener`] drains that source on the session thread and turns presses
//! of the configured chord into [`HotkeyEvent::Toggle`].
//!
//! A press matches when its key code equals the configured one and its modifier mask is
//! exactly the configured mask. Presses of a modifier key on its own never match.

use crate::error::{ClipError, Result};
use bitflags::bitflags;
use std::fmt;
use std::sync::mpsc::Receiver;
use tracing::debug;

pub const VK_SCROLL: u32 = 0x91;

bitflags! {
    /// Modifier mask, bit-compatible with the values stored in `settings.json`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        const ALT = 1;
        const CONTROL = 2;
        const SHIFT = 4;
        const WINDOWS = 8;
    }
}

/// A raw key-down signal: virtual key code plus the modifiers held at the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key_code: u32,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key_code: u32, modifiers: Modifiers) -> Self {
        Self {
            key_code,
            modifiers,
        }
    }
}

const NAMED_KEYS: &[(u32, &str)] = &[
    (0x91, "Scroll Lock"),
    (0x13, "Pause"),
    (0x2C, "Print Screen"),
    (0x90, "Num Lock"),
    (0x14, "Caps Lock"),
    (0x70, "F1"),
    (0x71, "F2"),
    (0x72, "F3"),
    (0x73, "F4"),
    (0x74, "F5"),
    (0x75, "F6"),
    (0x76, "F7"),
    (0x77, "F8"),
    (0x78, "F9"),
    (0x79, "F10"),
    (0x7A, "F11"),
    (0x7B, "F12"),
    (0x6A, "Numpad *"),
    (0x6B, "Numpad +"),
    (0x6D, "Numpad -"),
    (0x6E, "Numpad ."),
    (0x6F, "Numpad /"),
    (0x60, "Numpad 0"),
    (0x61, "Numpad 1"),
    (0x62, "Numpad 2"),
    (0x63, "Numpad 3"),
    (0x64, "Numpad 4"),
    (0x65, "Numpad 5"),
    (0x66, "Numpad 6"),
    (0x67, "Numpad 7"),
    (0x68, "Numpad 8"),
    (0x69, "Numpad 9"),
    (0xC0, "`"),
    (0xBD, "-"),
    (0xBB, "="),
    (0xDB, "["),
    (0xDD, "]"),
    (0xDC, "\\"),
    (0xBA, ";"),
    (0xDE, "'"),
    (0xBC, ","),
    (0xBE, "."),
    (0xBF, "/"),
];

/// Human-readable name of a virtual key code.
pub fn key_name(key_code: u32) -> String {
    if let Some((_, name)) = NAMED_KEYS.iter().find(|(code, _)| *code == key_code) {
        return (*name).to_string();
    }
    match char::from_u32(key_code) {
        Some(c) if c.is_ascii_uppercase() || c.is_ascii_digit() => c.to_string(),
        _ => format!("Key {:02X}", key_code),
    }
}

fn key_code_for(name: &str) -> Option<u32> {
    if let Some((code, _)) = NAMED_KEYS
        .iter()
        .find(|(_, known)| known.eq_ignore_ascii_case(name))
    {
        return Some(*code);
    }

    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphanumeric() {
            return Some(c.to_ascii_uppercase() as u32);
        }
    }

    let hex = name
        .strip_prefix("Key ")
        .or_else(|| name.strip_prefix("key "))?;
    u32::from_str_radix(hex.trim(), 16).ok()
}

/// Shift, Control, Alt (generic and left/right) and the Windows keys.
pub fn is_modifier_key(key_code: u32) -> bool {
    matches!(key_code, 0x10..=0x12 | 0xA0..=0xA5 | 0x5B | 0x5C)
}

/// The configured key chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotkey {
    pub key_code: u32,
    pub modifiers: Modifiers,
}

impl Default for Hotkey {
    fn default() -> Self {
        Self {
            key_code: VK_SCROLL,
            modifiers: Modifiers::empty(),
        }
    }
}

impl Hotkey {
    pub fn new(key_code: u32, modifiers: Modifiers) -> Self {
        Self {
            key_code,
            modifiers,
        }
    }

    pub fn matches(&self, press: &KeyPress) -> bool {
        !is_modifier_key(press.key_code)
            && press.key_code == self.key_code
            && press.modifiers == self.modifiers
    }

    /// Parses the display form, e.g. `"Ctrl + Alt + V"` or `"Scroll Lock"`.
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split(" + ").map(str::trim).collect();
        let Some((key, modifier_names)) = parts.split_last() else {
            return Err(ClipError::Config("empty hotkey".to_string()));
        };

        let mut modifiers = Modifiers::empty();
        for name in modifier_names {
            modifiers |= match name.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => Modifiers::CONTROL,
                "alt" => Modifiers::ALT,
                "shift" => Modifiers::SHIFT,
                "win" | "windows" => Modifiers::WINDOWS,
                other => {
                    return Err(ClipError::Config(format!("unknown modifier '{}'", other)))
                }
            };
        }

        let key_code = key_code_for(key)
            .ok_or_else(|| ClipError::Config(format!("unknown key '{}'", key)))?;
        if is_modifier_key(key_code) {
            return Err(ClipError::Config(format!(
                "'{}' is a modifier and cannot be the hotkey",
                key
            )));
        }

        Ok(Self::new(key_code, modifiers))
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.modifiers.contains(Modifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.contains(Modifiers::ALT) {
            parts.push("Alt".to_string());
        }
        if self.modifiers.contains(Modifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.modifiers.contains(Modifiers::WINDOWS) {
            parts.push("Win".to_string());
        }
        parts.push(key_name(self.key_code));
        f.write_str(&parts.join(" + "))
    }
}

/// Where raw key presses come from.
pub trait HotkeySource {
    /// The next pending press, without blocking.
    fn try_next(&mut self) -> Option<KeyPress>;
}

impl HotkeySource for Receiver<KeyPress> {
    fn try_next(&mut self) -> Option<KeyPress> {
        self.try_recv().ok()
    }
}

/// A source that never produces presses, for runs without a keyboard hook.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHotkeys;

impl HotkeySource for NoHotkeys {
    fn try_next(&mut self) -> Option<KeyPress> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyEvent {
    Toggle,
}

pub struct HotkeyListener<S: HotkeySource> {
    source: S,
    hotkey: Hotkey,
}

impl<S: HotkeySource> HotkeyListener<S> {
    pub fn new(source: S, hotkey: Hotkey) -> Self {
        Self { source, hotkey }
    }

    pub fn hotkey(&self) -> Hotkey {
        self.hotkey
    }

    pub fn set_hotkey(&mut self, hotkey: Hotkey) {
        self.hotkey = hotkey;
    }

    /// Consumes every pending press, returning one toggle per matching press.
    pub fn drain(&mut self) -> Vec<HotkeyEvent> {
        let mut events = Vec::new();
        while let Some(press) = self.source.try_next() {
            if self.hotkey.matches(&press) {
                debug!("Hotkey {} pressed", self.hotkey);
                events.push(HotkeyEvent::Toggle);
            }
        }
        events
    }
}
