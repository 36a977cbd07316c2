//! Glyphs shown on the compact cards.
//!
//! The first space in a card string separates the glyph from its text, so
//! none of these may contain a space.

pub const TEMPERATURE: &str = "⚠";
pub const LOAD: &str = "⚡";
pub const POWER: &str = "⏻";
pub const DRIVE: &str = "▤";
pub const SAVE: &str = "▣";
pub const DOWNLOAD: &str = "↓";
pub const UPLOAD: &str = "↑";
