//! Colors and themes for the panel.

use serde::{Deserialize, Serialize};

/// LVGL-style 30% opacity step used to darken arc backgrounds.
const DARKEN_LEVEL: u32 = 76;

/// 24-bit RGB color stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xFFFFFF);
    pub const GRAY: Rgb = Rgb(0x808080);

    pub fn from_hex(value: u32) -> Self {
        Rgb(value & 0xFFFFFF)
    }

    pub fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    pub fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Mix toward black by ~30%.
    pub fn darken(self) -> Self {
        let scale = |c: u8| -> u32 { (c as u32 * (255 - DARKEN_LEVEL)) / 255 };
        Rgb((scale(self.r()) << 16) | (scale(self.g()) << 8) | scale(self.b()))
    }

    /// `#RRGGBB`, as the dashboard color pickers expect.
    pub fn to_hex_string(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r(), self.g(), self.b())
    }
}

/// Full color set used when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg_color: Rgb,
    pub text_color: Rgb,
    /// Primary accent (CPU arc)
    pub cpu_color: Rgb,
    /// Secondary accent (RAM arc)
    pub ram_color: Rgb,
    pub border_color: Rgb,
    pub card_bg_color: Rgb,
}

impl ThemeColors {
    pub const DARK: ThemeColors = ThemeColors {
        bg_color: Rgb(0x121212),
        text_color: Rgb(0xFFFFFF),
        cpu_color: Rgb(0x07FFF7),
        ram_color: Rgb(0xAE17FF),
        border_color: Rgb(0x333333),
        card_bg_color: Rgb(0x1E1E1E),
    };

    pub const LIGHT: ThemeColors = ThemeColors {
        bg_color: Rgb(0xF0F0F0),
        text_color: Rgb(0x000000),
        cpu_color: Rgb(0x07FFF7),
        ram_color: Rgb(0xAE17FF),
        border_color: Rgb(0xC8C8C8),
        card_bg_color: Rgb(0xFFFFFF),
    };

    pub fn defaults(dark_mode: bool) -> Self {
        if dark_mode {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }

    pub fn get(&self, slot: ThemeSlot) -> Rgb {
        match slot {
            ThemeSlot::Background => self.bg_color,
            ThemeSlot::Text => self.text_color,
            ThemeSlot::Cpu => self.cpu_color,
            ThemeSlot::Ram => self.ram_color,
            ThemeSlot::Border => self.border_color,
            ThemeSlot::CardBackground => self.card_bg_color,
        }
    }
}

/// Named theme slots accepted by the settings API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSlot {
    Background,
    Text,
    Cpu,
    Ram,
    Border,
    CardBackground,
}

impl ThemeSlot {
    pub const ALL: [ThemeSlot; 6] = [
        ThemeSlot::Background,
        ThemeSlot::Text,
        ThemeSlot::Cpu,
        ThemeSlot::Ram,
        ThemeSlot::Border,
        ThemeSlot::CardBackground,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ThemeSlot::Background => "bg_color",
            ThemeSlot::Text => "text_color",
            ThemeSlot::Cpu => "cpu_color",
            ThemeSlot::Ram => "ram_color",
            ThemeSlot::Border => "border_color",
            ThemeSlot::CardBackground => "card_bg_color",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.key() == key)
    }
}

/// Per-mode color overrides persisted in settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<Rgb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Rgb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_color: Option<Rgb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram_color: Option<Rgb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Rgb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_bg_color: Option<Rgb>,
}

impl ThemeOverrides {
    pub fn set(&mut self, slot: ThemeSlot, color: Rgb) {
        let target = match slot {
            ThemeSlot::Background => &mut self.bg_color,
            ThemeSlot::Text => &mut self.text_color,
            ThemeSlot::Cpu => &mut self.cpu_color,
            ThemeSlot::Ram => &mut self.ram_color,
            ThemeSlot::Border => &mut self.border_color,
            ThemeSlot::CardBackground => &mut self.card_bg_color,
        };
        *target = Some(color);
    }

    pub fn is_empty(&self) -> bool {
        *self == ThemeOverrides::default()
    }

    /// Layer the overrides on top of a base theme.
    pub fn apply(&self, base: ThemeColors) -> ThemeColors {
        ThemeColors {
            bg_color: self.bg_color.unwrap_or(base.bg_color),
            text_color: self.text_color.unwrap_or(base.text_color),
            cpu_color: self.cpu_color.unwrap_or(base.cpu_color),
            ram_color: self.ram_color.unwrap_or(base.ram_color),
            border_color: self.border_color.unwrap_or(base.border_color),
            card_bg_color: self.card_bg_color.unwrap_or(base.card_bg_color),
        }
    }
}
