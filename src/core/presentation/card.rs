//! Text rules for compact cards.

use crate::core::icons;
use crate::core::theme::Rgb;

pub const TEMP_COOL: Rgb = Rgb(0x00FF44);
pub const TEMP_WARM: Rgb = Rgb(0xFFAA00);
pub const TEMP_HOT: Rgb = Rgb(0xFF4444);

const TEMP_WARM_AT: i64 = 40;
const TEMP_HOT_AT: i64 = 50;

pub fn temperature_color(degrees: i64) -> Rgb {
    if degrees >= TEMP_HOT_AT {
        TEMP_HOT
    } else if degrees >= TEMP_WARM_AT {
        TEMP_WARM
    } else {
        TEMP_COOL
    }
}

/// What a card's text label should become.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPlan {
    pub text: String,
    pub color: Option<Rgb>,
}

/// Marks a temperature reading inside a card text.
pub const TEMP_MARKER: &str = "Temp:";

/// Decide the new label text (and color) for a card from `"<glyph> <text>"`.
///
/// Network texts are kept whole. Temperature texts become what follows
/// [`TEMP_MARKER`], colored by the degrees parsed from it. Everything else
/// drops the glyph before the first space.
pub fn plan_update(text: &str) -> CardPlan {
    if text.contains(icons::DOWNLOAD) && text.contains(icons::UPLOAD) {
        return CardPlan {
            text: text.to_string(),
            color: None,
        };
    }

    if let Some((_, reading)) = text.split_once(TEMP_MARKER) {
        let color = parse_degrees(reading).map(temperature_color);
        if color.is_none() {
            log::warn!("Failed to parse temperature from '{}'", text);
        }
        return CardPlan {
            text: reading.to_string(),
            color,
        };
    }

    let body = match text.split_once(' ') {
        Some((_, rest)) => rest,
        None => text,
    };

    CardPlan {
        text: body.to_string(),
        color: None,
    }
}

/// Leading integer of `" 47°C"`, ignoring leading whitespace.
fn parse_degrees(text: &str) -> Option<i64> {
    let after = text.trim_start();
    let end = after
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && *c == '-')))
        .map_or(after.len(), |(i, _)| i);
    after[..end].parse().ok()
}
