use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::analysis::cashflow::CashflowIndicator;
use crate::analysis::tags::TagCategory;

// ---------------------------------------------------------------------------
// Tag chips
// ---------------------------------------------------------------------------

/// `(background, text)` colours of a tag chip.
pub fn tag_colors(category: TagCategory) -> (Color32, Color32) {
    match category {
        TagCategory::Positive => (Color32::from_rgb(0xe6, 0xf9, 0xe6), Color32::from_rgb(0x00, 0x66, 0x00)),
        TagCategory::Info => (Color32::from_rgb(0xe6, 0xf2, 0xff), Color32::from_rgb(0x00, 0x40, 0x85)),
        TagCategory::Accent => (Color32::from_rgb(0xff, 0xe6, 0xe6), Color32::from_rgb(0x85, 0x00, 0x00)),
        TagCategory::Warning => (Color32::from_rgb(0xff, 0xf1, 0xe0), Color32::from_rgb(0x8a, 0x4b, 0x00)),
        TagCategory::Neutral => (Color32::from_rgb(0xf0, 0xf2, 0xf6), Color32::from_rgb(0x33, 0x33, 0x33)),
    }
}

// ---------------------------------------------------------------------------
// Listing card accents
// ---------------------------------------------------------------------------

/// Label colour of the marketplace a listing was scraped from.
pub fn source_color(source: &str) -> Color32 {
    match source {
        "Sreality" => Color32::from_rgb(0xd6, 0x27, 0x28),
        "Bezrealitky" => Color32::from_rgb(0x2c, 0xa0, 0x2c),
        _ => Color32::from_rgb(0x1f, 0x77, 0xb4),
    }
}

pub fn cashflow_color(indicator: CashflowIndicator) -> Color32 {
    match indicator {
        CashflowIndicator::Positive => Color32::from_rgb(0x2c, 0xa0, 0x2c),
        CashflowIndicator::Negative => Color32::from_rgb(0xd6, 0x27, 0x28),
    }
}

// ---------------------------------------------------------------------------
// Map points
// ---------------------------------------------------------------------------

/// Red (low) → green (high) gradient over `[0, max_yield]`.
pub fn yield_color(yield_percent: f64, max_yield: f64) -> Color32 {
    let t = if max_yield > 0.0 {
        (yield_percent / max_yield).clamp(0.0, 1.0) as f32
    } else {
        0.0
    };
    let hsl = Hsl::new(t * 120.0, 0.75, 0.45);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_ends() {
        let low = yield_color(0.0, 10.0);
        let high = yield_color(10.0, 10.0);
        assert!(low.r() > low.g());
        assert!(high.g() > high.r());
        assert_eq!(yield_color(25.0, 10.0), high);
        assert_eq!(yield_color(3.0, 0.0), low);
    }

    #[test]
    fn unknown_source_is_blue() {
        assert_eq!(source_color("iDnes"), source_color("Remax"));
        assert_ne!(source_color("Sreality"), source_color("Bezrealitky"));
    }
}
