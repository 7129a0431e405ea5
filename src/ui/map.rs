use eframe::egui::{RichText, Ui};
use egui_plot::{Plot, Points};

use crate::color::yield_color;
use crate::config::MAP_POINT_LIMIT;
use crate::data::model::Listing;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Opportunity map (lon/lat scatter)
// ---------------------------------------------------------------------------

/// Marker radius in points; higher yield draws a bigger dot.
pub fn point_radius(yield_percent: f64) -> f32 {
    (2.0 + yield_percent as f32 * 0.6).clamp(2.0, 12.0)
}

/// The first visible listings that carry GPS coordinates.
pub fn located<'a>(listings: &'a [Listing], visible: &[usize]) -> Vec<&'a Listing> {
    visible
        .iter()
        .map(|&idx| &listings[idx])
        .filter(|l| l.has_location())
        .take(MAP_POINT_LIMIT)
        .collect()
}

/// Render the map of filtered listings.
pub fn listing_map(ui: &mut Ui, state: &AppState) {
    let Some(snap) = &state.snapshot else {
        return;
    };

    let points = located(&snap.dataset.listings, &state.visible_indices);
    if points.is_empty() {
        ui.label(RichText::new("No GPS data for the map.").italics());
        return;
    }

    let max_yield = points.iter().map(|l| l.yield_percent).fold(0.0, f64::max);

    Plot::new("listing_map")
        .height(360.0)
        .data_aspect(1.5)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for listing in &points {
                let marker = Points::new(vec![[listing.longitude, listing.latitude]])
                    .name(format!("{} ({} %)", listing.title, listing.yield_percent))
                    .radius(point_radius(listing.yield_percent))
                    .color(yield_color(listing.yield_percent, max_yield))
                    .filled(true);
                plot_ui.points(marker);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::listing;

    #[test]
    fn listings_without_gps_are_left_off_the_map() {
        let mut nowhere = listing("nowhere", 1.0, 5.0);
        nowhere.latitude = 0.0;
        nowhere.longitude = 0.0;
        let listings = vec![listing("a", 1.0, 5.0), nowhere, listing("b", 1.0, 4.0)];

        let on_map = located(&listings, &[2, 1, 0]);
        let titles: Vec<&str> = on_map.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "a"]);
    }

    #[test]
    fn map_is_capped() {
        let listings: Vec<Listing> = (0..MAP_POINT_LIMIT + 20)
            .map(|i| listing(&i.to_string(), 1.0, 5.0))
            .collect();
        let visible: Vec<usize> = (0..listings.len()).collect();
        assert_eq!(located(&listings, &visible).len(), MAP_POINT_LIMIT);
    }

    #[test]
    fn radius_grows_with_yield() {
        assert!(point_radius(8.0) > point_radius(3.0));
        assert_eq!(point_radius(100.0), 12.0);
        assert_eq!(point_radius(0.0), 2.0);
    }
}
