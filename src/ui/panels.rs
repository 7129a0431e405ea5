use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::{
    CARD_COUNT_RANGE, MAX_PRICE_RANGE_M, MIN_YIELD_RANGE, NO_DATA_HINT, SLIDER_STEP,
};
use crate::data::cache::DatasetSource;
use crate::data::filter::AuctionFilter;
use crate::data::loader::SUPPORTED_EXTENSIONS;
use crate::error::LoadError;
use crate::state::AppState;
use crate::ui::format;

// ---------------------------------------------------------------------------
// Left side panel – filters and calculator
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(snapshot) = state.snapshot.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.add(egui::Slider::new(&mut state.max_cards, CARD_COUNT_RANGE).text("Listings"));
            ui.separator();

            // ---- City multiselect ----
            let localities = &snapshot.dataset.localities;
            let header_text = if state.filters.cities.is_empty() {
                format!("Cities  (all {})", localities.len())
            } else {
                format!("Cities  ({}/{})", state.filters.cities.len(), localities.len())
            };
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("cities")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    if ui.small_button("Any city").clicked() {
                        state.filters.cities.clear();
                        changed = true;
                    }
                    for city in localities {
                        let mut checked = state.filters.cities.contains(city);
                        if ui.checkbox(&mut checked, city).changed() {
                            state.toggle_city(city);
                        }
                    }
                });
            ui.separator();

            // ---- Sale type ----
            ui.strong("Sale type");
            for mode in AuctionFilter::ALL {
                changed |= ui
                    .radio_value(&mut state.filters.auction, mode, mode.label())
                    .changed();
            }
            ui.separator();

            // ---- Yield / price ----
            changed |= ui
                .add(
                    egui::Slider::new(&mut state.filters.min_yield, MIN_YIELD_RANGE)
                        .step_by(SLIDER_STEP)
                        .suffix(" %")
                        .text("Min. yield"),
                )
                .changed();

            let mut max_price_m = state.filters.max_price / 1_000_000.0;
            if ui
                .add(
                    egui::Slider::new(&mut max_price_m, MAX_PRICE_RANGE_M)
                        .step_by(SLIDER_STEP)
                        .suffix(" M")
                        .text("Max. price"),
                )
                .changed()
            {
                state.filters.max_price = max_price_m * 1_000_000.0;
                changed = true;
            }

            ui.horizontal(|ui: &mut Ui| {
                changed |= ui
                    .checkbox(&mut state.filters.hide_shares, "Hide shares")
                    .changed();
                changed |= ui
                    .checkbox(&mut state.filters.require_photo, "Photos only")
                    .changed();
            });

            ui.add_space(8.0);
            ui.heading("Calculator");
            ui.separator();
            calculator(ui, state);

            ui.separator();
            ui.label(RichText::new(format!("Data from: {}", snapshot.data_stamp)).small().weak());
        });

    if changed {
        state.refilter();
    }
}

/// Financing inputs. They only affect the cards, so no refilter is needed.
fn calculator(ui: &mut Ui, state: &mut AppState) {
    let financing = &mut state.financing;
    egui::Grid::new("calculator")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            ui.label("Own equity");
            ui.add(
                egui::DragValue::new(&mut financing.own_equity)
                    .speed(100_000.0)
                    .range(0.0..=f64::MAX)
                    .suffix(" Kč"),
            );
            ui.end_row();

            ui.label("Interest");
            ui.add(
                egui::DragValue::new(&mut financing.annual_interest_rate_percent)
                    .speed(0.1)
                    .range(0.0..=30.0)
                    .fixed_decimals(2)
                    .suffix(" %"),
            );
            ui.end_row();

            ui.label("Term");
            ui.add(
                egui::DragValue::new(&mut financing.term_years)
                    .range(0..=50)
                    .suffix(" years"),
            );
            ui.end_row();

            ui.label("Reserve fund");
            ui.add(
                egui::DragValue::new(&mut financing.monthly_reserve_fund)
                    .speed(500.0)
                    .range(0.0..=f64::MAX)
                    .suffix(" Kč"),
            );
            ui.end_row();
        });
}

// ---------------------------------------------------------------------------
// Summary metrics above the map
// ---------------------------------------------------------------------------

pub fn summary_bar(ui: &mut Ui, state: &AppState) {
    let summary = state.summary;
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Found", summary.count.to_string());
        if let (Some(mean_yield), Some(mean_price)) = (summary.mean_yield, summary.mean_price) {
            metric(&mut cols[1], "Mean yield", format::percent(mean_yield));
            metric(&mut cols[2], "Mean price", format::millions(mean_price, 1));
        }
    });
}

/// Small caption above a large value.
pub fn metric(ui: &mut Ui, caption: &str, value: String) {
    ui.label(RichText::new(caption).small().weak());
    ui.label(RichText::new(value).strong().size(20.0));
}

// ---------------------------------------------------------------------------
// Terminal error screen
// ---------------------------------------------------------------------------

pub fn no_data(ui: &mut Ui, error: &LoadError) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(ui.available_height() * 0.3);
        let headline = match error {
            LoadError::NoData { .. } => NO_DATA_HINT.to_string(),
            LoadError::Read { .. } => "The export could not be read.".to_string(),
        };
        ui.heading(RichText::new(headline).color(Color32::RED));
        ui.label(error.to_string());
        ui.add_space(8.0);
        ui.label("Use File → Open… to pick an export manually.");
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(snap) = &state.snapshot {
            ui.label(format!(
                "{} listings loaded, {} visible",
                snap.dataset.len(),
                state.visible_indices.len()
            ));
            ui.separator();
            ui.label(RichText::new(format!("Data from: {}", snap.data_stamp)).weak())
                .on_hover_text(snap.path.display().to_string());
            if snap.dataset.skipped_rows > 0 {
                ui.label(
                    RichText::new(format!("{} rows skipped", snap.dataset.skipped_rows))
                        .color(Color32::ORANGE),
                );
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open listing export")
        .add_filter("Supported files", &SUPPORTED_EXTENSIONS)
        .add_filter("Spreadsheets", &["xlsx", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open_file(DatasetSource::File(path));
    }
}
