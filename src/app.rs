use std::time::Duration;

use eframe::egui;

use crate::cli::Settings;
use crate::data::cache::DatasetCache;
use crate::state::AppState;
use crate::ui::{cards, map, panels};

/// Upper bound between repaints, so an expired cache is noticed without
/// user input.
const IDLE_REPAINT: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct YieldSniperApp {
    pub state: AppState,
}

impl YieldSniperApp {
    pub fn new(settings: Settings) -> Self {
        let cache = DatasetCache::new(settings.source, settings.cache_ttl);
        Self {
            state: AppState::new(cache),
        }
    }
}

impl eframe::App for YieldSniperApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll();
        ctx.request_repaint_after(IDLE_REPAINT);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Nothing to show: error screen only ----
        if let Some(error) = &self.state.load_error {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::no_data(ui, error);
            });
            return;
        }

        // ---- Left side panel: filters + calculator ----
        egui::SidePanel::left("filter_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, map, cards ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading("Yield Sniper");
                    panels::summary_bar(ui, &self.state);
                    ui.separator();

                    ui.strong("Opportunity map");
                    map::listing_map(ui, &self.state);
                    ui.separator();

                    cards::listing_cards(ui, &self.state);
                });
        });
    }
}
