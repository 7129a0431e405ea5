use eframe::egui::{self, Align, Color32, Layout, RichText, Ui};

use crate::analysis::cashflow::{estimate, FinancingInputs};
use crate::analysis::tags::classify;
use crate::color::{cashflow_color, source_color, tag_colors};
use crate::data::model::Listing;
use crate::state::AppState;
use crate::ui::format;
use crate::ui::panels::metric;

const PHOTO_WIDTH: f32 = 260.0;

// ---------------------------------------------------------------------------
// Listing cards (central panel, below the map)
// ---------------------------------------------------------------------------

pub fn listing_cards(ui: &mut Ui, state: &AppState) {
    let Some(snap) = &state.snapshot else {
        return;
    };

    if state.visible_indices.is_empty() {
        ui.label(RichText::new("No listings match the filters.").color(Color32::ORANGE));
        return;
    }

    for &idx in state.visible_indices.iter().take(state.max_cards) {
        let listing = &snap.dataset.listings[idx];
        ui.push_id(idx, |ui: &mut Ui| listing_card(ui, listing, &state.financing));
        ui.add_space(8.0);
    }
}

fn listing_card(ui: &mut Ui, listing: &Listing, financing: &FinancingInputs) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.horizontal_top(|ui: &mut Ui| {
            ui.vertical(|ui: &mut Ui| {
                ui.set_width(PHOTO_WIDTH);
                photos(ui, listing);
            });
            ui.vertical(|ui: &mut Ui| details(ui, listing, financing));
        });
    });
}

/// Primary photo plus a collapsible gallery of the rest.
fn photos(ui: &mut Ui, listing: &Listing) {
    let urls = listing.image_urls();
    let Some((primary, gallery)) = urls.split_first() else {
        ui.label(RichText::new("No preview").weak());
        return;
    };

    ui.add(egui::Image::new(*primary).max_width(PHOTO_WIDTH));
    if !gallery.is_empty() {
        egui::CollapsingHeader::new(format!("Gallery ({})", gallery.len()))
            .id_salt("gallery")
            .show(ui, |ui: &mut Ui| {
                for url in gallery {
                    ui.add(egui::Image::new(*url).max_width(PHOTO_WIDTH));
                }
            });
    }
}

fn details(ui: &mut Ui, listing: &Listing, financing: &FinancingInputs) {
    ui.heading(&listing.title);

    let tags = classify(&listing.description);
    if !tags.is_empty() {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            for tag in tags {
                let (bg, fg) = tag_colors(tag.category());
                ui.label(
                    RichText::new(format!(" {} ", tag.label()))
                        .color(fg)
                        .background_color(bg)
                        .strong(),
                );
            }
        });
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new(&listing.locality).weak());
        ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
            ui.label(
                RichText::new(&listing.source_site)
                    .color(source_color(&listing.source_site))
                    .strong(),
            );
        });
    });

    if listing.is_share {
        ui.colored_label(Color32::from_rgb(0xb8, 0x86, 0x0b), "SHARE SALE");
    }
    if listing.is_auction {
        ui.colored_label(Color32::RED, "AUCTION");
    }
    ui.separator();

    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Price", format::millions(listing.price, 2));
        metric(&mut cols[1], "Area", format!("{} m²", listing.area));
        metric(&mut cols[2], "Gross yield", format!("{} %", listing.yield_percent));
    });

    match estimate(listing.price, listing.yield_percent, financing) {
        Ok(est) => {
            ui.columns(3, |cols: &mut [Ui]| {
                metric(&mut cols[0], "Loan", format::millions(est.loan_principal, 2));
                metric(&mut cols[1], "Estimated rent", format::czk(est.monthly_rent));
                metric(&mut cols[2], "Mortgage payment", format::czk(est.monthly_payment));
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label(RichText::new("Net cashflow:").size(18.0));
                ui.label(
                    RichText::new(format!("{} / month", format::czk(est.net_monthly_cashflow)))
                        .size(18.0)
                        .strong()
                        .color(cashflow_color(est.indicator())),
                );
            });
        }
        Err(e) => {
            ui.colored_label(Color32::RED, format!("Calculator: {e}"));
        }
    }

    ui.add_space(4.0);
    ui.hyperlink_to("Open listing", &listing.url);
}
