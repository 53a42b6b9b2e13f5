use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use super::format::{format_count, format_rating};
use crate::data::normalize::MAX_RATING;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Rating threshold ----
    ui.strong("Filter by Rating");
    let mut min_rating = state.filters.min_rating;
    let slider = egui::Slider::new(&mut min_rating, 0.0..=MAX_RATING)
        .step_by(0.1)
        .fixed_decimals(1);
    if ui.add(slider).changed() {
        state.set_min_rating(min_rating);
    }
    if state.filters.is_active() && ui.small_button("Reset filters").clicked() {
        state.reset_filters();
    }
    ui.separator();

    // ---- Company multi-select ----
    let n_selected = state.filters.selected_names.len();
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(format!("Select Companies ({n_selected})"));
        if n_selected > 0 && ui.small_button("Clear").clicked() {
            state.clear_names();
        }
    });
    ui.add(egui::TextEdit::singleline(&mut state.name_query).hint_text("Search or Select..."));

    // Collect toggles first; `matching_names` borrows the state.
    let mut toggled: Vec<String> = Vec::new();
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for name in state.matching_names() {
                let mut checked = state.filters.selected_names.contains(name);
                if ui.checkbox(&mut checked, name).changed() {
                    toggled.push(name.to_string());
                }
            }
        });

    for name in toggled {
        state.toggle_name(&name);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar. Returns a file the user picked, if any.
pub fn top_bar(ui: &mut Ui, state: &AppState) -> Option<PathBuf> {
    let mut picked = None;
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                picked = pick_file();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "Showing {} of {} companies",
                state.visible_indices.len(),
                ds.len()
            ));
            if ds.duplicates_dropped > 0 {
                ui.label(
                    RichText::new(format!("({} duplicate names dropped)", ds.duplicates_dropped))
                        .small()
                        .color(Color32::GRAY),
                );
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
    picked
}

// ---------------------------------------------------------------------------
// KPI tiles
// ---------------------------------------------------------------------------

pub fn kpi_tiles(ui: &mut Ui, state: &AppState) {
    let s = &state.summary;
    ui.columns(3, |cols: &mut [Ui]| {
        kpi_tile(
            &mut cols[0],
            "AVERAGE RATING",
            &format_rating(s.mean_rating),
            "Across selected companies",
            Color32::GRAY,
        );
        kpi_tile(
            &mut cols[1],
            "TOTAL JOB OPENINGS",
            &format_count(s.total_jobs),
            "Active opportunities",
            Color32::from_rgb(0x34, 0xD3, 0x99),
        );
        kpi_tile(
            &mut cols[2],
            "TOTAL REVIEWS",
            &format_count(s.total_reviews),
            "Employee feedback",
            Color32::GRAY,
        );
    });
}

fn kpi_tile(ui: &mut Ui, title: &str, value: &str, sub: &str, sub_color: Color32) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(title).small().color(Color32::GRAY));
        ui.label(RichText::new(value).size(28.0).strong());
        ui.label(RichText::new(sub).small().color(sub_color));
    });
}

// ---------------------------------------------------------------------------
// Blocking "no data" screen
// ---------------------------------------------------------------------------

pub fn data_missing(ui: &mut Ui, message: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(
            RichText::new(format!("⚠ {message}"))
                .heading()
                .color(Color32::from_rgb(0xF8, 0x71, 0x71)),
        );
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn pick_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open company data")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file()
}
