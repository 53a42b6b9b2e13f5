use std::path::PathBuf;

use eframe::egui;

use crate::config::Config;
use crate::data::loader::{DatasetLoader, SourcePaths};
use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CompanyPulseApp {
    pub state: AppState,
    loader: DatasetLoader,
}

impl CompanyPulseApp {
    pub fn new(config: &Config) -> Self {
        let mut app = Self {
            state: AppState::from_config(config),
            loader: DatasetLoader::new(config.sources()),
        };
        app.load();
        app
    }

    /// Pull the dataset from the loader (cached after the first success).
    fn load(&mut self) {
        if self.loader.is_loaded() {
            log::debug!("Using cached dataset");
        }
        match self.loader.load() {
            Ok(dataset) => {
                let hint = self.loader.sources().describe();
                self.state.set_dataset(dataset, &hint);
            }
            Err(e) => {
                log::error!("Failed to load company data: {e:#}");
                self.state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// A file picked from the menu starts a new session with its own cache.
    fn open(&mut self, path: PathBuf) {
        log::info!("Opening {}", path.display());
        self.loader = DatasetLoader::new(SourcePaths::single(path));
        self.load();
    }
}

impl eframe::App for CompanyPulseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        let picked = egui::TopBottomPanel::top("top_bar")
            .show(ctx, |ui| panels::top_bar(ui, &self.state))
            .inner;
        if let Some(path) = picked {
            self.open(path);
        }

        // ---- No source file: block the rest of the dashboard ----
        if let Some(msg) = self.state.data_missing.clone() {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::data_missing(ui, &msg);
            });
            return;
        }

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, charts, grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a company file to begin  (File → Open…)");
                });
                return;
            }
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading("Company Market Intelligence");
                    ui.add_space(8.0);
                    panels::kpi_tiles(ui, &self.state);
                    ui.add_space(8.0);
                    charts::chart_grid(ui, &self.state);
                    ui.add_space(12.0);
                    table::company_table(ui, &mut self.state);
                });
        });
    }
}
