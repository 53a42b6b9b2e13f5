use clap::Parser;
use company_pulse::app::CompanyPulseApp;
use company_pulse::config::Config;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();
    let config = Config::parse();
    log::debug!("{config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Company Pulse – Market Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(CompanyPulseApp::new(&config)))),
    )
}
