mod app;
mod controller;
mod surface;
mod types;
mod voltage;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([820.0, 620.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Three-Phase Voltage Simulator",
        options,
        Box::new(|cc| Ok(Box::new(app::SimulatorApp::new(cc)))),
    )
}
