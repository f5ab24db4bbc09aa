mod app;

use app::RangeSeekDemoApp;
use eframe::egui;
use range_seek::{logging, Settings};

fn main() -> eframe::Result<()> {
    let settings = Settings::load();
    logging::init_tracing(settings.debug_logging);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 520.0])
            .with_min_inner_size([360.0, 400.0])
            .with_icon(load_icon()),
        ..Default::default()
    };

    eframe::run_native(
        "Range Seek",
        native_options,
        Box::new(|cc| Ok(Box::new(RangeSeekDemoApp::new(cc, settings)?))),
    )
}

fn load_icon() -> egui::IconData {
    let size = 64;
    let thumb = range_seek::ui::thumbs::thumb_pixels(size, true);

    egui::IconData {
        rgba: thumb,
        width: size as u32,
        height: size as u32,
    }
}
