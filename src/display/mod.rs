mod app;
mod chart;

use thiserror::Error;

use eframe::egui;

pub use app::SkyTrackApp;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("display error: {0}")]
    Eframe(#[from] eframe::Error),
}

/// Open the sky-track window and block until it is closed.
pub fn run(app: SkyTrackApp) -> Result<(), DisplayError> {
    let title = app.window_title();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 860.0])
            .with_title(title.clone()),
        ..Default::default()
    };

    log::info!("Opening display window");
    eframe::run_native(&title, options, Box::new(|_cc| Ok(Box::new(app))))?;
    Ok(())
}
