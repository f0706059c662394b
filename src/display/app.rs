use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use eframe::egui;

use crate::predict::{GroundStation, Satellite};
use crate::skytrack::{FrameState, PathSample, Ticker};

use super::chart::draw_sky_chart;

pub struct SkyTrackApp {
    satellite: Satellite,
    station: GroundStation,
    path: PathSample,
    ticker: Ticker,
    frame: Option<FrameState>,
}

impl SkyTrackApp {
    pub fn new(
        satellite: Satellite,
        station: GroundStation,
        path: PathSample,
        interval: Duration,
    ) -> Self {
        Self {
            satellite,
            station,
            path,
            ticker: Ticker::new(interval),
            frame: None,
        }
    }

    pub fn window_title(&self) -> String {
        format!("Real-Time {} Sky Track", self.satellite.name)
    }

    pub fn heading(&self) -> String {
        match &self.frame {
            Some(frame) => frame.title.clone(),
            None => self.window_title(),
        }
    }

    /// Recompute the live marker. A failed propagation keeps the last frame.
    fn tick_at(&mut self, now: DateTime<Utc>) {
        match FrameState::at(&self.satellite, &self.station, now) {
            Ok(frame) => {
                println!("{}", frame.status_line());
                log::debug!(
                    "Marker at az {:.2} zenith {:.2}, range {:.0} km",
                    frame.marker.azimuth_deg,
                    frame.marker.zenith_deg,
                    frame.range_km
                );
                self.frame = Some(frame);
            }
            Err(e) => log::error!("Failed to update {}: {}", self.satellite.name, e),
        }
    }
}

impl eframe::App for SkyTrackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.ticker.poll(Instant::now()) {
            self.tick_at(Utc::now());
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(self.heading());
            });
            draw_sky_chart(ui, &self.path, self.frame.as_ref());
        });

        ctx.request_repaint_after(self.ticker.until_next(Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_elements;
    use chrono::TimeZone;

    fn app() -> SkyTrackApp {
        let catalog = concat!(
            "ISS (ZARYA)             \n",
            "1 25544U 98067A   24001.50000000  .00016717  00000-0  30375-3 0  9995\n",
            "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.49815350432986\n",
        );
        let satellite =
            Satellite::from_elements(&find_elements(catalog, "ISS (ZARYA)").unwrap()).unwrap();
        let station = GroundStation::new(40.7128, -74.006, 10.0);
        let path = PathSample::compute(&satellite, &station, satellite.epoch()).unwrap();
        SkyTrackApp::new(satellite, station, path, Duration::from_secs(5))
    }

    #[test]
    fn heading_before_first_tick() {
        let app = app();
        assert_eq!(app.window_title(), "Real-Time ISS (ZARYA) Sky Track");
        assert_eq!(app.heading(), app.window_title());
    }

    #[test]
    fn tick_replaces_frame() {
        let mut app = app();
        let first = Utc.with_ymd_and_hms(2024, 1, 1, 12, 10, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 1, 1, 12, 10, 5).unwrap();

        app.tick_at(first);
        assert_eq!(app.frame.as_ref().unwrap().timestamp, first);
        assert!(app.heading().starts_with("ISS (ZARYA) @ 12:10:00 UTC"));

        app.tick_at(second);
        assert_eq!(app.frame.as_ref().unwrap().timestamp, second);
        assert_eq!(app.path.len(), 90);
    }
}
