use std::f64::consts::TAU;

use eframe::egui::{self, Color32};
use egui_plot::{Corner, Legend, Line, LineStyle, Plot, PlotBounds, PlotPoint, PlotPoints, Points, Text};

use crate::skytrack::{segments, FrameState, PathSample, PolarPoint, HORIZON_ZENITH_DEG};

const RING_STEP_DEG: f64 = 30.0;
const SPOKE_STEP_DEG: f64 = 45.0;
const RING_LABEL_AZIMUTH_DEG: f64 = 135.0;
const MARGIN: f64 = 105.0;

fn grid_color() -> Color32 {
    Color32::from_gray(110)
}

fn hidden_color() -> Color32 {
    Color32::from_rgba_unmultiplied(160, 160, 160, 90)
}

/// Polar sky chart: zenith at the centre, horizon at the rim, north up and
/// azimuth increasing clockwise.
pub fn draw_sky_chart(ui: &mut egui::Ui, path: &PathSample, frame: Option<&FrameState>) {
    Plot::new("sky_chart")
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default().position(Corner::RightTop))
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([-MARGIN, -MARGIN], [MARGIN, MARGIN]));

            for line in polar_grid() {
                plot_ui.line(Line::new("", PlotPoints::new(line)).color(grid_color()).width(0.5));
            }
            for (pos, label) in grid_labels() {
                plot_ui.text(Text::new("", PlotPoint::new(pos[0], pos[1]), label).color(grid_color()));
            }

            let (visible, hidden) = path.partition();
            for segment in segments(&visible) {
                plot_ui.line(
                    Line::new("Visible path", PlotPoints::new(to_xy(&segment)))
                        .color(Color32::RED)
                        .width(2.0),
                );
            }
            for segment in segments(&hidden) {
                plot_ui.line(
                    Line::new("Below horizon", PlotPoints::new(to_xy(&segment)))
                        .color(hidden_color())
                        .width(1.0)
                        .style(LineStyle::dashed_loose()),
                );
            }

            if let Some(frame) = frame {
                plot_ui.points(
                    Points::new("", PlotPoints::new(vec![frame.marker.to_xy()]))
                        .color(Color32::RED)
                        .radius(6.0)
                        .filled(true),
                );
            }
        });
}

fn to_xy(points: &[PolarPoint]) -> Vec<[f64; 2]> {
    points.iter().map(PolarPoint::to_xy).collect()
}

/// Range rings every 30° of zenith distance plus azimuth spokes.
fn polar_grid() -> Vec<Vec<[f64; 2]>> {
    let mut lines = Vec::new();

    let mut radius = RING_STEP_DEG;
    while radius <= HORIZON_ZENITH_DEG {
        lines.push(
            (0..=120)
                .map(|i| {
                    let theta = TAU * i as f64 / 120.0;
                    [radius * theta.sin(), radius * theta.cos()]
                })
                .collect(),
        );
        radius += RING_STEP_DEG;
    }

    let mut azimuth = 0.0;
    while azimuth < 360.0 {
        let rim = PolarPoint {
            azimuth_deg: azimuth,
            zenith_deg: HORIZON_ZENITH_DEG,
        };
        lines.push(vec![[0.0, 0.0], rim.to_xy()]);
        azimuth += SPOKE_STEP_DEG;
    }

    lines
}

fn grid_labels() -> Vec<([f64; 2], String)> {
    let mut labels: Vec<([f64; 2], String)> = [("N", 0.0), ("E", 90.0), ("S", 180.0), ("W", 270.0)]
        .into_iter()
        .map(|(name, azimuth_deg)| {
            let pos = PolarPoint {
                azimuth_deg,
                zenith_deg: HORIZON_ZENITH_DEG + 7.0,
            };
            (pos.to_xy(), name.to_string())
        })
        .collect();

    let mut radius = RING_STEP_DEG;
    while radius <= HORIZON_ZENITH_DEG {
        let pos = PolarPoint {
            azimuth_deg: RING_LABEL_AZIMUTH_DEG,
            zenith_deg: radius,
        };
        labels.push((pos.to_xy(), format!("{:.0}°", radius)));
        radius += RING_STEP_DEG;
    }

    labels
}
