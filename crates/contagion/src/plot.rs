//! Plot windows for runs and animated sweeps.
//!
//! Both windows block until closed by the user.

use std::time::{Duration, Instant};

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::{Frame, Outcome, Sweep};

/// Time between animation frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(55);

const X_LABEL: &str = "Days Since First Infection";

/// Opens a window with the infected, recovered and susceptible curves.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn show(outcome: &Outcome, title: &str) -> Result<(), eframe::Error> {
    let times = outcome.times();
    let curve = |values: Vec<f64>| -> Vec<[f64; 2]> {
        times.iter().zip(values).map(|(&t, v)| [t, v]).collect()
    };
    let traces = vec![
        ("Infected".to_owned(), curve(outcome.infected())),
        ("Recovered".to_owned(), curve(outcome.recovered())),
        ("Susceptible".to_owned(), curve(outcome.susceptible())),
    ];
    let heading = format!("R0 = {:.2}", outcome.parameters().basic_reproduction_number());

    eframe::run_native(
        title,
        eframe::NativeOptions::default(),
        Box::new(move |_cc| Ok(Box::new(CurvesApp { heading, traces }))),
    )
}

/// Opens a window that plays the sweep's frames in a loop.
///
/// Each frame is integrated when it is due to be shown. A frame that fails is
/// logged and skipped.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn animate(sweep: Sweep, title: &str) -> Result<(), eframe::Error> {
    let times = sweep.base().grid().points().to_vec();
    let population = sweep.base().parameters().population();
    let app = SweepApp {
        sweep,
        times,
        population,
        next: 0,
        frame: None,
        shown_at: None,
    };

    eframe::run_native(
        title,
        eframe::NativeOptions::default(),
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}

/// Renders a fixed set of named curves.
struct CurvesApp {
    heading: String,
    traces: Vec<(String, Vec<[f64; 2]>)>,
}

impl eframe::App for CurvesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(&self.heading);
            Plot::new("contagion_curves")
                .legend(Legend::default())
                .x_axis_label(X_LABEL)
                .y_axis_label("People")
                .show(ui, |plot_ui| {
                    for (name, points) in &self.traces {
                        let points: PlotPoints = points.iter().copied().collect();
                        plot_ui.line(Line::new(points).name(name));
                    }
                });
        });
    }
}

/// Steps through a sweep, recomputing one frame per tick.
struct SweepApp {
    sweep: Sweep,
    times: Vec<f64>,
    population: f64,
    next: usize,
    frame: Option<Frame>,
    shown_at: Option<Instant>,
}

impl SweepApp {
    fn advance(&mut self) {
        let Some(&value) = self.sweep.values().get(self.next) else {
            return;
        };
        self.next = (self.next + 1) % self.sweep.len();

        match self.sweep.frame(value) {
            Ok(frame) => self.frame = Some(frame),
            Err(err) => log::error!("skipping {} = {value}: {err}", self.sweep.knob().label()),
        }
    }
}

impl eframe::App for SweepApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.shown_at.is_none_or(|at| at.elapsed() >= FRAME_INTERVAL) {
            self.advance();
            self.shown_at = Some(Instant::now());
        }
        ctx.request_repaint_after(FRAME_INTERVAL);

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(frame) = &self.frame else {
                ui.label("No frame to show.");
                return;
            };

            ui.heading(format!("R0 = {:.2}", frame.r0));
            let name = format!("{}: {:.2}", self.sweep.knob().label(), frame.value);
            let points: PlotPoints = self
                .times
                .iter()
                .zip(&frame.infected)
                .map(|(&t, &i)| [t, i])
                .collect();

            Plot::new("contagion_sweep")
                .legend(Legend::default())
                .x_axis_label(X_LABEL)
                .y_axis_label("Current Number Infected")
                .include_x(self.times.first().copied().unwrap_or_default())
                .include_x(self.times.last().copied().unwrap_or_default())
                .include_y(0.0)
                .include_y(self.population)
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new(points).name(name));
                });
        });
    }
}
