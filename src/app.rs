use eframe::egui::{self, Color32};

use crate::dashboard::DashboardContext;
use crate::state::AppState;
use crate::ui::{panels, plot};

/// Page background, `#f0f0f0`.
const BACKGROUND: Color32 = Color32::from_rgb(0xf0, 0xf0, 0xf0);

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FinDashApp {
    pub state: AppState,
}

impl FinDashApp {
    pub fn new(cc: &eframe::CreationContext<'_>, context: DashboardContext) -> Self {
        apply_theme(&cc.egui_ctx);
        Self {
            state: AppState::new(context),
        }
    }
}

fn apply_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = BACKGROUND;
    ctx.set_visuals(visuals);
}

impl eframe::App for FinDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::dashboard(ui, &self.state);
        });
    }
}
