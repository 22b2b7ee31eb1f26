use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::EmptySelection;
use crate::state::{AppState, Dimension};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Data");
    ui.separator();

    if state.context.dataset().is_empty() {
        ui.label("No records loaded.");
        return;
    }
    let bounds = state
        .context
        .dataset()
        .year_bounds
        .unwrap_or(state.selection.years);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            multi_select(ui, state, Dimension::Product);
            multi_select(ui, state, Dimension::Segment);
            ui.separator();

            // ---- Year range ----
            ui.strong("Select Year Range:");
            let mut min = state.selection.years.min;
            let mut max = state.selection.years.max;
            if ui
                .add(egui::Slider::new(&mut min, bounds.min..=bounds.max).text("From"))
                .changed()
            {
                state.set_year_min(min);
            }
            if ui
                .add(egui::Slider::new(&mut max, bounds.min..=bounds.max).text("To"))
                .changed()
            {
                state.set_year_max(max);
            }
        });
}

/// Collapsible checkbox list for one categorical column.
fn multi_select(ui: &mut Ui, state: &mut AppState, dim: Dimension) {
    // Clone what we need so we can mutate state inside the closure.
    let options = state.options(dim).to_vec();
    let picked = state.picked(dim).clone();

    let header_text = format!(
        "Select {}s:  ({}/{})",
        dim.label(),
        picked.len(),
        options.len()
    );

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(dim.label())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(dim);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(dim);
                }
            });

            for value in &options {
                let mut text = RichText::new(value);
                if dim == Dimension::Product {
                    text = text.color(state.product_colors.color_for(value));
                }

                let mut checked = picked.contains(value);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle(dim, value);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} records loaded, {} visible",
            state.dashboard.total_rows, state.dashboard.visible_rows
        ));

        ui.separator();

        let show_all = state.context.policy() == EmptySelection::MatchAll;
        if ui
            .selectable_label(show_all, "Empty selection shows all")
            .on_hover_text("When off, a filter with nothing picked hides every row")
            .clicked()
        {
            state.set_policy(if show_all {
                EmptySelection::Literal
            } else {
                EmptySelection::MatchAll
            });
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open financial data")
        .add_filter("Supported files", &["csv", "tsv", "tab", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv", "tab"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
