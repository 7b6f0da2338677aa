use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;
const MAX_TABLE_HEIGHT: f32 = 420.0;

/// Virtualised table of the records passing the current filters.
pub fn filtered_table(ui: &mut Ui, state: &AppState) {
    let headers = state.vocabulary.field_names();
    let table = &state.table;
    let rows = &state.visible_indices;

    ui.push_id("filtered_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(true)
            .max_scroll_height(MAX_TABLE_HEIGHT)
            .columns(Column::auto().at_least(48.0), headers.len())
            .header(ROW_HEIGHT + 4.0, |mut header| {
                for name in headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let record = &table.records[rows[row.index()]];
                    for cell in record.cells() {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}
