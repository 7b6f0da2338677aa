use std::collections::BTreeSet;
use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::ColorMap;
use crate::data::filter::Dimension;
use crate::data::labels::{UiText, Vocabulary};
use crate::data::loader::{load_dataset, Source};
use crate::state::AppState;
use crate::ui::format;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// What the user did inside one filter section.
enum FilterEvent<T> {
    All,
    None,
    Toggle(T),
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    let vocab = state.vocabulary;
    ui.heading(vocab.text(UiText::Filters));
    ui.separator();

    // The table is shared, so iterating it never conflicts with mutating state.
    let table = Arc::clone(&state.table);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let no_colors = ColorMap::default();

            let event = filter_section(
                ui,
                vocab.text(UiText::Year),
                &table.years,
                &state.selection.years,
                vocab,
                &no_colors,
            );
            match event {
                Some(FilterEvent::All) => state.select_all(Dimension::Year),
                Some(FilterEvent::None) => state.select_none(Dimension::Year),
                Some(FilterEvent::Toggle(year)) => state.toggle_year(year),
                None => {}
            }

            let event = filter_section(
                ui,
                vocab.text(UiText::Seniority),
                &table.seniorities,
                &state.selection.seniorities,
                vocab,
                &state.seniority_colors,
            );
            match event {
                Some(FilterEvent::All) => state.select_all(Dimension::Seniority),
                Some(FilterEvent::None) => state.select_none(Dimension::Seniority),
                Some(FilterEvent::Toggle(label)) => state.toggle_seniority(&label),
                None => {}
            }

            let event = filter_section(
                ui,
                vocab.text(UiText::WorkType),
                &table.remote_types,
                &state.selection.remote_types,
                vocab,
                &state.remote_colors,
            );
            match event {
                Some(FilterEvent::All) => state.select_all(Dimension::RemoteType),
                Some(FilterEvent::None) => state.select_none(Dimension::RemoteType),
                Some(FilterEvent::Toggle(label)) => state.toggle_remote_type(&label),
                None => {}
            }
        });
}

/// One collapsible multiselect. Returns the interaction, if any.
fn filter_section<T>(
    ui: &mut Ui,
    title: &str,
    options: &BTreeSet<T>,
    selected: &BTreeSet<T>,
    vocab: Vocabulary,
    colors: &ColorMap,
) -> Option<FilterEvent<T>>
where
    T: Ord + Clone + ToString,
{
    let header_text = format!("{title}  ({}/{})", selected.len(), options.len());
    let mut event = None;

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button(vocab.text(UiText::SelectAll)).clicked() {
                    event = Some(FilterEvent::All);
                }
                if ui.small_button(vocab.text(UiText::SelectNone)).clicked() {
                    event = Some(FilterEvent::None);
                }
            });

            for value in options {
                let label = value.to_string();
                let shown = if label.is_empty() {
                    vocab.text(UiText::Missing)
                } else {
                    label.as_str()
                };
                let mut text = RichText::new(shown);
                let color = colors.color_for(&label);
                if color != Color32::GRAY {
                    text = text.color(color);
                }

                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, text).changed() {
                    event = Some(FilterEvent::Toggle(value.clone()));
                }
            }
        });

    event
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    let vocab = state.vocabulary;
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button(vocab.text(UiText::FileMenu), |ui: &mut Ui| {
            if ui.button(vocab.text(UiText::Open)).clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong(vocab.text(UiText::Title));
        ui.separator();

        ui.label(vocab.records_summary(
            &format::thousands(state.table.len() as u64),
            &format::thousands(state.visible_indices.len() as u64),
        ))
        .on_hover_text(state.source.to_string());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Replace the current table with a local file. On failure the current
/// table stays and the error is shown in the top bar.
pub fn open_file_dialog(state: &mut AppState) {
    let vocab = state.vocabulary;
    let file = rfd::FileDialog::new()
        .set_title(vocab.text(UiText::OpenDialogTitle))
        .add_filter(vocab.text(UiText::SupportedFiles), &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        let source = Source::File(path);
        match load_dataset(&source, vocab) {
            Ok(table) => state.set_table(source, Arc::new(table)),
            Err(e) => {
                log::error!("Failed to load {source}: {e}");
                state.status_message = Some(format!("{}: {e}", vocab.text(UiText::Error)));
            }
        }
    }
}
