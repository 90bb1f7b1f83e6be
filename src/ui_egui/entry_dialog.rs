//! Create / edit dialog for a single timeline entry.

use chrono::NaiveDate;
use egui::{Color32, RichText};
use egui_extras::DatePickerButton;

use crate::models::entry::{generate_entry_id, EntryId, EntryValidationError, TimelineEntry};
use crate::models::section::{SectionType, SECTION_ORDER};
use crate::services::entry::default_end_date;

const FORM_LABEL_WIDTH: f32 = 110.0;

/// Form state; lives only while the dialog is open.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDialogState {
    /// `Some` when editing an existing entry
    pub entry_id: Option<EntryId>,
    pub section: SectionType,
    pub start_date: NaiveDate,
    pub has_end_date: bool,
    pub end_date: NaiveDate,
    pub title: String,
    pub description: String,
    pub error_message: Option<String>,
}

impl EntryDialogState {
    /// Blank point entry starting today (toolbar "Add Entry").
    pub fn new_entry(today: NaiveDate) -> Self {
        Self {
            entry_id: None,
            section: SectionType::default(),
            start_date: today,
            has_end_date: false,
            end_date: today,
            title: String::new(),
            description: String::new(),
            error_message: None,
        }
    }

    /// New entry prefilled from a double-clicked grid cell.
    pub fn new_at(date: NaiveDate, section: SectionType) -> Self {
        Self {
            section,
            has_end_date: true,
            end_date: default_end_date(date),
            ..Self::new_entry(date)
        }
    }

    pub fn edit(entry: &TimelineEntry) -> Self {
        Self {
            entry_id: Some(entry.id.clone()),
            section: entry.section_type,
            start_date: entry.start_date,
            has_end_date: entry.end_date.is_some(),
            end_date: entry.end_date.unwrap_or(entry.start_date),
            title: entry.title.clone(),
            description: entry.description.clone().unwrap_or_default(),
            error_message: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.entry_id.is_some()
    }

    /// Validated entry from the form. New entries get a fresh id.
    pub fn build(&self) -> Result<TimelineEntry, EntryValidationError> {
        let description = self.description.trim();
        let entry = TimelineEntry {
            id: self.entry_id.clone().unwrap_or_else(generate_entry_id),
            section_type: self.section,
            start_date: self.start_date,
            end_date: self.has_end_date.then_some(self.end_date),
            title: self.title.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
        };
        entry.validate()?;
        Ok(entry)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryDialogOutcome {
    /// Still open, nothing to do
    Open,
    Saved(TimelineEntry),
    Deleted(EntryId),
    Cancelled,
}

pub fn render_entry_dialog(ctx: &egui::Context, state: &mut EntryDialogState) -> EntryDialogOutcome {
    let mut outcome = EntryDialogOutcome::Open;
    let mut open = true;

    egui::Window::new(if state.is_editing() { "Edit Entry" } else { "New Entry" })
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if let Some(error) = &state.error_message {
                ui.colored_label(Color32::RED, RichText::new(error).strong());
                ui.add_space(6.0);
            }

            labeled_row(ui, "Category:", |ui| {
                ui.add_enabled_ui(!state.is_editing(), |ui| {
                    egui::ComboBox::from_id_source("entry_section")
                        .selected_text(state.section.label())
                        .show_ui(ui, |ui| {
                            for section in SECTION_ORDER {
                                ui.selectable_value(&mut state.section, section, section.label());
                            }
                        });
                });
            });

            labeled_row(ui, "Start date:", |ui| {
                ui.add(DatePickerButton::new(&mut state.start_date).id_source("entry_start_date"));
            });

            labeled_row(ui, "End date:", |ui| {
                ui.checkbox(&mut state.has_end_date, "");
                ui.add_enabled_ui(state.has_end_date, |ui| {
                    ui.add(DatePickerButton::new(&mut state.end_date).id_source("entry_end_date"));
                });
            });

            let title_label = if state.title.trim().is_empty() {
                RichText::new("Title:").strong().color(Color32::from_rgb(255, 150, 150))
            } else {
                RichText::new("Title:").strong()
            };
            labeled_row(ui, title_label, |ui| {
                if ui.text_edit_singleline(&mut state.title).changed() {
                    state.error_message = None;
                }
            });

            labeled_row(ui, "Description:", |ui| {
                let width = ui.available_width();
                ui.add_sized(
                    [width, 80.0],
                    egui::TextEdit::multiline(&mut state.description),
                );
            });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if let Some(id) = &state.entry_id {
                    let delete = egui::Button::new(RichText::new("Delete").color(Color32::WHITE))
                        .fill(Color32::from_rgb(200, 60, 60));
                    if ui.add(delete).clicked() {
                        outcome = EntryDialogOutcome::Deleted(id.clone());
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let save = egui::Button::new("Save").fill(Color32::from_rgb(70, 120, 200));
                    if ui.add(save).clicked() {
                        match state.build() {
                            Ok(entry) => outcome = EntryDialogOutcome::Saved(entry),
                            Err(err) => state.error_message = Some(err.to_string()),
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        outcome = EntryDialogOutcome::Cancelled;
                    }
                });
            });
        });

    if !open {
        outcome = EntryDialogOutcome::Cancelled;
    }
    outcome
}

fn labeled_row(
    ui: &mut egui::Ui,
    label: impl Into<egui::WidgetText>,
    add_contents: impl FnOnce(&mut egui::Ui),
) {
    ui.horizontal(|ui| {
        ui.add_sized([FORM_LABEL_WIDTH, 20.0], egui::Label::new(label));
        add_contents(ui);
    });
}
