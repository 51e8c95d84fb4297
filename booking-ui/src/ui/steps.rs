use booking::wizard::{BookingAction, DraftField, Lookup, LookupStatus, WheelCount, WizardState};
use eframe::egui;

use super::fields::{parse_date, FormBuffers};

pub fn identity(ui: &mut egui::Ui, buffers: &mut FormBuffers, actions: &mut Vec<BookingAction>) {
    egui::Grid::new("identity_grid")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            ui.label("First name");
            if ui
                .text_edit_singleline(&mut buffers.first_name)
                .changed()
            {
                actions.push(BookingAction::SetField(DraftField::FirstName(
                    buffers.first_name.clone(),
                )));
            }
            ui.end_row();

            ui.label("Last name");
            if ui.text_edit_singleline(&mut buffers.last_name).changed() {
                actions.push(BookingAction::SetField(DraftField::LastName(
                    buffers.last_name.clone(),
                )));
            }
            ui.end_row();
        });
}

pub fn wheel_count(ui: &mut egui::Ui, state: &WizardState, actions: &mut Vec<BookingAction>) {
    ui.label("Number of wheels");
    for wheels in WheelCount::ALL {
        if ui
            .radio(state.draft.wheel_count == Some(wheels), wheels.label())
            .clicked()
        {
            actions.push(BookingAction::SetField(DraftField::WheelCount(Some(wheels))));
        }
    }
}

pub fn category(ui: &mut egui::Ui, state: &WizardState, actions: &mut Vec<BookingAction>) {
    ui.label("Type of vehicle");
    if lookup_placeholder(ui, &state.categories, "vehicle types") {
        return;
    }
    for category in state.categories.items() {
        if ui
            .radio(state.draft.category_id == Some(category.id), category.name.as_str())
            .clicked()
        {
            actions.push(BookingAction::SetField(DraftField::Category(Some(category.id))));
        }
    }
}

pub fn model(ui: &mut egui::Ui, state: &WizardState, actions: &mut Vec<BookingAction>) {
    ui.label("Specific model");
    if lookup_placeholder(ui, &state.models, "models") {
        return;
    }
    for vehicle in state.models.items() {
        if ui
            .radio(state.draft.vehicle_id == Some(vehicle.id), vehicle.model_name.as_str())
            .clicked()
        {
            actions.push(BookingAction::SetField(DraftField::Vehicle(Some(vehicle.id))));
        }
    }
}

pub fn date_range(
    ui: &mut egui::Ui,
    state: &WizardState,
    buffers: &mut FormBuffers,
    actions: &mut Vec<BookingAction>,
) {
    egui::Grid::new("date_grid")
        .num_columns(3)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            ui.label("Start date");
            if date_edit(ui, &mut buffers.start_date) {
                actions.push(BookingAction::SetField(DraftField::StartDate(parse_date(
                    &buffers.start_date,
                ))));
            }
            invalid_date_hint(ui, &buffers.start_date);
            ui.end_row();

            ui.label("End date");
            if date_edit(ui, &mut buffers.end_date) {
                actions.push(BookingAction::SetField(DraftField::EndDate(parse_date(
                    &buffers.end_date,
                ))));
            }
            invalid_date_hint(ui, &buffers.end_date);
            ui.end_row();
        });

    ui.add_space(12.0);
    ui.group(|ui| {
        ui.label(egui::RichText::new("Summary").strong());
        ui.label(format!(
            "Name: {} {}",
            state.draft.first_name.trim(),
            state.draft.last_name.trim()
        ));
        if let Some(wheels) = state.draft.wheel_count {
            ui.label(format!("Wheels: {}", wheels.label()));
        }
        if let Some(category) = state.selected_category() {
            ui.label(format!("Type: {}", category.name));
        }
        if let Some(vehicle) = state.selected_vehicle() {
            ui.label(format!("Model: {}", vehicle.model_name));
        }
    });
}

fn date_edit(ui: &mut egui::Ui, buffer: &mut String) -> bool {
    ui.add(
        egui::TextEdit::singleline(buffer)
            .hint_text("YYYY-MM-DD")
            .desired_width(120.0),
    )
    .changed()
}

fn invalid_date_hint(ui: &mut egui::Ui, buffer: &str) {
    if !buffer.trim().is_empty() && parse_date(buffer).is_none() {
        ui.colored_label(egui::Color32::YELLOW, "expected YYYY-MM-DD");
    } else {
        ui.label("");
    }
}

/// Renders the loading, failed and empty states of a lookup. Returns true
/// when there is nothing to choose from.
fn lookup_placeholder<K: Copy + PartialEq, T>(ui: &mut egui::Ui, lookup: &Lookup<K, T>, what: &str) -> bool {
    match lookup.status() {
        LookupStatus::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(format!("Loading {what}..."));
            });
            true
        }
        LookupStatus::Failed(reason) => {
            ui.colored_label(
                egui::Color32::LIGHT_RED,
                format!("❌ Could not load {what}: {reason}"),
            );
            true
        }
        LookupStatus::Idle | LookupStatus::Ready if lookup.is_empty() => {
            ui.label(format!("No {what} available. Go back and change your choice."));
            true
        }
        LookupStatus::Idle | LookupStatus::Ready => false,
    }
}
