// Pure render functions. Each one:
// 1. Reads WizardState (immutable)
// 2. Renders UI based on state
// 3. Pushes BookingActions for the controller
// 4. Never calls the backend

mod fields;
mod steps;
mod toasts;

pub use fields::FormBuffers;
pub use toasts::Toasts;

use booking::wizard::{BookingAction, WizardState, WizardStep};
use eframe::egui;

pub fn render_step(
    ui: &mut egui::Ui,
    state: &WizardState,
    buffers: &mut FormBuffers,
    actions: &mut Vec<BookingAction>,
) {
    ui.heading(state.step.title());
    ui.add_space(10.0);

    match state.step {
        WizardStep::Identity => steps::identity(ui, buffers, actions),
        WizardStep::WheelCount => steps::wheel_count(ui, state, actions),
        WizardStep::Category => steps::category(ui, state, actions),
        WizardStep::Model => steps::model(ui, state, actions),
        WizardStep::DateRange => steps::date_range(ui, state, buffers, actions),
    }
}

pub fn render_navigation(ui: &mut egui::Ui, state: &WizardState, actions: &mut Vec<BookingAction>) {
    ui.horizontal(|ui| {
        if ui
            .add_enabled(state.can_go_back, egui::Button::new("← Back"))
            .clicked()
        {
            actions.push(BookingAction::Retreat);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if state.step.is_last() {
                if ui
                    .add_enabled(state.can_proceed, egui::Button::new("✔ Submit"))
                    .clicked()
                {
                    actions.push(BookingAction::Submit);
                }
                if state.submitting {
                    ui.spinner();
                    ui.label("Submitting...");
                }
            } else if ui
                .add_enabled(state.can_proceed, egui::Button::new("Next →"))
                .clicked()
            {
                actions.push(BookingAction::Advance);
            }
        });
    });
}
