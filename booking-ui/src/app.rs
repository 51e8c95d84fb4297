use std::time::Duration;

use booking::wizard::{BookingAction, BookingController, WizardStep};
use booking::Notification;
use eframe::egui;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::ui::{self, FormBuffers, Toasts};

const BUSY_REPAINT: Duration = Duration::from_millis(100);

/// Vehicle booking wizard window
pub struct BookingApp {
    controller: BookingController,
    notifications: UnboundedReceiver<Notification>,
    toasts: Toasts,
    buffers: FormBuffers,
}

impl BookingApp {
    pub fn new(
        controller: BookingController,
        notifications: UnboundedReceiver<Notification>,
    ) -> Self {
        tracing::info!("🚗 Starting vehicle booking wizard");
        Self {
            controller,
            notifications,
            toasts: Toasts::default(),
            buffers: FormBuffers::default(),
        }
    }
}

impl eframe::App for BookingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply queued actions and finished lookups before rendering
        self.controller.update();
        while let Ok(notification) = self.notifications.try_recv() {
            self.toasts.push(notification);
        }

        let state = self.controller.state();
        self.buffers.sync(&state.draft);

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("progress").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("🚗 Vehicle Booking");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(!state.submitting, egui::Button::new("↺ Start over"))
                        .clicked()
                    {
                        actions.push(BookingAction::Reset);
                    }
                });
            });
            ui.label(format!(
                "Step {} of {}: {}",
                state.step.index() + 1,
                WizardStep::ALL.len(),
                state.step.title()
            ));
            ui.add(
                egui::ProgressBar::new(f32::from(state.progress_percentage) / 100.0)
                    .show_percentage(),
            );
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("navigation").show(ctx, |ui| {
            ui.add_space(6.0);
            ui::render_navigation(ui, state, &mut actions);
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui::render_step(ui, state, &mut self.buffers, &mut actions);

                for error in &state.validation_errors {
                    ui.add_space(8.0);
                    ui.colored_label(egui::Color32::LIGHT_RED, format!("⚠ {error}"));
                }
            });
        });

        self.toasts.show(ctx);

        let busy = !actions.is_empty();
        for action in actions {
            self.controller.dispatch(action);
        }

        if busy || self.controller.has_pending_work() || !self.toasts.is_empty() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }
    }
}
