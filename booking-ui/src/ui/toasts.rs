use std::time::{Duration, Instant};

use booking::{Notification, Severity};
use eframe::egui;

const TOAST_LIFETIME: Duration = Duration::from_secs(6);
const MAX_TOASTS: usize = 4;

/// Stack of transient notifications in the bottom-right corner.
#[derive(Debug, Default)]
pub struct Toasts {
    entries: Vec<(Notification, Instant)>,
}

impl Toasts {
    pub fn push(&mut self, notification: Notification) {
        tracing::debug!("Toast: {}", notification);
        self.entries.push((notification, Instant::now()));
        if self.entries.len() > MAX_TOASTS {
            self.entries.remove(0);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.entries.retain(|(_, shown)| shown.elapsed() < TOAST_LIFETIME);
        if self.entries.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -56.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for (index, (notification, _)) in self.entries.iter().enumerate() {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.set_max_width(320.0);
                        ui.horizontal(|ui| {
                            ui.colored_label(
                                severity_color(notification.severity),
                                egui::RichText::new(&notification.title).strong(),
                            );
                            if ui.small_button("✕").clicked() {
                                dismissed = Some(index);
                            }
                        });
                        ui.label(notification.text.as_str());
                    });
                    ui.add_space(4.0);
                }
            });

        if let Some(index) = dismissed {
            self.entries.remove(index);
        }
    }
}

fn severity_color(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::Success => egui::Color32::LIGHT_GREEN,
        Severity::Warning => egui::Color32::YELLOW,
        Severity::Error => egui::Color32::LIGHT_RED,
    }
}
