//! Capture controls: the record/stop button and the elapsed timer

use std::time::Duration;

use crate::session::format_mmss;
use crate::ui::theme::Theme;
use egui::{self, RichText, Vec2};

/// What the user did with the capture controls this frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordAction {
    None,
    StartCapture,
    StopCapture,
}

pub struct RecordControls<'a> {
    theme: &'a Theme,
    recording: bool,
    elapsed: Duration,
    enabled: bool,
}

impl<'a> RecordControls<'a> {
    pub fn new(theme: &'a Theme, recording: bool, elapsed: Duration) -> Self {
        Self {
            theme,
            recording,
            elapsed,
            enabled: true,
        }
    }

    /// Disable interaction while a confirmation guard is pending
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> RecordAction {
        let mut action = RecordAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(self.theme.spacing_lg);

            // Elapsed timer, truncated MM:SS
            ui.label(
                RichText::new(format_mmss(self.elapsed))
                    .size(40.0)
                    .family(egui::FontFamily::Monospace)
                    .color(if self.recording {
                        self.theme.recording
                    } else {
                        self.theme.text_secondary
                    }),
            );

            ui.add_space(self.theme.spacing);

            let (icon, color) = if self.recording {
                ("⏹", self.theme.recording)
            } else {
                ("🎤", self.theme.primary)
            };

            let button = egui::Button::new(RichText::new(icon).size(28.0))
                .min_size(Vec2::splat(72.0))
                .rounding(egui::Rounding::same(36.0))
                .fill(color.gamma_multiply(0.2));

            let response = ui.add_enabled(self.enabled, button);
            if response.clicked() {
                action = if self.recording {
                    RecordAction::StopCapture
                } else {
                    RecordAction::StartCapture
                };
            }

            // Pulsing ring while recording
            if self.recording {
                let t = ui.ctx().input(|i| i.time);
                let pulse = ((t * 3.0).sin() * 0.5 + 0.5) as f32;
                let rect = response.rect;

                ui.painter().circle_stroke(
                    rect.center(),
                    rect.width() / 2.0 + 3.0 + pulse * 4.0,
                    egui::Stroke::new(
                        2.0 * pulse,
                        self.theme.recording.gamma_multiply(1.0 - pulse * 0.5),
                    ),
                );

                ui.ctx().request_repaint();
            }

            ui.add_space(self.theme.spacing_sm);
            ui.label(
                RichText::new(if self.recording {
                    "Tap to stop"
                } else {
                    "Tap to record"
                })
                .size(12.0)
                .color(self.theme.text_muted),
            );
        });

        action
    }
}
