//! Review controls: playback, save, and re-record for a captured artifact

use std::time::Duration;

use crate::session::format_mmss;
use crate::ui::theme::Theme;
use egui::{self, RichText, Vec2};

/// What the user did with the review controls this frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewAction {
    None,
    TogglePlayback,
    Save,
    Reset,
}

pub struct ReviewControls<'a> {
    theme: &'a Theme,
    /// Durable name when the artifact has been saved
    name: Option<&'a str>,
    playing: bool,
    playback_elapsed: Duration,
    enabled: bool,
}

impl<'a> ReviewControls<'a> {
    pub fn new(
        theme: &'a Theme,
        name: Option<&'a str>,
        playing: bool,
        playback_elapsed: Duration,
    ) -> Self {
        Self {
            theme,
            name,
            playing,
            playback_elapsed,
            enabled: true,
        }
    }

    /// Disable interaction while a confirmation guard is pending
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> ReviewAction {
        let mut action = ReviewAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(self.theme.spacing_lg);

            if let Some(name) = self.name {
                ui.label(
                    RichText::new(name)
                        .size(14.0)
                        .color(self.theme.text_secondary),
                );
                ui.add_space(self.theme.spacing_sm);
            }

            ui.label(
                RichText::new(format_mmss(self.playback_elapsed))
                    .size(32.0)
                    .family(egui::FontFamily::Monospace)
                    .color(self.theme.text_secondary),
            );

            ui.add_space(self.theme.spacing);

            let play_icon = if self.playing { "⏸" } else { "▶" };
            let play = egui::Button::new(RichText::new(play_icon).size(24.0))
                .min_size(Vec2::splat(56.0))
                .rounding(egui::Rounding::same(28.0))
                .fill(self.theme.primary.gamma_multiply(0.2));

            if ui.add_enabled(self.enabled, play).clicked() {
                action = ReviewAction::TogglePlayback;
            }

            if self.playing {
                ui.ctx().request_repaint();
            }

            ui.add_space(self.theme.spacing_lg);

            ui.horizontal(|ui| {
                ui.with_layout(
                    egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                    |ui| {
                        ui.horizontal(|ui| {
                            let reset_label = if self.name.is_some() {
                                "New recording"
                            } else {
                                "Discard"
                            };
                            let reset = egui::Button::new(
                                RichText::new(reset_label).color(self.theme.error),
                            )
                            .min_size(Vec2::new(120.0, 40.0))
                            .rounding(self.theme.button_rounding);

                            if ui.add_enabled(self.enabled, reset).clicked() {
                                action = ReviewAction::Reset;
                            }

                            // An already-named artifact has nothing left to save.
                            if self.name.is_none() {
                                ui.add_space(self.theme.spacing);

                                let save = egui::Button::new(
                                    RichText::new("Save draft").color(self.theme.success),
                                )
                                .min_size(Vec2::new(120.0, 40.0))
                                .rounding(self.theme.button_rounding);

                                if ui.add_enabled(self.enabled, save).clicked() {
                                    action = ReviewAction::Save;
                                }
                            }
                        });
                    },
                );
            });
        });

        action
    }
}
