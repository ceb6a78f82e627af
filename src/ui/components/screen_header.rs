//! Screen header with back navigation and an optional history shortcut

use crate::ui::theme::Theme;
use egui::{self, RichText, Vec2};

/// What the user did in the header this frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderAction {
    None,
    Back,
    OpenHistory,
}

pub struct ScreenHeader<'a> {
    title: &'a str,
    theme: &'a Theme,
    show_history_button: bool,
    back_enabled: bool,
}

impl<'a> ScreenHeader<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            theme,
            show_history_button: false,
            back_enabled: true,
        }
    }

    pub fn with_history_button(mut self) -> Self {
        self.show_history_button = true;
        self
    }

    /// Disable back while a confirmation guard is pending
    pub fn back_enabled(mut self, enabled: bool) -> Self {
        self.back_enabled = enabled;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> HeaderAction {
        let mut action = HeaderAction::None;

        ui.horizontal(|ui| {
            let back = egui::Button::new(
                RichText::new("←").size(18.0).color(self.theme.text_primary),
            )
            .min_size(Vec2::splat(36.0))
            .rounding(self.theme.button_rounding);

            if ui.add_enabled(self.back_enabled, back).clicked() {
                action = HeaderAction::Back;
            }

            ui.label(
                RichText::new(self.title)
                    .size(18.0)
                    .strong()
                    .color(self.theme.text_primary),
            );

            if self.show_history_button {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let history = egui::Button::new(
                        RichText::new("🕙").size(18.0).color(self.theme.text_primary),
                    )
                    .min_size(Vec2::splat(36.0))
                    .rounding(self.theme.button_rounding);

                    if ui.add(history).on_hover_text("Recording history").clicked() {
                        action = HeaderAction::OpenHistory;
                    }
                });
            }
        });

        action
    }
}
