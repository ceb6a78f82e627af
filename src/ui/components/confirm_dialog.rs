//! Discard confirmation prompt, presented through the overlay registry
//!
//! The dialog writes the user's choice into a shared cell polled by the app;
//! the close control follows the registry convention of calling `hide(key)`
//! and counts as a cancel.

use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::session::GuardChoice;
use crate::ui::overlay::{OverlayContent, OverlayRegistry};
use crate::ui::theme::Theme;
use egui::{RichText, Vec2};

/// Shared slot the dialog writes the user's answer into
pub type ChoiceCell = Arc<Mutex<Option<GuardChoice>>>;

/// Build the overlay content for a discard confirmation
pub fn confirm_content(
    message: String,
    registry: OverlayRegistry,
    key: Uuid,
    choice: ChoiceCell,
    theme: Theme,
) -> OverlayContent {
    Arc::new(move |ui: &mut egui::Ui| {
        ui.set_min_width(280.0);

        // Standard close control in the top row
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
            if ui
                .add(egui::Button::new(RichText::new("✕").size(16.0)).frame(false))
                .clicked()
            {
                registry.hide(key);
                *choice.lock() = Some(GuardChoice::Cancel);
            }
        });

        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("Warning")
                    .size(16.0)
                    .strong()
                    .color(theme.text_primary),
            );
            ui.add_space(theme.spacing_sm);
            ui.label(RichText::new(&message).color(theme.text_secondary));
            ui.add_space(theme.spacing);

            ui.horizontal(|ui| {
                let discard = egui::Button::new(RichText::new("Discard").color(theme.error))
                    .min_size(Vec2::new(110.0, 36.0))
                    .rounding(theme.button_rounding);
                if ui.add(discard).clicked() {
                    *choice.lock() = Some(GuardChoice::Discard);
                }

                ui.add_space(theme.spacing_sm);

                let cancel = egui::Button::new(RichText::new("Cancel"))
                    .min_size(Vec2::new(110.0, 36.0))
                    .rounding(theme.button_rounding);
                if ui.add(cancel).clicked() {
                    *choice.lock() = Some(GuardChoice::Cancel);
                }
            });
        });
    })
}
