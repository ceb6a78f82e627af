//! History list card with swipe-to-delete
//!
//! Wraps one saved recording in the dismiss gesture: drag left past half the
//! list width to delete, release earlier to snap back. A card built without
//! delete support never recognizes drags.

use crate::ui::dismiss::{DismissState, DragEvent};
use crate::ui::theme::Theme;
use egui::{self, Rect, RichText, Sense, Vec2};

/// What the user did with this card this frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryCardAction {
    None,
    /// Open the recording for review
    Open,
    /// The dismiss gesture committed; the caller should delete the entry
    Delete,
}

pub struct HistoryCard<'a> {
    title: &'a str,
    subtitle: &'a str,
    state: &'a mut DismissState,
    theme: &'a Theme,
    deletable: bool,
}

impl<'a> HistoryCard<'a> {
    pub fn new(
        title: &'a str,
        subtitle: &'a str,
        state: &'a mut DismissState,
        theme: &'a Theme,
    ) -> Self {
        Self {
            title,
            subtitle,
            state,
            theme,
            deletable: true,
        }
    }

    /// Informational presentation: no drag recognized, no delete
    pub fn not_deletable(mut self) -> Self {
        self.deletable = false;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> HistoryCardAction {
        let mut action = HistoryCardAction::None;

        let viewport_width = ui.available_width();
        let card_height = 64.0;
        let (row_rect, _) = ui.allocate_exact_size(
            Vec2::new(viewport_width, card_height),
            Sense::hover(),
        );

        // Trash affordance revealed behind the card as it slides left
        if self.deletable && self.state.offset() < -8.0 {
            ui.painter().text(
                egui::pos2(row_rect.right() - 40.0, row_rect.center().y),
                egui::Align2::CENTER_CENTER,
                "🗑",
                egui::FontId::proportional(20.0),
                self.theme.error,
            );
        }

        let card_rect = row_rect.translate(Vec2::new(self.state.offset(), 0.0));
        let id = ui.id().with(self.title);

        let sense = if self.deletable && !self.state.is_committed() {
            Sense::click_and_drag()
        } else {
            Sense::click()
        };
        let response = ui.interact(card_rect, id, sense);

        if self.deletable && !self.state.is_committed() {
            if response.dragged() {
                let translation = self.state.offset() + response.drag_delta().x;
                let (next, _) = self.state.apply(DragEvent::Move(translation), viewport_width);
                *self.state = next;
            }
            if response.drag_stopped() {
                let (next, fired) = self.state.apply(DragEvent::Release, viewport_width);
                *self.state = next;
                if fired {
                    action = HistoryCardAction::Delete;
                }
            }
        }

        // Advance the settle animation
        if self.state.is_settling() {
            let dt = ui.input(|i| i.stable_dt).min(0.1);
            self.state.tick(dt);
            ui.ctx().request_repaint();
        }

        self.paint_card(ui, card_rect);

        if response.clicked() && !self.state.is_committed() {
            action = HistoryCardAction::Open;
        }

        action
    }

    fn paint_card(&self, ui: &mut egui::Ui, rect: Rect) {
        let painter = ui.painter();
        painter.rect_filled(
            rect.shrink2(Vec2::new(0.0, 4.0)),
            self.theme.card_rounding,
            self.theme.bg_secondary,
        );

        let text_left = rect.left() + self.theme.spacing;
        painter.text(
            egui::pos2(text_left, rect.center().y - 10.0),
            egui::Align2::LEFT_CENTER,
            self.title,
            egui::FontId::proportional(14.0),
            self.theme.text_primary,
        );
        painter.text(
            egui::pos2(text_left, rect.center().y + 10.0),
            egui::Align2::LEFT_CENTER,
            self.subtitle,
            egui::FontId::proportional(12.0),
            self.theme.text_muted,
        );
    }
}
