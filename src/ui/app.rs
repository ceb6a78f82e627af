//! Main application struct and eframe integration
//!
//! Owns the navigation stack, the session controller, the overlay registry,
//! and the history list. Components report user intent as action values; the
//! app applies the resulting session effects.

use std::path::PathBuf;
use std::sync::Arc;

use egui::{self, CentralPanel, TopBottomPanel, Vec2};
use parking_lot::Mutex;
use tracing::warn;

use crate::audio::{AudioCapture, Playback};
use crate::session::{format_mmss, GuardChoice, SessionController, SessionEffect};
use crate::storage::{FsRecordingStore, RecordingStore, SavedRecording};
use crate::ui::components::{
    confirm_content, HeaderAction, HistoryCard, HistoryCardAction, RecordAction, RecordControls,
    ReviewAction, ReviewControls, ScreenHeader,
};
use crate::ui::dismiss::DismissState;
use crate::ui::overlay::{OverlayHandle, OverlayRegistry};
use crate::ui::theme::Theme;

/// Screens reachable from the navigation stack
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    /// The capture/review screen, optionally bound to a saved recording
    Recording { name: Option<String> },
    /// The saved-recordings list
    History,
}

struct HistoryEntry {
    recording: SavedRecording,
    dismiss: DismissState,
}

/// An open confirmation prompt: the overlay handle keeps it registered, the
/// cell receives the user's choice.
struct ConfirmPrompt {
    _handle: OverlayHandle,
    choice: Arc<Mutex<Option<GuardChoice>>>,
}

/// Main Voxpad application
pub struct VoxpadApp<C: AudioCapture> {
    theme: Theme,
    controller: SessionController<C, FsRecordingStore>,
    overlays: OverlayRegistry,
    confirm: Option<ConfirmPrompt>,
    nav: Vec<Screen>,
    history: Vec<HistoryEntry>,
    player: Option<Box<dyn Playback>>,
    player_loaded_for: Option<PathBuf>,
    last_error: Option<String>,
}

impl<C: AudioCapture> VoxpadApp<C> {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        capture: C,
        store: FsRecordingStore,
        player: Option<Box<dyn Playback>>,
    ) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        Self {
            theme,
            controller: SessionController::new(capture, store),
            overlays: OverlayRegistry::new(),
            confirm: None,
            nav: vec![Screen::Recording { name: None }],
            history: Vec::new(),
            player,
            player_loaded_for: None,
            last_error: None,
        }
    }

    fn current_screen(&self) -> Screen {
        self.nav
            .last()
            .cloned()
            .unwrap_or(Screen::Recording { name: None })
    }

    /// Apply a session effect produced by a controller call
    fn apply_effect(&mut self, effect: SessionEffect, ctx: &egui::Context) {
        match effect {
            SessionEffect::None => {}
            SessionEffect::ConfirmDiscard => self.open_confirm(),
            SessionEffect::Reenter { name } => self.enter_recording(name),
            SessionEffect::NavigateBack => {
                self.unload_player();
                self.nav.pop();
                if self.nav.is_empty() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
    }

    fn open_confirm(&mut self) {
        let choice: Arc<Mutex<Option<GuardChoice>>> = Arc::new(Mutex::new(None));
        let registry = self.overlays.clone();
        let theme = self.theme.clone();
        let cell = Arc::clone(&choice);

        let handle = self.overlays.register_with(move |key| {
            confirm_content(
                "Are you sure you want to discard the recording?".to_string(),
                registry,
                key,
                cell,
                theme,
            )
        });
        handle.show();

        self.confirm = Some(ConfirmPrompt {
            _handle: handle,
            choice,
        });
    }

    /// Deliver an answered confirmation to the controller. Dropping the
    /// prompt clears its overlay.
    fn poll_confirm(&mut self, ctx: &egui::Context) {
        let choice = self
            .confirm
            .as_ref()
            .and_then(|prompt| prompt.choice.lock().take());

        if let Some(choice) = choice {
            self.confirm = None;
            let effect = self.controller.resolve_guard(choice);
            self.apply_effect(effect, ctx);
        }
    }

    /// Replace the top screen with the recording screen, optionally bound to
    /// a saved recording name.
    fn enter_recording(&mut self, name: Option<String>) {
        self.unload_player();

        if let Some(top) = self.nav.last_mut() {
            *top = Screen::Recording { name: name.clone() };
        } else {
            self.nav.push(Screen::Recording { name: name.clone() });
        }

        if let Some(name) = &name {
            if self.controller.persisted_id() != Some(name.as_str()) {
                self.controller.bind_saved(name);
            }
        }
    }

    fn reload_history(&mut self) {
        match self.controller.store().list() {
            Ok(recordings) => {
                self.history = recordings
                    .into_iter()
                    .map(|recording| HistoryEntry {
                        recording,
                        dismiss: DismissState::new(),
                    })
                    .collect();
            }
            Err(e) => {
                warn!("Failed to list recordings: {}", e);
                self.last_error = Some(e.user_message());
            }
        }
    }

    fn unload_player(&mut self) {
        if let Some(player) = self.player.as_mut() {
            player.pause();
        }
        self.player_loaded_for = None;
    }

    fn toggle_playback(&mut self) {
        let Some(path) = self.controller.temp_file().cloned() else {
            return;
        };
        let Some(player) = self.player.as_mut() else {
            self.last_error = Some("Audio playback is unavailable.".to_string());
            return;
        };

        if player.is_playing() {
            player.pause();
            return;
        }

        if self.player_loaded_for.as_ref() != Some(&path) {
            if let Err(e) = player.load(&path) {
                self.last_error = Some(e.user_message());
                return;
            }
            self.player_loaded_for = Some(path);
        }

        if let Err(e) = player.play() {
            self.last_error = Some(e.user_message());
        }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        let screen = self.current_screen();
        let guard_pending = self.controller.guard_pending();

        let action = TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| match &screen {
                Screen::Recording { name } => {
                    // Screens opened from history carry the recording name.
                    let title = name.as_deref().unwrap_or("Record audio");
                    ScreenHeader::new(title, &self.theme)
                        .with_history_button()
                        .back_enabled(!guard_pending)
                        .show(ui)
                }
                Screen::History => ScreenHeader::new("History", &self.theme).show(ui),
            })
            .inner;

        match (self.current_screen(), action) {
            (Screen::Recording { .. }, HeaderAction::Back) => {
                let effect = self.controller.request_go_back();
                self.apply_effect(effect, ctx);
            }
            (Screen::Recording { .. }, HeaderAction::OpenHistory) => {
                self.reload_history();
                self.nav.push(Screen::History);
            }
            (Screen::History, HeaderAction::Back) => {
                self.nav.pop();
            }
            _ => {}
        }
    }

    fn show_recording_screen(&mut self, ctx: &egui::Context) {
        let guard_pending = self.controller.guard_pending();
        let reviewing = self.controller.state().is_reviewing();
        let recording = self.controller.state().is_recording();
        let elapsed = self.controller.elapsed();
        let name = self.controller.persisted_id().map(str::to_string);

        let (playing, playback_elapsed) = match self.player.as_ref() {
            Some(player) => (player.is_playing(), player.elapsed()),
            None => (false, std::time::Duration::ZERO),
        };

        let mut record_action = RecordAction::None;
        let mut review_action = ReviewAction::None;

        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary))
            .show(ctx, |ui| {
                if reviewing {
                    review_action =
                        ReviewControls::new(&self.theme, name.as_deref(), playing, playback_elapsed)
                            .enabled(!guard_pending)
                            .show(ui);
                } else {
                    record_action = RecordControls::new(&self.theme, recording, elapsed)
                        .enabled(!guard_pending)
                        .show(ui);
                }
            });

        match record_action {
            RecordAction::None => {}
            RecordAction::StartCapture => {
                if let Err(e) = self.controller.start_capture() {
                    self.last_error = Some(e.user_message());
                }
            }
            RecordAction::StopCapture => {
                if let Err(e) = self.controller.stop_capture() {
                    self.last_error = Some(e.user_message());
                }
            }
        }

        match review_action {
            ReviewAction::None => {}
            ReviewAction::TogglePlayback => self.toggle_playback(),
            ReviewAction::Save => match self.controller.save() {
                Ok(effect) => self.apply_effect(effect, ctx),
                Err(e) => self.last_error = Some(e.user_message()),
            },
            ReviewAction::Reset => {
                let effect = self.controller.request_reset();
                self.apply_effect(effect, ctx);
            }
        }
    }

    fn show_history_screen(&mut self, ctx: &egui::Context) {
        let mut open: Option<String> = None;
        let mut delete: Option<usize> = None;

        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.add_space(self.theme.spacing_sm);

                        if self.history.is_empty() {
                            ui.vertical_centered(|ui| {
                                ui.add_space(80.0);
                                ui.label(
                                    egui::RichText::new("No recordings yet")
                                        .size(16.0)
                                        .color(self.theme.text_muted),
                                );
                            });
                        }

                        for (index, entry) in self.history.iter_mut().enumerate() {
                            let subtitle = format!(
                                "{} · {}",
                                entry.recording.created_at.format("%Y-%m-%d %H:%M"),
                                format_mmss(std::time::Duration::from_secs_f32(
                                    entry.recording.duration_secs.max(0.0),
                                )),
                            );

                            let action = HistoryCard::new(
                                &entry.recording.name,
                                &subtitle,
                                &mut entry.dismiss,
                                &self.theme,
                            )
                            .show(ui);

                            match action {
                                HistoryCardAction::None => {}
                                HistoryCardAction::Open => {
                                    open = Some(entry.recording.name.clone());
                                }
                                HistoryCardAction::Delete => delete = Some(index),
                            }
                        }
                    });
            });

        if let Some(index) = delete {
            let name = self.history[index].recording.name.clone();
            if let Err(e) = self.controller.store_mut().delete(&name) {
                self.last_error = Some(e.user_message());
            }
            // The committed card settles off-screen; remove it from the list.
            self.history.remove(index);
        }

        if let Some(name) = open {
            self.nav.pop();
            self.enter_recording(Some(name));
        }
    }

    /// Paint every visible overlay above the normal screen content
    fn show_overlays(&mut self, ctx: &egui::Context) {
        for (key, content) in self.overlays.visible() {
            egui::Area::new(egui::Id::new(key))
                .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    egui::Frame::window(&ctx.style())
                        .fill(self.theme.bg_secondary)
                        .show(ui, |ui| (*content)(ui));
                });
        }
    }

    fn show_error_notice(&mut self, ctx: &egui::Context) {
        let Some(message) = self.last_error.clone() else {
            return;
        };

        egui::Window::new("Something went wrong")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, Vec2::new(0.0, -40.0))
            .show(ctx, |ui| {
                ui.label(&message);
                ui.add_space(self.theme.spacing_sm);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        self.last_error = None;
                    }
                });
            });
    }
}

impl<C: AudioCapture + 'static> eframe::App for VoxpadApp<C> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_confirm(ctx);

        self.show_header(ctx);
        match self.current_screen() {
            Screen::Recording { .. } => self.show_recording_screen(ctx),
            Screen::History => self.show_history_screen(ctx),
        }

        self.show_overlays(ctx);
        self.show_error_notice(ctx);

        // Keep the timer ticking while capture runs.
        if self.controller.state().is_recording() {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Scoped cleanup: an active capture is stopped and discarded.
        self.controller.on_leave();
    }
}
