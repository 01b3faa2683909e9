use crate::control::command::MAX_VOLUME;
use crate::control::PlaybackCommand;
use crate::player::{PlaybackFacade, PlayerEvent, PlayerState, VideoPlayer};
use crate::time::format_time;
use egui::{Button, Slider, Ui};

/// Room left for the buttons, labels and volume slider beside the seek bar
const SEEK_BAR_RESERVE: f32 = 420.0;
const VOLUME_SLIDER_WIDTH: f32 = 100.0;

/// Position and duration text, refreshed from player events
#[derive(Debug, Clone, PartialEq)]
pub struct TimeLabels {
    position: String,
    duration: String,
}

impl Default for TimeLabels {
    fn default() -> Self {
        Self {
            position: format_time(0),
            duration: format_time(0),
        }
    }
}

impl TimeLabels {
    pub fn apply(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::PositionChanged(ms) => self.position = format_time(ms),
            PlayerEvent::DurationChanged(ms) => self.duration = format_time(ms),
            PlayerEvent::StateChanged(_) => {}
        }
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }
}

/// What the user asked for through the control bar this frame
#[derive(Debug, Default)]
pub struct ControlsOutput {
    pub open_requested: bool,
    pub commands: Vec<PlaybackCommand>,
}

pub struct PlayerControls;

impl PlayerControls {
    /// Draw the control bar. Seek and volume sliders act on the player
    /// directly, buttons come back as commands.
    pub fn show(ui: &mut Ui, player: Option<&mut VideoPlayer>, labels: &TimeLabels) -> ControlsOutput {
        let mut output = ControlsOutput::default();

        ui.horizontal(|ui| {
            if ui.button("Open Video").clicked() {
                output.open_requested = true;
            }

            let play_pause_text = match player.as_ref().map(|p| p.state()) {
                Some(PlayerState::Playing) => "⏸",
                _ => "▶",
            };
            if ui
                .add_enabled(player.is_some(), Button::new(play_pause_text))
                .clicked()
            {
                output.commands.push(PlaybackCommand::TogglePlayPause);
            }

            if ui.button("⏹").clicked() {
                output.commands.push(PlaybackCommand::Stop);
            }

            if ui.button("⛶").on_hover_text("Fullscreen (F)").clicked() {
                output.commands.push(PlaybackCommand::FullscreenToggle);
            }

            ui.separator();

            match player {
                Some(player) => {
                    seek_bar(ui, player);
                    ui.label(labels.position());
                    ui.label(labels.duration());
                    ui.separator();
                    volume_slider(ui, player);
                }
                None => {
                    let mut idle = 0u64;
                    let width = seek_bar_width(ui);
                    ui.spacing_mut().slider_width = width;
                    ui.add_enabled(false, Slider::new(&mut idle, 0..=0).show_value(false));
                    ui.label(labels.position());
                    ui.label(labels.duration());
                    ui.separator();
                    let mut volume = 0u8;
                    ui.spacing_mut().slider_width = VOLUME_SLIDER_WIDTH;
                    ui.add_enabled(
                        false,
                        Slider::new(&mut volume, 0..=MAX_VOLUME).show_value(false),
                    );
                }
            }
        });

        output
    }
}

fn seek_bar_width(ui: &Ui) -> f32 {
    (ui.available_width() - SEEK_BAR_RESERVE).max(100.0)
}

fn seek_bar(ui: &mut Ui, player: &mut VideoPlayer) {
    let duration = player.duration();
    let player_position = player.position();

    // The dragged value lives in memory until the drag ends
    let slider_id = ui.id().with("seek_slider");
    let mut position = ui.memory(|mem| {
        mem.data
            .get_temp::<u64>(slider_id)
            .unwrap_or(player_position)
    });

    let width = seek_bar_width(ui);
    ui.spacing_mut().slider_width = width;
    let response = ui.add(
        Slider::new(&mut position, 0..=duration)
            .show_value(false)
            .trailing_fill(true),
    );

    if response.dragged() {
        ui.memory_mut(|mem| mem.data.insert_temp(slider_id, position));
    } else if !player.is_seeking() {
        ui.memory_mut(|mem| mem.data.insert_temp(slider_id, player_position));
    }

    if response.drag_stopped() || response.clicked() {
        player.set_position(position);
    }
}

fn volume_slider(ui: &mut Ui, player: &mut VideoPlayer) {
    ui.label(if player.is_muted() { "🔇" } else { "🔊" });
    let mut volume = player.volume();
    ui.spacing_mut().slider_width = VOLUME_SLIDER_WIDTH;
    if ui
        .add(Slider::new(&mut volume, 0..=MAX_VOLUME).show_value(false))
        .changed()
    {
        player.set_volume(volume);
    }
}
