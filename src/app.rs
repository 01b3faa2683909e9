use egui::{CentralPanel, Color32, TopBottomPanel};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;
use crate::control::{Dispatcher, PlaybackCommand};
use crate::player::{PlaybackFacade, PlayerEvent, VideoPlayer};
use crate::ui::{video_view, InputSubscription, PlayerControls, TimeLabels, ViewportWindow};

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "webm", "flv", "wmv"];

/// The player window
pub struct FlyPlayerApp {
    player: Option<VideoPlayer>,
    error_message: Option<String>,
    labels: TimeLabels,
    input: InputSubscription,
    dispatcher: Dispatcher,
    initial_volume: u8,
}

impl FlyPlayerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &Config) -> Self {
        let mut app = Self {
            player: None,
            error_message: None,
            labels: TimeLabels::default(),
            input: InputSubscription::default(),
            dispatcher: config.dispatcher(),
            initial_volume: config.initial_volume,
        };

        if let Some(path) = &config.file {
            app.load_video(path, &cc.egui_ctx);
        }

        app
    }

    fn open_file(&mut self, ctx: &egui::Context) {
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Open Video")
            .add_filter("Video", VIDEO_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        {
            self.load_video(&path, ctx);
        }
    }

    /// Replace the current media with `path` and start playing it.
    /// On failure the previous media stays loaded.
    fn load_video(&mut self, path: &Path, ctx: &egui::Context) {
        self.error_message = None;

        let (volume, muted) = self
            .player
            .as_ref()
            .map_or((self.initial_volume, false), |p| (p.volume(), p.is_muted()));

        match VideoPlayer::open(path, ctx.clone()) {
            Ok(mut player) => {
                player.set_volume(volume);
                player.set_muted(muted);
                player.play();
                self.labels = TimeLabels::default();
                self.player = Some(player);
            }
            Err(e) => {
                warn!(path = %path.display(), "Failed to open video: {}", e);
                self.error_message = Some(format!("Failed to open video: {}", e));
            }
        }
    }

    fn dispatch(&mut self, ctx: &egui::Context, commands: Vec<PlaybackCommand>) {
        let mut window = ViewportWindow::new(ctx);
        for command in commands {
            self.dispatcher
                .dispatch(command, self.player.as_mut(), &mut window);
        }
    }

    fn drain_player_events(&mut self) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        for event in player.take_events() {
            if let PlayerEvent::StateChanged(state) = event {
                info!(?state, "Playback state");
            }
            self.labels.apply(event);
        }
    }

    fn show_empty(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() / 3.0);

                if let Some(ref err) = self.error_message {
                    ui.colored_label(Color32::RED, err);
                    ui.add_space(20.0);
                }

                ui.heading("No video loaded");
                ui.add_space(10.0);

                if ui.button("Open Video File...").clicked() {
                    self.open_file(ctx);
                }

                ui.add_space(10.0);
                ui.label("Or drag and drop a video file");
            });
        });
    }
}

impl eframe::App for FlyPlayerApp {
    fn raw_input_hook(&mut self, _ctx: &egui::Context, raw_input: &mut egui::RawInput) {
        self.input.intercept(raw_input);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut open_requested = false;

        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open...").clicked() {
                        ui.close_menu();
                        open_requested = true;
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                if self.player.is_some() {
                    if let Some(ref err) = self.error_message {
                        ui.separator();
                        ui.colored_label(Color32::RED, err);
                    }
                }
            });
        });

        let mut commands = self.input.take_commands();

        let controls = TopBottomPanel::bottom("controls")
            .show(ctx, |ui| PlayerControls::show(ui, self.player.as_mut(), &self.labels))
            .inner;
        open_requested |= controls.open_requested;
        commands.extend(controls.commands);

        self.dispatch(ctx, commands);

        if open_requested {
            self.open_file(ctx);
        }

        let mut video_double_clicked = false;
        CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| match self.player.as_mut() {
                Some(player) => {
                    player.update(ctx);
                    video_double_clicked = video_view::show(ui, player).double_clicked();
                }
                None => self.show_empty(ui, ctx),
            });

        if video_double_clicked {
            self.dispatch(ctx, vec![PlaybackCommand::FullscreenToggle]);
        }

        self.drain_player_events();

        let dropped: Option<PathBuf> =
            ctx.input(|i| i.raw.dropped_files.first().and_then(|f| f.path.clone()));
        if let Some(path) = dropped {
            self.load_video(&path, ctx);
        }

        if self.player.as_ref().is_some_and(|p| p.is_playing()) {
            ctx.request_repaint();
        }
    }
}
