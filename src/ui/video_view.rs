use egui::{Response, Ui, Vec2};

use crate::player::VideoPlayer;

/// Largest size with the video's aspect ratio that fits in `available`.
pub fn fit_size(video: (u32, u32), available: Vec2) -> Vec2 {
    if video.0 == 0 || video.1 == 0 || available.y <= 0.0 {
        return Vec2::ZERO;
    }

    let aspect = video.0 as f32 / video.1 as f32;
    let available_aspect = available.x / available.y;

    if aspect > available_aspect {
        Vec2::new(available.x, available.x / aspect)
    } else {
        Vec2::new(available.y * aspect, available.y)
    }
}

/// Draw the current frame centred and scaled to fit.
pub fn show(ui: &mut Ui, player: &VideoPlayer) -> Response {
    let size = fit_size(player.video_size(), ui.available_size());
    let texture_id = player.texture().id();
    ui.centered_and_justified(|ui| ui.image((texture_id, size)))
        .inner
}
