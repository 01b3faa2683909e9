use egui::{Context, ViewportCommand};

use crate::control::WindowControl;

/// [`WindowControl`] over the root egui viewport.
pub struct ViewportWindow<'a> {
    ctx: &'a Context,
    // Viewport info lags a frame behind the commands we send
    requested: Option<bool>,
}

impl<'a> ViewportWindow<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self {
            ctx,
            requested: None,
        }
    }
}

impl WindowControl for ViewportWindow<'_> {
    fn is_fullscreen(&self) -> bool {
        self.requested
            .unwrap_or_else(|| self.ctx.input(|i| i.viewport().fullscreen.unwrap_or(false)))
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.requested = Some(fullscreen);
        self.ctx
            .send_viewport_cmd(ViewportCommand::Fullscreen(fullscreen));
    }
}
