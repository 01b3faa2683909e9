pub mod controls;
pub mod input;
pub mod video_view;
pub mod window;

pub use controls::{ControlsOutput, PlayerControls, TimeLabels};
pub use input::InputSubscription;
pub use window::ViewportWindow;
