use flyplayer::control::{route, Dispatcher, InputEvent, Key, WheelDirection, WindowControl};
use flyplayer::{format_time, PlaybackFacade};

/// In-memory stand-in for the media engine
struct FakePlayer {
    playing: bool,
    muted: bool,
    position: u64,
    duration: u64,
    volume: u8,
}

impl FakePlayer {
    fn new(position: u64, duration: u64, volume: u8) -> Self {
        Self {
            playing: false,
            muted: false,
            position,
            duration,
            volume,
        }
    }
}

impl PlaybackFacade for FakePlayer {
    fn play(&mut self) {
        self.playing = true;
    }
    fn pause(&mut self) {
        self.playing = false;
    }
    fn stop(&mut self) {
        self.playing = false;
        self.position = 0;
    }
    fn is_playing(&self) -> bool {
        self.playing
    }
    fn is_muted(&self) -> bool {
        self.muted
    }
    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
    fn position(&self) -> u64 {
        self.position
    }
    fn set_position(&mut self, position_ms: u64) {
        self.position = position_ms.min(self.duration);
    }
    fn duration(&self) -> u64 {
        self.duration
    }
    fn volume(&self) -> u8 {
        self.volume
    }
    fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
    }
}

#[derive(Default)]
struct Window {
    fullscreen: bool,
}

impl WindowControl for Window {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }
}

/// Feed events through the router and dispatcher like the window does.
fn press(events: &[InputEvent], player: &mut FakePlayer, window: &mut Window) {
    let dispatcher = Dispatcher::default();
    for &event in events {
        if let Some(command) = route(event) {
            dispatcher.dispatch(command, Some(&mut *player), window);
        }
    }
}

#[test]
fn right_arrow_seeks_forward_five_seconds() {
    let mut player = FakePlayer::new(97_000, 200_000, 50);
    let mut window = Window::default();

    press(&[InputEvent::KeyRelease(Key::Right)], &mut player, &mut window);

    assert_eq!(player.position(), 102_000);
    assert_eq!(format_time(player.position()), "00:01:42");
}

#[test]
fn left_arrow_never_goes_negative() {
    let mut player = FakePlayer::new(3_000, 200_000, 50);
    let mut window = Window::default();

    press(&[InputEvent::KeyRelease(Key::Left)], &mut player, &mut window);
    assert_eq!(player.position(), 0);
}

#[test]
fn volume_up_saturates_at_hundred() {
    let mut player = FakePlayer::new(0, 200_000, 95);
    let mut window = Window::default();

    press(&[InputEvent::KeyRelease(Key::Up)], &mut player, &mut window);
    assert_eq!(player.volume(), 100);

    press(
        &[
            InputEvent::KeyRelease(Key::Up),
            InputEvent::WheelRotate(WheelDirection::Up),
        ],
        &mut player,
        &mut window,
    );
    assert_eq!(player.volume(), 100);
}

#[test]
fn wheel_down_lowers_volume_to_zero() {
    let mut player = FakePlayer::new(0, 200_000, 25);
    let mut window = Window::default();
    let wheel_down = [InputEvent::WheelRotate(WheelDirection::Down); 5];

    press(&wheel_down, &mut player, &mut window);
    assert_eq!(player.volume(), 0);
}

#[test]
fn space_mute_and_fullscreen_keys() {
    let mut player = FakePlayer::new(0, 200_000, 50);
    let mut window = Window::default();

    press(
        &[
            InputEvent::KeyRelease(Key::Space),
            InputEvent::KeyRelease(Key::M),
            InputEvent::KeyRelease(Key::F),
        ],
        &mut player,
        &mut window,
    );
    assert!(player.is_playing());
    assert!(player.is_muted());
    assert_eq!(player.volume(), 50);
    assert!(window.fullscreen);

    press(&[InputEvent::KeyRelease(Key::Space)], &mut player, &mut window);
    assert!(!player.is_playing());
}

#[test]
fn unmapped_keys_change_nothing() {
    let mut player = FakePlayer::new(10_000, 200_000, 50);
    let mut window = Window::default();

    press(&[InputEvent::KeyRelease(Key::Other); 3], &mut player, &mut window);

    assert_eq!(player.position(), 10_000);
    assert_eq!(player.volume(), 50);
    assert!(!player.is_playing());
    assert!(!window.fullscreen);
}
