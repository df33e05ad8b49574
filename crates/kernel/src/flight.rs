use glam::Vec3;
use terrastream_common::WorldPoint;
use terrastream_input::InputState;

/// Lowest camera height.
pub const MIN_HEIGHT: f32 = 2.0;
/// Highest camera height.
pub const MAX_HEIGHT: f32 = 20.0;
/// Speed change per frame while accelerate/decelerate is held.
pub const SPEED_STEP: f32 = 0.005;
/// Degrees turned per frame while a rotation control is held.
const TURN_STEP: f32 = 1.0;

/// Orientation, speed and position of the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightState {
    /// Degrees, truncating modulo 360 (may be negative).
    pub pitch: f32,
    /// Degrees in `[0, 360)`.
    pub yaw: f32,
    /// Degrees, truncating modulo 360 (may be negative).
    pub roll: f32,
    /// Forward distance per frame. Never negative, no upper bound.
    pub speed: f32,
    pub position: WorldPoint,
}

impl Default for FlightState {
    fn default() -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
            speed: 0.0,
            position: Vec3::new(0.0, MIN_HEIGHT, 0.0),
        }
    }
}

impl FlightState {
    /// Pitch, yaw, roll packed for the shader.
    pub fn orientation(&self) -> Vec3 {
        Vec3::new(self.pitch, self.yaw, self.roll)
    }

    /// Direction of travel for the current yaw and pitch.
    ///
    /// Horizontal components carry a `cos(pitch)` factor, so a steep climb
    /// or dive covers less ground.
    pub fn heading(&self) -> Vec3 {
        let yaw = (-self.yaw).to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(yaw.sin() * pitch.cos(), pitch.sin(), yaw.cos() * pitch.cos())
    }
}

/// Integrates held controls into [`FlightState`] once per frame.
#[derive(Debug, Clone, Default)]
pub struct FlightController {
    state: FlightState,
}

impl FlightController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary state; the height is clamped into range.
    pub fn with_state(mut state: FlightState) -> Self {
        state.position.y = state.position.y.clamp(MIN_HEIGHT, MAX_HEIGHT);
        Self { state }
    }

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    /// Apply one frame of input, then move.
    pub fn step(&mut self, input: &InputState) {
        self.apply_input(input);
        self.advance();
    }

    /// Update speed and orientation from held controls.
    pub fn apply_input(&mut self, input: &InputState) {
        let s = &mut self.state;
        if input.accelerate {
            s.speed += SPEED_STEP;
        }
        if input.decelerate {
            s.speed = (s.speed - SPEED_STEP).max(0.0);
        }
        if input.yaw_left {
            s.yaw = (s.yaw + TURN_STEP).rem_euclid(360.0);
        }
        if input.yaw_right {
            s.yaw = (s.yaw - TURN_STEP).rem_euclid(360.0);
        }
        if input.roll_left {
            s.roll = (s.roll - TURN_STEP) % 360.0;
        }
        if input.roll_right {
            s.roll = (s.roll + TURN_STEP) % 360.0;
        }
        if input.pitch_up {
            s.pitch = (s.pitch + TURN_STEP) % 360.0;
        }
        if input.pitch_down {
            s.pitch = (s.pitch - TURN_STEP) % 360.0;
        }
    }

    /// Move one frame along the heading and clamp the height.
    pub fn advance(&mut self) {
        let s = &mut self.state;
        s.position += s.heading() * s.speed;
        s.position.y = s.position.y.clamp(MIN_HEIGHT, MAX_HEIGHT);
    }
}
