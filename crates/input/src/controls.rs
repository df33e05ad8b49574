use serde::{Deserialize, Serialize};

/// A held-key flight control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Control {
    /// Raise forward speed (W).
    Accelerate,
    /// Lower forward speed, never below zero (S).
    Decelerate,
    /// Turn left (A).
    YawLeft,
    /// Turn right (D).
    YawRight,
    /// Nose up (Up arrow).
    PitchUp,
    /// Nose down (Down arrow).
    PitchDown,
    /// Bank left (Left arrow).
    RollLeft,
    /// Bank right (Right arrow).
    RollRight,
}

impl Control {
    pub const ALL: [Control; 8] = [
        Control::Accelerate,
        Control::Decelerate,
        Control::YawLeft,
        Control::YawRight,
        Control::PitchUp,
        Control::PitchDown,
        Control::RollLeft,
        Control::RollRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Control::Accelerate => "accelerate",
            Control::Decelerate => "decelerate",
            Control::YawLeft => "yaw-left",
            Control::YawRight => "yaw-right",
            Control::PitchUp => "pitch-up",
            Control::PitchDown => "pitch-down",
            Control::RollLeft => "roll-left",
            Control::RollRight => "roll-right",
        }
    }

    /// Default desktop key binding, listed by `terrastream info`.
    pub fn default_key(self) -> &'static str {
        match self {
            Control::Accelerate => "W",
            Control::Decelerate => "S",
            Control::YawLeft => "A",
            Control::YawRight => "D",
            Control::PitchUp => "Up",
            Control::PitchDown => "Down",
            Control::RollLeft => "Left",
            Control::RollRight => "Right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown control `{0}`")]
pub struct ParseControlError(pub String);

impl std::str::FromStr for Control {
    type Err = ParseControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Control::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseControlError(s.to_string()))
    }
}

/// Which controls are held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub accelerate: bool,
    pub decelerate: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
    pub pitch_up: bool,
    pub pitch_down: bool,
    pub roll_left: bool,
    pub roll_right: bool,
}

impl InputState {
    /// Nothing held.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn holding(controls: impl IntoIterator<Item = Control>) -> Self {
        let mut state = Self::default();
        for c in controls {
            state.set(c, true);
        }
        state
    }

    pub fn set(&mut self, control: Control, held: bool) {
        *self.slot(control) = held;
    }

    pub fn is_held(&self, control: Control) -> bool {
        match control {
            Control::Accelerate => self.accelerate,
            Control::Decelerate => self.decelerate,
            Control::YawLeft => self.yaw_left,
            Control::YawRight => self.yaw_right,
            Control::PitchUp => self.pitch_up,
            Control::PitchDown => self.pitch_down,
            Control::RollLeft => self.roll_left,
            Control::RollRight => self.roll_right,
        }
    }

    pub fn held(&self) -> impl Iterator<Item = Control> + '_ {
        Control::ALL.into_iter().filter(|c| self.is_held(*c))
    }

    fn slot(&mut self, control: Control) -> &mut bool {
        match control {
            Control::Accelerate => &mut self.accelerate,
            Control::Decelerate => &mut self.decelerate,
            Control::YawLeft => &mut self.yaw_left,
            Control::YawRight => &mut self.yaw_right,
            Control::PitchUp => &mut self.pitch_up,
            Control::PitchDown => &mut self.pitch_down,
            Control::RollLeft => &mut self.roll_left,
            Control::RollRight => &mut self.roll_right,
        }
    }
}

/// Anything that can be polled for the current control state.
pub trait InputSource {
    /// Sample the held controls for this frame.
    fn poll(&mut self) -> InputState;
}

/// A fixed state acts as a source that never changes.
impl InputSource for InputState {
    fn poll(&mut self) -> InputState {
        *self
    }
}
