use crate::controls::{Control, InputSource, InputState, ParseControlError};

/// Errors from parsing a flight script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("segment `{0}` is not of the form FRAMES:CONTROLS")]
    MalformedSegment(String),
    #[error("bad frame count in segment `{0}`")]
    BadFrameCount(String),
    #[error(transparent)]
    Control(#[from] ParseControlError),
}

/// Canned input for headless flights: a list of `(frames, held controls)`
/// segments played back in order, then idle forever.
///
/// Text form is comma-separated `FRAMES:CONTROLS` segments where `CONTROLS`
/// is `+`-joined control names or `idle`:
///
/// ```text
/// 40:accelerate,90:pitch-up+yaw-left,200:idle
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightScript {
    segments: Vec<(u32, InputState)>,
    segment: usize,
    frame_in_segment: u32,
}

impl FlightScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment holding `state` for `frames` frames.
    pub fn then(mut self, frames: u32, state: InputState) -> Self {
        self.segments.push((frames, state));
        self
    }

    pub fn parse(src: &str) -> Result<Self, ScriptError> {
        let mut script = Self::new();
        for raw in src.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (frames, controls) = raw
                .split_once(':')
                .ok_or_else(|| ScriptError::MalformedSegment(raw.to_string()))?;
            let frames: u32 = frames
                .trim()
                .parse()
                .map_err(|_| ScriptError::BadFrameCount(raw.to_string()))?;
            let controls = controls.trim();
            let state = if controls.eq_ignore_ascii_case("idle") {
                InputState::idle()
            } else {
                let parsed = controls
                    .split('+')
                    .map(str::parse::<Control>)
                    .collect::<Result<Vec<_>, _>>()?;
                InputState::holding(parsed)
            };
            script.segments.push((frames, state));
        }
        tracing::debug!(segments = script.segments.len(), "parsed flight script");
        Ok(script)
    }

    /// Frames covered by the script before it goes idle.
    pub fn total_frames(&self) -> u64 {
        self.segments.iter().map(|(f, _)| *f as u64).sum()
    }

    pub fn is_finished(&self) -> bool {
        self.segment >= self.segments.len()
    }
}

impl InputSource for FlightScript {
    fn poll(&mut self) -> InputState {
        while let Some(&(frames, state)) = self.segments.get(self.segment) {
            if self.frame_in_segment < frames {
                self.frame_in_segment += 1;
                return state;
            }
            self.segment += 1;
            self.frame_in_segment = 0;
        }
        InputState::idle()
    }
}
