use glam::Vec3;
use terrastream_kernel::Session;
use terrastream_terrain::ChunkCoord;

/// Snapshot of the debug readout: speed, position and orientation, plus a
/// little streaming context.
#[derive(Debug, Clone, PartialEq)]
pub struct Telemetry {
    pub frame: u64,
    pub seed: u32,
    pub speed: f32,
    pub position: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    pub chunk: Option<ChunkCoord>,
    pub cached_chunks: usize,
}

impl Telemetry {
    pub fn capture(session: &Session) -> Self {
        let flight = session.flight();
        let streamer = session.streamer();
        Self {
            frame: session.frames(),
            seed: session.seed(),
            speed: flight.speed,
            position: flight.position,
            pitch: flight.pitch,
            yaw: flight.yaw,
            roll: flight.roll,
            chunk: streamer.current_chunk(),
            cached_chunks: streamer.store().len(),
        }
    }

    /// Speed in display units (x100).
    pub fn display_speed(&self) -> f32 {
        self.speed * 100.0
    }

    /// Position in display units (x10).
    pub fn display_position(&self) -> Vec3 {
        self.position * 10.0
    }
}

impl std::fmt::Display for Telemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let p = self.display_position();
        write!(
            f,
            "frame {:>5} | Speed: {:.2} | X: {:.1} Y: {:.1} Z: {:.1} | Pitch: {} Yaw: {} Roll: {}",
            self.frame,
            self.display_speed(),
            p.x,
            p.y,
            p.z,
            self.pitch,
            self.yaw,
            self.roll,
        )?;
        match self.chunk {
            Some(c) => write!(f, " | chunk {c} ({} cached)", self.cached_chunks),
            None => write!(f, " | no chunk"),
        }
    }
}
