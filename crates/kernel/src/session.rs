use std::time::Instant;

use serde::{Deserialize, Serialize};
use terrastream_common::{SettingsError, ViewSettings};
use terrastream_input::InputSource;
use terrastream_render::{FOG_COLOR, FrameAssembler, FrameUniforms, RenderBackend, SkyVolume};
use terrastream_stream::{FrameTimer, RefreshOutcome, TerrainStreamer};
use terrastream_terrain::{
    ChunkStore, ColorBands, HeightField, NoiseShape, TerrainConfig, TerrainError,
};

use crate::flight::{FlightController, FlightState};

/// Frames of history kept for timing statistics.
const TIMER_WINDOW: usize = 120;

/// Errors from building or reconfiguring a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("terrain configuration: {0}")]
    Terrain(#[from] TerrainError),
    #[error("view settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Everything needed to start a session. Loadable from YAML; any missing
/// field falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed shared by the whole height field. Unset means a fresh random
    /// seed per session.
    pub seed: Option<u32>,
    pub terrain: TerrainConfig,
    pub noise: NoiseShape,
    pub view: ViewSettings,
}

impl SessionConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Fix the seed, drawing a random one if none was given.
    pub fn resolve_seed(&mut self) -> u32 {
        *self.seed.get_or_insert_with(rand::random)
    }

    pub fn from_yaml_str(src: &str) -> Result<Self, SessionError> {
        let config: SessionConfig = serde_yaml::from_str(src)?;
        config.terrain.validate()?;
        config.view.validate()?;
        Ok(config)
    }
}

/// What happened during one [`Session::frame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameReport {
    /// 1-based index of the frame just run.
    pub frame: u64,
    pub terrain: RefreshOutcome,
}

/// One viewer: the camera, the terrain around it and the buffers it draws.
#[derive(Debug)]
pub struct Session {
    seed: u32,
    flight: FlightController,
    streamer: TerrainStreamer,
    sky: SkyVolume,
    assembler: FrameAssembler,
    settings: ViewSettings,
    frames: u64,
    timer: FrameTimer,
}

impl Session {
    /// Build a session and bake the terrain around the spawn point, so the
    /// very first draw already has geometry.
    pub fn new(mut config: SessionConfig) -> Result<Self, SessionError> {
        config.view.validate()?;
        let seed = config.resolve_seed();
        let field = HeightField::with_shape(seed, config.noise)?;
        let store = ChunkStore::with_parts(config.terrain, field, ColorBands::default())?;

        let mut session = Self {
            seed,
            flight: FlightController::new(),
            streamer: TerrainStreamer::new(store),
            sky: SkyVolume::default(),
            assembler: FrameAssembler::new(),
            settings: config.view,
            frames: 0,
            timer: FrameTimer::new(TIMER_WINDOW),
        };
        let position = session.flight.state().position;
        session.streamer.refresh(position);
        session.rebuild_buffers();
        tracing::info!(seed = session.seed, "session started");
        Ok(session)
    }

    /// Run one frame.
    ///
    /// Order: draw the previous buffers, poll input, integrate flight,
    /// refresh terrain, rebuild the sky, then assemble and upload the
    /// buffers the next frame will draw.
    pub fn frame<I, B>(&mut self, input: &mut I, backend: &mut B) -> FrameReport
    where
        I: InputSource + ?Sized,
        B: RenderBackend + ?Sized,
    {
        let start = Instant::now();
        if self.frames == 0 {
            backend.upload(self.assembler.buffers());
        }
        backend.draw(self.settings.draw_mode, &self.uniforms());

        let controls = input.poll();
        self.flight.step(&controls);

        let position = self.flight.state().position;
        let terrain = self.streamer.refresh(position);

        self.rebuild_buffers();
        backend.upload(self.assembler.buffers());

        self.frames += 1;
        self.timer.record(start.elapsed());
        tracing::trace!(
            frame = self.frames,
            x = position.x,
            y = position.y,
            z = position.z,
            "frame complete"
        );

        FrameReport {
            frame: self.frames,
            terrain,
        }
    }

    fn rebuild_buffers(&mut self) {
        let position = self.flight.state().position;
        let sky = self.sky.rebuild(position, self.settings.sky_box_size);
        self.assembler.assemble(self.streamer.active().mesh(), sky);
    }

    /// Shader inputs for the current state.
    pub fn uniforms(&self) -> FrameUniforms {
        let state = self.flight.state();
        FrameUniforms {
            orientation: state.orientation(),
            shift: state.position,
            fog_color: FOG_COLOR,
            fog_density: self.settings.fog_density,
            fudge_factor: self.settings.fudge_factor,
        }
    }

    /// Swap in new view settings; they take effect on the next frame.
    pub fn set_settings(&mut self, settings: ViewSettings) -> Result<(), SessionError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn flight(&self) -> &FlightState {
        self.flight.state()
    }

    pub fn streamer(&self) -> &TerrainStreamer {
        &self.streamer
    }

    /// Buffers that the next draw will use.
    pub fn buffers(&self) -> &terrastream_common::Mesh {
        self.assembler.buffers()
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use terrastream_common::DrawMode;
    use terrastream_input::{Control, FlightScript, InputState};
    use terrastream_render::HeadlessBackend;
    use terrastream_terrain::ChunkCoord;

    use crate::flight::{MAX_HEIGHT, MIN_HEIGHT};

    fn coarse_config() -> SessionConfig {
        SessionConfig {
            seed: Some(3),
            terrain: TerrainConfig {
                chunk_size: 24.0,
                sample_step: 4.0,
                water_level: 0.2,
            },
            ..SessionConfig::default()
        }
    }

    #[test]
    fn new_session_bakes_spawn_neighborhood() {
        let session = Session::new(coarse_config()).unwrap();
        let store = session.streamer().store();
        assert_eq!(store.generated_count(), 7);
        assert_eq!(session.streamer().current_chunk(), Some(ChunkCoord::new(0, 0)));
        let terrain_vertices = session.streamer().active().mesh().vertex_count();
        assert_eq!(session.buffers().vertex_count(), terrain_vertices + 20);
        assert!(session.buffers().indices_in_bounds());
    }

    #[test]
    fn first_frame_uploads_before_drawing() {
        let mut session = Session::new(coarse_config()).unwrap();
        let mut backend = HeadlessBackend::new();
        let mut input = InputState::idle();
        session.frame(&mut input, &mut backend);
        assert_eq!(backend.uploads(), 2);
        assert_eq!(backend.draws(), 1);
        assert!(backend.indices_drawn() > 0);
    }

    #[test]
    fn buffers_upload_every_frame_even_when_idle() {
        let mut session = Session::new(coarse_config()).unwrap();
        let mut backend = HeadlessBackend::new();
        let mut input = InputState::idle();
        for _ in 0..5 {
            let report = session.frame(&mut input, &mut backend);
            assert_eq!(report.terrain, RefreshOutcome::Unchanged);
        }
        assert_eq!(backend.uploads(), 6);
        assert_eq!(backend.draws(), 5);
        assert_eq!(session.frames(), 5);
        assert_eq!(session.streamer().store().generated_count(), 7);
    }

    #[test]
    fn flying_across_a_boundary_streams_new_chunks() {
        let mut session = Session::new(coarse_config()).unwrap();
        let mut backend = HeadlessBackend::new();
        // Full speed ahead along +z until past z = 24.
        let mut script = FlightScript::new()
            .then(200, InputState::holding([Control::Accelerate]))
            .then(1000, InputState::idle());
        let mut rebuilt_at = None;
        for _ in 0..400 {
            let report = session.frame(&mut script, &mut backend);
            if let RefreshOutcome::Rebuilt { center, generated } = report.terrain {
                assert_eq!(center, ChunkCoord::new(0, 1));
                assert_eq!(
                    generated,
                    vec![ChunkCoord::new(-1, 1), ChunkCoord::new(0, 2), ChunkCoord::new(1, 2)]
                );
                rebuilt_at = Some(report.frame);
                break;
            }
        }
        assert!(rebuilt_at.is_some());
        assert_eq!(session.streamer().store().generated_count(), 10);
    }

    #[test]
    fn climbing_hard_stays_under_ceiling() {
        let mut session = Session::new(coarse_config()).unwrap();
        let mut backend = HeadlessBackend::new();
        let mut input = InputState::holding([Control::Accelerate, Control::PitchUp]);
        for _ in 0..400 {
            session.frame(&mut input, &mut backend);
            let y = session.flight().position.y;
            assert!((MIN_HEIGHT..=MAX_HEIGHT).contains(&y));
        }
    }

    #[test]
    fn sky_follows_camera_and_view_distance() {
        let mut session = Session::new(coarse_config()).unwrap();
        let mut settings = *session.settings();
        settings.set_view_distance_percent(25.0);
        session.set_settings(settings).unwrap();

        let mut backend = HeadlessBackend::new();
        session.frame(&mut InputState::idle(), &mut backend);

        let buffers = session.buffers();
        let sky_start = session.streamer().active().mesh().vertex_count();
        let sky = &buffers.positions[sky_start..];
        assert_eq!(sky.len(), 20);
        let max = sky.iter().fold(Vec3::splat(f32::MIN), |a, &p| a.max(p));
        assert_eq!(max, Vec3::new(6.0, 6.0, 6.0));
    }

    #[test]
    fn uniforms_carry_settings_and_orientation() {
        let mut session = Session::new(coarse_config()).unwrap();
        let settings = ViewSettings {
            fog_density: 0.3,
            fudge_factor: 1.5,
            draw_mode: DrawMode::Points,
            ..ViewSettings::default()
        };
        session.set_settings(settings).unwrap();

        let mut backend = HeadlessBackend::new();
        let mut input = InputState::holding([Control::YawRight]);
        session.frame(&mut input, &mut backend);
        session.frame(&mut input, &mut backend);

        let uniforms = backend.last_uniforms().unwrap();
        // Drawn at the start of frame 2, after one frame of yaw.
        assert_eq!(uniforms.orientation, Vec3::new(0.0, 359.0, 0.0));
        assert_eq!(uniforms.fog_density, 0.3);
        assert_eq!(uniforms.fudge_factor, 1.5);
        assert_eq!(backend.last_mode(), Some(DrawMode::Points));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let mut session = Session::new(coarse_config()).unwrap();
        let bad = ViewSettings {
            sky_box_size: -1.0,
            ..ViewSettings::default()
        };
        assert!(matches!(
            session.set_settings(bad),
            Err(SessionError::Settings(_))
        ));
        assert_eq!(session.settings().sky_box_size, 24.0);
    }

    #[test]
    fn invalid_terrain_config_fails_to_start() {
        let mut config = coarse_config();
        config.terrain.sample_step = 5.0;
        assert!(matches!(
            Session::new(config),
            Err(SessionError::Terrain(TerrainError::StepNotDivisor { .. }))
        ));
    }

    #[test]
    fn config_from_yaml() {
        let config = SessionConfig::from_yaml_str(
            "seed: 99\nterrain:\n  sample_step: 0.5\nview:\n  draw_mode: lines\n",
        )
        .unwrap();
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.terrain.sample_step, 0.5);
        assert_eq!(config.terrain.chunk_size, 24.0);
        assert_eq!(config.view.draw_mode, DrawMode::Lines);
    }

    #[test]
    fn same_seed_same_world() {
        let a = Session::new(coarse_config()).unwrap();
        let b = Session::new(coarse_config()).unwrap();
        assert_eq!(a.buffers(), b.buffers());
        assert_eq!(a.seed(), 3);
    }

    #[test]
    fn seedless_config_draws_a_seed() {
        let config = SessionConfig::from_yaml_str("view:\n  draw_mode: points\n").unwrap();
        assert_eq!(config.seed, None);

        let mut resolved = config.clone();
        let seed = resolved.resolve_seed();
        assert_eq!(resolved.seed, Some(seed));
        assert_eq!(resolved.resolve_seed(), seed);

        let session = Session::new(resolved).unwrap();
        assert_eq!(session.seed(), seed);
    }

    #[test]
    fn seedless_sessions_get_fresh_seeds() {
        let seeds: Vec<u32> = (0..8)
            .map(|_| {
                let mut config = coarse_config();
                config.seed = None;
                Session::new(config).unwrap().seed()
            })
            .collect();
        assert!(seeds.iter().any(|&s| s != seeds[0]), "seeds {seeds:?}");
    }
}
