use serde::{Deserialize, Serialize};

/// Largest sky envelope half-extent the view-distance control can select.
pub const MAX_SKY_BOX_SIZE: f32 = 24.0;
/// Largest perspective fudge factor the control can select.
pub const MAX_FUDGE_FACTOR: f32 = 2.0;

/// Errors from loading or validating view settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// How the backend rasterizes the index list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Filled triangles (smooth shading).
    #[default]
    Triangles,
    /// Line wireframe.
    Lines,
    /// Point cloud (the "flat shading" menu entry).
    Points,
}

impl DrawMode {
    pub fn label(self) -> &'static str {
        match self {
            DrawMode::Triangles => "triangles",
            DrawMode::Lines => "lines",
            DrawMode::Points => "points",
        }
    }
}

/// Live-adjustable viewer settings, read once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Half-extent of the sky envelope (view distance), in `[0, 24]`.
    pub sky_box_size: f32,
    /// Perspective distortion factor, in `[0, 2]`.
    pub fudge_factor: f32,
    /// Fog density, passed through to the backend untouched.
    pub fog_density: f32,
    pub draw_mode: DrawMode,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            sky_box_size: MAX_SKY_BOX_SIZE,
            fudge_factor: 1.0,
            fog_density: 0.07,
            draw_mode: DrawMode::Triangles,
        }
    }
}

impl ViewSettings {
    /// Parse settings from YAML. Missing fields take their defaults.
    pub fn from_yaml_str(src: &str) -> Result<Self, SettingsError> {
        let settings: ViewSettings = serde_yaml::from_str(src)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_yaml_string(&self) -> Result<String, SettingsError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Map a 0–100 view-distance slider onto the sky envelope size.
    pub fn set_view_distance_percent(&mut self, percent: f32) {
        self.sky_box_size = percent.clamp(0.0, 100.0) / 100.0 * MAX_SKY_BOX_SIZE;
    }

    /// Map a 0–100 slider onto the fudge factor.
    pub fn set_fudge_percent(&mut self, percent: f32) {
        self.fudge_factor = percent.clamp(0.0, 100.0) / 100.0 * MAX_FUDGE_FACTOR;
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        check_range("sky_box_size", self.sky_box_size, 0.0, MAX_SKY_BOX_SIZE)?;
        check_range("fudge_factor", self.fudge_factor, 0.0, MAX_FUDGE_FACTOR)?;
        if !self.fog_density.is_finite() {
            return Err(SettingsError::NonFinite {
                field: "fog_density",
                value: self.fog_density,
            });
        }
        Ok(())
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), SettingsError> {
    if !value.is_finite() {
        return Err(SettingsError::NonFinite { field, value });
    }
    if value < min || value > max {
        return Err(SettingsError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
