use glam::Vec3;

/// A position in world space: `x`, height (`y`), `z`.
pub type WorldPoint = Vec3;

/// A linear RGB color with components in `[0, 1]` (extrapolated bands may exceed 1).
pub type Rgb = Vec3;

/// Build a color from 8-bit channel values.
pub const fn rgb8(r: u8, g: u8, b: u8) -> Rgb {
    Vec3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb8_normalizes_channels() {
        let c = rgb8(255, 0, 51);
        assert_eq!(c, Vec3::new(1.0, 0.0, 0.2));
    }

    #[test]
    fn world_point_axes() {
        let p = WorldPoint::new(1.0, 2.0, 3.0);
        assert_eq!(p.y, 2.0);
    }
}
