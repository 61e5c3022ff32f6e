use std::f64::consts::TAU;

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Altitude-dependent wind field
// ---------------------------------------------------------------------------

/// Beaufort scale levels 1..=9 as (min, max) surface speeds in m/s.
/// Level 0 means no wind.
const BEAUFORT_SCALE: [(f64, f64); 9] = [
    (0.5, 1.5),   // 1: light air
    (1.6, 3.3),   // 2: light breeze
    (3.4, 5.4),   // 3: gentle breeze
    (5.5, 7.9),   // 4: moderate breeze
    (8.0, 10.7),  // 5: fresh breeze
    (10.8, 13.8), // 6: strong breeze
    (13.9, 17.1), // 7: near gale
    (17.2, 20.7), // 8: gale
    (20.8, 24.4), // 9: strong gale
];

/// Midpoint speed of a Beaufort band, m/s.
pub fn beaufort_speed(level: i32) -> Result<f64, ConfigError> {
    if !(1..=9).contains(&level) {
        return Err(ConfigError::WindLevelOutOfRange(level));
    }
    let (lo, hi) = BEAUFORT_SCALE[(level - 1) as usize];
    Ok((lo + hi) / 2.0)
}

/// Immutable per-session wind parameters. Output is time-varying but the
/// parameters never change after session start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindConfig {
    pub enabled: bool,
    pub surface_speed: f64,  // m/s at sea level
    pub direction: f64,      // rad, 0 = +x, pi/2 = +z
    pub scale_height: f64,   // m, exponential decay with altitude
    pub gust_amplitude: f64, // m/s, 0 disables gusts
    pub gust_frequency: f64, // Hz
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            surface_speed: 0.0,
            direction: 0.0,
            scale_height: 1_500.0,
            gust_amplitude: 0.0,
            gust_frequency: 0.0,
        }
    }
}

impl WindConfig {
    /// Wind config from a Beaufort level. Level 0 yields disabled wind.
    pub fn from_beaufort(level: i32, direction: f64) -> Result<Self, ConfigError> {
        if level == 0 {
            return Ok(Self::default());
        }
        Ok(Self {
            enabled: true,
            surface_speed: beaufort_speed(level)?,
            direction,
            ..Self::default()
        })
    }
}

/// Horizontal wind velocity model: V(h) = V_surface · exp(-h / h_scale),
/// plus an optional sinusoidal gust along the same direction. Vertical
/// wind is always zero.
#[derive(Debug, Clone)]
pub struct WindField {
    config: WindConfig,
}

impl WindField {
    pub fn new(config: WindConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WindConfig {
        &self.config
    }

    /// Horizontal wind components (world x, z) at the given altitude and
    /// simulation time.
    pub fn velocity(&self, altitude: f64, time: f64) -> Vector2<f64> {
        // Disabled wind must be exactly zero, and cheap: bail out before
        // touching the exponential.
        if !self.config.enabled {
            return Vector2::zeros();
        }

        let h = altitude.max(0.0);
        let mut speed = self.config.surface_speed * (-h / self.config.scale_height).exp();

        if self.config.gust_amplitude != 0.0 {
            speed += self.config.gust_amplitude * (TAU * self.config.gust_frequency * time).sin();
        }
        speed = speed.max(0.0);

        Vector2::new(
            speed * self.config.direction.cos(),
            speed * self.config.direction.sin(),
        )
    }

    /// Same as [`velocity`](Self::velocity) lifted into a world-frame
    /// 3-vector (y component identically zero).
    pub fn velocity_world(&self, altitude: f64, time: f64) -> Vector3<f64> {
        let v = self.velocity(altitude, time);
        Vector3::new(v.x, 0.0, v.y)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn steady(surface_speed: f64, direction: f64) -> WindField {
        WindField::new(WindConfig {
            enabled: true,
            surface_speed,
            direction,
            ..WindConfig::default()
        })
    }

    #[test]
    fn disabled_wind_is_exactly_zero() {
        let wind = WindField::new(WindConfig::default());
        let v = wind.velocity(1_000.0, 42.0);
        assert_eq!(v, Vector2::zeros());
        assert_eq!(wind.velocity_world(1_000.0, 42.0), Vector3::zeros());
    }

    #[test]
    fn surface_speed_at_sea_level() {
        let wind = steady(10.0, 0.0);
        let v = wind.velocity(0.0, 0.0);
        assert_relative_eq!(v.x, 10.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn decays_with_altitude() {
        let wind = steady(10.0, 0.0);
        let v0 = wind.velocity(0.0, 0.0).norm();
        let v1 = wind.velocity(1_500.0, 0.0).norm();
        let v2 = wind.velocity(5_000.0, 0.0).norm();
        assert!(v0 > v1 && v1 > v2);
        // One scale height down: exactly 1/e of the surface speed.
        assert_relative_eq!(v1, 10.0 / std::f64::consts::E, epsilon = 1e-9);
    }

    #[test]
    fn direction_selects_components() {
        let wind = steady(5.0, std::f64::consts::FRAC_PI_2);
        let v = wind.velocity(0.0, 0.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(v.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn gusts_oscillate_about_base_speed() {
        let wind = WindField::new(WindConfig {
            enabled: true,
            surface_speed: 8.0,
            direction: 0.0,
            gust_amplitude: 2.0,
            gust_frequency: 0.5,
            ..WindConfig::default()
        });
        // sin peaks a quarter period in: t = 1/(4f) = 0.5 s
        assert_relative_eq!(wind.velocity(0.0, 0.5).x, 10.0, epsilon = 1e-9);
        // Zero crossing at a half period: back to base speed.
        assert_relative_eq!(wind.velocity(0.0, 1.0).x, 8.0, epsilon = 1e-9);
    }

    #[test]
    fn negative_altitude_clamps() {
        let wind = steady(10.0, 0.0);
        assert_relative_eq!(
            wind.velocity(-200.0, 0.0).x,
            wind.velocity(0.0, 0.0).x,
            epsilon = 1e-12
        );
    }

    #[test]
    fn beaufort_levels() {
        assert_relative_eq!(beaufort_speed(1).unwrap(), 1.0);
        assert_relative_eq!(beaufort_speed(5).unwrap(), 9.35);
        assert!(beaufort_speed(10).is_err());
        assert!(!WindConfig::from_beaufort(0, 0.0).unwrap().enabled);
        let w = WindConfig::from_beaufort(9, 1.0).unwrap();
        assert!(w.enabled);
        assert_relative_eq!(w.surface_speed, 22.6, epsilon = 1e-9);
    }
}
