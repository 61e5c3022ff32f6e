use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Vehicle definition (one landing stage, single center engine)
// ---------------------------------------------------------------------------

/// Immutable vehicle parameters, validated once at session start.
///
/// The vehicle is modeled as a symmetric cylinder with the engine mounted
/// at the base. Heights are measured from the engine mount upward along
/// the body axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleConfig {
    pub name: String,
    pub height: f64,            // m
    pub diameter: f64,          // m
    pub dry_mass: f64,          // kg
    pub fuel_mass_initial: f64, // kg
    pub com_height_dry: f64,    // m from base, fuel exhausted
    pub com_height_fuel: f64,   // m from base, tanks full
    pub engine_thrust_max: f64, // N
    pub engine_isp: f64,        // s
    pub gimbal_limit_deg: f64,  // deg, symmetric
    pub throttle_min_frac: f64, // lowest stable throttle, 0 = can idle
}

impl VehicleConfig {
    /// Check every construction invariant. Returns the config unchanged on
    /// success so builders can end with `.validated()`.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.height <= 0.0 {
            return Err(ConfigError::NonPositiveHeight(self.height));
        }
        if self.diameter <= 0.0 {
            return Err(ConfigError::NonPositiveDiameter(self.diameter));
        }
        if self.dry_mass <= 0.0 {
            return Err(ConfigError::NonPositiveDryMass(self.dry_mass));
        }
        if self.fuel_mass_initial < 0.0 {
            return Err(ConfigError::NegativeFuelMass(self.fuel_mass_initial));
        }
        for (name, value) in [
            ("dry center of mass", self.com_height_dry),
            ("fuel center of mass", self.com_height_fuel),
        ] {
            if !(0.0..=self.height).contains(&value) {
                return Err(ConfigError::ComOutOfBounds {
                    name,
                    value,
                    height: self.height,
                });
            }
        }
        if self.engine_thrust_max <= 0.0 {
            return Err(ConfigError::NonPositiveThrust(self.engine_thrust_max));
        }
        if self.engine_isp <= 0.0 {
            return Err(ConfigError::NonPositiveIsp(self.engine_isp));
        }
        if self.gimbal_limit_deg < 0.0 {
            return Err(ConfigError::NegativeGimbalLimit(self.gimbal_limit_deg));
        }
        if !(0.0..=1.0).contains(&self.throttle_min_frac) {
            return Err(ConfigError::ThrottleFloorOutOfRange(self.throttle_min_frac));
        }
        Ok(self)
    }

    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Aerodynamic reference area (cross section of the cylinder), m^2.
    pub fn cross_section(&self) -> f64 {
        PI * self.radius() * self.radius()
    }

    /// Wet mass at ignition, kg.
    pub fn total_mass_initial(&self) -> f64 {
        self.dry_mass + self.fuel_mass_initial
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

pub struct VehicleConfigBuilder {
    config: VehicleConfig,
}

impl VehicleConfigBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            config: VehicleConfig {
                name: name.into(),
                height: 40.0,
                diameter: 3.7,
                dry_mass: 20_000.0,
                fuel_mass_initial: 3_000.0,
                com_height_dry: 18.0,
                com_height_fuel: 20.0,
                engine_thrust_max: 800_000.0,
                engine_isp: 280.0,
                gimbal_limit_deg: 5.0,
                throttle_min_frac: 0.4,
            },
        }
    }

    pub fn height(mut self, v: f64) -> Self { self.config.height = v; self }
    pub fn diameter(mut self, v: f64) -> Self { self.config.diameter = v; self }
    pub fn dry_mass(mut self, v: f64) -> Self { self.config.dry_mass = v; self }
    pub fn fuel_mass(mut self, v: f64) -> Self { self.config.fuel_mass_initial = v; self }
    pub fn com_height_dry(mut self, v: f64) -> Self { self.config.com_height_dry = v; self }
    pub fn com_height_fuel(mut self, v: f64) -> Self { self.config.com_height_fuel = v; self }
    pub fn thrust(mut self, v: f64) -> Self { self.config.engine_thrust_max = v; self }
    pub fn isp(mut self, v: f64) -> Self { self.config.engine_isp = v; self }
    pub fn gimbal_limit_deg(mut self, v: f64) -> Self { self.config.gimbal_limit_deg = v; self }
    pub fn throttle_min_frac(mut self, v: f64) -> Self { self.config.throttle_min_frac = v; self }

    pub fn build(self) -> Result<VehicleConfig, ConfigError> {
        self.config.validated()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
