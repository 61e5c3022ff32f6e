use nalgebra::Vector3;

use crate::vehicle::VehicleConfig;

// ---------------------------------------------------------------------------
// Fuel-dependent mass properties
// ---------------------------------------------------------------------------

/// Mass, center of mass, and inertia at a given fuel level.
///
/// The inertia tensor is diagonal (symmetric cylinder) and taken about the
/// vehicle's own center of mass. Thrust and aerodynamic application points
/// are offset from the COM, so torque sites apply their lever arms
/// directly; the tensor itself stays COM-centered, which is what Euler's
/// equations want.
#[derive(Debug, Clone, Copy)]
pub struct MassProperties {
    pub mass: f64,               // kg, dry + remaining fuel
    pub com_height: f64,         // m from the engine mount
    pub inertia: Vector3<f64>,   // [Ixx, Iyy, Izz] principal moments, kg·m^2
}

impl MassProperties {
    /// Properties at the given fuel level. Fuel outside
    /// [0, fuel_mass_initial] is clamped; degenerate geometry cannot reach
    /// here (rejected when the `VehicleConfig` was built).
    pub fn of(config: &VehicleConfig, fuel_remaining: f64) -> Self {
        let fuel = fuel_remaining.clamp(0.0, config.fuel_mass_initial);
        let mass = config.dry_mass + fuel;

        // COM slides linearly from the dry position to the full-fuel
        // position with fuel fraction.
        let frac = if config.fuel_mass_initial > 0.0 {
            fuel / config.fuel_mass_initial
        } else {
            0.0
        };
        let com_height =
            config.com_height_dry + frac * (config.com_height_fuel - config.com_height_dry);

        // Uniform cylinder about its COM. Body y is the long (roll) axis,
        // x and z the transverse (pitch/yaw) axes.
        let r = config.radius();
        let h = config.height;
        let transverse = mass * (3.0 * r * r + h * h) / 12.0;
        let roll = 0.5 * mass * r * r;

        Self {
            mass,
            com_height,
            inertia: Vector3::new(transverse, roll, transverse),
        }
    }

    /// Vector from the COM to the engine mount, body frame.
    pub fn engine_lever_arm(&self) -> Vector3<f64> {
        Vector3::new(0.0, -self.com_height, 0.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
