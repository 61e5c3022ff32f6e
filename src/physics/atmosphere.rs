// ---------------------------------------------------------------------------
// ISA troposphere model (sea level to 20 km)
// ---------------------------------------------------------------------------

const R_AIR: f64 = 287.052_87; // specific gas constant for dry air, J/(kg·K)
const GAMMA: f64 = 1.4;        // ratio of specific heats

const T0: f64 = 288.15;        // sea-level temperature, K
const RHO0: f64 = 1.225;       // sea-level density, kg/m^3
const LAPSE: f64 = 0.0065;     // temperature lapse rate, K/m

/// Upper edge of the valid band. Altitudes outside [0, MAX_ALTITUDE] are
/// clamped to the boundary rather than extrapolated into negative or NaN
/// density.
pub const MAX_ALTITUDE: f64 = 20_000.0;

/// Atmospheric properties at a given geometric altitude.
#[derive(Debug, Clone, Copy)]
pub struct Atmo {
    pub density: f64,      // kg/m^3
    pub temperature: f64,  // K
    pub sound_speed: f64,  // m/s
}

/// Temperature at altitude: T = T0 - L·h, with h clamped to the valid band.
pub fn temperature(altitude_m: f64) -> f64 {
    let h = altitude_m.clamp(0.0, MAX_ALTITUDE);
    T0 - LAPSE * h
}

/// Density at altitude: rho = rho0 · (T/T0)^4.256.
pub fn density(altitude_m: f64) -> f64 {
    RHO0 * (temperature(altitude_m) / T0).powf(4.256)
}

/// Speed of sound at altitude: a = sqrt(gamma · R · T).
pub fn speed_of_sound(altitude_m: f64) -> f64 {
    (GAMMA * R_AIR * temperature(altitude_m)).sqrt()
}

/// All properties at once (one temperature evaluation).
pub fn sample(altitude_m: f64) -> Atmo {
    let t = temperature(altitude_m);
    Atmo {
        density: RHO0 * (t / T0).powf(4.256),
        temperature: t,
        sound_speed: (GAMMA * R_AIR * t).sqrt(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
