use crate::error::ConfigError;
use crate::vehicle::{VehicleConfig, VehicleConfigBuilder};

// ---------------------------------------------------------------------------
// Preset vehicles (first stages in landing configuration)
// ---------------------------------------------------------------------------
//
// Fixed data, no behavior: fuel loads are landing reserves sized for a
// descent from roughly terminal velocity at 5 km, with margin. Dimensions
// and engine figures follow published numbers for each vehicle; thrust is
// the landing-engine subset, not the full first-stage cluster.

/// SpaceX Falcon 9 Block 5 first stage, single Merlin 1D landing burn.
pub fn falcon9_block5() -> VehicleConfig {
    VehicleConfigBuilder::new("Falcon 9 Block 5")
        .height(47.7)
        .diameter(3.66)
        .dry_mass(22_200.0)
        .fuel_mass(3_000.0)
        .com_height_dry(20.0)
        .com_height_fuel(23.85)
        .thrust(845_000.0)
        .isp(282.0)
        .gimbal_limit_deg(5.0)
        .throttle_min_frac(0.4)
        .build()
        .expect("preset table is valid by construction")
}

/// SpaceX Super Heavy booster, 3 Raptors lit for landing.
pub fn super_heavy() -> VehicleConfig {
    VehicleConfigBuilder::new("Super Heavy")
        .height(69.0)
        .diameter(9.0)
        .dry_mass(200_000.0)
        .fuel_mass(24_000.0)
        .com_height_dry(30.0)
        .com_height_fuel(34.5)
        .thrust(6_900_000.0)
        .isp(330.0)
        .gimbal_limit_deg(8.0)
        .throttle_min_frac(0.4)
        .build()
        .expect("preset table is valid by construction")
}

/// Long March 5 core stage.
pub fn long_march5_core() -> VehicleConfig {
    VehicleConfigBuilder::new("Long March 5 Core")
        .height(33.0)
        .diameter(5.0)
        .dry_mass(18_000.0)
        .fuel_mass(2_400.0)
        .com_height_dry(15.0)
        .com_height_fuel(16.5)
        .thrust(700_000.0)
        .isp(310.0)
        .gimbal_limit_deg(6.0)
        .throttle_min_frac(0.4)
        .build()
        .expect("preset table is valid by construction")
}

/// Soyuz-2 core (Blok A), modeled as a single stage.
pub fn soyuz_first_stage() -> VehicleConfig {
    VehicleConfigBuilder::new("Soyuz-2 Core")
        .height(27.8)
        .diameter(2.95)
        .dry_mass(6_545.0)
        .fuel_mass(900.0)
        .com_height_dry(12.0)
        .com_height_fuel(13.9)
        .thrust(838_000.0)
        .isp(263.0)
        .gimbal_limit_deg(5.0)
        .throttle_min_frac(0.4)
        .build()
        .expect("preset table is valid by construction")
}

/// Proton-M first stage.
pub fn proton_m_first_stage() -> VehicleConfig {
    VehicleConfigBuilder::new("Proton-M First Stage")
        .height(21.2)
        .diameter(4.15)
        .dry_mass(31_000.0)
        .fuel_mass(4_100.0)
        .com_height_dry(9.0)
        .com_height_fuel(10.6)
        .thrust(1_014_000.0)
        .isp(285.0)
        .gimbal_limit_deg(5.0)
        .throttle_min_frac(0.4)
        .build()
        .expect("preset table is valid by construction")
}

/// Angara A5 URM-1 core.
pub fn angara_a5_core() -> VehicleConfig {
    VehicleConfigBuilder::new("Angara A5 URM-1")
        .height(25.0)
        .diameter(3.6)
        .dry_mass(9_500.0)
        .fuel_mass(1_300.0)
        .com_height_dry(11.0)
        .com_height_fuel(12.5)
        .thrust(2_080_000.0)
        .isp(311.0)
        .gimbal_limit_deg(6.0)
        .throttle_min_frac(0.4)
        .build()
        .expect("preset table is valid by construction")
}

/// Every preset name accepted by [`by_name`].
pub const PRESET_NAMES: [&str; 6] = [
    "falcon9_block5",
    "super_heavy",
    "long_march5_core",
    "soyuz_first_stage",
    "proton_m_first_stage",
    "angara_a5_core",
];

/// Look up a preset by its table name.
pub fn by_name(name: &str) -> Result<VehicleConfig, ConfigError> {
    match name {
        "falcon9_block5" => Ok(falcon9_block5()),
        "super_heavy" => Ok(super_heavy()),
        "long_march5_core" => Ok(long_march5_core()),
        "soyuz_first_stage" => Ok(soyuz_first_stage()),
        "proton_m_first_stage" => Ok(proton_m_first_stage()),
        "angara_a5_core" => Ok(angara_a5_core()),
        other => Err(ConfigError::UnknownPreset(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
