use std::io::{self, Write};

use crate::sim::recorder::FlightSample;

/// Write recorded flight samples as CSV.
///
/// Columns: time, altitude, vertical_speed, horizontal_speed, fuel, mass,
///          throttle, gimbal_pitch_deg, gimbal_yaw_deg, tilt_deg, phase
pub fn write_samples<W: Write>(writer: &mut W, samples: &[FlightSample]) -> io::Result<()> {
    writeln!(
        writer,
        "time,altitude,vertical_speed,horizontal_speed,fuel,mass,\
         throttle,gimbal_pitch_deg,gimbal_yaw_deg,tilt_deg,phase"
    )?;

    for s in samples {
        writeln!(
            writer,
            "{:.4},{:.3},{:.3},{:.3},{:.2},{:.2},{:.3},{:.2},{:.2},{:.3},{:?}",
            s.time,
            s.altitude,
            s.vertical_speed,
            s.horizontal_speed,
            s.fuel,
            s.mass,
            s.throttle,
            s.gimbal_pitch_deg,
            s.gimbal_yaw_deg,
            s.tilt_deg,
            s.phase,
        )?;
    }

    Ok(())
}

/// Write samples to a CSV file at the given path.
pub fn write_samples_file(path: &str, samples: &[FlightSample]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_samples(&mut file, samples)
}
