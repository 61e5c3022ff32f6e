use lander_sim::io::csv;
use lander_sim::presets;
use lander_sim::sim::FlightRecorder;
use lander_sim::{ControlInput, Difficulty, Session, SessionConfig, Snapshot, VehicleConfig, G0};

const DT: f64 = 1.0 / 60.0;

/// Demo throttle schedule: coast until the altitude drops inside the
/// stopping distance at full thrust, then track a gentle touchdown speed.
/// This plays the role of the external controller; the physics core only
/// ever sees throttle and gimbal commands.
fn throttle_command(snap: &Snapshot, vehicle: &VehicleConfig) -> f64 {
    let v = snap.vertical_speed; // negative = descending
    let h = snap.altitude;
    if v >= 0.0 {
        return 0.0;
    }

    let a_max = vehicle.engine_thrust_max / snap.mass - G0;
    let stop_distance = v * v / (2.0 * a_max);
    if h > stop_distance * 1.05 + 2.0 {
        return 0.0;
    }

    let target = 4.0; // m/s at touchdown
    let a_desired = (v * v - target * target).max(0.0) / (2.0 * h.max(1.0));
    ((a_desired + G0) * snap.mass / vehicle.engine_thrust_max).clamp(0.0, 1.0)
}

fn main() {
    let vehicle = presets::falcon9_block5();
    let config = SessionConfig::new(vehicle.clone()).with_difficulty(Difficulty::Easy);
    let mut session = Session::new(config).expect("preset config is valid");
    let mut recorder = FlightRecorder::new(0.05);

    // -----------------------------------------------------------------------
    // Run the descent
    // -----------------------------------------------------------------------
    let mut snap = session.snapshot();
    let mut trajectory = vec![snap.clone()];
    let max_steps = (240.0 / DT) as usize;

    for _ in 0..max_steps {
        let input = ControlInput::throttle_only(throttle_command(&snap, &vehicle));
        snap = match session.step(&input, DT) {
            Ok(s) => s,
            Err(err) => {
                eprintln!("simulation aborted: {err}");
                return;
            }
        };
        recorder.record(&snap, &input);
        trajectory.push(snap.clone());
        if snap.landed || snap.crashed {
            break;
        }
    }

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  ROCKET LANDING SIMULATION — {}", vehicle.name);
    println!("====================================================================");
    println!();
    println!("  Vehicle Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Dry mass:      {:>8.0} kg    Landing fuel: {:>8.0} kg",
        vehicle.dry_mass, vehicle.fuel_mass_initial
    );
    println!(
        "  Thrust:        {:>8.0} N     Isp:          {:>8.0} s",
        vehicle.engine_thrust_max, vehicle.engine_isp
    );
    println!(
        "  Height:        {:>8.1} m     Diameter:     {:>8.2} m",
        vehicle.height, vehicle.diameter
    );
    println!(
        "  TWR (full):    {:>8.2}       Min throttle: {:>8.0} %",
        vehicle.engine_thrust_max / (vehicle.total_mass_initial() * G0),
        vehicle.throttle_min_frac * 100.0
    );
    println!();

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for event in recorder.events() {
        println!(
            "  {:<20} t={:>6.2}s   alt={:>8.1}m",
            format!("{:?}", event.kind),
            event.time,
            event.altitude
        );
    }
    println!();

    println!("  Touchdown");
    println!("  ──────────────────────────────────────────────────────────────────");
    match snap.touchdown {
        Some(report) => {
            println!("  Outcome:           {}", if report.landed { "LANDED" } else { "CRASHED" });
            println!("  Vertical speed:    {:>7.2} m/s", report.vertical_speed);
            println!("  Horizontal speed:  {:>7.2} m/s", report.horizontal_speed);
            println!("  Pad distance:      {:>7.2} m", report.pad_distance);
            println!("  Tilt:              {:>7.2} deg", report.tilt_deg);
            println!("  Fuel remaining:    {:>7.0} kg", snap.fuel_remaining);
        }
        None => println!("  Still airborne after {:.0} s", snap.time),
    }
    println!();

    if let Some(stats) = recorder.statistics() {
        println!("  Flight Summary");
        println!("  ──────────────────────────────────────────────────────────────────");
        println!("  Flight time:   {:>8.1} s", stats.flight_time);
        println!("  Fuel used:     {:>8.0} kg", stats.fuel_used);
        println!("  Max speed:     {:>8.1} m/s", stats.max_speed);
        println!("  Max tilt:      {:>8.2} deg", stats.max_tilt_deg);
        println!("  Engine on:     {:>8.0} %", stats.engine_on_fraction * 100.0);
        println!();
    }

    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>9}  {:>9}  {:>9}  {:>8}  {:>14}",
        "t (s)", "alt (m)", "vy (m/s)", "fuel (kg)", "tilt", "phase"
    );
    let sample_interval = (trajectory.len() / 25).max(1);
    for (i, s) in trajectory.iter().enumerate() {
        if i % sample_interval != 0 && i != trajectory.len() - 1 {
            continue;
        }
        println!(
            "  {:>7.2}  {:>9.1}  {:>9.1}  {:>9.0}  {:>8.2}  {:>14}",
            s.time,
            s.altitude,
            s.vertical_speed,
            s.fuel_remaining,
            s.tilt_deg,
            format!("{:?}", s.phase),
        );
    }

    println!();
    println!("  Simulation: {} steps, dt={:.4} s", trajectory.len() - 1, DT);
    println!("====================================================================");
    println!();

    // Optional CSV dump of the recording: `lander-sim flight.csv`
    if let Some(path) = std::env::args().nth(1) {
        match csv::write_samples_file(&path, recorder.samples()) {
            Ok(()) => println!("  Recording written to {path}"),
            Err(err) => eprintln!("  Could not write {path}: {err}"),
        }
    }
}
