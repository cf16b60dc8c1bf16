use clap::Parser;

use solar_orrery::consts::{J2000_JULIAN_SECONDS, SECONDS_PER_DAY};
use solar_orrery::file::read_catalog;
use solar_orrery::model::{Body, Orrery, SimulationClock};
use solar_orrery::units::{format_elapsed, format_period, format_semi_major_axis};

#[derive(Debug, Parser)]
struct Args {
    /// Body to print; every body when omitted.
    name: Option<String>,

    /// Catalog to load.
    #[arg(long, default_value = "sol-bodies.json")]
    catalog: String,

    /// Simulated instant, in days past J2000.0. Defaults to the wall clock.
    #[arg(long)]
    days: Option<f64>,
}

fn main() {
    let args = Args::parse();

    let mut orrery = match read_catalog(&args.catalog) {
        Ok(orrery) => orrery,
        Err(error) => {
            eprintln!("Failed to load {}: {}", args.catalog, error);
            std::process::exit(1);
        }
    };

    let julian_seconds = match args.days {
        Some(days) => J2000_JULIAN_SECONDS + days * SECONDS_PER_DAY,
        None => SimulationClock::new().now(),
    };
    orrery.tick(julian_seconds);

    println!(
        "Ephemerides at J2000 + {}",
        format_elapsed(julian_seconds - J2000_JULIAN_SECONDS)
    );
    println!();

    for body in orrery.bodies() {
        if let Some(name) = &args.name {
            if !body.name.eq_ignore_ascii_case(name) {
                continue;
            }
        }
        print_body(&orrery, body);
    }
}

fn print_body(orrery: &Orrery, body: &Body) {
    let state = body.state();
    println!("{} ({:?})", body.name, body.kind);
    println!(
        "- Scene position: ({:.4}, {:.4}, {:.4})",
        state.position.x, state.position.y, state.position.z
    );

    if body.is_root() {
        println!();
        return;
    }

    println!("- Orbiting: {}", orrery.get_parent(body.id).name);
    println!(
        "- Semi-major axis: {}",
        format_semi_major_axis(body.elements.semi_major_axis)
    );
    println!("- Eccentricity: {:.4}", body.elements.eccentricity);
    println!("- Inclination: {:.3}", body.elements.inclination_deg);
    if body.elements.orbital_period_seconds > 0.0 {
        println!(
            "- Sidereal period: {}",
            format_period(body.elements.orbital_period_seconds)
        );
    }
    println!(
        "- True anomaly: {:.2}",
        state.true_anomaly.to_degrees()
    );
    println!("- Scene speed: {:.3e} units/s", state.velocity.norm());
    println!();
}
