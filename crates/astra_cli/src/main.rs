use clap::{Parser, Subcommand};

use astra_core::{ALL_AYANAMSAS, ALL_HOUSE_SYSTEMS, Body, EclipticState};
use astra_natal::{
    ALL_ASPECTS, BodyPosition, deg_to_dms, find_aspects_default, part_of_fortune, resolve_key,
    sign_of,
};

#[derive(Parser)]
#[command(name = "astra", about = "Astra natal engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Zodiac sign from ecliptic longitude
    Sign {
        /// Ecliptic longitude in degrees
        lon: f64,
    },
    /// Convert degrees to DMS
    Dms {
        /// Angle in decimal degrees
        deg: f64,
    },
    /// Resolve a body key through the alias tables
    Resolve {
        /// Raw body key (e.g. "lilith", "Part_Of_Fortune")
        key: String,
    },
    /// Part of Fortune from Sun, Moon, and Ascendant longitudes
    Fortuna {
        /// Sun ecliptic longitude in degrees
        sun: f64,
        /// Moon ecliptic longitude in degrees
        moon: f64,
        /// Ascendant in degrees
        asc: f64,
        /// Treat as a night chart (default: day)
        #[arg(long)]
        night: bool,
    },
    /// Aspects between two longitudes, full catalogue with default orbs
    Match {
        /// First ecliptic longitude in degrees
        lon1: f64,
        /// Second ecliptic longitude in degrees
        lon2: f64,
        /// Daily speed of the first body, degrees/day
        #[arg(long, default_value = "0")]
        speed1: f64,
        /// Daily speed of the second body, degrees/day
        #[arg(long, default_value = "0")]
        speed2: f64,
    },
    /// List the aspect catalogue
    Aspects,
    /// List the supported house systems
    Houses,
    /// List the supported ayanamsas
    Ayanamsas,
}

/// Anonymous planet-kind entry for two-longitude aspect queries.
fn pseudo_body(name: &str, lon: f64, speed: f64) -> BodyPosition {
    let mut body = BodyPosition::planet(
        Body::Sun,
        EclipticState {
            longitude_deg: lon,
            latitude_deg: 0.0,
            distance_au: 0.0,
            speed_deg_per_day: speed,
        },
    );
    body.name = name.to_owned();
    body.key = name.to_lowercase();
    body
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Sign { lon } => {
            let sp = sign_of(lon);
            let dms = deg_to_dms(sp.degree_in_sign);
            println!(
                "{} {}°{}'{:.2}\" (sign index {})",
                sp.sign.name(),
                dms.degrees,
                dms.minutes,
                dms.seconds,
                sp.sign_index
            );
        }
        Commands::Dms { deg } => {
            let dms = deg_to_dms(deg);
            println!("{}°{}'{:.4}\"", dms.degrees, dms.minutes, dms.seconds);
        }
        Commands::Resolve { key } => {
            println!("{}", resolve_key(&key));
        }
        Commands::Fortuna {
            sun,
            moon,
            asc,
            night,
        } => {
            let lon = part_of_fortune(sun, moon, asc, !night);
            let sp = sign_of(lon);
            println!(
                "Fortuna {:.4}° ({} {:.4}°)",
                lon,
                sp.sign.name(),
                sp.degree_in_sign
            );
        }
        Commands::Match {
            lon1,
            lon2,
            speed1,
            speed2,
        } => {
            let bodies = [
                pseudo_body("A", lon1, speed1),
                pseudo_body("B", lon2, speed2),
            ];
            let matches = find_aspects_default(&bodies);
            if matches.is_empty() {
                println!("no aspect within orb");
            }
            for m in matches {
                println!(
                    "{} exact {:.0}° actual {:.4}° orb {:.3}° {}",
                    m.aspect.name(),
                    m.exact_angle,
                    m.actual_angle,
                    m.orb,
                    if m.applying { "applying" } else { "separating" }
                );
            }
        }
        Commands::Aspects => {
            for a in ALL_ASPECTS {
                println!("{:<13} {:>5.0}°  orb {:.0}°", a.name(), a.exact_angle(), a.default_orb());
            }
        }
        Commands::Houses => {
            for hs in ALL_HOUSE_SYSTEMS {
                println!("{}  {}", hs.code(), hs.name());
            }
        }
        Commands::Ayanamsas => {
            for a in ALL_AYANAMSAS {
                println!("{:>2}  {}", a.code(), a.key());
            }
        }
    }
}
