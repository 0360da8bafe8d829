//! Command implementations for the GNSS CLI.
//!
//! Each subcommand returns its output as a string so the binary only
//! prints; the same functions back the tests.

use clap::Subcommand;

pub mod dates;
pub mod geo;

#[derive(Subcommand)]
pub enum Command {
    /// Convert a UTC timestamp to "year doy hour minute second"
    Doy {
        /// RFC 3339 timestamp or YYYY-MM-DD
        timestamp: String,
    },

    /// Convert a day-of-year to an RFC 3339 UTC timestamp
    Date {
        year: i32,
        day_of_year: u32,
        #[arg(default_value_t = 0)]
        hour: u32,
        #[arg(default_value_t = 0)]
        minute: u32,
        #[arg(default_value_t = 0)]
        second: u32,
    },

    /// Legacy scaled day-of-year conversion (year length / 1000 per day)
    DoyScaled { year: i32, day_of_year: u32 },

    /// Great-circle distance in meters between two points
    Distance {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lon2: f64,
    },

    /// List stations within a radius of a point, nearest first
    Nearby {
        /// Station CSV: network,station,name,latitude,longitude
        #[arg(short = 's', long, default_value = "fixtures/stations.csv")]
        stations: String,

        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Search radius in kilometers
        #[arg(short = 'r', long, default_value_t = 50.0)]
        radius_km: f64,
    },

    /// Print displacement arrow geometry as JSON
    Arrow {
        /// Northward displacement in meters
        #[arg(long, allow_negative_numbers = true)]
        north: f64,

        /// Eastward displacement in meters
        #[arg(long, allow_negative_numbers = true)]
        east: f64,

        /// Event magnitude, drives stroke weight
        #[arg(long)]
        magnitude: f64,

        /// Origin pixel x
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        x: f64,

        /// Origin pixel y
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        y: f64,
    },
}

pub fn run(command: Command) -> anyhow::Result<String> {
    match command {
        Command::Doy { timestamp } => dates::run_doy(&timestamp),
        Command::Date {
            year,
            day_of_year,
            hour,
            minute,
            second,
        } => dates::run_date(year, day_of_year, hour, minute, second),
        Command::DoyScaled { year, day_of_year } => dates::run_doy_scaled(year, day_of_year),
        Command::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        } => Ok(geo::run_distance(lat1, lon1, lat2, lon2)),
        Command::Nearby {
            stations,
            lat,
            lon,
            radius_km,
        } => geo::run_nearby(&stations, lat, lon, radius_km),
        Command::Arrow {
            north,
            east,
            magnitude,
            x,
            y,
        } => geo::run_arrow(north, east, magnitude, x, y),
    }
}
