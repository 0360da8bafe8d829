//! Distance, radius search and arrow geometry commands.

use anyhow::Context;
use gnss_core::displacement::{compute_arrow, PixelPoint};
use gnss_core::geo::{haversine_distance_meters, GeoPoint};
use gnss_core::station::{stations_within_radius, NearbyStation, Station};
use log::info;

pub fn run_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> String {
    format!("{:.3}", haversine_distance_meters(lat1, lon1, lat2, lon2))
}

/// Format search results as an aligned table.
pub fn format_nearby(nearby: &[NearbyStation]) -> String {
    let mut lines = vec![format!(
        "{:<10} {:<24} {:>10} {:>11} {:>10}",
        "STATION", "NAME", "LAT", "LON", "DIST_KM"
    )];
    for entry in nearby {
        let station = &entry.station;
        lines.push(format!(
            "{:<10} {:<24} {:>10.4} {:>11.4} {:>10.2}",
            station.code(),
            station.name.as_deref().unwrap_or("-"),
            station.latitude.unwrap_or_default(),
            station.longitude.unwrap_or_default(),
            entry.distance_km()
        ));
    }
    lines.join("\n")
}

pub fn run_nearby(stations_csv: &str, lat: f64, lon: f64, radius_km: f64) -> anyhow::Result<String> {
    if radius_km < 0.0 {
        anyhow::bail!("Radius cannot be negative: {}", radius_km);
    }
    let data = std::fs::read_to_string(stations_csv)
        .with_context(|| format!("Failed to read {}", stations_csv))?;
    let stations = Station::parse_station_csv(&data)?;
    let skipped = stations.iter().filter(|s| s.position().is_none()).count();
    info!(
        "Loaded {} stations from {} ({} without coordinates)",
        stations.len(),
        stations_csv,
        skipped
    );

    let nearby = stations_within_radius(&stations, &GeoPoint::new(lat, lon), radius_km);
    Ok(format_nearby(&nearby))
}

pub fn run_arrow(north: f64, east: f64, magnitude: f64, x: f64, y: f64) -> anyhow::Result<String> {
    let arrow = compute_arrow(PixelPoint::new(x, y), north, east, magnitude);
    Ok(serde_json::to_string_pretty(&arrow)?)
}
