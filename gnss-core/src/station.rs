use crate::error::{GnssError, Result};
use crate::geo::GeoPoint;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// A GNSS station as listed by the station inventory.
///
/// Stations are keyed by network and station code (e.g. `igs.quin`).
/// Coordinates may be missing for stations that have not been surveyed.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Network code (e.g., "igs")
    pub network_code: String,
    /// Four-character station code (e.g., "quin")
    pub station_code: String,
    /// Human-readable station name, if known
    pub name: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees
    pub longitude: Option<f64>,
}

/// A station matched by a radius search, with its distance from the center.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct NearbyStation {
    pub station: Station,
    pub distance_m: f64,
}

impl NearbyStation {
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }
}

impl Station {
    /// `network.station`, the form operators search by.
    pub fn code(&self) -> String {
        format!("{}.{}", self.network_code, self.station_code)
    }

    /// Position of the station, or `None` when either coordinate is missing
    /// or not a number.
    pub fn position(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if !lat.is_nan() && !lon.is_nan() => {
                Some(GeoPoint::new(lat, lon))
            }
            _ => None,
        }
    }

    /// Parse a CSV string of station data into a vector of Stations.
    ///
    /// Expected CSV columns: network, station, name, latitude, longitude.
    /// Empty name or coordinate cells are read as missing.
    pub fn parse_station_csv(csv_object: &str) -> Result<Vec<Station>> {
        let mut station_list: Vec<Station> = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());
        for (index, row) in rdr.records().enumerate() {
            let record = row.map_err(|e| GnssError::StationParse(e.to_string()))?;
            let line = index + 2;
            let required = |i: usize, what: &str| -> Result<String> {
                match record.get(i).map(str::trim) {
                    Some(value) if !value.is_empty() => Ok(value.to_string()),
                    _ => Err(GnssError::StationParse(format!(
                        "line {}: missing {}",
                        line, what
                    ))),
                }
            };
            let coordinate = |i: usize, what: &str| -> Result<Option<f64>> {
                match record.get(i).map(str::trim) {
                    None | Some("") => Ok(None),
                    Some(value) => value.parse::<f64>().map(Some).map_err(|e| {
                        GnssError::StationParse(format!(
                            "line {}: {} '{}': {}",
                            line, what, value, e
                        ))
                    }),
                }
            };
            let station = Station {
                network_code: required(0, "network code")?,
                station_code: required(1, "station code")?,
                name: record
                    .get(2)
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(String::from),
                latitude: coordinate(3, "latitude")?,
                longitude: coordinate(4, "longitude")?,
            };
            station_list.push(station);
        }
        Ok(station_list)
    }
}

/// Stations within `max_km` of `center`, nearest first.
///
/// Stations without coordinates are skipped before any distance is
/// computed.
pub fn stations_within_radius(
    stations: &[Station],
    center: &GeoPoint,
    max_km: f64,
) -> Vec<NearbyStation> {
    let mut nearby: Vec<NearbyStation> = stations
        .iter()
        .filter_map(|station| {
            let position = station.position()?;
            let distance_m = center.distance_to(&position);
            (distance_m <= max_km * 1000.0).then(|| NearbyStation {
                station: station.clone(),
                distance_m,
            })
        })
        .collect();
    nearby.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    log::debug!(
        "{} of {} stations within {} km of ({}, {})",
        nearby.len(),
        stations.len(),
        max_km,
        center.lat,
        center.lon
    );
    nearby
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV_DATA: &str = "\
network,station,name,latitude,longitude
igs,quin,Quincy,39.9746,-120.9444
igs,p041,,39.9495,-105.1943
cap,unsv,Unsurveyed,,
igs,p042,Boulder North,40.1500,-105.1900
";

    #[test]
    fn test_parse_station_csv() {
        let stations = Station::parse_station_csv(CSV_DATA).unwrap();
        assert_eq!(stations.len(), 4);
        assert_eq!(stations[0].code(), "igs.quin");
        assert_eq!(stations[0].name.as_deref(), Some("Quincy"));
        assert!((stations[0].latitude.unwrap() - 39.9746).abs() < f64::EPSILON);
        assert_eq!(stations[1].name, None);
        assert_eq!(stations[2].latitude, None);
        assert_eq!(stations[2].position(), None);
    }

    #[test]
    fn test_parse_empty_csv() {
        let stations = Station::parse_station_csv("network,station,name,latitude,longitude\n").unwrap();
        assert!(stations.is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_coordinate() {
        let csv_data = "network,station,name,latitude,longitude\nigs,bad1,Bad,north,10\n";
        let err = Station::parse_station_csv(csv_data).unwrap_err();
        assert!(matches!(err, GnssError::StationParse(_)));
    }

    #[test]
    fn test_parse_rejects_missing_code() {
        let csv_data = "network,station,name,latitude,longitude\nigs,,Nameless,1,2\n";
        assert!(Station::parse_station_csv(csv_data).is_err());
    }

    #[test]
    fn test_stations_within_radius_sorted_and_skips_missing() {
        let stations = Station::parse_station_csv(CSV_DATA).unwrap();
        let boulder = GeoPoint::new(40.0150, -105.2705);
        let nearby = stations_within_radius(&stations, &boulder, 50.0);
        let codes: Vec<String> = nearby.iter().map(|n| n.station.code()).collect();
        assert_eq!(codes, vec!["igs.p041", "igs.p042"]);
        assert!(nearby[0].distance_m <= nearby[1].distance_m);
        assert!(nearby[0].distance_km() < 50.0);
    }

    #[test]
    fn test_stations_within_zero_radius() {
        let stations = Station::parse_station_csv(CSV_DATA).unwrap();
        let quin = GeoPoint::new(39.9746, -120.9444);
        let nearby = stations_within_radius(&stations, &quin, 0.0);
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].distance_m, 0.0);
    }
}
