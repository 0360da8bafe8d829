//! Field maps for the station map forms.
//!
//! Inputs are kept as the raw text the operator typed; parsing happens on
//! submit so half-typed values (`"-"`, `"1."`) never bounce back.

use gnss_core::displacement::DisplacementVector;
use gnss_core::form_state::FormFields;
use gnss_core::geo::GeoPoint;
use gnss_core::Result;

/// Default search radius in kilometers.
pub const DEFAULT_RADIUS_KM: &str = "50";

fn parse_number(label: &str, text: &str) -> std::result::Result<f64, String> {
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("{} must be a number, got '{}'", label, text))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{} must be finite", label))
    }
}

fn parse_point(lat: &str, lon: &str) -> std::result::Result<GeoPoint, String> {
    let lat = parse_number("Latitude", lat)?;
    let lon = parse_number("Longitude", lon)?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("Latitude {} outside -90..90", lat));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(format!("Longitude {} outside -180..180", lon));
    }
    Ok(GeoPoint::new(lat, lon))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadiusField {
    Latitude,
    Longitude,
    RadiusKm,
}

/// Station radius search.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusSearchForm {
    pub latitude: String,
    pub longitude: String,
    pub radius_km: String,
}

impl Default for RadiusSearchForm {
    fn default() -> Self {
        RadiusSearchForm {
            latitude: String::new(),
            longitude: String::new(),
            radius_km: DEFAULT_RADIUS_KM.to_string(),
        }
    }
}

/// A validated radius search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusQuery {
    pub center: GeoPoint,
    pub radius_km: f64,
}

impl RadiusSearchForm {
    pub fn to_query(&self) -> std::result::Result<RadiusQuery, String> {
        let center = parse_point(&self.latitude, &self.longitude)?;
        let radius_km = parse_number("Radius", &self.radius_km)?;
        if radius_km < 0.0 {
            return Err("Radius cannot be negative".to_string());
        }
        Ok(RadiusQuery { center, radius_km })
    }
}

impl FormFields for RadiusSearchForm {
    type Field = RadiusField;
    type Value = String;

    fn assign(&mut self, field: &RadiusField, value: String) -> Result<()> {
        match field {
            RadiusField::Latitude => self.latitude = value,
            RadiusField::Longitude => self.longitude = value,
            RadiusField::RadiusKm => self.radius_km = value,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoyField {
    Calendar,
    DayOfYear,
}

/// Calendar date <-> day-of-year converter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DoyConverterForm {
    pub calendar: String,
    pub day_of_year: String,
}

impl FormFields for DoyConverterForm {
    type Field = DoyField;
    type Value = String;

    fn assign(&mut self, field: &DoyField, value: String) -> Result<()> {
        match field {
            DoyField::Calendar => self.calendar = value,
            DoyField::DayOfYear => self.day_of_year = value,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplacementField {
    Latitude,
    Longitude,
    NorthM,
    EastM,
    Magnitude,
}

/// Earthquake displacement to draw at a station.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplacementForm {
    pub latitude: String,
    pub longitude: String,
    pub north_m: String,
    pub east_m: String,
    pub magnitude: String,
}

impl DisplacementForm {
    pub fn to_vector(&self) -> std::result::Result<DisplacementVector, String> {
        Ok(DisplacementVector {
            origin: parse_point(&self.latitude, &self.longitude)?,
            north_m: parse_number("North", &self.north_m)?,
            east_m: parse_number("East", &self.east_m)?,
            magnitude: parse_number("Magnitude", &self.magnitude)?,
        })
    }
}

impl FormFields for DisplacementForm {
    type Field = DisplacementField;
    type Value = String;

    fn assign(&mut self, field: &DisplacementField, value: String) -> Result<()> {
        let slot = match field {
            DisplacementField::Latitude => &mut self.latitude,
            DisplacementField::Longitude => &mut self.longitude,
            DisplacementField::NorthM => &mut self.north_m,
            DisplacementField::EastM => &mut self.east_m,
            DisplacementField::Magnitude => &mut self.magnitude,
        };
        *slot = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gnss_core::form_state::{FormAction, FormReducer};

    fn search(lat: &str, lon: &str, radius: &str) -> RadiusSearchForm {
        RadiusSearchForm {
            latitude: lat.to_string(),
            longitude: lon.to_string(),
            radius_km: radius.to_string(),
        }
    }

    #[test]
    fn test_radius_query_parses() {
        let query = search(" -0.21 ", "-78.49", "25").to_query().unwrap();
        assert_eq!(query.center, GeoPoint::new(-0.21, -78.49));
        assert_eq!(query.radius_km, 25.0);
    }

    #[test]
    fn test_radius_query_rejects_bad_input() {
        assert!(search("", "1", "5").to_query().is_err());
        assert!(search("91", "1", "5").to_query().is_err());
        assert!(search("1", "181", "5").to_query().is_err());
        assert!(search("1", "1", "-5").to_query().is_err());
        assert!(search("NaN", "1", "5").to_query().is_err());
    }

    #[test]
    fn test_radius_clear_restores_default_radius() {
        let reducer = FormReducer::new(RadiusSearchForm::default());
        let typed = reducer
            .reduce(
                &RadiusSearchForm::default(),
                FormAction::ChangeValue {
                    input_name: RadiusField::RadiusKm,
                    input_value: "10".to_string(),
                },
            )
            .unwrap();
        assert_eq!(typed.radius_km, "10");
        let cleared = reducer.reduce(&typed, FormAction::Clear).unwrap();
        assert_eq!(cleared.radius_km, DEFAULT_RADIUS_KM);
    }

    #[test]
    fn test_displacement_form_to_vector() {
        let form = DisplacementForm {
            latitude: "-35.8".to_string(),
            longitude: "-72.7".to_string(),
            north_m: "-1.2".to_string(),
            east_m: "-4.7".to_string(),
            magnitude: "8.8".to_string(),
        };
        let vector = form.to_vector().unwrap();
        assert_eq!(vector.origin, GeoPoint::new(-35.8, -72.7));
        assert_eq!(vector.east_m, -4.7);
        assert!(DisplacementForm::default().to_vector().is_err());
    }

    #[test]
    fn test_displacement_assign_touches_one_field() {
        let mut form = DisplacementForm::default();
        form.assign(&DisplacementField::EastM, "2".to_string()).unwrap();
        assert_eq!(form.east_m, "2");
        assert_eq!(form.north_m, "");
    }
}
