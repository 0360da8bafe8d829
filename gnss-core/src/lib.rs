//! Core types and utilities for the GNSS station toolkit: day-of-year
//! dates, great-circle station filtering, displacement arrows and the
//! form-state reducer used by the admin front-end.

pub mod displacement;
pub mod doy;
pub mod error;
pub mod form_state;
pub mod geo;
pub mod map_settings;
pub mod station;

pub use error::{GnssError, Result};
