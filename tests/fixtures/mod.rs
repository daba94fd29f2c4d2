//! Test fixtures for route-mapper.
//!
//! Provides:
//! - Real Swiss locations (from OpenStreetMap)
//! - Directions responses in each provider shape
//! - In-process stand-ins for the directions provider and geocoder

pub mod responses;
pub mod swiss_locations;

#[allow(unused_imports)]
pub use responses::*;
#[allow(unused_imports)]
pub use swiss_locations::*;
