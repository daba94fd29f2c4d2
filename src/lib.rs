//! route-mapper
//!
//! Decodes directions provider responses into drawable route paths, and
//! wires the collaborators around them: directions and geocoding over
//! openrouteservice, a saved-route history and search counters.

pub mod polyline;
pub mod geometry;
pub mod directions;
pub mod resolver;
pub mod error;
pub mod traits;
pub mod ors;
pub mod saved_routes;
pub mod search_stats;
pub mod planner;
pub mod config;
