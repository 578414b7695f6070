//! Data models for LimerickBot
//!
//! This module contains the transient values passed between the fetchers and the tools:
//! - Location: Coordinates resolved by the geocoder
//! - Weather: Weather code table, current conditions and the weather tool result
//! - Fact: Fact tool request and result

pub mod fact;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use fact::{FactRequest, FactResult};
pub use location::Coordinates;
pub use weather::{CurrentConditions, WeatherInfo, condition_for};
