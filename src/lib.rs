//! City weather lookup served over MCP.
//!
//! Resolves a city name through Open-Meteo geocoding, fetches current
//! conditions and a six-day daily series, and normalizes them into a
//! display-ready view model.

pub mod client;
pub mod condition;
pub mod constants;
pub mod controller;
pub mod error;
pub mod formatters;
pub mod models;
pub mod normalizer;
pub mod resolver;
pub mod service;

pub use client::OpenMeteoClient;
pub use condition::{classify, ConditionClassification, IconKey};
pub use controller::{QueryController, QueryState, SearchOutcome};
pub use error::WeatherError;
pub use models::{Location, ViewModel};
pub use service::Weather;
