//! redlist_tracker
//!
//! A small Rust library for looking up species on the IUCN Red List. Pairs with the
//! `redlist` CLI.
//!
//! ### Features
//! - Look up one species by name and get its conservation status, population trend,
//!   and habitat, with missing fields defaulted instead of failing
//! - Load the API credential from the environment or a local `.env` file
//! - Summarize the records gathered in a session (status / trend distribution)
//! - Save records as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use redlist_tracker::{Client, Config};
//!
//! let config = Config::load()?;
//! let client = Client::new(&config)?;
//! let lion = client.lookup("Panthera leo")?;
//! println!("{} is {}, trend {}", lion.name, lion.conservation_status, lion.population_trend);
//! redlist_tracker::storage::save_json(&[lion], "lion.json")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod stats;
pub mod storage;

pub use api::{Client, HttpResponse, HttpTransport, Transport};
pub use config::Config;
pub use error::{FailureReason, LookupError};
pub use models::{ConservationStatus, PopulationTrend, SpeciesRecord};
