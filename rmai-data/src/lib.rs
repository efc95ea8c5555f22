//! # rmai-data
//!
//! The locations dataset: a paged GraphQL client with retry and a cache in
//! front of it.
//!
//! ```rust,ignore
//! use rmai_data::{DatasetCache, DatasetClient, DatasetConfig};
//!
//! let client = DatasetClient::new(DatasetConfig::default())?;
//! let cache = DatasetCache::new(client).with_snapshot("data/locations.json");
//! let citadel = cache.find_location("Citadel of Ricks").await?;
//! ```

pub mod cache;
pub mod client;
pub mod error;
pub mod index;

pub use cache::DatasetCache;
pub use client::{
    DEFAULT_ENDPOINT, DatasetClient, DatasetConfig, LOCATIONS_QUERY, LocationPage, PageInfo,
};
pub use error::{DataError, Result};
pub use index::CharacterIndex;
