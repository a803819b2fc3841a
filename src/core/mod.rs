//! Pipeline core: producer, driver and the handshake between them.
//!
//! Internal modules:
//! - [`config`]: run settings (quota, latency, outcome table, seed);
//! - [`producer`]: the background task and its [`ProducerHandle`];
//! - [`driver`]: drains items, requests shutdown, builds the [`Summary`];
//! - [`builder`]: assembles a [`Driver`] with subscribers and dice.

mod builder;
mod config;
mod driver;
mod producer;

pub use builder::DriverBuilder;
pub use config::Config;
pub use driver::{Driver, Summary};
pub use producer::{Producer, ProducerHandle};
