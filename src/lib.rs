//! Lystica Cloud client
//!
//! A typed client for the Lystica Cloud contact, company, email and list API,
//! built on a retrying request engine, plus verification of signed webhook
//! deliveries.

mod client;

pub mod config;
pub mod engine;
pub mod resources;
pub mod time;
pub mod transport;
pub mod webhook;

pub use client::LysticaCloud;
