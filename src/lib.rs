//! Turnstile - Adaptive QoS admission controller
//!
//! This library computes per-client effective request quotas by scaling
//! configured base quotas against live load readings from a storage
//! backend's health gauge.

pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod probe;
pub mod qos;
