//! List management module
//!
//! Follower propagation between publication lists and the async list
//! service built on top of it.

pub mod config;
pub mod order;
pub mod propagation;
pub mod service;

pub use config::PropagationConfig;
pub use order::{OrderKey, DEFAULT_ORDER};
pub use propagation::{propagate, Addition, PropagationReport, PropagationSkip};
pub use service::ListService;
