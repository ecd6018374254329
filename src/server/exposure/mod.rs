//! API exposure modules
//!
//! Each exposure consumes the registered entities and produces a Router.

pub mod rest;

pub use rest::RestExposure;
