//! Tuition scholarship calculator: reference data, rule matching, pricing,
//! and the HTTP surface shared by the API service.

pub mod access;
pub mod config;
pub mod error;
pub mod scholarship;
pub mod telemetry;
