//! Application layer containing the business logic orchestration.
//!
//! This module defines the `HotelEngine`, the entry point that applies hotel
//! operations to the stores behind the domain ports.

pub mod engine;
