//! Request and Response models for the caching server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{PageQuery, StoreRequest};
pub use responses::{
    CountResponse, ErrorResponse, GetResponse, HealthResponse, PageResponse, StatsResponse,
    StoreResponse,
};
