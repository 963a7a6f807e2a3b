//! API Module
//!
//! HTTP handlers and routing for the caching server REST API.
//!
//! # Endpoints
//! - `POST /store` - Store a value under a generated key
//! - `GET /get/:key` - Retrieve a stored value by key
//! - `GET /replay/:identity` - Render an operation's call history
//! - `GET /page?url=` - Fetch a page through the TTL cache
//! - `GET /page/count?url=` - Read a url's access counter
//! - `GET /stats` - Get store statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
