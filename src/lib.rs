//! Property rental application intake service.
//!
//! Hosts the ten-step application wizard behind an HTTP session API. The
//! wizard itself is a synchronous state machine; property lookup and final
//! submission go through injected collaborator traits.

pub mod config;
pub mod error;
pub mod infra;
pub mod telemetry;
pub mod wizard;
