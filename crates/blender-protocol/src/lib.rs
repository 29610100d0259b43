//! Blender Render Protocol
//!
//! Defines the JSON envelope exchanged between the blender host and an
//! isolated render worker. One request line goes to the worker's stdin,
//! one result document comes back on stdout.

pub mod error;
pub mod request;
pub mod response;

pub use error::{ErrorCode, RenderFailure};
pub use request::RenderRequest;
pub use response::{RenderResult, RenderStatus};

/// Protocol version spoken by this host.
pub const PROTOCOL_VERSION: i32 = 1;
