//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used across the workspace core.
//! - `adapters`: OS/runtime specific implementations (IO/async).

pub mod adapters;
pub mod ports;
