//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used by the session.
//! - `adapters`: OS specific implementations (filesystem, image decoding, settings).

pub mod adapters;
pub mod ports;
