#![warn(rust_2018_idioms)]

// re-export sub-crates
pub use rtp;
pub use sdp;

pub mod api;
pub mod error;
pub mod remote_description;
pub mod rtp_transceiver;
pub mod stats;

pub use error::Error;

pub(crate) const UNSPECIFIED_STR: &str = "Unspecified";
