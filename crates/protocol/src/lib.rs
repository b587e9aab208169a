//! Wire types for WebDriver session plumbing.
//!
//! This crate contains the serde-serializable types exchanged with the
//! WebDriver session layer: capability sets and session identities, the
//! shapes of data as they appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: No behavior beyond serialization/deserialization
//! - **Stable**: Changes only when the wire shapes change
//!
//! Process lifecycle lives in `wd-runtime`; the ergonomic driver API lives
//! in `wd-rs`.

pub mod capabilities;
pub mod session;

pub use capabilities::*;
pub use session::*;
