//! WebDriver Runtime - server process lifecycle
//!
//! This crate provides the low-level infrastructure for running a
//! WebDriver-protocol server binary:
//!
//! - **Executable discovery**: Locating the driver binary
//! - **Port allocation**: Asking the OS for a free loopback port
//! - **Supervision**: Spawning the process and draining its output
//! - **Readiness**: Polling the listening port until it accepts connections
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │    wd-rs    │  Driver flavors (PhantomJsDriver, ChromeDriver)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  wd-runtime │  This crate
//! │  ┌────────┐ │
//! │  │ Superv │ │  Process spawn / drain / signal
//! │  └────────┘ │
//! │  ┌────────┐ │
//! │  │ Probe  │ │  TCP readiness polling
//! │  └────────┘ │
//! │  ┌────────┐ │
//! │  │ Port   │ │  Free-port lookup
//! │  └────────┘ │
//! └─────────────┘
//! ```
//!
//! The session layer (HTTP, capabilities, the WebDriver wire protocol) is
//! not part of this crate; `wd-rs` plugs an external collaborator in behind
//! a trait.

pub mod error;
pub mod locate;
pub mod port;
pub mod probe;
pub mod supervisor;

// Re-export key types at crate root
pub use error::{Error, Result};
pub use locate::find_executable;
pub use port::free_port;
pub use probe::{PROBE_INTERVAL, wait_until_reachable};
pub use supervisor::{ProcessSupervisor, ShutdownPolicy, SpawnSpec, StreamSink};
