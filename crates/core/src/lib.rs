//! wd: process lifecycle for WebDriver servers.
//!
//! This crate starts a WebDriver server binary (phantomjs in ghostdriver
//! mode, chromedriver), waits until its port accepts connections, exposes
//! the computed endpoint to a session layer of your choice, and terminates
//! the process on request.
//!
//! # Example
//!
//! ```ignore
//! use wd::PhantomJsDriver;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut driver = PhantomJsDriver::find()?;
//!     driver.start().await?;
//!
//!     // Point any WebDriver HTTP client at this URL.
//!     println!("webdriver listening at {}", driver.endpoint().unwrap());
//!
//!     driver.stop().await?;
//!     Ok(())
//! }
//! ```
//!
//! The WebDriver wire protocol itself (HTTP transport, capability
//! negotiation) is not implemented here; plug a client in behind
//! [`SessionBackend`] and the driver handles will tag every session it
//! produces with the endpoint to route to.

mod service;

pub mod chrome;
pub mod config;
pub mod phantomjs;
pub mod session;

pub use chrome::ChromeDriver;
pub use config::{DriverConfig, LogLevel};
pub use phantomjs::PhantomJsDriver;
pub use session::{BackendFuture, RemoteEnd, Session, SessionBackend};

// Re-export wire types for convenience
pub use wd_protocol::{Capabilities, SessionId, SessionSummary};

// Re-export Error and Result from wd-runtime
pub use wd_runtime::{Error, Result, ShutdownPolicy};

pub use wd_protocol;
pub use wd_runtime;
