//! Client side command engine for Redis protocol (RESP2) stores.
//!
//! A [`Client`] owns one duplex byte channel and exposes one typed async
//! method per store operation. Each call validates its arguments, encodes the
//! request, waits for exactly one reply and maps it to a typed result.
//!
//! ```no_run
//! # async fn demo() -> redis_command_core::Result<()> {
//! use redis_command_core::{Client, params::ScanParams, types::SCAN_START};
//!
//! let stream = tokio::net::TcpStream::connect("127.0.0.1:6379").await?;
//! let mut client = Client::new(stream);
//!
//! client.hset("user:1", "name", "ada").await?;
//! let page = client.hscan("user:1", SCAN_START, &ScanParams::new()).await?;
//! assert!(page.is_complete());
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;

pub mod descriptor;
pub mod params;
pub mod reply;
pub mod resp;
pub mod types;

pub use client::{ChannelState, Client};
pub use config::{ClientConfig, DEFAULT_RESPONSE_TIMEOUT};
pub use error::{Error, Result};
