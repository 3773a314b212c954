//! tcpopt - cross-platform TCP socket options
//!
//! Corking, queued byte counts, keep-alive tuning and kernel connection
//! statistics on top of any connected stream socket, with per-platform
//! option tables selected at compile time.
//!
//! ```no_run
//! use std::net::TcpStream;
//! use tcpopt::TcpOptionsExt;
//!
//! let stream = TcpStream::connect("127.0.0.1:8080")?;
//! stream.cork()?;
//! // ... several small writes ...
//! stream.uncork()?;
//! println!("{} bytes waiting to be read", stream.buffered()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod handle;
pub mod info;
pub mod ops;
pub mod registry;
mod sys;

pub use error::{Error, Result};
pub use handle::{AsSocketHandle, SocketHandle};
pub use info::{CaState, ConnectionInfo, RecordLayout, TcpConnectionInfo, TcpInfo, TcpiOptions};
pub use ops::{
    available, buffered, connection_info, cork, set_buffer_options, set_keepalive_idle,
    set_keepalive_interval, set_keepalive_probes, uncork, BufferOptions, TcpOptionsExt,
};
pub use registry::{Descriptor, Operation, Registry, REGISTRY};
