//! Option Registry
//!
//! Maps each semantic [`Operation`] to the platform's [`Descriptor`]: the
//! `(level, name)` pair of a socket option, the request number of a
//! device-control call, or [`Descriptor::Unsupported`].
//!
//! Exactly one table is compiled for the build target and exposed as
//! [`REGISTRY`]. Support is a static property of the target; nothing is
//! probed at runtime.

use std::fmt;

use crate::info::RecordLayout;

#[cfg(any(target_os = "linux", target_os = "android"))]
mod linux;
#[cfg(target_vendor = "apple")]
mod darwin;
#[cfg(target_os = "freebsd")]
mod freebsd;
#[cfg(target_os = "netbsd")]
mod netbsd;
#[cfg(target_os = "openbsd")]
mod openbsd;
#[cfg(target_os = "dragonfly")]
mod dragonfly;
#[cfg(any(target_os = "solaris", target_os = "illumos"))]
mod solaris;
pub mod stub;


/// The option table compiled for this target
#[cfg(any(target_os = "linux", target_os = "android"))]
pub const REGISTRY: Registry = linux::TABLE;
#[cfg(target_vendor = "apple")]
pub const REGISTRY: Registry = darwin::TABLE;
#[cfg(target_os = "freebsd")]
pub const REGISTRY: Registry = freebsd::TABLE;
#[cfg(target_os = "netbsd")]
pub const REGISTRY: Registry = netbsd::TABLE;
#[cfg(target_os = "openbsd")]
pub const REGISTRY: Registry = openbsd::TABLE;
#[cfg(target_os = "dragonfly")]
pub const REGISTRY: Registry = dragonfly::TABLE;
#[cfg(any(target_os = "solaris", target_os = "illumos"))]
pub const REGISTRY: Registry = solaris::TABLE;
#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_vendor = "apple",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "dragonfly",
    target_os = "solaris",
    target_os = "illumos",
)))]
pub const REGISTRY: Registry = stub::TABLE;

/// Protocol level of TCP options (`IPPROTO_TCP`), identical on every
/// supported target.
#[allow(dead_code)]
pub(crate) const IPPROTO_TCP: i32 = 6;

/// Semantic socket operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Bytes received but not yet read by the application
    BufferedCount,
    /// Bytes that can still be written before send-buffer backpressure
    AvailableCount,
    /// Withhold partial segments until uncorked
    Cork,
    /// Unsent-data low-water mark
    BufferOptions,
    /// Kernel TCP connection statistics
    ConnectionInfo,
    /// Idle time before the first keep-alive probe
    KeepAliveIdle,
    /// Time between keep-alive probes
    KeepAliveInterval,
    /// Unanswered probes before the connection is dropped
    KeepAliveProbes,
}

impl Operation {
    /// Every operation, in declaration order
    pub const ALL: [Operation; 8] = [
        Operation::BufferedCount,
        Operation::AvailableCount,
        Operation::Cork,
        Operation::BufferOptions,
        Operation::ConnectionInfo,
        Operation::KeepAliveIdle,
        Operation::KeepAliveInterval,
        Operation::KeepAliveProbes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::BufferedCount => "buffered count",
            Operation::AvailableCount => "available count",
            Operation::Cork => "cork",
            Operation::BufferOptions => "buffer options",
            Operation::ConnectionInfo => "connection info",
            Operation::KeepAliveIdle => "keep-alive idle",
            Operation::KeepAliveInterval => "keep-alive interval",
            Operation::KeepAliveProbes => "keep-alive probes",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// How one operation is carried out on one platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descriptor {
    /// The platform has no mechanism for the operation
    Unsupported,
    /// Socket option whose value is a C `int`
    Int { level: i32, name: i32 },
    /// Device-control request that fills a C `int`
    Control { request: u64 },
    /// Capacity read from an `int` option minus the count a device-control
    /// request reports as queued
    Headroom { level: i32, name: i32, request: u64 },
    /// Socket option that returns a fixed-layout kernel record
    Record {
        level: i32,
        name: i32,
        layout: RecordLayout,
    },
}

impl Descriptor {
    #[inline]
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Descriptor::Unsupported)
    }
}

/// Per-platform option table, one field per [`Operation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registry {
    pub buffered: Descriptor,
    pub available: Descriptor,
    pub cork: Descriptor,
    pub unsent_lowat: Descriptor,
    pub connection_info: Descriptor,
    pub keepalive_idle: Descriptor,
    pub keepalive_interval: Descriptor,
    pub keepalive_probes: Descriptor,
}

impl Registry {
    /// Look up the descriptor for `op`
    #[inline]
    pub const fn resolve(&self, op: Operation) -> Descriptor {
        match op {
            Operation::BufferedCount => self.buffered,
            Operation::AvailableCount => self.available,
            Operation::Cork => self.cork,
            Operation::BufferOptions => self.unsent_lowat,
            Operation::ConnectionInfo => self.connection_info,
            Operation::KeepAliveIdle => self.keepalive_idle,
            Operation::KeepAliveInterval => self.keepalive_interval,
            Operation::KeepAliveProbes => self.keepalive_probes,
        }
    }

    /// Operations this table can perform
    pub fn supported(&self) -> impl Iterator<Item = Operation> + '_ {
        Operation::ALL
            .into_iter()
            .filter(move |op| self.resolve(*op).is_supported())
    }
}
