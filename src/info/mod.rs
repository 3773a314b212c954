//! Kernel connection-info records
//!
//! Each platform exports its own fixed-layout TCP statistics record. The
//! decoders here read those records field by field at their ABI offsets, in
//! native byte order, skipping padding. Both layouts compile on every target;
//! the registry decides which one the current target asks the kernel for.
//!
//! There is no cross-platform normalisation of fields: a Linux `tcp_info` and
//! a Darwin `tcp_connection_info` are surfaced as-is through
//! [`ConnectionInfo`].

use std::fmt;

use bytes::Buf;
use serde::Serialize;

use crate::error::{Error, Result};

mod darwin;
mod linux;


pub use darwin::TcpConnectionInfo;
pub use linux::{CaState, TcpInfo, TcpiOptions};

/// Identifies one platform's record layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordLayout {
    /// Linux `struct tcp_info` as of the `tcpi_segs_in` field
    LinuxTcpInfo,
    /// Darwin `struct tcp_connection_info`
    DarwinConnectionInfo,
}

impl RecordLayout {
    /// Exact record size in bytes
    pub const fn size(self) -> usize {
        match self {
            RecordLayout::LinuxTcpInfo => TcpInfo::SIZE,
            RecordLayout::DarwinConnectionInfo => TcpConnectionInfo::SIZE,
        }
    }

    /// C name of the record
    pub const fn name(self) -> &'static str {
        match self {
            RecordLayout::LinuxTcpInfo => "tcp_info",
            RecordLayout::DarwinConnectionInfo => "tcp_connection_info",
        }
    }

    /// Decode a record of this layout.
    ///
    /// Fails with [`Error::Decode`] unless `buf` is exactly [`size`](Self::size)
    /// bytes long.
    pub fn decode(self, buf: &[u8]) -> Result<ConnectionInfo> {
        check_len(self, buf)?;
        Ok(match self {
            RecordLayout::LinuxTcpInfo => ConnectionInfo::Linux(TcpInfo::read(buf)),
            RecordLayout::DarwinConnectionInfo => {
                ConnectionInfo::Darwin(TcpConnectionInfo::read(buf))
            }
        })
    }
}

impl fmt::Display for RecordLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Snapshot of kernel TCP state for one connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum ConnectionInfo {
    Linux(TcpInfo),
    Darwin(TcpConnectionInfo),
}

impl ConnectionInfo {
    pub fn layout(&self) -> RecordLayout {
        match self {
            ConnectionInfo::Linux(_) => RecordLayout::LinuxTcpInfo,
            ConnectionInfo::Darwin(_) => RecordLayout::DarwinConnectionInfo,
        }
    }

    pub fn as_linux(&self) -> Option<&TcpInfo> {
        match self {
            ConnectionInfo::Linux(info) => Some(info),
            _ => None,
        }
    }

    pub fn as_darwin(&self) -> Option<&TcpConnectionInfo> {
        match self {
            ConnectionInfo::Darwin(info) => Some(info),
            _ => None,
        }
    }
}

fn check_len(layout: RecordLayout, buf: &[u8]) -> Result<()> {
    if buf.len() != layout.size() {
        return Err(Error::Decode {
            what: layout.name(),
            expected: layout.size(),
            actual: buf.len(),
        });
    }
    Ok(())
}

/// Skip `n` bytes of alignment padding
#[inline]
fn skip_pad(buf: &mut &[u8], n: usize) {
    buf.advance(n);
}
