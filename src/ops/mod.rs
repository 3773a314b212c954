//! Semantic socket operations
//!
//! Each operation resolves its descriptor in the target's [`REGISTRY`],
//! performs at most one syscall round trip (two for [`Descriptor::Headroom`])
//! and interprets the result. Unsupported descriptors short-circuit with
//! [`Error::Unsupported`] before any syscall.
//!
//! The operations are available as free functions and as methods through
//! [`TcpOptionsExt`].

use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::handle::{AsSocketHandle, SocketHandle};
use crate::info::ConnectionInfo;
use crate::registry::{Descriptor, Operation, Registry, REGISTRY};
use crate::sys;

#[cfg(test)]
mod tests;

const C_INT: usize = std::mem::size_of::<i32>();

/// Send-buffer tuning applied by [`set_buffer_options`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferOptions {
    /// Unsent-data low-water mark in bytes. Once at least this many bytes
    /// are queued but unsent, the socket stops reporting itself writable.
    pub unsent_threshold: u32,
}

/// Withhold partial segments until [`uncork`] is called
pub fn cork<S: AsSocketHandle + ?Sized>(sock: &S) -> Result<()> {
    set_cork(&REGISTRY, sock.socket_handle(), true)
}

/// Release withheld data and transmit it immediately
pub fn uncork<S: AsSocketHandle + ?Sized>(sock: &S) -> Result<()> {
    set_cork(&REGISTRY, sock.socket_handle(), false)
}

/// Bytes received by the kernel but not yet read by the application
pub fn buffered<S: AsSocketHandle + ?Sized>(sock: &S) -> Result<usize> {
    query_count(&REGISTRY, sock.socket_handle(), Operation::BufferedCount)
}

/// Bytes that can still be written before the send buffer is full
pub fn available<S: AsSocketHandle + ?Sized>(sock: &S) -> Result<usize> {
    query_count(&REGISTRY, sock.socket_handle(), Operation::AvailableCount)
}

/// Apply the unsent-data low-water mark
pub fn set_buffer_options<S: AsSocketHandle + ?Sized>(
    sock: &S,
    opts: &BufferOptions,
) -> Result<()> {
    apply_buffer_options(&REGISTRY, sock.socket_handle(), opts)
}

/// Fresh snapshot of the kernel's TCP statistics for this connection
pub fn connection_info<S: AsSocketHandle + ?Sized>(sock: &S) -> Result<ConnectionInfo> {
    query_info(&REGISTRY, sock.socket_handle())
}

/// Idle time before the first keep-alive probe, rounded up to whole seconds
pub fn set_keepalive_idle<S: AsSocketHandle + ?Sized>(sock: &S, idle: Duration) -> Result<()> {
    set_int(
        &REGISTRY,
        sock.socket_handle(),
        Operation::KeepAliveIdle,
        whole_seconds(idle)?,
    )
}

/// Time between keep-alive probes, rounded up to whole seconds
pub fn set_keepalive_interval<S: AsSocketHandle + ?Sized>(
    sock: &S,
    interval: Duration,
) -> Result<()> {
    set_int(
        &REGISTRY,
        sock.socket_handle(),
        Operation::KeepAliveInterval,
        whole_seconds(interval)?,
    )
}

/// Unanswered keep-alive probes before the connection is dropped
pub fn set_keepalive_probes<S: AsSocketHandle + ?Sized>(sock: &S, probes: u32) -> Result<()> {
    let probes = i32::try_from(probes)
        .map_err(|_| Error::InvalidArgument("keep-alive probe count exceeds i32::MAX"))?;
    set_int(
        &REGISTRY,
        sock.socket_handle(),
        Operation::KeepAliveProbes,
        probes,
    )
}

/// Socket operations as methods on any connected stream.
///
/// Inherent methods of the same name (e.g. `socket2::Socket::cork`) take
/// precedence; call the free functions in that case.
pub trait TcpOptionsExt: AsSocketHandle {
    fn cork(&self) -> Result<()> {
        cork(self)
    }

    fn uncork(&self) -> Result<()> {
        uncork(self)
    }

    fn buffered(&self) -> Result<usize> {
        buffered(self)
    }

    fn available(&self) -> Result<usize> {
        available(self)
    }

    fn set_buffer_options(&self, opts: &BufferOptions) -> Result<()> {
        set_buffer_options(self, opts)
    }

    fn connection_info(&self) -> Result<ConnectionInfo> {
        connection_info(self)
    }

    fn set_keepalive_idle(&self, idle: Duration) -> Result<()> {
        set_keepalive_idle(self, idle)
    }

    fn set_keepalive_interval(&self, interval: Duration) -> Result<()> {
        set_keepalive_interval(self, interval)
    }

    fn set_keepalive_probes(&self, probes: u32) -> Result<()> {
        set_keepalive_probes(self, probes)
    }
}

impl<T: AsSocketHandle + ?Sized> TcpOptionsExt for T {}

// ============================================================================
// Registry-parameterised implementations
// ============================================================================

pub(crate) fn set_cork(registry: &Registry, handle: SocketHandle, on: bool) -> Result<()> {
    set_int(registry, handle, Operation::Cork, i32::from(on))
}

pub(crate) fn apply_buffer_options(
    registry: &Registry,
    handle: SocketHandle,
    opts: &BufferOptions,
) -> Result<()> {
    let threshold = i32::try_from(opts.unsent_threshold)
        .map_err(|_| Error::InvalidArgument("unsent threshold exceeds i32::MAX"))?;
    set_int(registry, handle, Operation::BufferOptions, threshold)
}

pub(crate) fn set_int(
    registry: &Registry,
    handle: SocketHandle,
    op: Operation,
    value: i32,
) -> Result<()> {
    match registry.resolve(op) {
        Descriptor::Int { level, name } => {
            sys::set_option(handle, level, name, &value.to_ne_bytes())?;
            Ok(())
        }
        // Only plain int options can be written.
        _ => Err(Error::Unsupported(op)),
    }
}

pub(crate) fn query_count(
    registry: &Registry,
    handle: SocketHandle,
    op: Operation,
) -> Result<usize> {
    let n = match registry.resolve(op) {
        Descriptor::Int { level, name } => get_int(handle, level, name)?,
        Descriptor::Control { request } => control_int(handle, request)?,
        Descriptor::Headroom {
            level,
            name,
            request,
        } => {
            let capacity = get_int(handle, level, name)?;
            let queued = control_int(handle, request)?;
            capacity.saturating_sub(queued)
        }
        Descriptor::Record { .. } | Descriptor::Unsupported => {
            return Err(Error::Unsupported(op))
        }
    };
    Ok(non_negative(op, n))
}

pub(crate) fn query_info(registry: &Registry, handle: SocketHandle) -> Result<ConnectionInfo> {
    match registry.resolve(Operation::ConnectionInfo) {
        Descriptor::Record {
            level,
            name,
            layout,
        } => {
            let buf = sys::get_option(handle, level, name, layout.size())?;
            layout.decode(&buf)
        }
        _ => Err(Error::Unsupported(Operation::ConnectionInfo)),
    }
}

fn get_int(handle: SocketHandle, level: i32, name: i32) -> Result<i32> {
    let buf = sys::get_option(handle, level, name, C_INT)?;
    decode_int(&buf)
}

fn control_int(handle: SocketHandle, request: u64) -> Result<i32> {
    let buf = sys::control(handle, request, C_INT)?;
    decode_int(&buf)
}

/// Counts are never negative; a negative reading means nothing is queued.
fn non_negative(op: Operation, n: i32) -> usize {
    usize::try_from(n).unwrap_or_else(|_| {
        debug!(%op, count = n, "kernel reported a negative count, using 0");
        0
    })
}

fn decode_int(buf: &[u8]) -> Result<i32> {
    let bytes: [u8; C_INT] = buf.try_into().map_err(|_| Error::Decode {
        what: "int",
        expected: C_INT,
        actual: buf.len(),
    })?;
    Ok(i32::from_ne_bytes(bytes))
}

/// Round up to whole seconds, the unit every keep-alive option takes
fn whole_seconds(d: Duration) -> Result<i32> {
    let secs = d.as_secs() + u64::from(d.subsec_nanos() > 0);
    i32::try_from(secs).map_err(|_| Error::InvalidArgument("duration exceeds i32::MAX seconds"))
}
