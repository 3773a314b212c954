use std::io;

use libc::{c_int, c_void, socklen_t};
use tracing::trace;

use crate::handle::SocketHandle;

/// `setsockopt(2)` with `value` as the option payload
pub(crate) fn set_option(
    handle: SocketHandle,
    level: c_int,
    name: c_int,
    value: &[u8],
) -> io::Result<()> {
    trace!(handle, level, name, len = value.len(), "setsockopt");

    // SAFETY: `value` is a live slice and its length is passed alongside it.
    let ret = unsafe {
        libc::setsockopt(
            handle,
            level,
            name,
            value.as_ptr() as *const c_void,
            value.len() as socklen_t,
        )
    };
    if ret != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// `getsockopt(2)` into a buffer of exactly `len` bytes.
///
/// The returned buffer is truncated to the length the kernel reported, so a
/// short record is visible to the caller.
pub(crate) fn get_option(
    handle: SocketHandle,
    level: c_int,
    name: c_int,
    len: usize,
) -> io::Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    let mut optlen = len as socklen_t;
    trace!(handle, level, name, len, "getsockopt");

    // SAFETY: `buf` holds `optlen` writable bytes; the kernel never writes past it.
    let ret = unsafe {
        libc::getsockopt(
            handle,
            level,
            name,
            buf.as_mut_ptr() as *mut c_void,
            &mut optlen,
        )
    };
    if ret != 0 {
        return Err(io::Error::last_os_error());
    }
    buf.truncate(optlen as usize);
    Ok(buf)
}

/// `ioctl(2)` whose argument is an output buffer of `len` bytes
pub(crate) fn control(handle: SocketHandle, request: u64, len: usize) -> io::Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    trace!(handle, request, len, "ioctl");

    // SAFETY: every request routed here writes at most a C `int`, and callers
    // size `buf` for it.
    let ret = unsafe { libc::ioctl(handle, request as _, buf.as_mut_ptr() as *mut c_void) };
    if ret == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(buf)
}
