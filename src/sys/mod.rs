//! Syscall invocation layer
//!
//! Thin wrappers that perform exactly one OS request against a raw handle:
//! set a socket option, read a socket option, or issue a device-control
//! request. OS failures come back as `io::Error` carrying the errno; nothing
//! is retried.

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub(crate) use unix::{control, get_option, set_option};

#[cfg(not(unix))]
mod stub;
#[cfg(not(unix))]
pub(crate) use stub::{control, get_option, set_option};
