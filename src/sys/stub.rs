//! Backend for targets without the BSD socket-option family.
//!
//! These targets compile the all-unsupported registry, so the façade never
//! routes a request here.

use std::io;

use crate::handle::SocketHandle;

pub(crate) fn set_option(_: SocketHandle, _: i32, _: i32, _: &[u8]) -> io::Result<()> {
    Err(io::ErrorKind::Unsupported.into())
}

pub(crate) fn get_option(_: SocketHandle, _: i32, _: i32, _: usize) -> io::Result<Vec<u8>> {
    Err(io::ErrorKind::Unsupported.into())
}

pub(crate) fn control(_: SocketHandle, _: u64, _: usize) -> io::Result<Vec<u8>> {
    Err(io::ErrorKind::Unsupported.into())
}
