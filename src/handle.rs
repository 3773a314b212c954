//! Raw handle access
//!
//! Every operation in this crate works on the OS-level descriptor of an
//! already-connected stream socket. The descriptor is only borrowed for the
//! duration of a call: it is never closed or duplicated here.

#[cfg(unix)]
use std::os::unix::io::{AsRawFd, RawFd};
#[cfg(windows)]
use std::os::windows::io::{AsRawSocket, RawSocket};

/// Platform-native socket descriptor
#[cfg(unix)]
pub type SocketHandle = RawFd;

/// Platform-native socket descriptor
#[cfg(windows)]
pub type SocketHandle = RawSocket;

/// Platform-native socket descriptor.
///
/// Targets without unix or windows sockets only get the all-unsupported
/// option table; implement [`AsSocketHandle`] by hand to call into it.
#[cfg(not(any(unix, windows)))]
pub type SocketHandle = i32;

/// Types that can lend their raw socket descriptor
///
/// Implemented for everything that exposes `AsRawFd` (unix) or
/// `AsRawSocket` (windows): `std::net::TcpStream`, `tokio::net::TcpStream`,
/// `socket2::Socket` and friends.
pub trait AsSocketHandle {
    /// Borrow the raw descriptor
    fn socket_handle(&self) -> SocketHandle;
}

#[cfg(unix)]
impl<T: AsRawFd + ?Sized> AsSocketHandle for T {
    #[inline]
    fn socket_handle(&self) -> SocketHandle {
        self.as_raw_fd()
    }
}

#[cfg(windows)]
impl<T: AsRawSocket + ?Sized> AsSocketHandle for T {
    #[inline]
    fn socket_handle(&self) -> SocketHandle {
        self.as_raw_socket()
    }
}
