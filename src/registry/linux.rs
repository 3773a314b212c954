//! Linux and Android.
//!
//! TCP option numbers are arch-independent; the socket level and the tty-style
//! ioctls are not, so those come from `libc`.

use super::{Descriptor, Registry, IPPROTO_TCP};
use crate::info::RecordLayout;

const TCP_CORK: i32 = 0x3;
const TCP_KEEPIDLE: i32 = 0x4;
const TCP_KEEPINTVL: i32 = 0x5;
const TCP_KEEPCNT: i32 = 0x6;
const TCP_INFO: i32 = 0xb;
const TCP_NOTSENT_LOWAT: i32 = 0x19;

// SIOCINQ and SIOCOUTQ share their numbers with these.
const SIOCINQ: u64 = libc::FIONREAD as u64;
const SIOCOUTQ: u64 = libc::TIOCOUTQ as u64;

pub(super) const TABLE: Registry = Registry {
    buffered: Descriptor::Control { request: SIOCINQ },
    available: Descriptor::Headroom {
        level: libc::SOL_SOCKET,
        name: libc::SO_SNDBUF,
        request: SIOCOUTQ,
    },
    cork: Descriptor::Int {
        level: IPPROTO_TCP,
        name: TCP_CORK,
    },
    unsent_lowat: Descriptor::Int {
        level: IPPROTO_TCP,
        name: TCP_NOTSENT_LOWAT,
    },
    connection_info: Descriptor::Record {
        level: IPPROTO_TCP,
        name: TCP_INFO,
        layout: RecordLayout::LinuxTcpInfo,
    },
    keepalive_idle: Descriptor::Int {
        level: IPPROTO_TCP,
        name: TCP_KEEPIDLE,
    },
    keepalive_interval: Descriptor::Int {
        level: IPPROTO_TCP,
        name: TCP_KEEPINTVL,
    },
    keepalive_probes: Descriptor::Int {
        level: IPPROTO_TCP,
        name: TCP_KEEPCNT,
    },
};
