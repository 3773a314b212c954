//! macOS, iOS and the other Apple targets

use super::{Descriptor, Registry, IPPROTO_TCP};
use crate::info::RecordLayout;

const SOL_SOCKET: i32 = 0xffff;
const SO_NREAD: i32 = 0x1020;

const TCP_NOPUSH: i32 = 0x4;
const TCP_KEEPALIVE: i32 = 0x10;
const TCP_KEEPINTVL: i32 = 0x101;
const TCP_KEEPCNT: i32 = 0x102;
const TCP_CONNECTION_INFO: i32 = 0x106;
const TCP_NOTSENT_LOWAT: i32 = 0x201;

pub(super) const TABLE: Registry = Registry {
    buffered: Descriptor::Int {
        level: SOL_SOCKET,
        name: SO_NREAD,
    },
    // SO_NWRITE reports unsent bytes, not free space.
    available: Descriptor::Unsupported,
    cork: Descriptor::Int {
        level: IPPROTO_TCP,
        name: TCP_NOPUSH,
    },
    unsent_lowat: Descriptor::Int {
        level: IPPROTO_TCP,
        name: TCP_NOTSENT_LOWAT,
    },
    connection_info: Descriptor::Record {
        level: IPPROTO_TCP,
        name: TCP_CONNECTION_INFO,
        layout: RecordLayout::DarwinConnectionInfo,
    },
    keepalive_idle: Descriptor::Int {
        level: IPPROTO_TCP,
        name: TCP_KEEPALIVE,
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
