use super::{Descriptor, Registry, IPPROTO_TCP};

const FIONREAD: u64 = 0x4004_667f;
const FIONSPACE: u64 = 0x4004_6676;

const TCP_NOPUSH: i32 = 0x4;
const TCP_KEEPIDLE: i32 = 0x100;
const TCP_KEEPINTVL: i32 = 0x200;
const TCP_KEEPCNT: i32 = 0x400;

pub(super) const TABLE: Registry = Registry {
    buffered: Descriptor::Control { request: FIONREAD },
    available: Descriptor::Control { request: FIONSPACE },
    cork: Descriptor::Int {
        level: IPPROTO_TCP,
        name: TCP_NOPUSH,
    },
    unsent_lowat: Descriptor::Unsupported,
    connection_info: Descriptor::Unsupported,
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
