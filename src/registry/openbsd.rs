use super::{Descriptor, Registry, IPPROTO_TCP};

const FIONREAD: u64 = 0x4004_667f;

const TCP_NOPUSH: i32 = 0x10;

pub(super) const TABLE: Registry = Registry {
    buffered: Descriptor::Control { request: FIONREAD },
    available: Descriptor::Unsupported,
    cork: Descriptor::Int {
        level: IPPROTO_TCP,
        name: TCP_NOPUSH,
    },
    unsent_lowat: Descriptor::Unsupported,
    connection_info: Descriptor::Unsupported,
    keepalive_idle: Descriptor::Unsupported,
    keepalive_interval: Descriptor::Unsupported,
    keepalive_probes: Descriptor::Unsupported,
};
