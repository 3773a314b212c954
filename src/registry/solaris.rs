use super::{Descriptor, Registry, IPPROTO_TCP};

const TCP_CORK: i32 = 0x18;

pub(super) const TABLE: Registry = Registry {
    buffered: Descriptor::Unsupported,
    available: Descriptor::Unsupported,
    cork: Descriptor::Int {
        level: IPPROTO_TCP,
        name: TCP_CORK,
    },
    unsent_lowat: Descriptor::Unsupported,
    connection_info: Descriptor::Unsupported,
    keepalive_idle: Descriptor::Unsupported,
    keepalive_interval: Descriptor::Unsupported,
    keepalive_probes: Descriptor::Unsupported,
};
