use super::{Descriptor, Registry};

const FIONREAD: u64 = 0x4004_667f;
const FIONSPACE: u64 = 0x4004_6678;

pub(super) const TABLE: Registry = Registry {
    buffered: Descriptor::Control { request: FIONREAD },
    available: Descriptor::Control { request: FIONSPACE },
    cork: Descriptor::Unsupported,
    unsent_lowat: Descriptor::Unsupported,
    connection_info: Descriptor::Unsupported,
    keepalive_idle: Descriptor::Unsupported,
    keepalive_interval: Descriptor::Unsupported,
    keepalive_probes: Descriptor::Unsupported,
};
