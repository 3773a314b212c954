//! Table for targets with no native support for any operation.
//!
//! Compiled on every target so the degenerate behaviour stays testable.

use super::{Descriptor, Registry};

pub const TABLE: Registry = Registry {
    buffered: Descriptor::Unsupported,
    available: Descriptor::Unsupported,
    cork: Descriptor::Unsupported,
    unsent_lowat: Descriptor::Unsupported,
    connection_info: Descriptor::Unsupported,
    keepalive_idle: Descriptor::Unsupported,
    keepalive_interval: Descriptor::Unsupported,
    keepalive_probes: Descriptor::Unsupported,
};
