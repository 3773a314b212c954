//! Linux `struct tcp_info`
//!
//! Layout (144 bytes, native byte order):
//!
//! ```text
//! 0   state, ca_state, retransmits, probes, backoff, options   6 x u8
//! 6   snd_wscale:4 rcv_wscale:4, delivery_rate_app_limited:1  2 bytes (skipped)
//! 8   rto .. total_retrans                                     24 x u32
//! 104 pacing_rate, max_pacing_rate, bytes_acked, bytes_received 4 x u64
//! 136 segs_out, segs_in                                        2 x u32
//! ```
//!
//! Newer kernels append fields after `segs_in`; asking for exactly this many
//! bytes makes them report this prefix.

use std::time::Duration;

use bytes::Buf;
use serde::Serialize;

use super::skip_pad;

/// Congestion-avoidance state (`tcpi_ca_state`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CaState {
    Open,
    Disorder,
    Cwr,
    Recovery,
    Loss,
    /// A state this crate does not know about
    Unknown(u8),
}

impl From<u8> for CaState {
    fn from(v: u8) -> Self {
        match v {
            0 => CaState::Open,
            1 => CaState::Disorder,
            2 => CaState::Cwr,
            3 => CaState::Recovery,
            4 => CaState::Loss,
            other => CaState::Unknown(other),
        }
    }
}

/// Options negotiated on the connection (`tcpi_options`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct TcpiOptions(u8);

impl TcpiOptions {
    pub const TIMESTAMPS: TcpiOptions = TcpiOptions(0x1);
    pub const SACK: TcpiOptions = TcpiOptions(0x2);
    pub const WSCALE: TcpiOptions = TcpiOptions(0x4);
    pub const ECN: TcpiOptions = TcpiOptions(0x8);
    pub const ECN_SEEN: TcpiOptions = TcpiOptions(0x10);
    pub const SYN_DATA: TcpiOptions = TcpiOptions(0x20);

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        TcpiOptions(bits)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: TcpiOptions) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Decoded Linux `tcp_info`.
///
/// Times are in microseconds except the `last_*` fields, which the kernel
/// reports in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TcpInfo {
    /// TCP state (`TCP_ESTABLISHED` = 1, ...)
    pub state: u8,
    pub ca_state: u8,
    pub retransmits: u8,
    pub probes: u8,
    pub backoff: u8,
    pub options: TcpiOptions,
    pub rto: u32,
    pub ato: u32,
    pub snd_mss: u32,
    pub rcv_mss: u32,
    pub unacked: u32,
    pub sacked: u32,
    pub lost: u32,
    pub retrans: u32,
    pub fackets: u32,
    pub last_data_sent: u32,
    pub last_ack_sent: u32,
    pub last_data_recv: u32,
    pub last_ack_recv: u32,
    pub pmtu: u32,
    pub rcv_ssthresh: u32,
    pub rtt: u32,
    pub rttvar: u32,
    pub snd_ssthresh: u32,
    pub snd_cwnd: u32,
    pub advmss: u32,
    pub reordering: u32,
    pub rcv_rtt: u32,
    pub rcv_space: u32,
    pub total_retrans: u32,
    /// Bytes per second
    pub pacing_rate: u64,
    pub max_pacing_rate: u64,
    pub bytes_acked: u64,
    pub bytes_received: u64,
    pub segs_out: u32,
    pub segs_in: u32,
}

impl TcpInfo {
    pub const SIZE: usize = 0x90;

    /// Caller guarantees `buf.len() == SIZE`
    pub(super) fn read(mut buf: &[u8]) -> Self {
        let state = buf.get_u8();
        let ca_state = buf.get_u8();
        let retransmits = buf.get_u8();
        let probes = buf.get_u8();
        let backoff = buf.get_u8();
        let options = TcpiOptions(buf.get_u8());
        skip_pad(&mut buf, 2);

        TcpInfo {
            state,
            ca_state,
            retransmits,
            probes,
            backoff,
            options,
            rto: buf.get_u32_ne(),
            ato: buf.get_u32_ne(),
            snd_mss: buf.get_u32_ne(),
            rcv_mss: buf.get_u32_ne(),
            unacked: buf.get_u32_ne(),
            sacked: buf.get_u32_ne(),
            lost: buf.get_u32_ne(),
            retrans: buf.get_u32_ne(),
            fackets: buf.get_u32_ne(),
            last_data_sent: buf.get_u32_ne(),
            last_ack_sent: buf.get_u32_ne(),
            last_data_recv: buf.get_u32_ne(),
            last_ack_recv: buf.get_u32_ne(),
            pmtu: buf.get_u32_ne(),
            rcv_ssthresh: buf.get_u32_ne(),
            rtt: buf.get_u32_ne(),
            rttvar: buf.get_u32_ne(),
            snd_ssthresh: buf.get_u32_ne(),
            snd_cwnd: buf.get_u32_ne(),
            advmss: buf.get_u32_ne(),
            reordering: buf.get_u32_ne(),
            rcv_rtt: buf.get_u32_ne(),
            rcv_space: buf.get_u32_ne(),
            total_retrans: buf.get_u32_ne(),
            pacing_rate: buf.get_u64_ne(),
            max_pacing_rate: buf.get_u64_ne(),
            bytes_acked: buf.get_u64_ne(),
            bytes_received: buf.get_u64_ne(),
            segs_out: buf.get_u32_ne(),
            segs_in: buf.get_u32_ne(),
        }
    }

    pub fn congestion_state(&self) -> CaState {
        CaState::from(self.ca_state)
    }

    /// Smoothed round-trip time
    pub fn rtt(&self) -> Duration {
        Duration::from_micros(self.rtt.into())
    }

    pub fn rtt_var(&self) -> Duration {
        Duration::from_micros(self.rttvar.into())
    }

    /// Retransmission timeout
    pub fn rto(&self) -> Duration {
        Duration::from_micros(self.rto.into())
    }

    /// Delayed-ACK timeout
    pub fn ato(&self) -> Duration {
        Duration::from_micros(self.ato.into())
    }
}
