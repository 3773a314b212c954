//! Darwin `struct tcp_connection_info`
//!
//! Layout (112 bytes, native byte order):
//!
//! ```text
//! 0   state, snd_wscale, rcv_wscale, pad   4 x u8
//! 4   options .. rttvar                    12 x u32
//! 52  TFO bitfield word                    u32
//! 56  txpackets .. txretransmitpackets     7 x u64
//! ```

use std::time::Duration;

use bytes::Buf;
use serde::Serialize;

use super::skip_pad;

/// Decoded Darwin `tcp_connection_info`.
///
/// RTT fields are in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TcpConnectionInfo {
    pub state: u8,
    pub snd_wscale: u8,
    pub rcv_wscale: u8,
    pub options: u32,
    pub flags: u32,
    pub rto: u32,
    pub maxseg: u32,
    pub snd_ssthresh: u32,
    pub snd_cwnd: u32,
    pub snd_wnd: u32,
    /// Bytes in the send buffer, including in-flight data
    pub snd_sbbytes: u32,
    pub rcv_wnd: u32,
    pub rttcur: u32,
    pub srtt: u32,
    pub rttvar: u32,
    /// TCP Fast Open status bits, one bit per `tcpi_tfo_*` field
    pub tfo: u32,
    pub txpackets: u64,
    pub txbytes: u64,
    pub txretransmitbytes: u64,
    pub rxpackets: u64,
    pub rxbytes: u64,
    pub rxoutoforderbytes: u64,
    pub txretransmitpackets: u64,
}

impl TcpConnectionInfo {
    pub const SIZE: usize = 0x70;

    /// Caller guarantees `buf.len() == SIZE`
    pub(super) fn read(mut buf: &[u8]) -> Self {
        let state = buf.get_u8();
        let snd_wscale = buf.get_u8();
        let rcv_wscale = buf.get_u8();
        skip_pad(&mut buf, 1);

        TcpConnectionInfo {
            state,
            snd_wscale,
            rcv_wscale,
            options: buf.get_u32_ne(),
            flags: buf.get_u32_ne(),
            rto: buf.get_u32_ne(),
            maxseg: buf.get_u32_ne(),
            snd_ssthresh: buf.get_u32_ne(),
            snd_cwnd: buf.get_u32_ne(),
            snd_wnd: buf.get_u32_ne(),
            snd_sbbytes: buf.get_u32_ne(),
            rcv_wnd: buf.get_u32_ne(),
            rttcur: buf.get_u32_ne(),
            srtt: buf.get_u32_ne(),
            rttvar: buf.get_u32_ne(),
            tfo: buf.get_u32_ne(),
            txpackets: buf.get_u64_ne(),
            txbytes: buf.get_u64_ne(),
            txretransmitbytes: buf.get_u64_ne(),
            rxpackets: buf.get_u64_ne(),
            rxbytes: buf.get_u64_ne(),
            rxoutoforderbytes: buf.get_u64_ne(),
            txretransmitpackets: buf.get_u64_ne(),
        }
    }

    /// Smoothed round-trip time
    pub fn rtt(&self) -> Duration {
        Duration::from_millis(self.srtt.into())
    }

    pub fn rtt_var(&self) -> Duration {
        Duration::from_millis(self.rttvar.into())
    }

    pub fn rto(&self) -> Duration {
        Duration::from_millis(self.rto.into())
    }
}
