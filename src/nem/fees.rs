//! Message sizing and the NEM transfer-message fee schedule.

use super::{FeeSchedule, MessageSizer};

/// A message fee is charged per started 32-byte chunk of payload.
pub const FEE_CHUNK_BYTES: usize = 32;
/// Fee per chunk, in µXEM (0.05 XEM).
pub const FEE_PER_CHUNK_MICRO_XEM: u64 = 50_000;

/// Sizes plain (unencrypted) messages: NIS counts the UTF-8 payload bytes,
/// so multi-byte characters weigh more than one.
#[derive(Debug, Clone, Copy)]
pub struct PlainMessageSizer;

impl MessageSizer for PlainMessageSizer {
    fn byte_length(&self, message: &str) -> usize {
        message.len()
    }
}

/// The post-0.6.93 NIS message fee schedule.
#[derive(Debug, Clone, Copy)]
pub struct MessageFeeSchedule;

impl FeeSchedule for MessageFeeSchedule {
    fn fee_for(&self, byte_length: usize) -> u64 {
        if byte_length == 0 {
            return 0;
        }
        FEE_PER_CHUNK_MICRO_XEM * (byte_length as u64 / FEE_CHUNK_BYTES as u64 + 1)
    }
}
