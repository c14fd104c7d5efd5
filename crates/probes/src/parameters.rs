//! Burst of fixed-layout parameter records.
//!
//! Each record is twelve bytes in host byte order with no padding:
//!
//! | offset | type  | field         |
//! |--------|-------|---------------|
//! | 0      | `i16` | record type   |
//! | 2      | `i16` | payload words |
//! | 4      | `i32` | parameter id  |
//! | 8      | `i32` | value         |

use std::thread;

use device::{DeviceHandle, StreamPair, WriteAttempt};
use logging::{trace_probe, trace_transfer};

use crate::outcome::{FailureReason, ProbeOutcome};
use crate::settings::ParameterMessageSettings;

/// Record type tag of a parameter message.
pub const PARAMETER_MESSAGE_TYPE: i16 = 0x0400;

/// Encoded size of one record.
pub const PARAMETER_MESSAGE_LEN: usize = 12;

/// One parameter record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParameterMessage {
    /// Parameter identifier.
    pub id: i32,
    /// Parameter value.
    pub value: i32,
}

impl ParameterMessage {
    /// The `index`-th record of a burst: id `index`, value `index << 2`.
    #[must_use]
    pub const fn nth(index: i32) -> Self {
        Self {
            id: index,
            value: index << 2,
        }
    }

    /// Host-order encoding.
    #[must_use]
    pub fn encode(&self) -> [u8; PARAMETER_MESSAGE_LEN] {
        let mut record = [0u8; PARAMETER_MESSAGE_LEN];
        record[0..2].copy_from_slice(&PARAMETER_MESSAGE_TYPE.to_ne_bytes());
        record[2..4].copy_from_slice(&2i16.to_ne_bytes());
        record[4..8].copy_from_slice(&self.id.to_ne_bytes());
        record[8..12].copy_from_slice(&self.value.to_ne_bytes());
        record
    }
}

/// Emits `settings.count` records through a non-blocking synchronous handle,
/// syncing after every `settings.batch` records.
pub fn write_parameter_messages(
    streams: &StreamPair,
    settings: &ParameterMessageSettings,
) -> ProbeOutcome {
    run_parameter_messages(streams, settings).into()
}

fn run_parameter_messages(
    streams: &StreamPair,
    settings: &ParameterMessageSettings,
) -> Result<(), FailureReason> {
    let mut output = streams.open_output_nonblocking()?;
    let batch = settings.batch.max(1);
    let mut offset = 0u64;

    for index in 0..settings.count {
        let record = ParameterMessage::nth(i32::from(index)).encode();
        write_record(&mut output, &record, offset, settings)?;
        offset += PARAMETER_MESSAGE_LEN as u64;

        if (usize::from(index) + 1).is_multiple_of(batch) {
            sync_batch(&mut output);
        }
    }

    trace_probe!("{} parameter records written", settings.count);
    output.close();
    Ok(())
}

fn write_record(
    output: &mut DeviceHandle,
    record: &[u8],
    offset: u64,
    settings: &ParameterMessageSettings,
) -> Result<(), FailureReason> {
    let mut retries = 0u32;
    loop {
        match output.try_write(record)? {
            WriteAttempt::Written(written) if written == record.len() => return Ok(()),
            WriteAttempt::Written(written) => {
                return Err(FailureReason::ShortWrite {
                    offset,
                    requested: record.len(),
                    written,
                });
            }
            WriteAttempt::WouldBlock if retries >= settings.max_retries => {
                return Err(FailureReason::Stalled {
                    attempts: retries + 1,
                });
            }
            WriteAttempt::WouldBlock => {
                retries += 1;
                trace_transfer!("record at offset {offset} would block, retry {retries}");
                thread::sleep(settings.retry_pause);
            }
        }
    }
}

// Pipes and character devices without a sync hook reject fsync.
fn sync_batch(output: &mut DeviceHandle) {
    if let Err(err) = output.sync() {
        tracing::warn!(target: "lpc::device", "{err}");
    }
}
