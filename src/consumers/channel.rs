//! Consumer that forwards entries over a channel

use crate::core::{Consumer, Entry, FlogError, Result};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};

/// Forwards a copy of every accepted entry to a [`Receiver`].
///
/// Useful for handing entries to another thread (a UI, a test) without
/// writing a bespoke consumer. A full bounded channel or a dropped receiver
/// is reported as a consumer error and the entry is skipped; the drain
/// thread never blocks on the receiving side.
pub struct ChannelConsumer {
    sender: Sender<Entry>,
}

impl ChannelConsumer {
    pub fn new(sender: Sender<Entry>) -> Self {
        Self { sender }
    }

    pub fn unbounded() -> (Self, Receiver<Entry>) {
        let (sender, receiver) = unbounded();
        (Self::new(sender), receiver)
    }

    pub fn bounded(capacity: usize) -> (Self, Receiver<Entry>) {
        let (sender, receiver) = bounded(capacity);
        (Self::new(sender), receiver)
    }
}

impl Consumer for ChannelConsumer {
    fn consume(&mut self, entry: &Entry) -> Result<()> {
        match self.sender.try_send(entry.clone()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(FlogError::consumer("channel", "channel full")),
            Err(TrySendError::Disconnected(_)) => {
                Err(FlogError::consumer("channel", "receiver disconnected"))
            }
        }
    }

    fn name(&self) -> &str {
        "channel"
    }
}
