pub mod reader;
pub mod writer;

use std::collections::HashMap;

pub struct BytePacketBuffer {
    pub buf: [u8; 512],
    pub pos: usize,
    /// Offset -> decoded name, so a compression pointer jumping to an
    /// offset we've already decoded doesn't have to re-walk it.
    reading_labels: HashMap<usize, String>,
    /// Name -> first offset it was written at, so a repeated name is
    /// written as a compression pointer instead of being duplicated.
    writing_labels: HashMap<String, usize>,
}

impl Default for BytePacketBuffer {
    /// This gives us a fresh buffer for holding the packet contents, and a
    /// field for keeping track of where we are.
    fn default() -> Self {
        BytePacketBuffer {
            buf: [0; 512],
            pos: 0,
            reading_labels: HashMap::new(),
            writing_labels: HashMap::new(),
        }
    }
}

impl BytePacketBuffer {
    /// Wrap an already-filled buffer (as handed over by the UDP transport)
    /// for reading from position 0.
    pub fn new(buf: [u8; 512]) -> Self {
        Self {
            buf,
            ..Self::default()
        }
    }

    /// Current position within buffer
    pub fn pos(&self) -> usize {
        self.pos
    }
}
