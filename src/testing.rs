//! Test-only sources

use std::io::{BufRead, Cursor, Read, Seek, SeekFrom};

/// Rewindable source whose contents are replaced on the first seek
///
/// Models an edge-list file rewritten between the count and fill passes.
pub(crate) struct ChangingSource {
    current: Cursor<&'static [u8]>,
    after_seek: Option<&'static [u8]>,
}

impl ChangingSource {
    pub(crate) fn new(before: &'static str, after: &'static str) -> Self {
        Self {
            current: Cursor::new(before.as_bytes()),
            after_seek: Some(after.as_bytes()),
        }
    }
}

impl Read for ChangingSource {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.current.read(buf)
    }
}

impl BufRead for ChangingSource {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        self.current.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.current.consume(amt);
    }
}

impl Seek for ChangingSource {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        if let Some(after) = self.after_seek.take() {
            self.current = Cursor::new(after);
        }
        self.current.seek(pos)
    }
}
