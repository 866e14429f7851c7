//! Ingestion helpers for readers and byte-line streams.

use std::io::{self, BufRead, Read};

use bstr::io::BufReadExt;

use crate::entry::Entry;
use crate::error::HyperMinHashError;
use crate::sketch::Sketch;

/// Chunk size used when draining readers.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

impl Entry {
    /// Append the reader's entire contents to this entry, in
    /// [`DEFAULT_CHUNK_SIZE`] chunks. Returns the number of bytes read.
    pub fn add_reader<R: Read>(&mut self, mut reader: R) -> Result<u64, HyperMinHashError> {
        let mut chunk = [0u8; DEFAULT_CHUNK_SIZE];
        let mut total = 0u64;
        loop {
            let n = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            self.add_bytes(&chunk[..n]);
            total += n as u64;
        }
        Ok(total)
    }
}

impl Sketch {
    /// Observe the reader's entire contents as a single item, e.g. one
    /// file among many when counting distinct file contents. Returns the
    /// number of bytes read. On error the sketch is unchanged.
    pub fn add_reader<R: Read>(&mut self, reader: R) -> Result<u64, HyperMinHashError> {
        let mut entry = Entry::new();
        let total = entry.add_reader(reader)?;
        self.add_entry(&entry);
        Ok(total)
    }

    /// Observe each line of the reader as one item, so the sketch counts
    /// distinct lines. Terminators (`\n` or `\r\n`) are stripped and a
    /// file with DOS line endings sketches the same as its UNIX twin.
    /// Returns the number of lines read, duplicates included.
    pub fn count_lines<R: BufRead>(&mut self, reader: R) -> Result<u64, HyperMinHashError> {
        let mut lines = 0u64;
        reader.for_byte_line(|line| {
            self.add_bytes(line);
            lines += 1;
            Ok(true)
        })?;
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use proptest::{collection, prop_assert_eq, proptest};

    use super::*;

    #[test]
    fn reader_is_one_item() {
        let payload = vec![b'x'; 3 * DEFAULT_CHUNK_SIZE + 17];
        let mut via_reader = Sketch::new();
        let n = via_reader.add_reader(Cursor::new(&payload)).unwrap();
        assert_eq!(n, payload.len() as u64);
        assert_eq!(via_reader.len(), 1);

        let mut direct = Sketch::new();
        direct.add_bytes(&payload);
        assert_eq!(via_reader, direct);
    }

    #[test]
    fn entry_reader_extends_the_stream() {
        let mut entry = Entry::new();
        entry.add_bytes(b"prefix");
        entry.add_reader(Cursor::new(b"suffix".to_vec())).unwrap();

        let mut direct = Entry::new();
        direct.add_bytes(b"prefixsuffix");
        assert_eq!(entry, direct);
    }

    #[test]
    fn counts_distinct_lines() {
        let mut sk = Sketch::new();
        let lines = sk.count_lines(Cursor::new(b"a\nb\na\n".to_vec())).unwrap();
        assert_eq!(lines, 3);
        assert_eq!(sk.len(), 2);
    }

    #[test]
    fn line_endings_do_not_matter() {
        let mut unix = Sketch::new();
        unix.count_lines(Cursor::new(b"a\nbb\n".to_vec())).unwrap();
        let mut dos = Sketch::new();
        dos.count_lines(Cursor::new(b"a\r\nbb\r\n".to_vec())).unwrap();
        assert_eq!(unix, dos);
    }

    proptest! {
        #[test]
        fn reader_chunking_is_invisible(
            payload in collection::vec(proptest::num::u8::ANY, 0..(2 * DEFAULT_CHUNK_SIZE))
        ) {
            let mut entry = Entry::new();
            entry.add_reader(Cursor::new(payload.clone())).unwrap();
            let mut direct = Entry::new();
            direct.add_bytes(&payload);
            prop_assert_eq!(entry.digest(), direct.digest());
        }
    }
}
