//! Console over real byte streams
//!
//! The CLI wires stdin (or an `--input` file) and a buffered stdout into a
//! [`StreamConsole`].

use super::{read_byte, read_int, Console, ConsoleError};
use std::io::{BufRead, Write};

/// [`Console`] over any buffered reader and writer
pub struct StreamConsole<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> StreamConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        StreamConsole { reader, writer }
    }

    /// Give back the writer, e.g. to inspect a `Vec<u8>` sink
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Console for StreamConsole<R, W> {
    // Output printed before a read (a prompt) must be visible while blocked
    fn get_int(&mut self) -> Result<i32, ConsoleError> {
        self.writer.flush()?;
        read_int(&mut self.reader)
    }

    fn get_char(&mut self) -> Result<u8, ConsoleError> {
        self.writer.flush()?;
        read_byte(&mut self.reader)
    }

    fn put_bytes(&mut self, bytes: &[u8]) -> Result<(), ConsoleError> {
        self.writer.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ConsoleError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_stream_console_round_trip() {
        let mut console = StreamConsole::new(Cursor::new(b"12 z".to_vec()), Vec::new());

        assert_eq!(console.get_int().unwrap(), 12);
        assert_eq!(console.get_char().unwrap(), b' ');
        assert_eq!(console.get_char().unwrap(), b'z');
        console.put_bytes(b"ok\n").unwrap();
        console.flush().unwrap();

        assert_eq!(console.into_writer(), b"ok\n".to_vec());
    }

    /// Writer that keeps flushed and unflushed bytes apart
    #[derive(Default)]
    struct FlushLog {
        pending: Vec<u8>,
        flushed: Vec<u8>,
    }

    impl Write for FlushLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.pending.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed.append(&mut self.pending);
            Ok(())
        }
    }

    #[test]
    fn test_prompt_flushed_before_read() {
        let mut console = StreamConsole::new(Cursor::new(b"5".to_vec()), FlushLog::default());

        console.put_bytes(b"n? ").unwrap();
        assert_eq!(console.get_int().unwrap(), 5);

        let log = console.into_writer();
        assert_eq!(log.flushed, b"n? ".to_vec());
        assert!(log.pending.is_empty());
    }
}
