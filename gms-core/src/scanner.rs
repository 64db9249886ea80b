//! Whitespace-delimited token scanner
//!
//! Reads typed tokens from any `BufRead`. Every extraction skips leading
//! whitespace. A failed extraction (no token, malformed number, I/O error)
//! sets a sticky failed flag; while it is set every further extraction
//! returns `None` without touching the input. `clear` resets the flag.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Write a prompt and flush it so it shows before input is read
pub(crate) fn prompt<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}

/// Token reader with a sticky failure flag
pub struct InputScanner<R> {
    reader: R,
    failed: bool,
    error: Option<io::Error>,
}

impl<R: BufRead> InputScanner<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            failed: false,
            error: None,
        }
    }

    /// True once an extraction has failed or `set_failed` was called
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Mark the scanner failed; later extractions become no-ops
    pub fn set_failed(&mut self) {
        self.failed = true;
    }

    /// Reset the failed flag so extraction can resume
    pub fn clear(&mut self) {
        self.failed = false;
    }

    /// Take the I/O error that failed the scanner, if any
    pub fn take_io_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Read the next whitespace-delimited word
    pub fn read_word(&mut self) -> Option<String> {
        if self.failed {
            return None;
        }
        self.skip_whitespace();
        let bytes = self.take_while(|b| !b.is_ascii_whitespace());
        if bytes.is_empty() {
            self.failed = true;
            return None;
        }
        Some(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read the next non-whitespace character
    pub fn read_char(&mut self) -> Option<char> {
        if self.failed {
            return None;
        }
        self.skip_whitespace();
        match self.peek() {
            Some(byte) => {
                self.bump();
                Some(char::from(byte))
            }
            None => {
                self.failed = true;
                None
            }
        }
    }

    /// Read a signed decimal integer; stops at the first non-digit
    pub fn read_int(&mut self) -> Option<i32> {
        if self.failed {
            return None;
        }
        self.skip_whitespace();
        let mut text = self.sign();
        text.extend(self.take_while(|b| b.is_ascii_digit()));
        self.convert(&text)
    }

    /// Read a signed decimal number with an optional fractional part
    pub fn read_float(&mut self) -> Option<f64> {
        if self.failed {
            return None;
        }
        self.skip_whitespace();
        let mut text = self.sign();
        text.extend(self.take_while(|b| b.is_ascii_digit()));
        if self.peek() == Some(b'.') {
            self.bump();
            text.push(b'.');
            text.extend(self.take_while(|b| b.is_ascii_digit()));
        }
        self.convert(&text)
    }

    /// Discard everything up to and including the next newline.
    ///
    /// Runs whether or not the scanner has failed.
    pub fn discard_line(&mut self) {
        let mut skipped = Vec::new();
        if let Err(err) = self.reader.read_until(b'\n', &mut skipped) {
            self.record_error(err);
        }
    }

    fn peek(&mut self) -> Option<u8> {
        loop {
            let next = self.reader.fill_buf().map(|buf| buf.first().copied());
            match next {
                Ok(byte) => return byte,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.record_error(err);
                    return None;
                }
            }
        }
    }

    fn bump(&mut self) {
        self.reader.consume(1);
    }

    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.peek() {
            if !byte.is_ascii_whitespace() {
                break;
            }
            self.bump();
        }
    }

    fn take_while(&mut self, mut accept: impl FnMut(u8) -> bool) -> Vec<u8> {
        let mut bytes = Vec::new();
        while let Some(byte) = self.peek() {
            if !accept(byte) {
                break;
            }
            bytes.push(byte);
            self.bump();
        }
        bytes
    }

    fn sign(&mut self) -> Vec<u8> {
        match self.peek() {
            Some(byte @ (b'+' | b'-')) => {
                self.bump();
                vec![byte]
            }
            _ => Vec::new(),
        }
    }

    fn convert<T: FromStr>(&mut self, text: &[u8]) -> Option<T> {
        let parsed = std::str::from_utf8(text)
            .ok()
            .and_then(|s| s.parse::<T>().ok());
        if parsed.is_none() {
            self.failed = true;
        }
        parsed
    }

    fn record_error(&mut self, err: io::Error) {
        tracing::debug!(error = %err, "input stream failed");
        self.error = Some(err);
        self.failed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner(input: &str) -> InputScanner<&[u8]> {
        InputScanner::new(input.as_bytes())
    }

    #[test]
    fn test_read_mixed_tokens() {
        let mut input = scanner("  1234 water\n y 1.50 12 -3");

        assert_eq!(input.read_word().as_deref(), Some("1234"));
        assert_eq!(input.read_word().as_deref(), Some("water"));
        assert_eq!(input.read_char(), Some('y'));
        assert_eq!(input.read_float(), Some(1.5));
        assert_eq!(input.read_int(), Some(12));
        assert_eq!(input.read_int(), Some(-3));
        assert!(!input.failed());
    }

    #[test]
    fn test_int_stops_at_separator() {
        let mut input = scanner("2018/03/28");

        assert_eq!(input.read_int(), Some(2018));
        assert_eq!(input.read_char(), Some('/'));
        assert_eq!(input.read_int(), Some(3));
        assert_eq!(input.read_char(), Some('/'));
        assert_eq!(input.read_int(), Some(28));
    }

    #[test]
    fn test_failure_is_sticky_until_clear() {
        let mut input = scanner("abc 42");

        assert_eq!(input.read_int(), None);
        assert!(input.failed());
        assert_eq!(input.read_word(), None);

        input.clear();
        assert_eq!(input.read_word().as_deref(), Some("abc"));
        assert_eq!(input.read_int(), Some(42));
    }

    #[test]
    fn test_end_of_input_fails() {
        let mut input = scanner("   \n");
        assert_eq!(input.read_word(), None);
        assert!(input.failed());
    }

    #[test]
    fn test_discard_line_ignores_failure() {
        let mut input = scanner("x rest of line\nnext");

        input.set_failed();
        input.discard_line();
        input.clear();
        assert_eq!(input.read_word().as_deref(), Some("next"));
    }
}
