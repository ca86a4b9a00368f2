//! Line-oriented output.

use std::fmt;

use crate::console::Console;
use crate::cstr;
use crate::device::OsDevice;
use crate::mos::vdu::LF;

impl<D: OsDevice> Console<D> {
    /// Write a byte string followed by a line feed (`puts`).
    ///
    /// Returns `length(s) + 1`.
    pub fn put_line(&mut self, s: &[u8]) -> usize {
        let text = cstr::content(s);
        self.write_bytes(text);
        self.write(LF);
        text.len() + 1
    }

    /// `printf` without substitution.
    ///
    /// Writes `template` exactly as given, `%` markers included, and
    /// nothing after it. `args` are ignored. Returns `length(template)`.
    pub fn formatted_write(&mut self, template: &[u8], _args: &[&dyn fmt::Display]) -> usize {
        let text = cstr::content(template);
        self.write_bytes(text);
        text.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::console::Console;
    use crate::device::HeadlessDevice;

    #[test]
    fn test_put_line_hi() {
        let mut con = Console::new(HeadlessDevice::new());
        assert_eq!(con.put_line(b"Hi\0"), 3);
        assert_eq!(con.device().output(), b"Hi\n");
    }

    #[test]
    fn test_put_line_empty() {
        let mut con = Console::new(HeadlessDevice::new());
        assert_eq!(con.put_line(b"\0"), 1);
        assert_eq!(con.device().output(), b"\n");
    }

    #[test]
    fn test_put_line_stops_at_terminator() {
        let mut con = Console::new(HeadlessDevice::new());
        assert_eq!(con.put_line(b"ab\0cd"), 3);
        assert_eq!(con.device().output(), b"ab\n");
    }

    #[test]
    fn test_formatted_write_is_literal() {
        let mut con = Console::new(HeadlessDevice::new());
        let n = con.formatted_write(b"You pressed: %c (ASCII %d)\0", &[&'A', &65]);
        assert_eq!(n, 26);
        assert_eq!(con.device().output_string(), "You pressed: %c (ASCII %d)");
    }

    #[quickcheck_macros::quickcheck]
    fn prop_put_line_emits_text_then_terminator(s: Vec<u8>) -> bool {
        let text: Vec<u8> = s.into_iter().filter(|&b| b != 0).collect();
        let mut con = Console::new(HeadlessDevice::new());
        let n = con.put_line(&text);

        let mut expected = text.clone();
        expected.push(b'\n');
        n == text.len() + 1 && con.device().output() == expected.as_slice()
    }
}
