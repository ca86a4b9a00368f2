//! VDU control code stream decoding.
//!
//! Everything written through OSWRCH is a VDU stream: printable bytes plus
//! control codes, some of which consume the bytes that follow them.
//!
//! Codes used by the console runtime:
//! - 10: Line feed
//! - 12: Clear text area
//! - 13: Carriage return
//! - 17 c: Set text colour (c >= 128 selects background)
//! - 22 m: Select screen mode
//! - 31 x y: Move text cursor to column x, row y
//!
//! The remaining codes are decoded only far enough to swallow their
//! parameter bytes.

/// Clear text area.
pub const CLS: u8 = 12;
/// Carriage return.
pub const CR: u8 = 13;
/// Line feed.
pub const LF: u8 = 10;
/// Set text colour, followed by one colour byte.
pub const COLOUR: u8 = 17;
/// Select mode, followed by one mode byte.
pub const MODE: u8 = 22;
/// Move text cursor, followed by column then row.
pub const TAB: u8 = 31;

/// Largest parameter block any VDU code takes (VDU 23).
const MAX_PARAMS: usize = 9;

/// Number of parameter bytes that follow a VDU code.
pub fn param_count(code: u8) -> usize {
    match code {
        1 | 17 | 22 => 1,
        18 | 31 => 2,
        28 | 29 => 4,
        19 | 25 => 5,
        24 => 8,
        23 => 9,
        _ => 0,
    }
}

/// Text columns available in a screen mode.
pub fn screen_columns(mode: u8) -> u8 {
    match mode & 7 {
        0 | 3 => 80,
        2 | 5 => 20,
        _ => 40,
    }
}

/// Text rows available in a screen mode.
pub fn screen_rows(mode: u8) -> u8 {
    match mode & 7 {
        3 | 6 | 7 => 25,
        _ => 32,
    }
}

/// A complete VDU command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VduCommand {
    /// Printable character.
    Print(u8),
    /// VDU 7
    Bell,
    /// VDU 8: cursor back one column
    Back,
    /// VDU 9: cursor forward one column
    Forward,
    /// VDU 10
    LineFeed,
    /// VDU 11: cursor up one row
    Up,
    /// VDU 12
    Clear,
    /// VDU 13
    CarriageReturn,
    /// VDU 17
    Colour(u8),
    /// VDU 22
    Mode(u8),
    /// VDU 30: cursor to top left
    Home,
    /// VDU 31
    MoveTo { column: u8, row: u8 },
    /// VDU 127: backspace and erase
    Delete,
    /// Any other control code, parameters already consumed.
    Other(u8),
}

/// Byte-at-a-time VDU decoder.
#[derive(Debug, Default, Clone)]
pub struct VduDecoder {
    code: u8,
    params: [u8; MAX_PARAMS],
    wanted: usize,
    have: usize,
}

impl VduDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no control code is waiting for parameters.
    pub fn is_idle(&self) -> bool {
        self.wanted == 0
    }

    /// Feed one byte. Returns a command once it is complete.
    pub fn feed(&mut self, byte: u8) -> Option<VduCommand> {
        if self.wanted > 0 {
            self.params[self.have] = byte;
            self.have += 1;
            if self.have < self.wanted {
                return None;
            }
            let code = self.code;
            self.wanted = 0;
            self.have = 0;
            return Some(self.finish(code));
        }

        if byte < 32 {
            let wanted = param_count(byte);
            if wanted > 0 {
                self.code = byte;
                self.wanted = wanted;
                self.have = 0;
                return None;
            }
        }

        Some(match byte {
            7 => VduCommand::Bell,
            8 => VduCommand::Back,
            9 => VduCommand::Forward,
            LF => VduCommand::LineFeed,
            11 => VduCommand::Up,
            CLS => VduCommand::Clear,
            CR => VduCommand::CarriageReturn,
            30 => VduCommand::Home,
            127 => VduCommand::Delete,
            0..=31 => VduCommand::Other(byte),
            _ => VduCommand::Print(byte),
        })
    }

    fn finish(&self, code: u8) -> VduCommand {
        match code {
            COLOUR => VduCommand::Colour(self.params[0]),
            MODE => VduCommand::Mode(self.params[0]),
            TAB => VduCommand::MoveTo {
                column: self.params[0],
                row: self.params[1],
            },
            _ => VduCommand::Other(code),
        }
    }

    /// Decode a whole byte sequence.
    pub fn decode_all(&mut self, bytes: &[u8]) -> Vec<VduCommand> {
        bytes.iter().filter_map(|&b| self.feed(b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_passthrough() {
        let mut vdu = VduDecoder::new();
        assert_eq!(
            vdu.decode_all(b"Hi"),
            vec![VduCommand::Print(b'H'), VduCommand::Print(b'i')]
        );
    }

    #[test]
    fn test_move_to_waits_for_both_params() {
        let mut vdu = VduDecoder::new();
        assert_eq!(vdu.feed(TAB), None);
        assert!(!vdu.is_idle());
        assert_eq!(vdu.feed(5), None);
        assert_eq!(
            vdu.feed(7),
            Some(VduCommand::MoveTo { column: 5, row: 7 })
        );
        assert!(vdu.is_idle());
    }

    #[test]
    fn test_parameter_bytes_are_not_printed() {
        // COLOUR 65 must not print 'A'
        let mut vdu = VduDecoder::new();
        assert_eq!(vdu.decode_all(&[COLOUR, b'A']), vec![VduCommand::Colour(b'A')]);
    }

    #[test]
    fn test_unrendered_codes_swallow_params() {
        // VDU 23 takes nine bytes
        let mut vdu = VduDecoder::new();
        let mut stream = vec![23];
        stream.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0, 0]);
        stream.push(b'X');
        assert_eq!(
            vdu.decode_all(&stream),
            vec![VduCommand::Other(23), VduCommand::Print(b'X')]
        );
    }

    #[test]
    fn test_control_codes() {
        let mut vdu = VduDecoder::new();
        assert_eq!(
            vdu.decode_all(&[CLS, CR, LF, MODE, 7, 127]),
            vec![
                VduCommand::Clear,
                VduCommand::CarriageReturn,
                VduCommand::LineFeed,
                VduCommand::Mode(7),
                VduCommand::Delete,
            ]
        );
    }

    #[test]
    fn test_screen_geometry() {
        assert_eq!(screen_columns(7), 40);
        assert_eq!(screen_columns(0), 80);
        assert_eq!(screen_columns(2), 20);
        assert_eq!(screen_rows(7), 25);
        assert_eq!(screen_rows(1), 32);
    }
}
