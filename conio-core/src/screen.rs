//! Screen control via VDU sequences.

use crate::console::Console;
use crate::device::OsDevice;
use crate::mos::vdu::{CLS, COLOUR, MODE, TAB};

/// Logical colours in the default palette.
pub mod colour {
    pub const BLACK: u8 = 0;
    pub const RED: u8 = 1;
    pub const GREEN: u8 = 2;
    pub const YELLOW: u8 = 3;
    pub const BLUE: u8 = 4;
    pub const MAGENTA: u8 = 5;
    pub const CYAN: u8 = 6;
    pub const WHITE: u8 = 7;
    /// Add to a colour to select it as background.
    pub const BACKGROUND: u8 = 128;
}

impl<D: OsDevice> Console<D> {
    /// Clear the text area (VDU 12).
    pub fn clear(&mut self) {
        self.write(CLS);
    }

    /// Move the text cursor (VDU 31, column, row).
    pub fn gotoxy(&mut self, column: u8, row: u8) {
        self.write(TAB);
        self.write(column);
        self.write(row);
    }

    /// Select a screen mode (VDU 22, mode).
    pub fn set_mode(&mut self, mode: u8) {
        self.write(MODE);
        self.write(mode);
    }

    /// Select a text colour (VDU 17, colour).
    pub fn set_color(&mut self, color: u8) {
        self.write(COLOUR);
        self.write(color);
    }
}
