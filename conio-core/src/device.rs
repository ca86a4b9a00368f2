//! Device call boundary.
//!
//! The `OsDevice` trait stands in for the two MOS entry points every other
//! part of the runtime goes through. Production code binds it to a real
//! terminal; tests bind it to `HeadlessDevice`.

use std::collections::VecDeque;

use crate::mos::{Registers, ESCAPE};

/// MOS character I/O entry points.
///
/// Arguments and results travel in the register file, as they do on the
/// machine. Both calls are infallible.
pub trait OsDevice: Send {
    /// OSWRCH: emit the byte held in A. Must not return before the byte
    /// has reached the device.
    fn oswrch(&mut self, regs: &Registers);

    /// OSRDCH: block until a key event, then leave the key code in A.
    /// Carry is set when the read was ended by Escape.
    fn osrdch(&mut self, regs: &mut Registers);

    /// Check if a key is waiting (non-blocking).
    fn key_available(&mut self) -> bool {
        false
    }
}

impl<T: OsDevice + ?Sized> OsDevice for Box<T> {
    fn oswrch(&mut self, regs: &Registers) {
        (**self).oswrch(regs)
    }

    fn osrdch(&mut self, regs: &mut Registers) {
        (**self).osrdch(regs)
    }

    fn key_available(&mut self) -> bool {
        (**self).key_available()
    }
}

/// Headless device for testing - records output, serves queued keys.
#[derive(Default)]
pub struct HeadlessDevice {
    output: Vec<u8>,
    input: VecDeque<u8>,
    reads: usize,
}

impl HeadlessDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-queued key events.
    pub fn with_input(input: &[u8]) -> Self {
        Self {
            input: input.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Queue key events.
    pub fn queue_input(&mut self, input: &[u8]) {
        self.input.extend(input.iter().copied());
    }

    /// Queue a string as key events.
    pub fn queue_string(&mut self, s: &str) {
        self.queue_input(s.as_bytes());
    }

    /// Every byte written so far, control codes included.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Get output as string (lossy UTF-8 conversion).
    pub fn output_string(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Clear output buffer.
    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// Number of OSRDCH calls served.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Key events not yet consumed.
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }
}

impl OsDevice for HeadlessDevice {
    fn oswrch(&mut self, regs: &Registers) {
        self.output.push(regs.a);
    }

    fn osrdch(&mut self, regs: &mut Registers) {
        self.reads += 1;
        match self.input.pop_front() {
            Some(key) => {
                regs.a = key;
                regs.carry = false;
            }
            None => {
                // Out of scripted keys: report Escape instead of blocking.
                regs.a = ESCAPE;
                regs.carry = true;
            }
        }
    }

    fn key_available(&mut self) -> bool {
        !self.input.is_empty()
    }
}
