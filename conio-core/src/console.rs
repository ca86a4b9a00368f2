//! Console handle - character primitives over an `OsDevice`.
//!
//! Every primitive in this crate is a method on `Console`, so the device is
//! always passed explicitly and two consoles never share hidden state.
//! Screen control and line output live in `screen` and `line`.

use log::trace;

use crate::device::OsDevice;
use crate::error::{ConioError, ConioResult};
use crate::mos::vdu::{CR, LF};
use crate::mos::{OsCall, Registers};

/// The console device handle.
pub struct Console<D: OsDevice> {
    device: D,
}

impl<D: OsDevice> Console<D> {
    /// Take ownership of a device.
    pub fn new(device: D) -> Self {
        Self { device }
    }

    /// Get device reference.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Get mutable device reference.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Give the device back.
    pub fn into_device(self) -> D {
        self.device
    }

    /// Write one byte through OSWRCH.
    pub fn write(&mut self, byte: u8) {
        self.device.oswrch(&Registers::with_a(byte));
    }

    /// Write every byte of a slice, in order.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write(b);
        }
    }

    /// Read one key through OSRDCH. Blocks until a key event.
    pub fn read(&mut self) -> u8 {
        let mut regs = Registers::default();
        self.device.osrdch(&mut regs);

        // The key only exists in A; take it before anything reuses regs.
        let key = regs.result();

        trace!("[MOS] OSRDCH -> {:#04X} (carry={})", key, regs.carry);
        key
    }

    /// Blocking key read.
    pub fn getkey(&mut self) -> u8 {
        self.read()
    }

    /// Read a key only if one is already waiting.
    pub fn inkey(&mut self) -> Option<u8> {
        if self.device.key_available() {
            Some(self.read())
        } else {
            None
        }
    }

    /// OSNEWL: line feed then carriage return.
    pub fn newline(&mut self) {
        self.dispatch(OsCall::Newl, &mut Registers::default());
    }

    /// OSCRLF: carriage return then line feed.
    pub fn crlf(&mut self) {
        self.dispatch(OsCall::Crlf, &mut Registers::default());
    }

    /// Call a MOS entry point by address, as `JSR vector` would.
    pub fn call(&mut self, vector: u16, regs: &mut Registers) -> ConioResult<()> {
        let call = OsCall::try_from(vector).map_err(ConioError::UnknownVector)?;
        trace!("[MOS] {} (A={:#04X})", call.name(), regs.a);
        self.dispatch(call, regs);
        Ok(())
    }

    fn dispatch(&mut self, call: OsCall, regs: &mut Registers) {
        match call {
            OsCall::Wrch => self.device.oswrch(regs),
            OsCall::Rdch => self.device.osrdch(regs),
            OsCall::Newl => {
                self.write(LF);
                self.write(CR);
            }
            OsCall::Crlf => {
                self.write(CR);
                self.write(LF);
            }
        }
    }
}
