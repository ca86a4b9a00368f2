//! Acorn MOS Console Runtime Core
//!
//! This crate provides the console layer a small program needs on a machine
//! whose only I/O is a handful of fixed OS entry points:
//! - Device call boundary (OSWRCH / OSRDCH)
//! - Character, screen control and line output primitives
//! - Zero-terminated byte string and memory block primitives
//! - VDU stream decoding for devices that render the output
//!
//! # Architecture
//!
//! Control only flows downward:
//! - `OsDevice` trait: the two MOS entry points, register-passed
//! - `Console`: explicit device handle carrying every primitive
//! - `cstr`: string/memory primitives, independent of any device
//! - `Script`: demo programs as data, run against a `Console`

pub mod console;
pub mod cstr;
pub mod device;
pub mod error;
mod line;
pub mod mos;
pub mod screen;
pub mod script;

pub use console::Console;
pub use device::{HeadlessDevice, OsDevice};
pub use error::{ConioError, ConioResult};
pub use mos::{OsCall, Registers, VduCommand, VduDecoder};
pub use script::{
    builtin, builtin_names, load_script, load_script_from_path, load_scripts, RunReport, Script,
    Step,
};
