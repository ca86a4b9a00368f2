//! Demo scripts - sample programs expressed as data.
//!
//! A script is a JSON document listing console operations in order. A file
//! may hold one script object or an array of them.
//!
//! ```json
//! {
//!   "name": "hello",
//!   "steps": [
//!     { "op": "clear" },
//!     { "op": "line", "text": "Hello BBC Micro!" },
//!     { "op": "wait_key" }
//!   ]
//! }
//! ```

use std::io::Read;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::console::Console;
use crate::device::OsDevice;
use crate::error::{ConioError, ConioResult};
use crate::mos::vdu::screen_columns;

/// Mode the machine is in before a script selects one.
pub const DEFAULT_MODE: u8 = 7;

/// One console operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Clear,
    Mode {
        mode: u8,
    },
    Color {
        color: u8,
    },
    Goto {
        x: u8,
        y: u8,
    },
    /// Text plus line feed.
    Line {
        text: String,
    },
    /// Text only, written verbatim.
    Text {
        text: String,
    },
    /// Line padded to the middle of the current mode's width.
    Centered {
        text: String,
    },
    /// Box outline drawn with `+`, `-` and `|`.
    Frame {
        x: u8,
        y: u8,
        width: u8,
        height: u8,
        #[serde(default)]
        color: Option<u8>,
    },
    WaitKey,
    Repeat {
        times: u32,
        steps: Vec<Step>,
    },
}

/// A named list of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub steps: Vec<Step>,
}

/// What a script run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Sum of the counts returned by the line output calls.
    pub bytes_written: usize,
    /// Keys read by `wait_key` steps, in order.
    pub keys: Vec<u8>,
}

impl Script {
    /// Parse and validate a single script.
    pub fn from_json(text: &str) -> ConioResult<Self> {
        let script: Script = serde_json::from_str(text)?;
        script.validate()?;
        Ok(script)
    }

    /// Reject steps the runner could not draw.
    pub fn validate(&self) -> ConioResult<()> {
        validate_steps(&self.name, &self.steps)
    }

    /// Run every step against a console.
    pub fn run<D: OsDevice>(&self, console: &mut Console<D>) -> RunReport {
        info!("Running script: {}", self.name);
        let mut runner = Runner {
            console,
            mode: DEFAULT_MODE,
            report: RunReport::default(),
        };
        runner.run_steps(&self.steps);
        info!(
            "Script {} finished ({} bytes written, {} keys)",
            self.name,
            runner.report.bytes_written,
            runner.report.keys.len()
        );
        runner.report
    }
}

fn validate_steps(name: &str, steps: &[Step]) -> ConioResult<()> {
    for step in steps {
        match step {
            Step::Line { text } | Step::Text { text } | Step::Centered { text } => {
                if text.contains('\0') {
                    return Err(ConioError::Script(format!(
                        "{}: text contains a NUL byte",
                        name
                    )));
                }
                if !text.is_ascii() {
                    return Err(ConioError::Script(format!(
                        "{}: text must be ASCII, got {:?}",
                        name, text
                    )));
                }
            }
            Step::Frame {
                x,
                y,
                width,
                height,
                ..
            } => {
                if *width < 2 || *height < 2 {
                    return Err(ConioError::Script(format!(
                        "{}: frame must be at least 2x2, got {}x{}",
                        name, width, height
                    )));
                }
                if u16::from(*x) + u16::from(*width) > 256
                    || u16::from(*y) + u16::from(*height) > 256
                {
                    return Err(ConioError::Script(format!(
                        "{}: frame at ({}, {}) runs off the screen",
                        name, x, y
                    )));
                }
            }
            Step::Repeat { steps, .. } => validate_steps(name, steps)?,
            _ => {}
        }
    }
    Ok(())
}

/// Script execution state.
struct Runner<'a, D: OsDevice> {
    console: &'a mut Console<D>,
    mode: u8,
    report: RunReport,
}

impl<D: OsDevice> Runner<'_, D> {
    fn run_steps(&mut self, steps: &[Step]) {
        for step in steps {
            self.run_step(step);
        }
    }

    fn run_step(&mut self, step: &Step) {
        debug!("[SCRIPT] {:?}", step);
        match step {
            Step::Clear => self.console.clear(),
            Step::Mode { mode } => {
                self.mode = *mode;
                self.console.set_mode(*mode);
            }
            Step::Color { color } => self.console.set_color(*color),
            Step::Goto { x, y } => self.console.gotoxy(*x, *y),
            Step::Line { text } => self.line(text.as_bytes()),
            Step::Text { text } => self.text(text.as_bytes()),
            Step::Centered { text } => {
                let width = usize::from(screen_columns(self.mode));
                let pad = width.saturating_sub(text.len()) / 2;
                for _ in 0..pad {
                    self.text(b" ");
                }
                self.line(text.as_bytes());
            }
            Step::Frame {
                x,
                y,
                width,
                height,
                color,
            } => {
                if let Some(c) = color {
                    self.console.set_color(*c);
                }
                self.frame(*x, *y, *width, *height);
            }
            Step::WaitKey => {
                let key = self.console.read();
                debug!("[SCRIPT] key {:#04X}", key);
                self.report.keys.push(key);
            }
            Step::Repeat { times, steps } => {
                for _ in 0..*times {
                    self.run_steps(steps);
                }
            }
        }
    }

    fn line(&mut self, text: &[u8]) {
        self.report.bytes_written += self.console.put_line(text);
    }

    fn text(&mut self, text: &[u8]) {
        self.report.bytes_written += self.console.formatted_write(text, &[]);
    }

    fn frame(&mut self, x: u8, y: u8, width: u8, height: u8) {
        if width < 2 || height < 2 {
            return;
        }
        let right = x.saturating_add(width - 1);
        let bottom = y.saturating_add(height - 1);

        let mut edge = vec![b'-'; usize::from(width)];
        edge[0] = b'+';
        edge[usize::from(width) - 1] = b'+';

        self.console.gotoxy(x, y);
        self.text(&edge);
        for row in y.saturating_add(1)..bottom {
            self.console.gotoxy(x, row);
            self.text(b"|");
            self.console.gotoxy(right, row);
            self.text(b"|");
        }
        self.console.gotoxy(x, bottom);
        self.text(&edge);
    }
}

/// Load scripts from JSON. Accepts one script object or an array.
pub fn load_scripts<R: Read>(mut reader: R) -> ConioResult<Vec<Script>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let value: serde_json::Value = serde_json::from_str(&text)?;
    let scripts = if value.is_array() {
        serde_json::from_value::<Vec<Script>>(value)?
    } else {
        vec![serde_json::from_value::<Script>(value)?]
    };

    for script in &scripts {
        script.validate()?;
    }
    Ok(scripts)
}

/// Load the first script from JSON.
pub fn load_script<R: Read>(reader: R) -> ConioResult<Script> {
    load_scripts(reader)?
        .into_iter()
        .next()
        .ok_or_else(|| ConioError::Script("no scripts in file".to_string()))
}

/// Load a script from a file path.
pub fn load_script_from_path(path: &Path) -> ConioResult<Script> {
    let file = std::fs::File::open(path)?;
    load_script(std::io::BufReader::new(file))
}

/// Demos compiled into the library.
const BUILTIN_DEMOS: &[(&str, &str)] = &[
    ("hello", include_str!("../demos/hello.json")),
    ("showcase", include_str!("../demos/showcase.json")),
];

/// Names of the built-in demos.
pub fn builtin_names() -> Vec<&'static str> {
    BUILTIN_DEMOS.iter().map(|(name, _)| *name).collect()
}

/// Look up a built-in demo by name.
pub fn builtin(name: &str) -> ConioResult<Script> {
    BUILTIN_DEMOS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, json)| Script::from_json(json))
        .unwrap_or_else(|| Err(ConioError::UnknownDemo(name.to_string())))
}
