//! MOS console CLI - Run console demo scripts in a terminal.
//!
//! Usage:
//!   conio [script.json] [--demo NAME] [--list] [--trace]
//!
//! Examples:
//!   conio                        # Run the built-in "hello" demo
//!   conio --demo showcase        # Run another built-in demo
//!   conio menu.json              # Run a script from disk
//!   conio --list                 # List built-in demos

use std::io::Write;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, disable_raw_mode, enable_raw_mode, ClearType},
};
use log::{info, trace, warn};
use tokio::sync::mpsc as tokio_mpsc;

use conio_core::mos::ESCAPE;
use conio_core::{
    builtin, builtin_names, load_script_from_path, Console, OsDevice, Registers, Script,
    VduCommand, VduDecoder,
};

/// MOS console CLI
#[derive(Parser, Debug)]
#[command(name = "conio")]
#[command(about = "Run MOS console demo scripts")]
struct Args {
    /// Script file (JSON) to run
    script: Option<PathBuf>,

    /// Built-in demo to run when no script file is given
    #[arg(short, long, default_value = "hello")]
    demo: String,

    /// List built-in demos and exit
    #[arg(short, long)]
    list: bool,

    /// Enable OS call tracing
    #[arg(short, long)]
    trace: bool,
}

/// Terminal-backed device: renders the VDU stream with crossterm and reads
/// keys from a channel fed by the terminal event task.
struct TerminalDevice {
    /// Receiver for keyboard input
    key_rx: mpsc::Receiver<u8>,
    /// Pending keys (buffered)
    key_buffer: Vec<u8>,
    /// VDU stream state
    vdu: VduDecoder,
}

impl TerminalDevice {
    fn new(key_rx: mpsc::Receiver<u8>) -> Self {
        Self {
            key_rx,
            key_buffer: Vec::new(),
            vdu: VduDecoder::new(),
        }
    }
}

impl OsDevice for TerminalDevice {
    fn oswrch(&mut self, regs: &Registers) {
        if let Some(command) = self.vdu.feed(regs.a) {
            let stdout = std::io::stdout();
            if let Err(e) = render(&mut stdout.lock(), command) {
                warn!("Terminal write failed: {}", e);
            }
        }
    }

    fn osrdch(&mut self, regs: &mut Registers) {
        // First check buffer
        if !self.key_buffer.is_empty() {
            regs.a = self.key_buffer.remove(0);
            regs.carry = false;
            return;
        }

        // Blocking receive
        match self.key_rx.recv() {
            Ok(ch) => {
                regs.a = ch;
                regs.carry = false;
            }
            Err(_) => {
                // Input closed
                regs.a = ESCAPE;
                regs.carry = true;
            }
        }
    }

    fn key_available(&mut self) -> bool {
        if let Ok(ch) = self.key_rx.try_recv() {
            self.key_buffer.push(ch);
        }
        !self.key_buffer.is_empty()
    }
}

/// Draw one VDU command on a terminal writer.
fn render<W: Write>(out: &mut W, command: VduCommand) -> std::io::Result<()> {
    match command {
        VduCommand::Print(ch) => queue!(out, Print(ch as char))?,
        // Lines end in a bare LF; raw mode needs the CR, and a real newline
        // scrolls at the bottom row
        VduCommand::LineFeed => out.write_all(b"\r\n")?,
        VduCommand::CarriageReturn => queue!(out, cursor::MoveToColumn(0))?,
        VduCommand::Back => queue!(out, cursor::MoveLeft(1))?,
        VduCommand::Forward => queue!(out, cursor::MoveRight(1))?,
        VduCommand::Up => queue!(out, cursor::MoveUp(1))?,
        VduCommand::Home => queue!(out, cursor::MoveTo(0, 0))?,
        VduCommand::Delete => out.write_all(b"\x08 \x08")?,
        VduCommand::Bell => out.write_all(b"\x07")?,
        VduCommand::Clear => queue!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?,
        VduCommand::MoveTo { column, row } => {
            queue!(out, cursor::MoveTo(u16::from(column), u16::from(row)))?
        }
        VduCommand::Colour(c) => {
            let colour = bbc_colour(c);
            if c >= 128 {
                queue!(out, SetBackgroundColor(colour))?
            } else {
                queue!(out, SetForegroundColor(colour))?
            }
        }
        VduCommand::Mode(mode) => {
            // A mode change clears the screen and restores default colours
            trace!("[VDU] MODE {}", mode);
            queue!(
                out,
                ResetColor,
                terminal::Clear(ClearType::All),
                cursor::MoveTo(0, 0)
            )?
        }
        VduCommand::Other(code) => trace!("[VDU] ignored VDU {}", code),
    }
    out.flush()
}

/// Logical colour to terminal colour. Bit 7 selects background.
fn bbc_colour(c: u8) -> Color {
    match c & 7 {
        0 => Color::Black,
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Blue,
        5 => Color::Magenta,
        6 => Color::Cyan,
        _ => Color::White,
    }
}

/// Translate crossterm key events to MOS key codes.
fn translate_key(code: KeyCode, modifiers: KeyModifiers) -> Option<u8> {
    // Handle control characters
    if modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char(c) = code {
            let upper = c.to_ascii_uppercase();
            if upper.is_ascii_uppercase() {
                return Some(upper as u8 - 64); // Ctrl+A=1, Ctrl+C=3, etc.
            }
        }
    }

    match code {
        KeyCode::Char(c) if c.is_ascii() => Some(c as u8),
        KeyCode::Enter => Some(13),
        KeyCode::Backspace => Some(127), // DELETE key
        KeyCode::Tab => Some(9),
        KeyCode::Esc => Some(ESCAPE),
        // Cursor keys in *FX 4,1 mode
        KeyCode::Left => Some(136),
        KeyCode::Right => Some(137),
        KeyCode::Down => Some(138),
        KeyCode::Up => Some(139),
        // f0-f9 as soft keys &80-&89
        KeyCode::F(n) if n <= 9 => Some(0x80 + n),
        _ => None,
    }
}

fn select_script(args: &Args) -> Result<Script, Box<dyn std::error::Error>> {
    match &args.script {
        Some(path) => {
            let script = load_script_from_path(path)?;
            info!("Loaded script: {} ({} steps)", script.name, script.steps.len());
            Ok(script)
        }
        None => Ok(builtin(&args.demo)?),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.trace {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Info
    };
    colog::default_builder().filter_level(level).init();

    if args.list {
        for name in builtin_names() {
            let script = builtin(name)?;
            println!(
                "{:<10} {}",
                name,
                script.description.as_deref().unwrap_or("")
            );
        }
        return Ok(());
    }

    let script = select_script(&args)?;

    // Create channel for keyboard input
    let (key_tx, key_rx) = mpsc::channel::<u8>();

    // Create shutdown signal
    let (shutdown_tx, mut shutdown_rx) = tokio_mpsc::channel::<()>(1);

    let device = TerminalDevice::new(key_rx);

    // Enable raw mode (gracefully handle non-TTY)
    let raw_mode_enabled = enable_raw_mode().is_ok();

    // Run the script in a blocking task; OSRDCH blocks its thread
    let run_handle = tokio::task::spawn_blocking(move || {
        let mut console = Console::new(device);
        script.run(&mut console)
    });

    // Spawn terminal input reader
    let input_handle = tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    break;
                }
                _ = tokio::time::sleep(Duration::from_millis(10)) => {
                    // Poll for terminal events
                    if event::poll(Duration::from_millis(0)).unwrap_or(false) {
                        if let Ok(Event::Key(key_event)) = event::read() {
                            let pressed = key_event.kind == KeyEventKind::Press;
                            if let Some(ch) = translate_key(key_event.code, key_event.modifiers).filter(|_| pressed) {
                                if key_tx.send(ch).is_err() {
                                    break; // Channel closed
                                }
                            }
                        }
                    }
                }
            }
        }
    });

    // Wait for the script to finish
    let result = run_handle.await;

    // Signal input handler to stop
    let _ = shutdown_tx.send(()).await;
    let _ = input_handle.await;

    // Disable raw mode if we enabled it
    if raw_mode_enabled {
        let _ = disable_raw_mode();
    }
    println!();

    let report = result?;
    info!(
        "Finished: {} bytes written, {} keys read",
        report.bytes_written,
        report.keys.len()
    );

    Ok(())
}
