//! Terminal handling with raw ANSI escape sequences
//! No external TUI libraries - just raw escape codes

use std::io::{self, Read, Write};
use std::os::unix::io::AsRawFd;
use std::sync::atomic::{AtomicI32, Ordering};

/// 16 color palette
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    LightMagenta = 13,
    Yellow = 14,
    White = 15,
    /// Windows 95 title bar navy
    Navy = 16,
    /// Windows 95 face gray
    Silver = 17,
    /// Dark mode window background
    Charcoal = 18,
}

impl Color {
    fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Black => (0x00, 0x00, 0x00),
            Color::Blue => (0x00, 0x00, 0xAA),
            Color::Green => (0x00, 0xAA, 0x00),
            Color::Cyan => (0x00, 0xAA, 0xAA),
            Color::Red => (0xAA, 0x00, 0x00),
            Color::Magenta => (0xAA, 0x00, 0xAA),
            Color::Brown => (0xAA, 0x55, 0x00),
            Color::LightGray => (0xAA, 0xAA, 0xAA),
            Color::DarkGray => (0x55, 0x55, 0x55),
            Color::LightBlue => (0x55, 0x55, 0xFF),
            Color::LightGreen => (0x55, 0xFF, 0x55),
            Color::LightCyan => (0x55, 0xFF, 0xFF),
            Color::LightRed => (0xFF, 0x55, 0x55),
            Color::LightMagenta => (0xFF, 0x55, 0xFF),
            Color::Yellow => (0xFF, 0xFF, 0x55),
            Color::White => (0xFF, 0xFF, 0xFF),
            Color::Navy => (0x00, 0x00, 0x80),
            Color::Silver => (0xC0, 0xC0, 0xC0),
            Color::Charcoal => (0x1E, 0x1E, 0x1E),
        }
    }

    /// ANSI SGR foreground code (true color)
    pub fn to_fg_sgr(self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("38;2;{};{};{}", r, g, b)
    }

    /// ANSI SGR background code (true color)
    pub fn to_bg_sgr(self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("48;2;{};{};{}", r, g, b)
    }
}

/// Text attributes beyond color
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Attrs {
    pub bold: bool,
    pub italic: bool,
}

impl Attrs {
    pub const NONE: Attrs = Attrs { bold: false, italic: false };
}

/// Mouse button
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
    None,
}

/// Mouse event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    pub button: MouseButton,
    pub row: u16,
    pub col: u16,
    pub pressed: bool, // true for press, false for release
    pub motion: bool,  // true if this is a motion event (drag)
}

/// Key events including special keys
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    ShiftTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    // Shift+navigation keys
    ShiftUp,
    ShiftDown,
    ShiftLeft,
    ShiftRight,
    ShiftHome,
    ShiftEnd,
    ShiftPageUp,
    ShiftPageDown,
    // Ctrl+navigation keys
    CtrlLeft,
    CtrlRight,
    CtrlHome,
    CtrlEnd,
    // Ctrl+Shift+navigation
    CtrlShiftLeft,
    CtrlShiftRight,
    CtrlShiftHome,
    CtrlShiftEnd,
    F(u8), // F1-F12
    Alt(char),
    Ctrl(char),
    CtrlShift(char),
    Mouse(MouseEvent),
    Unknown(Vec<u8>),
}

/// SIGTERM or SIGHUP number once one arrives, 0 before that
static TERMINATION: AtomicI32 = AtomicI32::new(0);

extern "C" fn on_termination(signal: libc::c_int) {
    TERMINATION.store(signal, Ordering::SeqCst);
}

/// Turn SIGTERM and SIGHUP into a flag the event loop polls, so the
/// terminal is restored on the way out
fn install_termination_handlers() {
    let handler = on_termination as extern "C" fn(libc::c_int) as libc::sighandler_t;
    unsafe {
        libc::signal(libc::SIGTERM, handler);
        libc::signal(libc::SIGHUP, handler);
    }
}

/// The termination signal received so far, if any
pub fn termination_signal() -> Option<i32> {
    match TERMINATION.load(Ordering::SeqCst) {
        0 => None,
        signal => Some(signal),
    }
}

/// Original terminal settings for restoration
static mut ORIG_TERMIOS: Option<libc::termios> = None;

/// Terminal state manager
pub struct Terminal {
    stdout: io::Stdout,
    width: u16,
    height: u16,
}

impl Terminal {
    /// Initialize terminal in raw mode
    pub fn new() -> io::Result<Self> {
        let mut term = Self {
            stdout: io::stdout(),
            width: 80,
            height: 25,
        };

        term.update_size();
        term.enable_raw_mode()?;
        install_termination_handlers();

        term.write_raw("\x1b[?1049h")?; // Alternate screen
        term.write_raw("\x1b[?25l")?; // Hide cursor
        term.write_raw("\x1b[?1002h")?; // Button-event mouse tracking (drag)
        term.write_raw("\x1b[?1006h")?; // SGR extended mouse mode
        term.write_raw("\x1b[>4;2m")?; // modifyOtherKeys mode 2 (xterm)
        term.write_raw("\x1b[>1u")?; // Kitty keyboard protocol
        term.write_raw("\x1b[2J")?;
        term.write_raw("\x1b[H")?;
        term.flush()?;

        Ok(term)
    }

    /// Get terminal dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Update terminal size from ioctl
    pub fn update_size(&mut self) {
        unsafe {
            let mut ws: libc::winsize = std::mem::zeroed();
            if libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
                self.width = ws.ws_col;
                self.height = ws.ws_row;
            }
        }
    }

    /// Enable raw mode (disable canonical mode, echo, etc.)
    fn enable_raw_mode(&self) -> io::Result<()> {
        unsafe {
            let fd = io::stdin().as_raw_fd();
            let mut termios: libc::termios = std::mem::zeroed();

            if libc::tcgetattr(fd, &mut termios) != 0 {
                return Err(io::Error::last_os_error());
            }

            ORIG_TERMIOS = Some(termios);

            termios.c_lflag &= !(libc::ECHO | libc::ICANON | libc::ISIG | libc::IEXTEN);
            termios.c_iflag &= !(libc::IXON | libc::ICRNL | libc::BRKINT | libc::INPCK | libc::ISTRIP);
            termios.c_oflag &= !libc::OPOST;
            termios.c_cflag |= libc::CS8;

            // VMIN=0, VTIME=0 means non-blocking read
            termios.c_cc[libc::VMIN] = 0;
            termios.c_cc[libc::VTIME] = 0;

            if libc::tcsetattr(fd, libc::TCSAFLUSH, &termios) != 0 {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(())
    }

    /// Disable raw mode (restore original settings)
    fn disable_raw_mode(&self) -> io::Result<()> {
        unsafe {
            if let Some(orig) = ORIG_TERMIOS {
                let fd = io::stdin().as_raw_fd();
                if libc::tcsetattr(fd, libc::TCSAFLUSH, &orig) != 0 {
                    return Err(io::Error::last_os_error());
                }
            }
        }
        Ok(())
    }

    /// Write raw bytes to terminal
    pub fn write_raw(&mut self, s: &str) -> io::Result<()> {
        self.stdout.write_all(s.as_bytes())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    /// Move cursor to position (1-based, like ANSI)
    pub fn goto(&mut self, row: u16, col: u16) -> io::Result<()> {
        write!(self.stdout, "\x1b[{};{}H", row, col)
    }

    /// Set colors and attributes. Starts from a reset so attributes never leak.
    pub fn set_style(&mut self, fg: Color, bg: Color, attrs: Attrs) -> io::Result<()> {
        let mut sgr = String::from("0;");
        if attrs.bold {
            sgr.push_str("1;");
        }
        if attrs.italic {
            sgr.push_str("3;");
        }
        write!(self.stdout, "\x1b[{}{};{}m", sgr, fg.to_fg_sgr(), bg.to_bg_sgr())
    }

    pub fn reset_colors(&mut self) -> io::Result<()> {
        self.write_raw("\x1b[0m")
    }

    pub fn clear(&mut self) -> io::Result<()> {
        self.write_raw("\x1b[2J\x1b[H")
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        self.write_raw("\x1b[?25h")
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        self.write_raw("\x1b[?25l")
    }

    /// Set the window title (OSC 2)
    pub fn set_title(&mut self, title: &str) -> io::Result<()> {
        let clean: String = title.chars().filter(|c| !c.is_control()).collect();
        write!(self.stdout, "\x1b]2;{}\x07", clean)
    }

    pub fn set_cursor_style(&mut self, style: CursorStyle) -> io::Result<()> {
        let code = match style {
            CursorStyle::BlinkingBlock => "\x1b[1 q",
            CursorStyle::SteadyBlock => "\x1b[2 q",
            CursorStyle::BlinkingBar => "\x1b[5 q",
            CursorStyle::SteadyBar => "\x1b[6 q",
        };
        self.write_raw(code)
    }

    /// Read a key (non-blocking)
    pub fn read_key(&self) -> io::Result<Option<Key>> {
        let mut buf = [0u8; 64];
        let mut stdin = io::stdin();

        let n = match stdin.read(&mut buf) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(None),
            Err(e) => return Err(e),
        };
        if n == 0 {
            return Ok(None);
        }

        // If we got a lone ESC, give the rest of an escape sequence a moment to arrive
        let mut total = n;
        if buf[0] == 0x1b && n == 1 {
            std::thread::sleep(std::time::Duration::from_millis(10));
            if let Ok(more) = stdin.read(&mut buf[n..]) {
                total += more;
            }
        }

        Ok(Some(parse_key(&buf[..total])))
    }

    /// Write a character at current position
    pub fn write_char(&mut self, c: char) -> io::Result<()> {
        write!(self.stdout, "{}", c)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.write_raw("\x1b[<u"); // Disable Kitty keyboard protocol
        let _ = self.write_raw("\x1b[>4;0m"); // Disable modifyOtherKeys
        let _ = self.write_raw("\x1b[?1006l");
        let _ = self.write_raw("\x1b[?1002l");
        let _ = self.write_raw("\x1b[0 q"); // Reset cursor to terminal default
        let _ = self.show_cursor();
        let _ = self.reset_colors();
        let _ = self.clear();
        let _ = self.write_raw("\x1b[?1049l");
        let _ = self.flush();
        let _ = self.disable_raw_mode();
    }
}

#[derive(Clone, Copy, Debug)]
pub enum CursorStyle {
    BlinkingBlock,
    SteadyBlock,
    BlinkingBar,
    SteadyBar,
}

/// Parse raw bytes into a Key
pub fn parse_key(buf: &[u8]) -> Key {
    if buf.len() >= 6 && buf[0] == 0x1b && buf[1] == b'[' && buf[2] == b'<' {
        if let Some(mouse) = parse_sgr_mouse(buf) {
            return Key::Mouse(mouse);
        }
    }
    if let Some(key) = parse_modified_key(buf) {
        return key;
    }

    match buf {
        // Single characters
        [b'\r'] | [b'\n'] => Key::Enter,
        [0x1b] => Key::Escape,
        [0x7f] => Key::Backspace,
        [b'\t'] => Key::Tab,

        // Ctrl+letter (0x01-0x1a = Ctrl+A through Ctrl+Z); 0x08 is Ctrl+H
        [c] if *c >= 1 && *c <= 26 => Key::Ctrl((b'a' + c - 1) as char),

        [c] if *c >= 32 && *c < 127 => Key::Char(*c as char),

        // UTF-8 sequences (2-4 bytes)
        _ if buf.len() >= 2 && buf[0] >= 0xC0 => match std::str::from_utf8(buf).ok().and_then(|s| s.chars().next()) {
            Some(c) => Key::Char(c),
            None => Key::Unknown(buf.to_vec()),
        },

        [0x1b, b'[', b'Z'] => Key::ShiftTab,

        [0x1b, b'[', b'A'] | [0x1b, b'O', b'A'] => Key::Up,
        [0x1b, b'[', b'B'] | [0x1b, b'O', b'B'] => Key::Down,
        [0x1b, b'[', b'C'] | [0x1b, b'O', b'C'] => Key::Right,
        [0x1b, b'[', b'D'] | [0x1b, b'O', b'D'] => Key::Left,
        [0x1b, b'[', b'H'] | [0x1b, b'O', b'H'] => Key::Home,
        [0x1b, b'[', b'F'] | [0x1b, b'O', b'F'] => Key::End,
        [0x1b, b'[', b'1', b'~'] | [0x1b, b'[', b'7', b'~'] => Key::Home,
        [0x1b, b'[', b'4', b'~'] | [0x1b, b'[', b'8', b'~'] => Key::End,
        [0x1b, b'[', b'3', b'~'] => Key::Delete,
        [0x1b, b'[', b'5', b'~'] => Key::PageUp,
        [0x1b, b'[', b'6', b'~'] => Key::PageDown,

        [0x1b, b'[', b'1', b';', b'2', b'A'] => Key::ShiftUp,
        [0x1b, b'[', b'1', b';', b'2', b'B'] => Key::ShiftDown,
        [0x1b, b'[', b'1', b';', b'2', b'C'] => Key::ShiftRight,
        [0x1b, b'[', b'1', b';', b'2', b'D'] => Key::ShiftLeft,
        [0x1b, b'[', b'1', b';', b'2', b'H'] => Key::ShiftHome,
        [0x1b, b'[', b'1', b';', b'2', b'F'] => Key::ShiftEnd,
        [0x1b, b'[', b'5', b';', b'2', b'~'] => Key::ShiftPageUp,
        [0x1b, b'[', b'6', b';', b'2', b'~'] => Key::ShiftPageDown,

        [0x1b, b'[', b'1', b';', b'5', b'C'] => Key::CtrlRight,
        [0x1b, b'[', b'1', b';', b'5', b'D'] => Key::CtrlLeft,
        [0x1b, b'[', b'1', b';', b'5', b'H'] => Key::CtrlHome,
        [0x1b, b'[', b'1', b';', b'5', b'F'] => Key::CtrlEnd,

        [0x1b, b'[', b'1', b';', b'6', b'C'] => Key::CtrlShiftRight,
        [0x1b, b'[', b'1', b';', b'6', b'D'] => Key::CtrlShiftLeft,
        [0x1b, b'[', b'1', b';', b'6', b'H'] => Key::CtrlShiftHome,
        [0x1b, b'[', b'1', b';', b'6', b'F'] => Key::CtrlShiftEnd,

        // Function keys
        [0x1b, b'O', b'P'] | [0x1b, b'[', b'1', b'1', b'~'] => Key::F(1),
        [0x1b, b'O', b'Q'] | [0x1b, b'[', b'1', b'2', b'~'] => Key::F(2),
        [0x1b, b'O', b'R'] | [0x1b, b'[', b'1', b'3', b'~'] => Key::F(3),
        [0x1b, b'O', b'S'] | [0x1b, b'[', b'1', b'4', b'~'] => Key::F(4),
        [0x1b, b'[', b'1', b'5', b'~'] => Key::F(5),
        [0x1b, b'[', b'1', b'7', b'~'] => Key::F(6),
        [0x1b, b'[', b'1', b'8', b'~'] => Key::F(7),
        [0x1b, b'[', b'1', b'9', b'~'] => Key::F(8),
        [0x1b, b'[', b'2', b'0', b'~'] => Key::F(9),
        [0x1b, b'[', b'2', b'1', b'~'] => Key::F(10),
        [0x1b, b'[', b'2', b'3', b'~'] => Key::F(11),
        [0x1b, b'[', b'2', b'4', b'~'] => Key::F(12),

        // Alt+letter (ESC followed by letter)
        [0x1b, c] if c.is_ascii_alphabetic() => Key::Alt(c.to_ascii_lowercase() as char),

        _ => Key::Unknown(buf.to_vec()),
    }
}

/// Keys with modifiers reported by the kitty protocol (`CSI code ; mods u`)
/// or by xterm modifyOtherKeys (`CSI 27 ; mods ; code ~`)
fn parse_modified_key(buf: &[u8]) -> Option<Key> {
    let s = std::str::from_utf8(buf).ok()?;
    let body = s.strip_prefix("\x1b[")?;
    let (code, mods) = if let Some(rest) = body.strip_suffix('u') {
        let mut parts = rest.split(';');
        let code: u32 = parts.next()?.parse().ok()?;
        let mods: u32 = parts.next().map_or(Some(1), |m| m.split(':').next()?.parse().ok())?;
        (code, mods)
    } else {
        let rest = body.strip_prefix("27;")?.strip_suffix('~')?;
        let mut parts = rest.split(';');
        let mods: u32 = parts.next()?.parse().ok()?;
        let code: u32 = parts.next()?.parse().ok()?;
        (code, mods)
    };

    let bits = mods.saturating_sub(1);
    let shift = bits & 1 != 0;
    let alt = bits & 2 != 0;
    let ctrl = bits & 4 != 0;

    let key = match code {
        13 => Key::Enter,
        27 => Key::Escape,
        9 if shift => Key::ShiftTab,
        9 => Key::Tab,
        127 | 8 => Key::Backspace,
        _ => {
            let c = char::from_u32(code)?;
            let letter = c.to_ascii_lowercase();
            match (ctrl, alt) {
                (true, _) if shift => Key::CtrlShift(letter),
                (true, _) => Key::Ctrl(letter),
                (false, true) => Key::Alt(letter),
                (false, false) if shift => Key::Char(c.to_uppercase().next().unwrap_or(c)),
                (false, false) => Key::Char(c),
            }
        }
    };
    Some(key)
}

/// Parse SGR extended mouse format: \x1b[<Cb;Cx;CyM or \x1b[<Cb;Cx;Cym
fn parse_sgr_mouse(buf: &[u8]) -> Option<MouseEvent> {
    let s = std::str::from_utf8(buf).ok()?;
    let content = s.strip_prefix("\x1b[<")?;
    let pressed = content.ends_with('M');
    let content = content.trim_end_matches(|c| c == 'M' || c == 'm');

    let parts: Vec<&str> = content.split(';').collect();
    if parts.len() != 3 {
        return None;
    }

    let cb: u8 = parts[0].parse().ok()?;
    let col: u16 = parts[1].parse().ok()?;
    let row: u16 = parts[2].parse().ok()?;

    let button = if cb & 64 != 0 {
        if cb & 1 != 0 {
            MouseButton::WheelDown
        } else {
            MouseButton::WheelUp
        }
    } else {
        match cb & 0b11 {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            _ => MouseButton::None,
        }
    };

    Some(MouseEvent {
        button,
        row,
        col,
        pressed,
        motion: cb & 32 != 0,
    })
}
