use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::fmt::Write as _;
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Cell back buffer, optionally attached to the real terminal
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
    alternate_screen: bool,
}

/// A single cell in the terminal buffer
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bold: false,
        }
    }
}

impl Terminal {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor
    pub fn new(alternate_screen: bool) -> io::Result<Self> {
        let (width, height) = size()?;

        if alternate_screen {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
        }

        Ok(Self::buffer_only(width, height, alternate_screen))
    }

    /// Off-screen buffer of a fixed size (print mode)
    pub fn with_size(width: u16, height: u16) -> Self {
        Self::buffer_only(width, height, false)
    }

    fn buffer_only(width: u16, height: u16, alternate_screen: bool) -> Self {
        Self {
            width,
            height,
            buffer: vec![vec![Cell::default(); width as usize]; height as usize],
            alternate_screen,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Pick up a terminal resize. Returns true if the size changed.
    pub fn refresh_size(&mut self) -> io::Result<bool> {
        let (w, h) = size()?;
        if (w, h) == (self.width, self.height) {
            return Ok(false);
        }
        // Resize in place: replacing `self` would run Drop and leave the alternate screen.
        self.width = w;
        self.height = h;
        self.buffer = vec![vec![Cell::default(); w as usize]; h as usize];
        self.clear_screen()?;
        Ok(true)
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            row.fill(Cell::default());
        }
    }

    /// Clear the actual terminal
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    /// Set a character at position with optional color
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = Cell { ch, fg, bold };
        }
    }

    /// Set a string starting at position
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg, bold);
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.buffer.get(y as usize)?.get(x as usize)
    }

    /// Render the entire buffer to screen
    pub fn render(&self) -> io::Result<()> {
        let mut out = stdout();

        for (y, row) in self.buffer.iter().enumerate() {
            queue!(out, MoveTo(0, y as u16))?;

            for cell in row {
                if cell.bold {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                match cell.fg {
                    Some(color) => queue!(out, SetForegroundColor(color), Print(cell.ch), ResetColor)?,
                    None => queue!(out, Print(cell.ch))?,
                }
                if cell.bold {
                    queue!(out, SetAttribute(Attribute::Reset))?;
                }
            }
        }

        out.flush()?;
        Ok(())
    }

    /// Wait for a keypress with timeout
    pub fn wait_key(&self, timeout_ms: u64) -> io::Result<Option<KeyCode>> {
        if poll(Duration::from_millis(timeout_ms))? {
            if let Event::Key(key_event) = read()? {
                return Ok(Some(key_event.code));
            }
        }
        Ok(None)
    }

    /// Buffer as text with ANSI colors (for print mode). Trailing blanks are trimmed.
    pub fn to_ansi_string(&self, color: bool) -> String {
        let mut out = String::new();

        for row in &self.buffer {
            let used = row.iter().rposition(|c| c.ch != ' ').map_or(0, |i| i + 1);

            for cell in &row[..used] {
                match (color, cell.fg) {
                    (true, Some(fg)) if cell.ch != ' ' => {
                        if cell.bold {
                            out.push_str("\x1b[1m");
                        }
                        out.push_str(&ansi_fg(fg));
                        out.push(cell.ch);
                        out.push_str("\x1b[0m");
                    }
                    _ => out.push(cell.ch),
                }
            }
            out.push('\n');
        }

        out
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(stdout(), Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}

fn ansi_fg(color: Color) -> String {
    let mut s = String::new();
    let _ = match color {
        Color::Rgb { r, g, b } => write!(s, "\x1b[38;2;{};{};{}m", r, g, b),
        Color::AnsiValue(v) => write!(s, "\x1b[38;5;{}m", v),
        // Standard colors (0-7)
        Color::Black => write!(s, "\x1b[30m"),
        Color::DarkRed => write!(s, "\x1b[31m"),
        Color::DarkGreen => write!(s, "\x1b[32m"),
        Color::DarkYellow => write!(s, "\x1b[33m"),
        Color::DarkBlue => write!(s, "\x1b[34m"),
        Color::DarkMagenta => write!(s, "\x1b[35m"),
        Color::DarkCyan => write!(s, "\x1b[36m"),
        Color::Grey => write!(s, "\x1b[37m"),
        // Bright colors (8-15)
        Color::DarkGrey => write!(s, "\x1b[90m"),
        Color::Red => write!(s, "\x1b[91m"),
        Color::Green => write!(s, "\x1b[92m"),
        Color::Yellow => write!(s, "\x1b[93m"),
        Color::Blue => write!(s, "\x1b[94m"),
        Color::Magenta => write!(s, "\x1b[95m"),
        Color::Cyan => write!(s, "\x1b[96m"),
        Color::White => write!(s, "\x1b[97m"),
        _ => Ok(()),
    };
    s
}
