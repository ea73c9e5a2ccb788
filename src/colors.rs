use crossterm::event::KeyCode;
use crossterm::style::Color;

pub const SCHEME_COUNT: u8 = 6;

/// Selected color scheme for segment shading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorState {
    pub scheme: u8,
}

impl ColorState {
    pub fn new(default_scheme: u8) -> Self {
        Self { scheme: default_scheme.min(SCHEME_COUNT - 1) }
    }

    /// Handle color scheme key input. Returns true if key was handled.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(')') => self.scheme = 0, // Shift+0: green
            KeyCode::Char('!') => self.scheme = 1, // Shift+1: fire
            KeyCode::Char('@') => self.scheme = 2, // Shift+2: ice
            KeyCode::Char('#') => self.scheme = 3, // Shift+3: pink
            KeyCode::Char('$') => self.scheme = 4, // Shift+4: gold
            KeyCode::Char('%') => self.scheme = 5, // Shift+5: mono
            _ => return false,
        }
        true
    }

    pub fn name(&self) -> &'static str {
        match self.scheme {
            1 => "fire",
            2 => "ice",
            3 => "pink",
            4 => "gold",
            5 => "mono",
            _ => "green",
        }
    }

    /// Color for a cell whose newest segment is `order` out of `total` segments.
    /// Early segments (trunk, first strokes) are dark, late ones (tips) bright.
    pub fn shade(&self, order: usize, total: usize) -> (Color, bool) {
        let intensity = if total <= 1 {
            3
        } else {
            ((order * 4) / total).min(3) as u8
        };
        scheme_color(self.scheme, intensity, true)
    }
}

/// Get color from scheme based on intensity (0-3)
pub fn scheme_color(scheme: u8, intensity: u8, bold: bool) -> (Color, bool) {
    match scheme {
        1 => match intensity { // Red/Yellow (fire)
            0 => (Color::DarkRed, false),
            1 => (Color::Red, false),
            2 => (Color::DarkYellow, bold),
            _ => (Color::Yellow, true),
        },
        2 => match intensity { // Blue/Cyan (ice)
            0 => (Color::DarkBlue, false),
            1 => (Color::Blue, false),
            2 => (Color::Cyan, bold),
            _ => (Color::AnsiValue(14), true), // Bright cyan
        },
        3 => match intensity { // Magenta (pink)
            0 => (Color::DarkMagenta, false),
            1 => (Color::Magenta, false),
            2 => (Color::Magenta, bold),
            _ => (Color::AnsiValue(13), true), // Bright magenta
        },
        4 => match intensity { // Brown to gold (autumn)
            0 => (Color::Rgb { r: 101, g: 67, b: 33 }, false),
            1 => (Color::DarkYellow, false),
            2 => (Color::Yellow, bold),
            _ => (Color::AnsiValue(11), true), // Bright yellow
        },
        5 => match intensity { // White/Grey (mono)
            0 => (Color::DarkGrey, false),
            1 => (Color::Grey, false),
            2 => (Color::White, bold),
            _ => (Color::White, true),
        },
        _ => match intensity { // Default: wood to leaf green
            0 => (Color::DarkYellow, false),
            1 => (Color::DarkGreen, false),
            2 => (Color::Green, bold),
            _ => (Color::AnsiValue(10), true), // Bright green
        },
    }
}
