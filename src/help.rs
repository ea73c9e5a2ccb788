use crate::terminal::Terminal;
use crossterm::style::Color;

/// Draw a centered, bordered help box into the back buffer.
pub fn render_help_overlay(term: &mut Terminal, help_text: &str) {
    if help_text.is_empty() {
        return;
    }

    let (width, height) = term.size();
    let lines: Vec<&str> = help_text.lines().collect();
    let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = max_width + 4; // 2 chars padding each side
    let box_height = lines.len() + 2;

    let x0 = ((width as usize).saturating_sub(box_width) / 2) as i32;
    let y0 = ((height as usize).saturating_sub(box_height) / 2) as i32;
    let right = x0 + box_width as i32 - 1;
    let bottom = y0 + box_height as i32 - 1;

    let border = Some(Color::White);
    let text = Some(Color::Grey);

    let rule = "─".repeat(box_width - 2);
    term.set_str(x0, y0, &format!("┌{}┐", rule), border, false);
    term.set_str(x0, bottom, &format!("└{}┘", rule), border, false);

    for (i, line) in lines.iter().enumerate() {
        let y = y0 + 1 + i as i32;
        let padding = max_width.saturating_sub(line.chars().count());
        term.set(x0, y, '│', border, false);
        term.set_str(x0 + 1, y, &format!(" {}{} ", line, " ".repeat(padding)), text, false);
        term.set(right, y, '│', border, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_box_around_text() {
        let mut term = Terminal::with_size(12, 6);
        render_help_overlay(&mut term, "ab\ncd");
        let out = term.to_ansi_string(false);
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows[0], "");
        assert_eq!(rows[1].trim(), "┌────┐");
        assert_eq!(rows[2].trim(), "│ ab │");
        assert_eq!(rows[3].trim(), "│ cd │");
        assert_eq!(rows[4].trim(), "└────┘");
    }
}
