use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{
    Attribute, Color as CrosstermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::ui::span::SpanLine;
use crate::ui::style::Color;
use crate::widgets::traits::DrawOutput;

/// Writes every line of `output`, clipped to `width` columns, each followed
/// by `\r\n`.
pub fn write_output<W: Write>(out: &mut W, output: &DrawOutput, width: u16) -> io::Result<()> {
    for line in &output.lines {
        write_span_line(out, line, width)?;
        out.write_all(b"\r\n")?;
    }
    out.flush()
}

pub fn write_span_line<W: Write>(out: &mut W, line: &SpanLine, width: u16) -> io::Result<()> {
    let mut used = 0usize;
    for span in line {
        if used >= width as usize {
            break;
        }
        let available_cols = (width as usize).saturating_sub(used);
        let clipped = clip_to_width(&span.text, available_cols);
        if clipped.is_empty() {
            continue;
        }
        if let Some(color) = span.style.color {
            queue!(out, SetForegroundColor(map_color(color)))?;
        }
        if let Some(background) = span.style.background {
            queue!(out, SetBackgroundColor(map_color(background)))?;
        }
        if span.style.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        queue!(out, Print(clipped.as_str()), ResetColor)?;
        if span.style.bold {
            queue!(out, SetAttribute(Attribute::NormalIntensity))?;
        }
        used = used.saturating_add(UnicodeWidthStr::width(clipped.as_str()));
    }
    Ok(())
}

/// Longest prefix of `text` that fits in `max_width` columns. Line breaks
/// are dropped so a span can never split its row.
pub fn clip_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars().filter(|ch| !matches!(ch, '\n' | '\r')) {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used.saturating_add(ch_width) > max_width {
            break;
        }
        out.push(ch);
        used = used.saturating_add(ch_width);
    }
    out
}

fn map_color(color: Color) -> CrosstermColor {
    match color {
        Color::Reset => CrosstermColor::Reset,
        Color::Black => CrosstermColor::Black,
        Color::DarkGrey => CrosstermColor::DarkGrey,
        Color::Red => CrosstermColor::Red,
        Color::Green => CrosstermColor::Green,
        Color::Yellow => CrosstermColor::DarkYellow,
        Color::Blue => CrosstermColor::DarkBlue,
        Color::Magenta => CrosstermColor::DarkMagenta,
        Color::Cyan => CrosstermColor::DarkCyan,
        Color::White => CrosstermColor::White,
        Color::Rgb(r, g, b) => CrosstermColor::Rgb { r, g, b },
    }
}
