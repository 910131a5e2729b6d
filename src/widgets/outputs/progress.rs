use serde::{Deserialize, Serialize};

use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::traits::{DrawOutput, Drawable, RenderContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressVariant {
    /// A track filled in proportion to the position.
    #[default]
    Bar,
    /// One marker per step joined by connectors.
    Dots,
    /// One whole segment per step.
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    Reached,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressGlyphs {
    pub bar_fill: char,
    pub bar_track: char,
    pub dot_reached: char,
    pub dot_pending: char,
    pub connector: char,
    pub segment_reached: char,
    pub segment_pending: char,
}

impl Default for ProgressGlyphs {
    fn default() -> Self {
        Self {
            bar_fill: '▬',
            bar_track: '─',
            dot_reached: '●',
            dot_pending: '○',
            connector: '─',
            segment_reached: '▰',
            segment_pending: '▱',
        }
    }
}

/// Cosmetic options of the indicator. None of them affect which steps count
/// as reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressPalette {
    pub fill: Color,
    pub track: Color,
    pub dot: Color,
    pub inactive_dot: Color,
    pub connector: Color,
    pub bar_width: usize,
    pub connector_width: usize,
    pub segment_width: usize,
    pub gap: usize,
    pub glyphs: ProgressGlyphs,
}

impl Default for ProgressPalette {
    fn default() -> Self {
        Self {
            fill: Color::Blue,
            track: Color::DarkGrey,
            dot: Color::Blue,
            inactive_dot: Color::White,
            connector: Color::DarkGrey,
            bar_width: 30,
            connector_width: 3,
            segment_width: 6,
            gap: 1,
            glyphs: ProgressGlyphs::default(),
        }
    }
}

/// Completion in whole percent. A form with fewer than two steps is always
/// at 0.
pub fn progress_percent(current_index: usize, total_steps: usize) -> u8 {
    if total_steps <= 1 {
        return 0;
    }
    let last = total_steps - 1;
    let ratio = current_index.min(last) as f64 / last as f64;
    (ratio * 100.0).round() as u8
}

pub fn marker_states(current_index: usize, total_steps: usize) -> Vec<MarkerState> {
    (0..total_steps)
        .map(|index| {
            if index <= current_index {
                MarkerState::Reached
            } else {
                MarkerState::Pending
            }
        })
        .collect()
}

fn filled_cells(percent: u8, width: usize) -> usize {
    ((f64::from(percent) / 100.0) * width as f64).round() as usize
}

pub struct ProgressIndicator {
    variant: ProgressVariant,
    palette: ProgressPalette,
    percent_label: bool,
}

impl ProgressIndicator {
    pub fn new(variant: ProgressVariant) -> Self {
        Self {
            variant,
            palette: ProgressPalette::default(),
            percent_label: false,
        }
    }

    pub fn bar() -> Self {
        Self::new(ProgressVariant::Bar)
    }

    pub fn dots() -> Self {
        Self::new(ProgressVariant::Dots)
    }

    pub fn dashed() -> Self {
        Self::new(ProgressVariant::Dashed)
    }

    pub fn with_palette(mut self, palette: ProgressPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.palette.bar_width = width.max(1);
        self
    }

    pub fn with_segment_width(mut self, width: usize) -> Self {
        self.palette.segment_width = width.max(1);
        self
    }

    pub fn with_gap(mut self, gap: usize) -> Self {
        self.palette.gap = gap;
        self
    }

    /// Appends the completion percentage after the bar variant.
    pub fn with_percent_label(mut self) -> Self {
        self.percent_label = true;
        self
    }

    pub fn variant(&self) -> ProgressVariant {
        self.variant
    }

    pub fn palette(&self) -> &ProgressPalette {
        &self.palette
    }

    fn draw_bar(&self, current: usize, total: usize) -> DrawOutput {
        let palette = &self.palette;
        let percent = progress_percent(current, total);
        let filled = filled_cells(percent, palette.bar_width).min(palette.bar_width);
        let empty = palette.bar_width - filled;

        let mut line = Vec::new();
        if filled > 0 {
            line.push(Span::styled(
                palette.glyphs.bar_fill.to_string().repeat(filled),
                Style::new().color(palette.fill).bold(),
            ));
        }
        if empty > 0 {
            line.push(Span::styled(
                palette.glyphs.bar_track.to_string().repeat(empty),
                Style::new().color(palette.track),
            ));
        }
        if self.percent_label {
            line.push(Span::new(format!(" {percent:>3}%")));
        }
        DrawOutput { lines: vec![line] }
    }

    fn draw_dots(&self, current: usize, total: usize) -> DrawOutput {
        let palette = &self.palette;
        let mut line = Vec::new();
        for (index, state) in marker_states(current, total).into_iter().enumerate() {
            if index > 0 && palette.connector_width > 0 {
                line.push(Span::styled(
                    palette.glyphs.connector.to_string().repeat(palette.connector_width),
                    Style::new().color(palette.connector),
                ));
            }
            let span = match state {
                MarkerState::Reached => Span::styled(
                    palette.glyphs.dot_reached.to_string(),
                    Style::new().color(palette.dot).bold(),
                ),
                MarkerState::Pending => Span::styled(
                    palette.glyphs.dot_pending.to_string(),
                    Style::new().color(palette.inactive_dot),
                ),
            };
            line.push(span);
        }
        DrawOutput { lines: vec![line] }
    }

    fn draw_dashed(&self, current: usize, total: usize) -> DrawOutput {
        let palette = &self.palette;
        let mut line = Vec::new();
        for (index, state) in marker_states(current, total).into_iter().enumerate() {
            if index > 0 && palette.gap > 0 {
                line.push(Span::new(" ".repeat(palette.gap)));
            }
            let (glyph, color) = match state {
                MarkerState::Reached => (palette.glyphs.segment_reached, palette.fill),
                MarkerState::Pending => (palette.glyphs.segment_pending, palette.track),
            };
            line.push(Span::styled(
                glyph.to_string().repeat(palette.segment_width),
                Style::new().color(color),
            ));
        }
        DrawOutput { lines: vec![line] }
    }
}

impl Drawable for ProgressIndicator {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let current = ctx.current_index();
        let total = ctx.total_steps();
        match self.variant {
            ProgressVariant::Bar => self.draw_bar(current, total),
            ProgressVariant::Dots if total > 0 => self.draw_dots(current, total),
            ProgressVariant::Dashed if total > 0 => self.draw_dashed(current, total),
            _ => DrawOutput::empty(),
        }
    }
}
