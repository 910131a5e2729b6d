use crate::ui::span::{Span, SpanLine, line_width};
use crate::widgets::traits::{DrawOutput, Drawable, RenderContext};

/// Outer frame of a form. Stacks its children top to bottom.
#[derive(Default)]
pub struct MultistepForm {
    children: Vec<Box<dyn Drawable>>,
}

impl MultistepForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(mut self, child: impl Drawable + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }
}

impl Drawable for MultistepForm {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let mut out = DrawOutput::empty();
        for child in &self.children {
            out.extend(child.draw(ctx));
        }
        out
    }
}

/// Row of navigation triggers, laid out side by side.
///
/// Children that render nothing take no room, so a hidden trigger leaves no
/// gap behind.
pub struct StepControls {
    children: Vec<Box<dyn Drawable>>,
    gap: usize,
}

impl Default for StepControls {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            gap: 2,
        }
    }
}

impl StepControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gap(mut self, gap: usize) -> Self {
        self.gap = gap;
        self
    }

    pub fn child(mut self, child: impl Drawable + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }
}

impl Drawable for StepControls {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let blocks: Vec<DrawOutput> = self
            .children
            .iter()
            .map(|child| child.draw(ctx))
            .filter(|out| !out.is_empty())
            .collect();
        if blocks.is_empty() {
            return DrawOutput::empty();
        }

        let height = blocks.iter().map(|block| block.lines.len()).max().unwrap_or(0);
        let mut lines: Vec<SpanLine> = vec![Vec::new(); height];

        for (block_index, block) in blocks.iter().enumerate() {
            let block_width = block
                .lines
                .iter()
                .map(|line| line_width(line))
                .max()
                .unwrap_or(0);
            let is_last_block = block_index + 1 == blocks.len();

            for (row, line) in lines.iter_mut().enumerate() {
                if block_index > 0 && self.gap > 0 {
                    line.push(Span::new(" ".repeat(self.gap)));
                }
                let cell = block.lines.get(row).cloned().unwrap_or_default();
                let pad = block_width.saturating_sub(line_width(&cell));
                line.extend(cell);
                if pad > 0 && !is_last_block {
                    line.push(Span::new(" ".repeat(pad)));
                }
            }
        }

        for line in &mut lines {
            while line.last().is_some_and(|span| span.text.trim().is_empty()) {
                line.pop();
            }
        }

        DrawOutput { lines }
    }
}
