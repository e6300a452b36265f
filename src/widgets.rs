//! Reusable clickable UI components.
//!
//! Each component encapsulates both rendering and click target registration,
//! so a control can never be drawn without being tappable.

use ratzilla::ratatui::layout::{Alignment, Rect};
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

/// A centred row of buttons.
///
/// Renders buttons as a single row of styled labels separated by a
/// separator string, and registers click targets that match the actual
/// rendered positions.
///
/// # Example
/// ```ignore
/// ControlBar::new("   ")
///     .button("[B] Buy Now!", buy_style, BUY)
///     .render(f, area, &mut cs);
/// ```
pub struct ControlBar<'a> {
    buttons: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
    /// Shown instead of buttons when there are none.
    placeholder: Option<Line<'a>>,
}

impl<'a> ControlBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            buttons: Vec::new(),
            separator,
            block: None,
            placeholder: None,
        }
    }

    /// Add a button with its label, style, and action ID.
    pub fn button(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.buttons.push((label.into(), style, action_id));
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn placeholder(mut self, line: Line<'a>) -> Self {
        self.placeholder = Some(line);
        self
    }

    /// Render the bar and register click targets.
    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };

        let mut spans: Vec<Span> = Vec::new();
        let sep_width = Line::from(self.separator).width() as u16;
        let mut button_widths: Vec<(u16, u16)> = Vec::new();

        for (i, (label, style, action_id)) in self.buttons.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.separator,
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let padded = format!(" {} ", label);
            button_widths.push((Line::from(padded.as_str()).width() as u16, *action_id));
            spans.push(Span::styled(padded, *style));
        }

        let line = if spans.is_empty() {
            self.placeholder.unwrap_or_default()
        } else {
            Line::from(spans)
        };
        let content_width = (line.width() as u16).min(inner.width);

        let paragraph = Paragraph::new(line).alignment(Alignment::Center);
        let paragraph = match self.block {
            Some(block) => paragraph.block(block),
            None => paragraph,
        };
        f.render_widget(paragraph, area);

        // Centred content starts halfway into the free space.
        // Targets use the outer y/height for tap tolerance on the whole bar.
        let offset = (inner.width - content_width) / 2;
        cs.register_button_targets(
            &button_widths,
            sep_width,
            inner.x + offset,
            area.y,
            content_width,
            area.height.max(1),
        );
    }
}
