//! Clickable UI components: each one draws itself and registers the click
//! targets that match what it drew.
//!
//! - [`TabBar`] — one row of labels (the scene bar).
//! - [`ClickableList`] — lines where some rows trigger an action.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// A row of padded labels separated by `separator`.
///
/// Targets are computed from the rendered label widths, so accented and wide
/// characters line up with what the player sees.
///
/// ```ignore
/// TabBar::new("│")
///     .tab("Hall", style, NAV_BASE + 1)
///     .tab("Sala", active, NAV_BASE + 2)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    /// Wrap in a block; targets are placed inside its borders.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// `(display_width, action_id)` of each padded label.
    fn tab_widths(&self) -> Vec<(u16, u16)> {
        self.tabs
            .iter()
            .map(|(label, _, id)| (Line::from(format!(" {} ", label)).width() as u16, *id))
            .collect()
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let tab_widths = self.tab_widths();
        let sep_width = Line::from(self.separator).width() as u16;

        let mut spans: Vec<Span> = Vec::new();
        for (i, (label, style, _)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator, Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(format!(" {} ", label), *style));
        }

        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        let paragraph = match self.block {
            Some(block) => Paragraph::new(Line::from(spans)).block(block),
            None => Paragraph::new(Line::from(spans)),
        };
        f.render_widget(paragraph, area);

        // Inner x/width for column accuracy, outer y/height so the borders
        // still count as a hit on a touch screen.
        cs.register_tab_targets(
            &tab_widths,
            sep_width,
            inner.x,
            area.y,
            inner.width,
            area.height.max(1),
        );
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with click actions.
///
/// Mark a line clickable when pushing it; after rendering, call
/// [`register_targets`](ClickableList::register_targets) once and every
/// clickable line gets a target on whichever rows it ended up on.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Sala"));
/// cl.push_clickable(Line::from(" [1] Examinar a poltrona"), CHOICE_BASE);
/// cl.register_targets(area, &mut cs, 1, 1, 0, inner_width);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register targets for every clickable line.
    ///
    /// * `top_offset` / `bottom_offset` — rows taken by borders.
    /// * `scroll` — vertical scroll in visual rows.
    /// * `inner_width` — wrap width; `0` means the paragraph does not wrap and
    ///   each line is exactly one row.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
        inner_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        // Visual row span of each logical line.
        let mut spans: Vec<(u16, u16)> = Vec::with_capacity(self.lines.len());
        let mut cumulative: u16 = 0;
        for line in &self.lines {
            let height = match inner_width {
                0 => 1,
                w => visual_height(line, w),
            };
            spans.push((cumulative, height));
            cumulative += height;
        }

        for &(line_idx, action_id) in &self.actions {
            let Some(&(start, height)) = spans.get(line_idx as usize) else {
                continue;
            };
            for visual_row in start..start + height {
                if visual_row < scroll {
                    continue;
                }
                let screen_row = content_y + (visual_row - scroll);
                if screen_row >= content_end {
                    break;
                }
                cs.add_row_target(area, screen_row, action_id);
            }
        }
    }
}

/// Rows a line occupies once word-wrapped to `width`; never less than one.
fn visual_height(line: &Line, width: u16) -> u16 {
    let rows = Paragraph::new(line.clone())
        .wrap(Wrap { trim: false })
        .line_count(width);
    rows.max(1) as u16
}
