//! Plain-text bar renderer.
//!
//! One row per element, bar length scaled between the smallest and largest
//! value of the snapshot. Highlighted positions get a `>` marker. Useful for
//! terminals, logs, and golden-output tests.

use serde::Serialize;

use super::Renderer;
use crate::engine::{EventKind, TraceEvent};

/// Longest bar a [`TextRenderer`] will draw.
pub const MAX_BAR: usize = u16::MAX as usize;

/// Render data for one event, decoupled from any drawing backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderFrame {
    /// Title line.
    pub title: String,
    /// Sequence number of the drawn event.
    pub step: u64,
    /// Kind of the drawn event.
    pub kind: EventKind,
    /// Highlighted positions.
    pub highlighted: Vec<usize>,
    /// One rendered row per element.
    pub rows: Vec<String>,
    /// Whether this frame shows the finished sequence.
    pub complete: bool,
}

impl RenderFrame {
    /// Title followed by the rows, newline separated.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = format!("{} [{} {:?}]\n", self.title, self.step, self.kind);
        for row in &self.rows {
            out.push_str(row);
            out.push('\n');
        }
        out
    }
}

/// Renders events into [`RenderFrame`]s and keeps them.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    title: String,
    max_bar: usize,
    frames: Vec<RenderFrame>,
}

impl TextRenderer {
    /// Create a renderer with bars at most `max_bar` characters long.
    ///
    /// `max_bar` is clamped to `1..=MAX_BAR`.
    #[must_use]
    pub fn new(title: impl Into<String>, max_bar: usize) -> Self {
        Self {
            title: title.into(),
            max_bar: max_bar.clamp(1, MAX_BAR),
            frames: Vec::new(),
        }
    }

    /// All frames drawn so far.
    #[must_use]
    pub fn frames(&self) -> &[RenderFrame] {
        &self.frames
    }

    /// Most recent frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.frames.last()
    }

    /// Build the frame for `event` without storing it.
    #[must_use]
    pub fn render(&self, event: &TraceEvent) -> RenderFrame {
        let snapshot = &event.snapshot;
        let min = snapshot.iter().copied().min().unwrap_or(0);
        let max = snapshot.iter().copied().max().unwrap_or(0);
        let width = snapshot
            .iter()
            .map(|v| v.to_string().len())
            .max()
            .unwrap_or(1);

        let rows = snapshot
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let marker = if event.touches(i) { '>' } else { ' ' };
                let bar = "#".repeat(self.bar_len(value, min, max));
                format!("{marker} {value:>width$} {bar}")
            })
            .collect();

        RenderFrame {
            title: self.title.clone(),
            step: event.sequence_number,
            kind: event.kind,
            highlighted: event.indices.iter().collect(),
            rows,
            complete: event.is_complete(),
        }
    }

    fn bar_len(&self, value: i64, min: i64, max: i64) -> usize {
        let span = i128::from(max) - i128::from(min);
        if span == 0 {
            return self.max_bar;
        }
        let offset = i128::from(value) - i128::from(min);
        let steps = i128::try_from(self.max_bar - 1).unwrap_or(i128::MAX);
        let len = 1 + offset * steps / span;
        usize::try_from(len).unwrap_or(self.max_bar)
    }
}

impl Renderer for TextRenderer {
    fn draw(&mut self, event: &TraceEvent) {
        let frame = self.render(event);
        self.frames.push(frame);
    }
}
