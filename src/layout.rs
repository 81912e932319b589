//! Turns the 1-D token stream into rectangles on a 2-D grid.
//!
//! Layout is a single forward pass with no lookahead. Every character occupies
//! one cell of `char_width` x `char_height` pixels, rows are separated by a
//! one pixel gap, and tabs take one cell rather than jumping to a tab stop.

use image::Rgba;

use crate::style::Style;
use crate::token::Token;

pub const DEFAULT_CHAR_SIZE: u32 = 4;

/// Size of one character cell in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub char_width: u32,
    pub char_height: u32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            char_width: DEFAULT_CHAR_SIZE,
            char_height: DEFAULT_CHAR_SIZE,
        }
    }
}

impl CellMetrics {
    /// Vertical distance between the tops of two consecutive rows.
    pub fn row_pitch(&self) -> u32 {
        self.char_height.saturating_add(1)
    }

    fn span(&self, cells: u32) -> u32 {
        self.char_width.saturating_mul(cells)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub h: u32,
    pub v: u32,
}

/// A filled rectangle in canvas pixel coordinates. May extend past the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
    pub color: Rgba<u8>,
}

/// Character counts the layout rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Census {
    spaces: u32,
    tabs: u32,
    /// Code points other than tabs. Includes spaces and a trailing line break.
    visible: u32,
}

impl Census {
    fn of(text: &str) -> Self {
        let (mut spaces, mut tabs, mut total) = (0usize, 0usize, 0usize);
        for c in text.chars() {
            total += 1;
            match c {
                ' ' => spaces += 1,
                '\t' => tabs += 1,
                _ => {}
            }
        }

        Self {
            spaces: saturate(spaces),
            tabs: saturate(tabs),
            visible: saturate(total - tabs),
        }
    }
}

fn saturate(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

pub struct Layout<'a> {
    metrics: CellMetrics,
    style: &'a Style,
    cursor: Cursor,
}

impl<'a> Layout<'a> {
    pub fn new(metrics: CellMetrics, style: &'a Style) -> Self {
        Self {
            metrics,
            style,
            cursor: Cursor::default(),
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Advances the cursor past `token`, returning the rectangle to paint, if any.
    pub fn place(&mut self, token: &Token) -> Option<Rect> {
        if token.is_newline() {
            self.line_break();
            return None;
        }

        let census = Census::of(&token.text);

        // Blank tokens only move the cursor. This also covers tokens made of
        // nothing but tabs, which have no visible characters at all.
        if census.spaces == census.visible {
            self.advance(census.spaces.saturating_add(census.tabs));
            return None;
        }

        let color = self.style.color(token.kind);
        self.advance(census.tabs);

        let rect = Rect {
            left: self.cursor.h,
            top: self.cursor.v,
            width: self.metrics.span(census.visible),
            height: self.metrics.char_height,
            color,
        };

        if token.text.ends_with('\n') {
            self.line_break();
        } else {
            self.advance(census.visible);
        }

        Some(rect)
    }

    fn advance(&mut self, cells: u32) {
        self.cursor.h = self.cursor.h.saturating_add(self.metrics.span(cells));
    }

    fn line_break(&mut self) {
        self.cursor.v = self.cursor.v.saturating_add(self.metrics.row_pitch());
        self.cursor.h = 0;
    }
}
