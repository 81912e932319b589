/// Row and column extent of a text, in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextDimensions {
    pub rows: usize,
    pub cols: usize,
}

/// Counts newline-delimited rows and the widest row in code points.
///
/// A trailing newline yields a trailing empty row, and empty text is one empty row.
pub fn measure(text: &str) -> TextDimensions {
    let mut rows = 0;
    let mut cols = 0;

    for line in text.split('\n') {
        rows += 1;
        cols = cols.max(line.chars().count());
    }

    TextDimensions { rows, cols }
}
