//! Fixed-width history of note values, one cell per display column.
use crate::float::Float;

/// A ring buffer of note values. Each frame writes exactly one cell at the
/// cursor and moves the cursor one column to the right, wrapping at the end,
/// so the buffer always holds the last `len()` frames. A cell holding zero
/// means no note was heard in that frame.
///
/// [record][TraceBuffer::record] is the only way to write a cell, so every
/// write goes through the level gate:
///
/// ```compile_fail
/// use pitch_trace::trace::TraceBuffer;
///
/// let mut trace = TraceBuffer::new(4, 0.02f64);
/// trace.push(69.0);
/// ```
#[derive(Debug, Clone)]
pub struct TraceBuffer<T>
where
    T: Float,
{
    cells: Vec<T>,
    cursor: usize,
    level_threshold: T,
}

impl<T> TraceBuffer<T>
where
    T: Float,
{
    /// A silent trace of `len` columns. `len` must be non-zero.
    pub fn new(len: usize, level_threshold: T) -> Self {
        assert!(len > 0, "trace needs at least one column");
        TraceBuffer {
            cells: vec![T::zero(); len],
            cursor: 0,
            level_threshold,
        }
    }

    /// Record one frame and return the column written. The note is kept only
    /// when `level` is above the threshold; otherwise, or when there is no
    /// note, the cell is silent.
    pub fn record(&mut self, level: T, note: Option<T>) -> usize {
        let value = match note {
            Some(note) if level > self.level_threshold => note,
            _ => T::zero(),
        };
        self.push(value)
    }

    /// Write `value` at the cursor and advance.
    fn push(&mut self, value: T) -> usize {
        let column = self.cursor;
        self.cells[column] = value;
        self.cursor = (column + 1) % self.cells.len();
        column
    }

    /// Cells in column order, as they sit on screen.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn get(&self, column: usize) -> Option<T> {
        self.cells.get(column).copied()
    }

    /// Value written `offset` frames ago; offset 0 is the newest cell.
    pub fn recent(&self, offset: usize) -> Option<T> {
        let len = self.cells.len();
        if offset >= len {
            return None;
        }
        Some(self.cells[(self.cursor + len - 1 - offset) % len])
    }

    pub fn latest(&self) -> T {
        // `recent(0)` is always in range for a non-empty trace.
        self.recent(0).unwrap_or_else(T::zero)
    }

    /// Cells from oldest to newest.
    pub fn iter_chronological(&self) -> impl Iterator<Item = T> + '_ {
        let (newer, older) = self.cells.split_at(self.cursor);
        older.iter().chain(newer.iter()).copied()
    }

    /// Column the next frame will be written to.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn level_threshold(&self) -> T {
        self.level_threshold
    }

    /// Silence every cell and move the cursor back to column 0.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = T::zero());
        self.cursor = 0;
    }
}
