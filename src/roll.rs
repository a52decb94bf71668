//! Piano roll geometry for drawing a [TraceBuffer][crate::trace::TraceBuffer].
//!
//! Nothing here draws. It computes where the note rows, labels and trace
//! polylines go so that any 2D canvas can paint them. The y axis points
//! down, with note 0 at the bottom edge.
use crate::config::DisplayConfig;
use crate::float::Float;
use crate::note::{is_natural, note_name, SEMITONES_PER_OCTAVE};

const NATURAL_LABEL_X: f64 = 10.0;
const ACCIDENTAL_LABEL_X: f64 = 20.0;
/// Level at which the trace is drawn in full black.
const FULL_STROKE_LEVEL: f64 = 0.5;
const FAINTEST_SHADE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One horizontal band of the roll.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub note: usize,
    pub top: f64,
    pub height: f64,
    /// White key rows are shaded lighter.
    pub natural: bool,
    /// C rows get a separator line along their bottom edge.
    pub octave_boundary: bool,
    pub label: String,
    pub label_x: f64,
    pub label_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PianoRoll {
    pub width: f64,
    pub height: f64,
    pub left_margin: f64,
    pub note_count: usize,
}

impl PianoRoll {
    pub fn from_config(config: &DisplayConfig) -> Self {
        PianoRoll {
            width: config.width as f64,
            height: config.height as f64,
            left_margin: config.left_margin as f64,
            note_count: config.note_count,
        }
    }

    pub fn row_height(&self) -> f64 {
        self.height / self.note_count as f64
    }

    pub fn row(&self, note: usize) -> Row {
        let row_height = self.row_height();
        let bottom = self.height - row_height * note as f64;
        let natural = is_natural(note);
        Row {
            note,
            top: bottom - row_height,
            height: row_height,
            natural,
            octave_boundary: note % SEMITONES_PER_OCTAVE == 0,
            label: note_name(note),
            label_x: if natural {
                NATURAL_LABEL_X
            } else {
                ACCIDENTAL_LABEL_X
            },
            label_y: bottom - 1.0,
        }
    }

    /// Rows from the lowest note upwards.
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        (0..self.note_count).map(move |note| self.row(note))
    }

    /// Vertical position of a (fractional) note number.
    pub fn note_to_y(&self, note: f64) -> f64 {
        self.height - note / self.note_count as f64 * self.height
    }

    /// Horizontal position of trace column `column`.
    pub fn column_x(&self, column: usize) -> f64 {
        column as f64 + self.left_margin
    }

    /// Gray level for the trace stroke: 100 for silence down to 0 (black)
    /// at level 0.5 and above.
    pub fn stroke_shade(&self, level: f64) -> f64 {
        let shade = FAINTEST_SHADE - level / FULL_STROKE_LEVEL * FAINTEST_SHADE;
        shade.clamp(0.0, FAINTEST_SHADE)
    }

    /// One polyline per run of sounding cells, in column order.
    pub fn segments<T: Float>(&self, cells: &[T]) -> Vec<Vec<Point>> {
        let mut segments = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        for (column, &cell) in cells.iter().enumerate() {
            if cell > T::zero() {
                current.push(Point {
                    x: self.column_x(column),
                    y: self.note_to_y(cell.as_f64()),
                });
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}
