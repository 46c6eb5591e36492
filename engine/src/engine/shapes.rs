// engine/src/engine/shapes.rs
#![forbid(unsafe_code)]

/// The fixed catalog of placeable shapes.
///
/// Every shape is a rectangular boolean mask; `true` marks an occupied offset relative to the
/// top-left anchor cell. Shapes are never rotated or mutated at runtime.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ShapeKind {
    /// 1x1
    Single,
    /// 1x2
    PairH,
    /// 2x1
    PairV,
    /// 2x2
    Square,
    /// 1x3
    TripleH,
    /// 3x1
    TripleV,
    /// 2x2 with the top-right corner empty.
    Ell,
    /// 2x2 with the bottom-left corner empty.
    EllFlipped,
}

const T: bool = true;
const F: bool = false;

impl ShapeKind {
    pub fn all() -> &'static [ShapeKind] {
        use ShapeKind::*;
        &[
            Single, PairH, PairV, Square, TripleH, TripleV, Ell, EllFlipped,
        ]
    }

    /// Row-major occupancy mask: `mask()[row][col]`.
    pub fn mask(self) -> &'static [&'static [bool]] {
        use ShapeKind::*;
        match self {
            Single => &[&[T]],
            PairH => &[&[T, T]],
            PairV => &[&[T], &[T]],
            Square => &[&[T, T], &[T, T]],
            TripleH => &[&[T, T, T]],
            TripleV => &[&[T], &[T], &[T]],
            Ell => &[&[T, F], &[T, T]],
            EllFlipped => &[&[T, T], &[F, T]],
        }
    }

    #[inline]
    pub fn rows(self) -> usize {
        self.mask().len()
    }

    #[inline]
    pub fn cols(self) -> usize {
        self.mask()[0].len()
    }

    /// Occupied `(d_row, d_col)` offsets, in row-major order.
    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        self.mask().iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &on)| on)
                .map(move |(c, _)| (r as i32, c as i32))
        })
    }

    /// Number of occupied cells.
    pub fn area(self) -> usize {
        self.cells().count()
    }

    pub fn glyph(self) -> &'static str {
        use ShapeKind::*;
        match self {
            Single => "1x1",
            PairH => "1x2",
            PairV => "2x1",
            Square => "2x2",
            TripleH => "1x3",
            TripleV => "3x1",
            Ell => "L",
            EllFlipped => "L'",
        }
    }
}
