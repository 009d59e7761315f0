
/// Largest block side the metric kernels accept.
pub const MAX_BLOCK_SIZE: usize = 32;

/// Error value meaning "no match found" or "pruned at the bound".
///
/// It is one more than the largest SSD a `MAX_BLOCK_SIZE` block can produce, so it
/// never compares equal to a real error, and adding up the four quadrants of a
/// split still fits comfortably in a `u64`.
pub const UNATTAINABLE_ERROR: u64 = (MAX_BLOCK_SIZE * MAX_BLOCK_SIZE * 255 * 255) as u64 + 1;

/// Which reference variant a match was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefVariant {
    /// The previous frame itself.
    #[default]
    Original = 0,
    /// Average of each pixel and the one above it.
    Up = 1,
    /// Average of each pixel and the one to its left.
    Left = 2,
    /// Average of each pixel and its left, upper and upper-left neighbours.
    UpLeft = 3,
}

impl RefVariant {
    /// Variants in the order the estimator tries them.
    pub const ALL: [RefVariant; 4] = [
        RefVariant::Original,
        RefVariant::Up,
        RefVariant::Left,
        RefVariant::UpLeft,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A single displacement for a whole block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf {
    /// Row of the matched block's origin in the reference frame.
    pub row: isize,
    /// Column of the matched block's origin in the reference frame.
    pub col: isize,
    pub error: u64,
    pub reference: RefVariant,
}

impl Leaf {
    /// Displacement of this match relative to a block whose origin is at
    /// (`row`, `col`).
    #[must_use]
    pub fn offset(&self, row: usize, col: usize) -> (isize, isize) {
        (self.row - row as isize, self.col - col as isize)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionVector {
    Leaf(Leaf),
    /// Quadrants in the order top-left, top-right, bottom-right, bottom-left.
    /// The error is the sum of the quadrants' errors.
    Split(Box<[MotionVector; 4]>, u64),
}

/// Origin offsets of the four quadrants of a block with side `size`, in
/// [`MotionVector::Split`] order.
#[must_use]
pub fn quadrant_offsets(size: usize) -> [(usize, usize); 4] {
    let half = size / 2;
    [(0, 0), (0, half), (half, half), (half, 0)]
}

impl MotionVector {
    #[must_use]
    pub fn leaf(row: isize, col: isize, error: u64, reference: RefVariant) -> Self {
        MotionVector::Leaf(Leaf {
            row,
            col,
            error,
            reference,
        })
    }

    /// Builds a split vector, aggregating the children's errors.
    #[must_use]
    pub fn split(children: [MotionVector; 4]) -> Self {
        let error = children.iter().map(MotionVector::error).sum();
        MotionVector::Split(Box::new(children), error)
    }

    #[must_use]
    pub fn error(&self) -> u64 {
        match self {
            MotionVector::Leaf(leaf) => leaf.error,
            MotionVector::Split(_, error) => *error,
        }
    }

    #[must_use]
    pub fn is_split(&self) -> bool {
        matches!(self, MotionVector::Split(..))
    }

    #[must_use]
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            MotionVector::Leaf(leaf) => Some(leaf),
            MotionVector::Split(..) => None,
        }
    }

    /// Stamps the reference variant onto every leaf.
    #[must_use]
    pub fn with_reference(mut self, reference: RefVariant) -> Self {
        self.set_reference(reference);
        self
    }

    fn set_reference(&mut self, reference: RefVariant) {
        match self {
            MotionVector::Leaf(leaf) => leaf.reference = reference,
            MotionVector::Split(children, _) => {
                for child in children.iter_mut() {
                    child.set_reference(reference);
                }
            }
        }
    }

    /// Visits every leaf together with the origin and side of the block it
    /// covers in the current frame.
    pub fn for_each_leaf<F>(&self, row: usize, col: usize, size: usize, f: &mut F)
    where
        F: FnMut(usize, usize, usize, &Leaf),
    {
        match self {
            MotionVector::Leaf(leaf) => f(row, col, size, leaf),
            MotionVector::Split(children, _) => {
                for (child, (dr, dc)) in children.iter().zip(quadrant_offsets(size)) {
                    child.for_each_leaf(row + dr, col + dc, size / 2, f);
                }
            }
        }
    }
}
