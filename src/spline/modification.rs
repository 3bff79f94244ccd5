/// What a mutating call did to the knot sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModificationKind {
    KnotInserted,
    KnotRemoved,
    KnotModified,
    Cleared,
    Resized,
    ClosedChanged,
}

/// Lengths of the curves on either side of the touched knot, measured before
/// the change. `None` where no such curve existed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AdjacentLengths {
    /// Curve ending at the touched knot.
    pub previous: Option<f32>,
    /// Curve starting at the touched knot.
    pub next: Option<f32>,
}

/// Returned by every [`Spline`](super::Spline) mutation so callers holding
/// per-curve metadata can remap it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineModification {
    pub kind: ModificationKind,
    pub index: usize,
    pub previous_lengths: AdjacentLengths,
}

impl SplineModification {
    pub fn new(kind: ModificationKind, index: usize, previous_lengths: AdjacentLengths) -> Self {
        Self {
            kind,
            index,
            previous_lengths,
        }
    }
}
