use std::fmt;

/// End of an open spline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremity {
    Start,
    End,
}

impl fmt::Display for Extremity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplineError {
    #[error("knot index {index} out of range for {count} knots")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("cannot add a knot at the {0} of a closed spline")]
    ClosedExtremity(Extremity),
}
