//! Knot container with per-curve distance-table caching.
//!
//! A [`Spline`] owns an ordered knot sequence plus an open/closed flag. Curve
//! `i` spans knots `i` and `i + 1` and is rebuilt on demand from the window
//! `i - 1 ..= i + 2`; its distance table and the running curve lengths are
//! cached. Reads memoize through
//! `&self`, every mutation takes `&mut self`, drops all cached state and
//! returns a [`SplineModification`].

mod cache;
mod error;
mod modification;

pub use crate::knot::Knot;
pub use cache::CurveCache;
pub use error::{Extremity, SplineError};
pub use modification::{AdjacentLengths, ModificationKind, SplineModification};

use std::cell::OnceCell;

use crate::curve::{lut_length, Curve, DistanceLut};
use crate::math::Matrix4;
use crate::params::SplineParams;

#[derive(Debug, Clone, Default)]
pub struct Spline {
    knots: Vec<Knot>,
    closed: bool,
    params: SplineParams,
    caches: Vec<CurveCache>,
    ends: OnceCell<Vec<f32>>,
}

impl Spline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: SplineParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    pub fn from_knots(knots: impl IntoIterator<Item = Knot>, closed: bool) -> Self {
        let knots: Vec<Knot> = knots.into_iter().collect();
        let caches = vec![CurveCache::new(); knots.len()];
        Self {
            knots,
            closed,
            caches,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.knots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    pub fn knot(&self, index: usize) -> Option<&Knot> {
        self.knots.get(index)
    }

    pub fn closed(&self) -> bool {
        self.closed
    }

    pub fn params(&self) -> &SplineParams {
        &self.params
    }

    /// `len` curves when closed, `len - 1` when open.
    pub fn curve_count(&self) -> usize {
        if self.closed {
            self.knots.len()
        } else {
            self.knots.len().saturating_sub(1)
        }
    }

    /// The four knots curve `index` is built from. Indices wrap on closed
    /// splines and clamp to the ends on open ones.
    pub fn knot_window(&self, index: usize) -> Option<[Knot; 4]> {
        let count = self.knots.len();
        if count == 0 {
            return None;
        }
        let resolve = |offset: isize| -> usize {
            let i = index as isize + offset;
            if self.closed {
                i.rem_euclid(count as isize) as usize
            } else {
                i.clamp(0, count as isize - 1) as usize
            }
        };
        Some([-1, 0, 1, 2].map(|offset| self.knots[resolve(offset)]))
    }

    pub fn curve(&self, index: usize) -> Option<Curve> {
        if index >= self.curve_count() {
            return None;
        }
        let window = self.knot_window(index)?;
        Some(Curve::new(&self.params, &window))
    }

    /// Curve built from knots transformed by `matrix`, for world-space queries
    /// on a spline stored in local space.
    pub fn curve_transformed(&self, index: usize, matrix: &Matrix4) -> Option<Curve> {
        if index >= self.curve_count() {
            return None;
        }
        let window = self.knot_window(index)?.map(|knot| knot.transformed(matrix));
        Some(Curve::new(&self.params, &window))
    }

    pub fn curve_lut(&self, index: usize) -> Option<&DistanceLut> {
        if index >= self.curve_count() {
            return None;
        }
        let window = self.knot_window(index)?;
        Some(self.caches[index].lut_or_build(|| Curve::new(&self.params, &window)))
    }

    /// Length of curve `index` from its cached table, `0` when out of range.
    pub fn curve_length(&self, index: usize) -> f32 {
        self.curve_lut(index).map_or(0.0, |lut| lut_length(lut))
    }

    /// Cumulative arclength at the end of each curve.
    pub fn curve_ends(&self) -> &[f32] {
        self.ends.get_or_init(|| {
            let mut total = 0.0;
            (0..self.curve_count())
                .map(|i| {
                    total += self.curve_length(i);
                    total
                })
                .collect()
        })
    }

    /// Arclength from the first knot to the start of curve `index`.
    pub fn curve_start(&self, index: usize) -> f32 {
        let ends = self.curve_ends();
        match index.checked_sub(1) {
            None => 0.0,
            Some(previous) => ends.get(previous).or(ends.last()).copied().unwrap_or(0.0),
        }
    }

    /// Curve holding arclength `distance` and the distance into it. A distance
    /// on a boundary belongs to the following curve; the last curve takes
    /// everything past the end.
    pub fn locate_distance(&self, distance: f32) -> Option<(usize, f32)> {
        let ends = self.curve_ends();
        let last = ends.len().checked_sub(1)?;
        let index = ends.partition_point(|&end| end <= distance).min(last);
        Some((index, distance - self.curve_start(index)))
    }

    pub fn length(&self) -> f32 {
        self.curve_ends().last().copied().unwrap_or(0.0)
    }

    /// The knot of an open spline with exactly one knot, which has no curves.
    pub fn lone_knot(&self) -> Option<&Knot> {
        match self.knots.as_slice() {
            [knot] if !self.closed => Some(knot),
            _ => None,
        }
    }

    pub fn is_warm(&self) -> bool {
        self.ends.get().is_some()
            && self.caches[..self.curve_count()]
                .iter()
                .all(CurveCache::is_warm)
    }

    /// Builds every missing distance table and the total length.
    pub fn warmup(&self) {
        let count = self.curve_count();
        log::debug!("warming spline caches for {count} curves");
        for i in 0..count {
            self.curve_lut(i);
        }
        self.curve_ends();
    }

    pub fn set_params(&mut self, params: SplineParams) {
        if self.params != params {
            self.invalidate();
            self.params = params;
        }
    }

    pub fn push(&mut self, knot: Knot) -> SplineModification {
        let index = self.knots.len();
        let previous_lengths = self.adjacent_lengths(index);
        self.invalidate();
        self.knots.push(knot);
        self.caches.push(CurveCache::new());
        log::debug!("spline knot pushed at {index}");
        SplineModification::new(ModificationKind::KnotInserted, index, previous_lengths)
    }

    pub fn insert(&mut self, index: usize, knot: Knot) -> Result<SplineModification, SplineError> {
        let count = self.knots.len();
        if index > count {
            return Err(SplineError::IndexOutOfRange { index, count });
        }
        let previous_lengths = self.adjacent_lengths(index);
        self.invalidate();
        self.knots.insert(index, knot);
        self.caches.push(CurveCache::new());
        log::debug!("spline knot inserted at {index}");
        Ok(SplineModification::new(
            ModificationKind::KnotInserted,
            index,
            previous_lengths,
        ))
    }

    pub fn remove_at(&mut self, index: usize) -> Result<SplineModification, SplineError> {
        self.check_index(index)?;
        let previous_lengths = self.adjacent_lengths(index);
        self.invalidate();
        self.knots.remove(index);
        self.caches.pop();
        log::debug!("spline knot removed at {index}");
        Ok(SplineModification::new(
            ModificationKind::KnotRemoved,
            index,
            previous_lengths,
        ))
    }

    pub fn set_knot(
        &mut self,
        index: usize,
        knot: Knot,
    ) -> Result<SplineModification, SplineError> {
        self.check_index(index)?;
        let previous_lengths = self.adjacent_lengths(index);
        self.invalidate();
        self.knots[index] = knot;
        log::debug!("spline knot modified at {index}");
        Ok(SplineModification::new(
            ModificationKind::KnotModified,
            index,
            previous_lengths,
        ))
    }

    pub fn clear(&mut self) -> SplineModification {
        self.invalidate();
        self.knots.clear();
        self.caches.clear();
        log::debug!("spline cleared");
        SplineModification::new(ModificationKind::Cleared, 0, AdjacentLengths::default())
    }

    /// Truncates or pads with default knots.
    pub fn resize(&mut self, len: usize) -> SplineModification {
        let index = len.min(self.knots.len());
        let previous_lengths = self.adjacent_lengths(index);
        self.invalidate();
        self.knots.resize(len, Knot::default());
        self.caches.resize(len, CurveCache::new());
        log::debug!("spline resized to {len} knots");
        SplineModification::new(ModificationKind::Resized, index, previous_lengths)
    }

    pub fn set_closed(&mut self, closed: bool) -> SplineModification {
        let index = self.knots.len().saturating_sub(1);
        let previous_lengths = self.adjacent_lengths(index);
        if self.closed != closed {
            self.invalidate();
            self.closed = closed;
            log::debug!("spline closed set to {closed}");
        }
        SplineModification::new(ModificationKind::ClosedChanged, index, previous_lengths)
    }

    /// Adds a knot before the first one. Closed splines have no start.
    pub fn prepend_extremity(&mut self, knot: Knot) -> Result<SplineModification, SplineError> {
        if self.closed {
            return Err(SplineError::ClosedExtremity(Extremity::Start));
        }
        self.insert(0, knot)
    }

    /// Adds a knot after the last one. Closed splines have no end.
    pub fn append_extremity(&mut self, knot: Knot) -> Result<SplineModification, SplineError> {
        if self.closed {
            return Err(SplineError::ClosedExtremity(Extremity::End));
        }
        Ok(self.push(knot))
    }

    fn check_index(&self, index: usize) -> Result<(), SplineError> {
        let count = self.knots.len();
        if index >= count {
            return Err(SplineError::IndexOutOfRange { index, count });
        }
        Ok(())
    }

    fn adjacent_lengths(&self, index: usize) -> AdjacentLengths {
        let count = self.curve_count();
        if count == 0 {
            return AdjacentLengths::default();
        }
        let previous = if index > 0 && index - 1 < count {
            Some(self.curve_length(index - 1))
        } else if index == 0 && self.closed {
            Some(self.curve_length(count - 1))
        } else {
            None
        };
        let next = (index < count).then(|| self.curve_length(index));
        AdjacentLengths { previous, next }
    }

    fn invalidate(&mut self) {
        for cache in &mut self.caches {
            cache.invalidate();
        }
        self.ends.take();
    }
}
