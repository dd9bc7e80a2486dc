//! The refinement engine.
//!
//! An unrefined figure encodes its input in segment directions alone, with
//! every length at its minimum. Refinement finalises segments in index
//! order: each one starts at unit length, and whenever that collides with
//! an earlier segment, the engine backtracks to lengthen the previous
//! segment just enough to pull the tail clear, recursing down the index as
//! far as the collisions propagate.

use std::time::Instant;

use tracing::{debug, trace};

use crate::collide;
use crate::config::{RefineConfig, RefineMethod};
use crate::error::SpiralError;
use crate::figure::Figure;
use crate::geom::Direction;

/// Verdict returned by a progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Continue,
    Cancel,
}

/// Progress observer, invoked once per finalised segment with the figure
/// (read-only), the number of segments finalised and the target count.
pub type ProgressCallback<'a> = &'a mut dyn FnMut(&Figure, u32, u32) -> Progress;

/// Finalise the lengths of all unsolved segments of `figure`, in place.
///
/// Already-solved segments are skipped, so refining a refined figure is a
/// no-op. A callback returning [`Progress::Cancel`] stops the run with
/// `Cancelled`; the segments solved so far stay finalised and every figure
/// invariant still holds.
pub fn refine(
    figure: &mut Figure,
    config: &RefineConfig,
    progress: Option<ProgressCallback>,
) -> Result<(), SpiralError> {
    if figure.is_empty() {
        return Err(SpiralError::PreconditionFailed(
            "cannot refine a blank figure",
        ));
    }
    match config.method {
        RefineMethod::ShrinkFromEnd => {}
        RefineMethod::GrowFromStart => {
            return Err(SpiralError::Unimplemented("grow-from-start"));
        }
    }
    let started = Instant::now();
    let outcome = shrink_from_end(figure, config, progress);
    figure.add_seconds(started.elapsed().as_secs() as u32);
    outcome
}

fn shrink_from_end(
    figure: &mut Figure,
    config: &RefineConfig,
    mut progress: Option<ProgressCallback>,
) -> Result<(), SpiralError> {
    let cap = config.cap(figure);
    for index in figure.solved_count()..cap {
        resize(figure, index, 1, config.threshold)?;
        figure.set_solved_count(index + 1);
        debug!(
            segment = index,
            remaining = figure.lines_remaining(),
            "segment finalised"
        );
        if let Some(callback) = progress.as_mut() {
            if callback(figure, (index + 1) as u32, cap as u32) == Progress::Cancel {
                return Err(SpiralError::Cancelled);
            }
        }
    }
    Ok(())
}

/// Set segment `index` to `length`, backtracking to resize earlier segments
/// until nothing collides.
///
/// A loop with explicit index/length state rather than recursion: the
/// backtracking depth is bounded only by the figure size.
fn resize(
    figure: &mut Figure,
    index: usize,
    length: u32,
    threshold: u32,
) -> Result<(), SpiralError> {
    let mut current_index = index;
    let mut current_length = length;
    loop {
        figure.set_length(current_index, current_length);
        figure.ensure_cached_through(current_index)?;
        match collide::check(figure, current_index) {
            Some(collider) => {
                // the new length broke an earlier segment's clearance; ask
                // the heuristic how far the previous segment must stretch
                trace!(segment = current_index, collider, "collision");
                current_length = suggest_length(figure, current_index, collider, threshold);
                current_index -= 1;
            }
            None if current_index != index => {
                // collision resolved below the target; climb back up,
                // restarting each segment above at unit length
                current_index += 1;
                current_length = 1;
            }
            None => return Ok(()),
        }
    }
}

/// Propose a length for the segment before `last` that is likely to clear
/// the collision between `last` and `collider` in one move.
///
/// The suggestion is not guaranteed collision-free; the caller re-checks.
/// When the colliding pair runs along the same axis, the previous segment
/// is stretched past the far side of the collider in one jump. Anything
/// else falls back to a single-unit extension, as does any collision whose
/// segment is already longer than the perfection threshold (stretching far
/// past a long collider tends to waste space).
fn suggest_length(figure: &Figure, last: usize, collider: usize, threshold: u32) -> u32 {
    let previous = figure.segment(last - 1);
    let rigid = figure.segment(collider);
    let fallback = previous.length + 1;
    if threshold > 0 && figure.segment(last).length > threshold {
        return fallback;
    }
    if !previous.direction.is_parallel(rigid.direction) {
        return fallback;
    }
    let points = figure.cached_points();
    let pa = points[figure.vertex_index(last - 1)];
    let ra = points[figure.vertex_index(collider)];
    let rb = points[figure.vertex_index(collider) + rigid.length as usize];
    let reach = i64::from(rigid.length) + 1;
    use Direction::{Down, Left, Right, Up};
    let suggested = match (previous.direction, rigid.direction) {
        (Up, Up) => (ra.y - pa.y) + reach,
        (Up, Down) => (rb.y - pa.y) + reach,
        (Right, Right) => (ra.x - pa.x) + reach,
        (Right, Left) => (rb.x - pa.x) + reach,
        (Down, Up) => (pa.y - rb.y) + reach,
        (Down, Down) => (pa.y - ra.y) + reach,
        (Left, Right) => (pa.x - rb.x) + reach,
        (Left, Left) => (pa.x - ra.x) + reach,
        _ => i64::from(fallback),
    };
    u32::try_from(suggested).unwrap_or(fallback)
}
