//! The figure model: directed segments plus a lazily maintained cache of
//! the polyline's vertices.

use crate::encode;
use crate::error::SpiralError;
use crate::geom::{Bounds, Coord, Direction};

/// Largest representable segment length (30 bits, the serialised width).
pub const MAX_LENGTH: u32 = (1 << 30) - 1;

/// Largest number of segments a figure may hold, bounded by the serialised
/// form's 32-bit segment count.
pub const MAX_SEGMENTS: usize = u32::MAX as usize;

/// One straight piece of the polyline: a direction and an integer length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub direction: Direction,
    pub length: u32,
}

/// Vertices of the polyline at unit-step granularity, trustworthy for
/// segment indices below the validity watermark. Rewriting segment i clamps
/// the watermark to i, so stale tail entries are recomputed on demand.
#[derive(Debug, Clone, Default)]
struct CoordCache {
    points: Vec<Coord>,
    validity: usize,
}

/// A spiral figure in any state of completion.
///
/// Produced unrefined from input bytes by [`Figure::begin`], then completed
/// in place by [`refine`](crate::refine::refine). The figure exclusively
/// owns its segments and its coordinate cache.
#[derive(Debug, Clone, Default)]
pub struct Figure {
    segments: Vec<Segment>,
    cache: CoordCache,
    solved_count: usize,
    seconds_spent: u32,
}

impl Figure {
    /// An empty figure with no backing storage.
    pub fn blank() -> Figure {
        Figure::default()
    }

    /// Build an unrefined figure from input bytes.
    ///
    /// Each input bit becomes one turn, so a B-byte input produces
    /// 8·B + 1 segments: a fixed (UP, 3) anchor segment followed by one
    /// unit-length segment per bit, its direction derived by turning
    /// clockwise for a 0 bit and anti-clockwise for a 1 bit.
    pub fn begin(data: &[u8]) -> Result<Figure, SpiralError> {
        let count = data.len() * 8 + 1;
        if count > MAX_SEGMENTS {
            return Err(SpiralError::CapacityExceeded(count));
        }
        let mut segments = Vec::new();
        segments.try_reserve_exact(count)?;
        segments.push(Segment {
            direction: Direction::Up,
            length: 3,
        });
        let mut current = Direction::Up;
        for rotation in encode::rotations(data) {
            current = current.turn(rotation);
            segments.push(Segment {
                direction: current,
                length: 1,
            });
        }
        Ok(Figure {
            segments,
            cache: CoordCache::default(),
            solved_count: 1,
            seconds_spent: 0,
        })
    }

    /// Rebuild a figure from already-decoded segments (deserialisation).
    /// Only the fixed first segment is trusted as solved.
    pub(crate) fn from_segments(segments: Vec<Segment>) -> Figure {
        let solved_count = segments.len().min(1);
        Figure {
            segments,
            cache: CoordCache::default(),
            solved_count,
            seconds_spent: 0,
        }
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Segment {
        self.segments[index]
    }

    /// Number of leading segments whose lengths are final.
    pub fn solved_count(&self) -> usize {
        self.solved_count
    }

    /// Number of segments still awaiting refinement.
    pub fn lines_remaining(&self) -> usize {
        self.segments.len() - self.solved_count
    }

    /// Whole seconds spent refining this figure so far. An odometer, not a
    /// correctness property.
    pub fn seconds_spent(&self) -> u32 {
        self.seconds_spent
    }

    pub(crate) fn set_solved_count(&mut self, solved_count: usize) {
        self.solved_count = solved_count;
    }

    pub(crate) fn add_seconds(&mut self, seconds: u32) {
        self.seconds_spent = self.seconds_spent.saturating_add(seconds);
    }

    /// Rewrite segment `index`'s length, invalidating cached vertices from
    /// that segment onwards. Lengths are truncated to the 30 bits a segment
    /// can hold, as on the wire.
    pub(crate) fn set_length(&mut self, index: usize, length: u32) {
        self.cache.validity = self.cache.validity.min(index);
        self.segments[index].length = length & MAX_LENGTH;
    }

    /// Vertex index of segment `index`'s start point: the sum of all
    /// preceding lengths.
    pub(crate) fn vertex_index(&self, index: usize) -> usize {
        self.segments[..index]
            .iter()
            .map(|segment| segment.length as usize)
            .sum()
    }

    /// Cached vertices. Entries at or past the watermark's vertex may be
    /// stale; callers go through [`Figure::ensure_cached_through`] first.
    pub(crate) fn cached_points(&self) -> &[Coord] {
        &self.cache.points
    }

    #[cfg(test)]
    pub(crate) fn cache_watermark(&self) -> usize {
        self.cache.validity
    }

    /// Materialise cached vertices through the endpoint of segment `last`.
    ///
    /// Resumes from the watermark: trustworthy vertices are never recomputed.
    /// Every intermediate unit-step vertex is stored, not only segment
    /// endpoints, because collision testing needs point-level granularity.
    pub(crate) fn ensure_cached_through(&mut self, last: usize) -> Result<(), SpiralError> {
        let limit = last + 1;
        if self.cache.validity >= limit {
            return Ok(());
        }
        if self.cache.points.is_empty() {
            self.cache.points.try_reserve(1)?;
            self.cache.points.push(Coord::default());
        }
        let start = self.vertex_index(self.cache.validity);
        self.cache.points.truncate(start + 1);
        let missing: usize = self.segments[self.cache.validity..limit]
            .iter()
            .map(|segment| segment.length as usize)
            .sum();
        self.cache.points.try_reserve(missing)?;
        let mut current = self.cache.points[start];
        for segment in &self.segments[self.cache.validity..limit] {
            for _ in 0..segment.length {
                current = current.step(segment.direction);
                self.cache.points.push(current);
            }
        }
        self.cache.validity = limit;
        Ok(())
    }

    /// Bounding box of every vertex of the figure, at current lengths.
    pub fn bounds(&self) -> Bounds {
        let mut location = Coord::default();
        let mut bounds = Bounds::default();
        for segment in &self.segments {
            location = location.translated(segment.direction, segment.length);
            bounds.include(location);
        }
        bounds
    }
}
