//! Self-intersection test for the most recently modified segment.

use crate::figure::Figure;

/// Test segment `last` against every earlier segment, returning the index
/// of the lowest-indexed segment sharing a lattice point with it.
///
/// Each segment is treated as the closed set of unit-step points it
/// traverses. The vertex shared by consecutive segments is owned by the
/// earlier one, so a segment never "collides" with its own start point.
/// Segments `last - 1` (perpendicular, shares only the turn vertex) and
/// `last - 2` (adjacent parallel) cannot intersect `last` and are skipped.
///
/// The caller must have the coordinate cache materialised through `last`.
pub(crate) fn check(figure: &Figure, last: usize) -> Option<usize> {
    // fewer than four segments cannot close a loop
    if figure.len() < 4 {
        return None;
    }
    let points = figure.cached_points();
    let start_of_last = figure.vertex_index(last);
    let end = start_of_last + figure.segment(last).length as usize + 1;
    let last_points = &points[start_of_last..end];

    // Segment 0 owns the origin as well as its own steps; every later
    // segment owns the steps past the vertex it shares with its predecessor.
    let mut from = 0;
    let mut to = figure.segment(0).length as usize + 1;
    for owner in 0..last.saturating_sub(2) {
        for point in &points[from..to] {
            if last_points.contains(point) {
                return Some(owner);
            }
        }
        from = to;
        to += figure.segment(owner + 1).length as usize;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Segment;
    use crate::geom::Coord;
    use crate::geom::Direction::{Down, Left, Right, Up};

    fn figure_of(specs: &[(crate::geom::Direction, u32)]) -> Figure {
        let segments = specs
            .iter()
            .map(|&(direction, length)| Segment { direction, length })
            .collect();
        Figure::from_segments(segments)
    }

    /// All-pairs oracle: walk every segment's closed point set and test
    /// disjointness directly, allowing only the shared turn vertices.
    fn self_avoiding(figure: &Figure) -> bool {
        let mut sets: Vec<Vec<Coord>> = Vec::new();
        let mut current = Coord::default();
        for segment in figure.segments() {
            let mut set = vec![current];
            for _ in 0..segment.length {
                current = current.step(segment.direction);
                set.push(current);
            }
            sets.push(set);
        }
        for i in 0..sets.len() {
            for j in i + 1..sets.len() {
                let shared = sets[i]
                    .iter()
                    .filter(|&point| sets[j].contains(point))
                    .count();
                let allowed = if j - i == 1 { 1 } else { 0 };
                if shared > allowed {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn short_figures_never_collide() {
        let mut figure = figure_of(&[(Up, 3), (Right, 1), (Up, 1)]);
        figure.ensure_cached_through(2).unwrap();
        assert_eq!(check(&figure, 2), None);
    }

    #[test]
    fn curling_back_hits_the_anchor() {
        // up 3, right 1, down 2, left 1: the last segment ends on the
        // anchor's column at height 1.
        let mut figure = figure_of(&[(Up, 3), (Right, 1), (Down, 2), (Left, 1)]);
        figure.ensure_cached_through(3).unwrap();
        assert_eq!(check(&figure, 3), Some(0));
        assert!(!self_avoiding(&figure));
    }

    #[test]
    fn collider_is_the_lowest_indexed_segment() {
        // the closing segment runs straight through both the anchor's
        // column and segment 1's corner; segment 0 must be reported.
        let mut figure = figure_of(&[(Up, 3), (Right, 2), (Down, 4), (Left, 2), (Up, 4)]);
        figure.ensure_cached_through(4).unwrap();
        assert_eq!(check(&figure, 4), Some(0));
    }

    #[test]
    fn clear_figures_report_no_collision() {
        let mut figure = figure_of(&[(Up, 3), (Right, 2), (Down, 2), (Right, 1), (Up, 1)]);
        figure.ensure_cached_through(4).unwrap();
        assert_eq!(check(&figure, 4), None);
        assert!(self_avoiding(&figure));
    }

    #[test]
    fn matches_the_all_pairs_oracle_on_refined_figures() {
        use crate::config::RefineConfig;
        use crate::refine::refine;

        for threshold in [0, 1, 4] {
            let mut figure = Figure::begin(b"ok").unwrap();
            let config = RefineConfig {
                threshold,
                ..RefineConfig::default()
            };
            refine(&mut figure, &config, None).unwrap();
            assert!(self_avoiding(&figure), "threshold {}", threshold);
            let last = figure.len() - 1;
            figure.ensure_cached_through(last).unwrap();
            for index in 0..figure.len() {
                assert_eq!(check(&figure, index), None, "threshold {}", threshold);
            }
        }
    }
}
