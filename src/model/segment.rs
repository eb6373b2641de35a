//! A bounded container of points, each tagged with a local group tag.
//!
//! Grouped segments keep one sentinel point at the front of their point list,
//! tagged with the last local tag (`capacity - 1`). The sentinel is never user
//! data: it is skipped when iterating real points, and the count of its own
//! tag is corrected by one. The single-cells segment has no sentinel.

use super::point::Point;

/// Whether a segment holds single cells or a slice of numbered groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentKind {
    /// Group 0, one tag, no sentinel.
    SingleCells,
    /// `capacity` consecutive group ids, with a sentinel point.
    Groups,
}

/// A fixed-capacity, group-tagged point container.
#[derive(Debug, Clone)]
pub struct Segment {
    kind: SegmentKind,
    capacity: usize,
    points: Vec<Point>,
    tags: Vec<usize>,
    /// Tag that points placed with [`Segment::add_point`] receive.
    active_tag: usize,
}

impl Segment {
    /// Create the dedicated group 0 segment.
    pub fn single_cells() -> Self {
        Self {
            kind: SegmentKind::SingleCells,
            capacity: 1,
            points: Vec::new(),
            tags: Vec::new(),
            active_tag: 0,
        }
    }

    /// Create a grouped segment holding only its sentinel.
    ///
    /// A capacity of 0 is treated as 1.
    pub fn groups(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            kind: SegmentKind::Groups,
            capacity,
            points: vec![Point::sentinel()],
            tags: vec![capacity - 1],
            active_tag: 0,
        }
    }

    /// Number of local tags this segment distinguishes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Local tag shared with the sentinel, if the segment has one.
    pub fn sentinel_tag(&self) -> Option<usize> {
        match self.kind {
            SegmentKind::SingleCells => None,
            SegmentKind::Groups => Some(self.capacity - 1),
        }
    }

    fn sentinel_len(&self) -> usize {
        usize::from(self.sentinel_tag().is_some())
    }

    /// Tag that [`Segment::add_point`] uses.
    pub fn active_tag(&self) -> usize {
        self.active_tag
    }

    /// Select the tag for subsequently placed points.
    ///
    /// Returns false (and leaves the active tag unchanged) if `tag` is out of range.
    pub fn set_active_tag(&mut self, tag: usize) -> bool {
        if tag >= self.capacity {
            log::warn!(
                "Ignoring active tag {} for segment of capacity {}",
                tag,
                self.capacity
            );
            return false;
        }
        self.active_tag = tag;
        true
    }

    /// Add a point under `tag`.
    ///
    /// Returns false (and stores nothing) if `tag` is out of range.
    pub fn append(&mut self, point: Point, tag: usize) -> bool {
        if tag >= self.capacity {
            log::warn!(
                "Ignoring point {} with tag {} for segment of capacity {}",
                point,
                tag,
                self.capacity
            );
            return false;
        }
        self.points.push(point);
        self.tags.push(tag);
        true
    }

    /// Add a point under the active tag.
    ///
    /// Returns false (and stores nothing) under the same conditions as
    /// [`Segment::append`].
    pub fn add_point(&mut self, point: Point) -> bool {
        let tag = self.active_tag;
        self.append(point, tag)
    }

    /// Number of points recorded under `tag`, sentinel included.
    pub fn raw_count(&self, tag: usize) -> usize {
        self.tags.iter().filter(|&&t| t == tag).count()
    }

    /// Number of user points recorded under `tag`.
    pub fn corrected_count(&self, tag: usize) -> usize {
        let raw = self.raw_count(tag);
        if self.sentinel_tag() == Some(tag) {
            raw.saturating_sub(1)
        } else {
            raw
        }
    }

    /// Total number of user points in this segment.
    pub fn real_count(&self) -> usize {
        self.points.len() - self.sentinel_len()
    }

    /// True if the segment holds no user points.
    pub fn is_empty(&self) -> bool {
        self.real_count() == 0
    }

    /// All stored points including the sentinel, in insertion order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// User points with their local tags, in insertion order.
    pub fn real_points(&self) -> impl Iterator<Item = (&Point, usize)> + '_ {
        let skip = self.sentinel_len();
        self.points
            .iter()
            .zip(self.tags.iter().copied())
            .skip(skip)
    }

    /// Remove every user point tagged `tag`, keeping the sentinel in front.
    ///
    /// Returns the number of user points removed.
    pub fn clear_tag(&mut self, tag: usize) -> usize {
        let before = self.real_count();
        let mut rebuilt = match self.kind {
            SegmentKind::SingleCells => Segment::single_cells(),
            SegmentKind::Groups => Segment::groups(self.capacity),
        };
        rebuilt.active_tag = self.active_tag;
        for (point, t) in self.real_points() {
            if t != tag {
                rebuilt.points.push(point.clone());
                rebuilt.tags.push(t);
            }
        }
        *self = rebuilt;
        before - self.real_count()
    }

    /// Deep, independent copy used for saved-state comparison.
    pub fn clone_for_snapshot(&self) -> Segment {
        self.clone()
    }

    /// True if both segments hold the same (point, tag) pairs in the same order.
    ///
    /// The active tag is a selection, not content, and is ignored.
    pub fn equals(&self, other: &Segment) -> bool {
        self.points.len() == other.points.len()
            && self.points == other.points
            && self.tags == other.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grouped_segment_holds_only_sentinel() {
        let segment = Segment::groups(10);
        assert_eq!(segment.points(), &[Point::sentinel()]);
        assert_eq!(segment.raw_count(9), 1);
        assert_eq!(segment.corrected_count(9), 0);
        assert!(segment.is_empty());
        assert_eq!(segment.real_points().count(), 0);
    }

    #[test]
    fn test_count_correction_only_on_sentinel_tag() {
        let mut segment = Segment::groups(10);
        for i in 0..3 {
            segment.append(Point::new(i, i), 4);
        }
        assert_eq!(segment.corrected_count(4), 3);
        assert_eq!(segment.raw_count(4), 3);
        assert_eq!(segment.corrected_count(9), 0);
        assert_eq!(segment.corrected_count(0), 0);

        segment.append(Point::new(7, 7), 9);
        assert_eq!(segment.raw_count(9), 2);
        assert_eq!(segment.corrected_count(9), 1);
    }

    #[test]
    fn test_single_cells_segment_has_no_correction() {
        let mut segment = Segment::single_cells();
        assert_eq!(segment.sentinel_tag(), None);
        assert_eq!(segment.corrected_count(0), 0);
        segment.add_point(Point::new(1, 1));
        assert_eq!(segment.raw_count(0), 1);
        assert_eq!(segment.corrected_count(0), 1);
        assert_eq!(segment.real_points().count(), 1);
    }

    #[test]
    fn test_out_of_range_tag_rejected() {
        let mut segment = Segment::groups(10);
        assert!(!segment.append(Point::new(1, 1), 10));
        assert!(!segment.set_active_tag(12));
        assert_eq!(segment.active_tag(), 0);
        assert!(segment.is_empty());

        let mut singles = Segment::single_cells();
        assert!(!singles.append(Point::new(1, 1), 1));
    }

    #[test]
    fn test_add_point_uses_active_tag() {
        let mut segment = Segment::groups(10);
        segment.set_active_tag(3);
        assert!(segment.add_point(Point::new(5, 6)));
        assert_eq!(segment.corrected_count(3), 1);
        let tags: Vec<usize> = segment.real_points().map(|(_, t)| t).collect();
        assert_eq!(tags, vec![3]);
    }

    #[test]
    fn test_clear_tag_keeps_other_points_and_order() {
        let mut segment = Segment::groups(10);
        segment.append(Point::new(1, 1), 0);
        segment.append(Point::new(2, 2), 1);
        segment.append(Point::new(3, 3), 0);
        segment.append(Point::new(4, 4), 2);

        assert_eq!(segment.clear_tag(0), 2);
        let remaining: Vec<(Point, usize)> = segment
            .real_points()
            .map(|(p, t)| (p.clone(), t))
            .collect();
        assert_eq!(
            remaining,
            vec![(Point::new(2, 2), 1), (Point::new(4, 4), 2)]
        );
        assert_eq!(segment.points()[0], Point::sentinel());
    }

    #[test]
    fn test_clear_sentinel_tag_readds_sentinel() {
        let mut segment = Segment::groups(10);
        segment.append(Point::new(1, 1), 9);
        segment.append(Point::new(2, 2), 3);

        assert_eq!(segment.clear_tag(9), 1);
        assert_eq!(segment.raw_count(9), 1);
        assert_eq!(segment.corrected_count(9), 0);
        assert_eq!(segment.corrected_count(3), 1);
        assert_eq!(segment.points()[0], Point::sentinel());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut segment = Segment::groups(10);
        segment.append(Point::new(1, 1), 0);
        let snapshot = segment.clone_for_snapshot();
        assert!(segment.equals(&snapshot));

        segment.append(Point::new(2, 2), 0);
        assert!(!segment.equals(&snapshot));
        assert_eq!(snapshot.real_count(), 1);
    }

    #[test]
    fn test_equals_ignores_active_tag_but_not_tags() {
        let mut a = Segment::groups(10);
        let mut b = Segment::groups(10);
        a.append(Point::new(1, 1), 0);
        b.append(Point::new(1, 1), 0);
        b.set_active_tag(5);
        assert!(a.equals(&b));

        let mut c = Segment::groups(10);
        c.append(Point::new(1, 1), 1);
        assert!(!a.equals(&c));

        let mut d = Segment::groups(10);
        d.append(Point::new(1, 2), 0);
        assert!(!a.equals(&d));
    }
}
