//! Annotation store: an unbounded group space sharded over fixed-capacity segments.
//!
//! Group 0 (single cells) lives in its own segment. A group `g >= 1` lives in
//! segment `(g - 1) / capacity` under local tag `(g - 1) % capacity`. Segments
//! are created in order, on demand, and only ever dropped all together.

use super::marker::MarkerStyle;
use super::point::Point;
use super::segment::Segment;
use crate::constants::{DEFAULT_SEGMENT_CAPACITY, MAX_GROUP_ID};

/// Where a group id is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The dedicated single-cells segment.
    SingleCells,
    /// A grouped segment and a local tag inside it.
    Grouped { segment: usize, tag: usize },
}

/// Segmented store of group-tagged points.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    capacity: usize,
    singles: Segment,
    segments: Vec<Segment>,
    active: Slot,
    group_count: usize,
    style: MarkerStyle,
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationStore {
    /// Create an empty store with the default segment capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SEGMENT_CAPACITY)
    }

    /// Create an empty store whose segments each hold `capacity` groups.
    ///
    /// A capacity of 0 is treated as 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            singles: Segment::single_cells(),
            segments: Vec::new(),
            active: Slot::SingleCells,
            group_count: 1,
            style: MarkerStyle::default(),
        }
    }

    /// Builder-style marker style.
    pub fn with_style(mut self, style: MarkerStyle) -> Self {
        self.style = style;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Map a group id to its segment and local tag, without creating anything.
    pub fn resolve(&self, group: usize) -> Slot {
        if group == 0 {
            Slot::SingleCells
        } else {
            Slot::Grouped {
                segment: (group - 1) / self.capacity,
                tag: (group - 1) % self.capacity,
            }
        }
    }

    /// Inverse of [`AnnotationStore::resolve`].
    pub fn group_of(&self, slot: Slot) -> usize {
        match slot {
            Slot::SingleCells => 0,
            Slot::Grouped { segment, tag } => segment * self.capacity + tag + 1,
        }
    }

    fn ensure_segment(&mut self, index: usize) {
        while self.segments.len() <= index {
            log::debug!(
                "Creating segment {} for groups {}..={}",
                self.segments.len(),
                self.segments.len() * self.capacity + 1,
                (self.segments.len() + 1) * self.capacity
            );
            self.segments.push(Segment::groups(self.capacity));
        }
    }

    /// Make `group` the group that receives subsequently added points.
    ///
    /// Groups above [`MAX_GROUP_ID`] are refused: nothing changes and `None`
    /// is returned.
    pub fn set_active_group(&mut self, group: usize) -> Option<Slot> {
        if group > MAX_GROUP_ID {
            log::warn!("Ignoring group {} above the limit of {}", group, MAX_GROUP_ID);
            return None;
        }
        let slot = self.resolve(group);
        if let Slot::Grouped { segment, tag } = slot {
            self.ensure_segment(segment);
            self.segments[segment].set_active_tag(tag);
        }
        self.active = slot;
        self.group_count = self.group_count.max(group.saturating_add(1));
        Some(slot)
    }

    /// Group id currently receiving points.
    pub fn active_group(&self) -> usize {
        self.group_of(self.active)
    }

    pub fn active_slot(&self) -> Slot {
        self.active
    }

    /// Add a point to the active group.
    ///
    /// A point on the sentinel position is refused, so it can never be
    /// mistaken for the sentinel. Returns whether the point was stored.
    pub fn add_point(&mut self, point: Point) -> bool {
        if point.is_sentinel_position() {
            log::warn!("Ignoring point {} on the reserved sentinel position", point);
            return false;
        }
        match self.active {
            Slot::SingleCells => self.singles.add_point(point),
            Slot::Grouped { segment, .. } => self.segments[segment].add_point(point),
        }
    }

    /// User-facing number of points in `group`; 0 for groups never addressed.
    pub fn nuclei_count(&self, group: usize) -> usize {
        match self.resolve(group) {
            Slot::SingleCells => self.singles.corrected_count(0),
            Slot::Grouped { segment, tag } => self
                .segments
                .get(segment)
                .map_or(0, |s| s.corrected_count(tag)),
        }
    }

    /// Remove every point of `group`. The group stays addressable.
    ///
    /// Returns the number of points removed.
    pub fn clear_group(&mut self, group: usize) -> usize {
        if self.nuclei_count(group) == 0 {
            return 0;
        }
        let removed = match self.resolve(group) {
            Slot::SingleCells => self.singles.clear_tag(0),
            Slot::Grouped { segment, tag } => self.segments[segment].clear_tag(tag),
        };
        log::info!("Cleared {} points from group {}", removed, group);
        removed
    }

    /// Drop every point and segment, keeping the marker style.
    pub fn clear_all(&mut self) {
        *self = Self::with_capacity(self.capacity).with_style(self.style);
        log::info!("Cleared all markers");
    }

    /// True if no segment holds a user point.
    pub fn is_empty(&self) -> bool {
        self.singles.is_empty() && self.segments.iter().all(Segment::is_empty)
    }

    /// Upper bound (exclusive) of the group ids in use.
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Total number of user points.
    pub fn total_points(&self) -> usize {
        self.singles.real_count() + self.segments.iter().map(Segment::real_count).sum::<usize>()
    }

    /// The single-cells segment.
    pub fn single_cells(&self) -> &Segment {
        &self.singles
    }

    /// Grouped segments in ascending order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Every segment, single cells first.
    pub fn all_segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        std::iter::once(&self.singles).chain(self.segments.iter())
    }

    /// The segment that receives new points; this is what an overlay highlights.
    pub fn active_segment(&self) -> &Segment {
        match self.active {
            Slot::SingleCells => &self.singles,
            Slot::Grouped { segment, .. } => &self.segments[segment],
        }
    }

    /// Every user point with its global group id: single cells first, then
    /// grouped segments in ascending order, insertion order inside a segment.
    pub fn grouped_points(&self) -> impl Iterator<Item = (usize, &Point)> + '_ {
        let singles = self.singles.real_points().map(|(point, _)| (0, point));
        let grouped = self
            .segments
            .iter()
            .enumerate()
            .flat_map(move |(index, segment)| {
                segment.real_points().map(move |(point, tag)| {
                    (
                        self.group_of(Slot::Grouped {
                            segment: index,
                            tag,
                        }),
                        point,
                    )
                })
            });
        singles.chain(grouped)
    }

    pub fn style(&self) -> MarkerStyle {
        self.style
    }

    /// Apply a marker style to every segment.
    pub fn update_markers(&mut self, style: MarkerStyle) {
        self.style = style;
    }
}
