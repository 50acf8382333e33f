use std::collections::VecDeque;

use snake_arena_core::{orientation_between, Direction, PixelCoord, TileCoord};

/// Number of segments a freshly spawned creature carries.
pub const INITIAL_BODY_LENGTH: usize = 2;

/// Trail of positions occupied by the creature's body, most recent first.
///
/// Pixel and tile entries are stored side by side and always have the same
/// length and ordering. Each boundary crossing shifts the window by one entry;
/// growth widens it by duplicating the oldest entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentHistory {
    pixels: VecDeque<PixelCoord>,
    tiles: VecDeque<TileCoord>,
}

impl SegmentHistory {
    /// Builds the initial two-segment body trailing one tile below the head.
    #[must_use]
    pub fn trailing(head_pixel: PixelCoord, head_tile: TileCoord, tile_size: i32) -> Self {
        Self::from_segments([
            (head_pixel, head_tile),
            (head_pixel.offset(0, tile_size), head_tile.offset(0, 1)),
        ])
    }

    /// Builds a history from explicit segments, most recent first.
    #[must_use]
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = (PixelCoord, TileCoord)>,
    {
        let (pixels, tiles) = segments.into_iter().unzip();
        Self { pixels, tiles }
    }

    /// Number of segments in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Reports whether the window holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Pixel entries, most recent first.
    pub fn pixels(&self) -> impl ExactSizeIterator<Item = PixelCoord> + '_ {
        self.pixels.iter().copied()
    }

    /// Tile entries, most recent first.
    pub fn tiles(&self) -> impl ExactSizeIterator<Item = TileCoord> + '_ {
        self.tiles.iter().copied()
    }

    /// Oldest segment, drawn as the tail.
    #[must_use]
    pub fn last(&self) -> Option<(PixelCoord, TileCoord)> {
        Some((*self.pixels.back()?, *self.tiles.back()?))
    }

    /// Pushes a new segment to the front and drops the oldest one.
    pub fn shift(&mut self, pixel: PixelCoord, tile: TileCoord) {
        self.pixels.push_front(pixel);
        let _ = self.pixels.pop_back();
        self.tiles.push_front(tile);
        let _ = self.tiles.pop_back();
    }

    /// Duplicates the oldest segment, widening the window by one.
    ///
    /// An empty history has nothing to duplicate and stays empty.
    pub fn grow(&mut self) {
        let Some((pixel, tile)) = self.last() else {
            return;
        };
        self.pixels.push_back(pixel);
        self.tiles.push_back(tile);
    }

    /// Reports whether the most recent tile reappears further down the body.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let mut tiles = self.tiles.iter();
        let Some(head) = tiles.next() else {
            return false;
        };
        tiles.any(|tile| tile == head)
    }

    /// Orientation of the segment at `index`, looking towards `head`.
    ///
    /// Each segment is compared with its newer neighbour; the segment at index 0
    /// is compared with the live head position. When the two positions are
    /// identical the comparison moves one step closer to the head. Returns
    /// `None` when every position up to the head coincides.
    #[must_use]
    pub fn orientation(&self, index: usize, head: PixelCoord) -> Option<Direction> {
        let mut older = *self.pixels.get(index)?;
        for newer_index in (0..index).rev() {
            let newer = self.pixels[newer_index];
            if let Some(orientation) = orientation_between(newer, older) {
                return Some(orientation);
            }
            older = newer;
        }
        orientation_between(head, older)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SegmentHistory {
        SegmentHistory::from_segments([
            (PixelCoord::new(40, 40), TileCoord::new(2, 2)),
            (PixelCoord::new(40, 56), TileCoord::new(2, 3)),
        ])
    }

    #[test]
    fn trailing_history_starts_with_two_segments() {
        let history =
            SegmentHistory::trailing(PixelCoord::new(120, 94), TileCoord::new(7, 5), 16);
        assert_eq!(history.len(), INITIAL_BODY_LENGTH);
        assert_eq!(
            history.tiles().collect::<Vec<_>>(),
            vec![TileCoord::new(7, 5), TileCoord::new(7, 6)]
        );
        assert_eq!(
            history.pixels().collect::<Vec<_>>(),
            vec![PixelCoord::new(120, 94), PixelCoord::new(120, 110)]
        );
    }

    #[test]
    fn shift_keeps_length_and_drops_oldest() {
        let mut history = sample();
        history.shift(PixelCoord::new(40, 24), TileCoord::new(2, 1));

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.tiles().collect::<Vec<_>>(),
            vec![TileCoord::new(2, 1), TileCoord::new(2, 2)]
        );
        assert_eq!(history.pixels().len(), history.tiles().len());
    }

    #[test]
    fn grow_duplicates_tail_and_survives_next_shift() {
        let mut history = sample();
        history.grow();
        assert_eq!(history.len(), 3);
        assert_eq!(
            history.last(),
            Some((PixelCoord::new(40, 56), TileCoord::new(2, 3)))
        );

        history.shift(PixelCoord::new(40, 24), TileCoord::new(2, 1));
        assert_eq!(history.len(), 3);
        assert_eq!(
            history.tiles().collect::<Vec<_>>(),
            vec![
                TileCoord::new(2, 1),
                TileCoord::new(2, 2),
                TileCoord::new(2, 3)
            ]
        );
    }

    #[test]
    fn grow_on_empty_history_is_a_no_op() {
        let mut history = SegmentHistory::from_segments(Vec::<(PixelCoord, TileCoord)>::new());
        history.grow();
        assert!(history.is_empty());
    }

    #[test]
    fn overlap_ignores_everything_but_the_head() {
        let mut history = SegmentHistory::from_segments([
            (PixelCoord::new(0, 0), TileCoord::new(1, 1)),
            (PixelCoord::new(0, 0), TileCoord::new(2, 1)),
            (PixelCoord::new(0, 0), TileCoord::new(2, 1)),
        ]);
        assert!(!history.head_overlaps_body());

        history.shift(PixelCoord::new(0, 0), TileCoord::new(2, 1));
        assert!(history.head_overlaps_body());
    }

    #[test]
    fn single_segment_never_overlaps() {
        let history =
            SegmentHistory::from_segments([(PixelCoord::new(0, 0), TileCoord::new(0, 0))]);
        assert!(!history.head_overlaps_body());
    }

    #[test]
    fn orientation_walks_towards_the_head_past_duplicates() {
        let mut history = sample();
        history.grow();
        let head = PixelCoord::new(40, 30);

        assert_eq!(history.orientation(0, head), Some(Direction::North));
        assert_eq!(history.orientation(1, head), Some(Direction::North));
        assert_eq!(history.orientation(2, head), Some(Direction::North));
        assert_eq!(history.orientation(3, head), None);
    }

    #[test]
    fn orientation_is_none_when_everything_coincides() {
        let history = SegmentHistory::from_segments([
            (PixelCoord::new(5, 5), TileCoord::new(0, 0)),
            (PixelCoord::new(5, 5), TileCoord::new(0, 0)),
        ]);
        assert_eq!(history.orientation(1, PixelCoord::new(5, 5)), None);
    }
}
