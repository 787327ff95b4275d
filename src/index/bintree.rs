//! A self-expanding binary interval tree.
//!
//! Indexes items by 1-dimensional intervals (typically the projection of
//! 2-D objects onto an axis) and answers range queries.  The tree does not
//! require the overall extent up front: the root cover doubles outward from
//! the origin until it spans every inserted interval.

use super::Interval;

/// Minimum-extent padding: a zero-width interval would never fit a
/// subdivision cell, so it is widened to the smallest extent seen so far.
fn ensure_extent(item: Interval, min_extent: f64) -> Interval {
    if item.width() > 0.0 {
        return item;
    }
    Interval::new(item.min - min_extent / 2.0, item.min + min_extent / 2.0)
}

#[derive(Clone, Debug)]
struct BNode<T> {
    cover: Interval,
    /// Items whose interval spans this node's midpoint (or that are too
    /// large for either child).
    items: Vec<(Interval, T)>,
    sub: [Option<Box<BNode<T>>>; 2],
}

impl<T> BNode<T> {
    fn new(cover: Interval) -> Self {
        Self { cover, items: Vec::new(), sub: [None, None] }
    }

    fn mid(&self) -> f64 {
        (self.cover.min + self.cover.max) / 2.0
    }

    fn insert(&mut self, item: Interval, value: T) {
        debug_assert!(self.cover.contains(&item));
        let mid = self.mid();
        let half = self.cover.width() / 2.0;
        // Stop subdividing once cells get within a factor of the item size;
        // otherwise a tiny interval would recurse without bound.
        if half < item.width() * 2.0 {
            self.items.push((item, value));
            return;
        }
        let (idx, cover) = if item.max <= mid {
            (0, Interval::new(self.cover.min, mid))
        } else if item.min >= mid {
            (1, Interval::new(mid, self.cover.max))
        } else {
            self.items.push((item, value));
            return;
        };
        self.sub[idx]
            .get_or_insert_with(|| Box::new(BNode::new(cover)))
            .insert(item, value);
    }

    fn query<'a>(&'a self, range: &Interval, out: &mut Vec<&'a T>) {
        if !self.cover.overlaps(range) {
            return;
        }
        for (interval, value) in &self.items {
            if interval.overlaps(range) {
                out.push(value);
            }
        }
        for sub in self.sub.iter().flatten() {
            sub.query(range, out);
        }
    }

    fn drain(&mut self, out: &mut Vec<(Interval, T)>) {
        out.append(&mut self.items);
        for sub in &mut self.sub {
            if let Some(mut s) = sub.take() {
                s.drain(out);
            }
        }
    }

    fn depth(&self) -> usize {
        1 + self.sub.iter().flatten().map(|s| s.depth()).max().unwrap_or(0)
    }

    fn count(&self) -> usize {
        self.items.len() + self.sub.iter().flatten().map(|s| s.count()).sum::<usize>()
    }
}

/// Binary interval tree over items of type `T`.
#[derive(Clone, Debug)]
pub struct Bintree<T> {
    root: Option<BNode<T>>,
    /// Smallest non-zero extent inserted so far; pads zero-width intervals.
    min_extent: f64,
}

impl<T> Default for Bintree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Bintree<T> {
    pub fn new() -> Self {
        Self { root: None, min_extent: 1.0 }
    }

    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, BNode::count)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, BNode::depth)
    }

    pub fn insert(&mut self, item: Interval, value: T) {
        let width = item.width();
        if width > 0.0 && width < self.min_extent {
            self.min_extent = width;
        }
        let item = ensure_extent(item, self.min_extent);

        // Expand the root cover outward until it spans the item.
        match &mut self.root {
            None => {
                let mut cover = Interval::new(-1.0, 1.0);
                while !cover.contains(&item) {
                    cover = Interval::new(cover.min * 2.0, cover.max * 2.0);
                    if !cover.min.is_finite() {
                        break;
                    }
                }
                let mut root = BNode::new(cover);
                root.insert(item, value);
                self.root = Some(root);
            }
            Some(root) => {
                if !root.cover.contains(&item) {
                    // Double the cover outward until it spans the item, then
                    // rebuild.  Expansion is rare (O(log range) times over
                    // the life of the tree), so the re-insertion cost is
                    // acceptable.
                    let mut all = Vec::new();
                    root.drain(&mut all);
                    let mut cover = root.cover;
                    while !cover.contains(&item) {
                        cover = Interval::new(cover.min * 2.0, cover.max * 2.0);
                        if !cover.min.is_finite() {
                            break;
                        }
                    }
                    *root = BNode::new(cover);
                    for (i, v) in all {
                        root.insert(i, v);
                    }
                }
                root.insert(item, value);
            }
        }
    }

    /// All items whose interval overlaps `range`.
    pub fn query(&self, range: Interval) -> Vec<&T> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.query(&range, &mut out);
        }
        out
    }

    /// All items whose interval contains the value `v`.
    pub fn query_value(&self, v: f64) -> Vec<&T> {
        self.query(Interval::point(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_finds_overlapping_items_only() {
        let mut tree = Bintree::new();
        tree.insert(Interval::new(0.0, 1.0), "a");
        tree.insert(Interval::new(2.0, 3.0), "b");
        tree.insert(Interval::new(0.5, 2.5), "c");
        let mut hits: Vec<_> = tree.query(Interval::new(0.9, 1.1)).into_iter().copied().collect();
        hits.sort();
        assert_eq!(hits, vec!["a", "c"]);
        assert_eq!(tree.query(Interval::new(10.0, 11.0)).len(), 0);
    }

    #[test]
    fn expands_beyond_initial_cover() {
        let mut tree = Bintree::new();
        tree.insert(Interval::new(0.0, 1.0), 1);
        tree.insert(Interval::new(1000.0, 1001.0), 2);
        tree.insert(Interval::new(-500.0, -499.0), 3);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.query_value(1000.5), vec![&2]);
        assert_eq!(tree.query_value(-499.5), vec![&3]);
    }

    #[test]
    fn zero_width_intervals_are_padded() {
        let mut tree = Bintree::new();
        tree.insert(Interval::new(0.0, 0.125), 1); // sets min_extent
        tree.insert(Interval::point(5.0), 2);
        assert_eq!(tree.query_value(5.0), vec![&2]);
        // The padded interval is centred on the point, so a nearby query
        // within half the min extent still finds it.
        assert_eq!(tree.query_value(5.05), vec![&2]);
    }

    #[test]
    fn negative_coordinates() {
        let mut tree = Bintree::new();
        for i in 0..100 {
            let lo = -50.0 + i as f64;
            tree.insert(Interval::new(lo, lo + 0.5), i);
        }
        assert_eq!(tree.len(), 100);
        let hits = tree.query(Interval::new(-10.2, -9.9));
        assert!(hits.contains(&&39) || hits.contains(&&40));
    }
}
