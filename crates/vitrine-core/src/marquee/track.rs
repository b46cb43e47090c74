/// Split items across two tracks with ceiling division
///
/// The first track gets `ceil(n/2)` items, the second the remainder.
pub fn split_items<T>(items: Vec<T>) -> (Vec<T>, Vec<T>) {
    let half = items.len().div_ceil(2);
    let mut first = items;
    let second = first.split_off(half);
    (first, second)
}

/// One marquee track: an ordered item sequence plus its seamless-loop double
///
/// The rendered form is the sequence followed by a structural copy of
/// itself, so an offset that wraps at the one-copy boundary lands on
/// identical content. The double is derived from the single owned sequence;
/// appending items grows the originals and the doubled view follows, which
/// keeps the duplication whole-track rather than per item.
#[derive(Debug, Clone)]
pub struct Track<T> {
    items: Vec<T>,
}

impl<T> Default for Track<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Track<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of item views in the doubled rendering
    pub fn rendered_len(&self) -> usize {
        self.items.len() * 2
    }

    /// The doubled sequence: content followed by its copy
    pub fn rendered(&self) -> impl Iterator<Item = &T> + Clone {
        self.items.iter().chain(self.items.iter())
    }

    /// Append newly arrived items; existing entries are never rebuilt
    pub fn append(&mut self, new_items: impl IntoIterator<Item = T>) {
        self.items.extend(new_items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ceiling_division() {
        let (a, b) = split_items(vec![1, 2, 3]);
        assert_eq!(a, vec![1, 2]);
        assert_eq!(b, vec![3]);
    }

    #[test]
    fn test_split_even() {
        let (a, b) = split_items(vec![1, 2, 3, 4]);
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_split_preserves_total() {
        for n in 0..=7 {
            let items: Vec<usize> = (0..n).collect();
            let (a, b) = split_items(items);
            assert_eq!(a.len() + b.len(), n);
            assert_eq!(a.len(), n.div_ceil(2));
        }
    }

    #[test]
    fn test_split_empty() {
        let (a, b) = split_items(Vec::<i32>::new());
        assert!(a.is_empty());
        assert!(b.is_empty());
    }

    #[test]
    fn test_rendered_is_doubled() {
        let track = Track::new(vec!["x", "y", "z"]);
        assert_eq!(track.rendered_len(), 6);

        let rendered: Vec<&str> = track.rendered().copied().collect();
        assert_eq!(rendered[..3], rendered[3..]);
        assert_eq!(rendered[..3], ["x", "y", "z"]);
    }

    #[test]
    fn test_append_keeps_order() {
        let mut track = Track::new(vec![1, 2]);
        track.append(vec![3]);
        assert_eq!(track.items(), &[1, 2, 3]);
        assert_eq!(track.rendered_len(), 6);
    }

    #[test]
    fn test_empty_track_renders_nothing() {
        let track: Track<u8> = Track::new(Vec::new());
        assert_eq!(track.rendered().count(), 0);
    }
}
