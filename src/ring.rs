// Fixed-capacity FIFO ring used for gesture and coordinate history.
// Pushing onto a full ring overwrites the oldest slot; nothing ever reallocates.

#[derive(Clone, Debug)]
pub struct Ring<T> {
    /// Backing slots; grows up to `capacity` once, then is overwritten in place.
    slots: Vec<T>,
    capacity: usize,
    /// Next slot to write once the ring is full (also the oldest element).
    head: usize,
}

impl<T: Copy> Ring<T> {
    /// # Panics
    /// If `capacity` is zero; callers validate their config first.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "ring capacity must be non-zero");
        Self { slots: Vec::with_capacity(capacity), capacity, head: 0 }
    }

    /// Append `value`, evicting the oldest element when full.
    pub fn push(&mut self, value: T) {
        if self.slots.len() < self.capacity {
            self.slots.push(value);
        } else {
            self.slots[self.head] = value;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = 0;
    }

    /// Element `age` steps back from the newest (0 = newest).
    pub fn back(&self, age: usize) -> Option<T> {
        let len = self.slots.len();
        if age >= len {
            return None;
        }
        // Chronological index of the element, then map onto the slot.
        let chrono = len - 1 - age;
        Some(self.slots[(self.head + chrono) % len])
    }

    /// The newest `count` elements (fewer if the ring holds fewer), oldest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = T> + '_ {
        let len = self.slots.len();
        let take = count.min(len);
        (len - take..len).map(move |chrono| self.slots[(self.head + chrono) % len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn overflow_evicts_oldest_first() {
        let mut ring = Ring::with_capacity(3);
        for v in 1..=5 {
            ring.push(v);
        }
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.recent(3).collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(ring.back(0), Some(5));
        assert_eq!(ring.back(2), Some(3));
        assert_eq!(ring.back(3), None);
    }

    #[test]
    fn recent_clamps_to_len() {
        let mut ring = Ring::with_capacity(8);
        ring.push('a');
        ring.push('b');
        assert_eq!(ring.recent(5).collect::<String>(), "ab");
        assert_eq!(ring.recent(1).collect::<String>(), "b");
    }

    #[test]
    fn clear_restarts_from_empty() {
        let mut ring = Ring::with_capacity(2);
        ring.push(1);
        ring.push(2);
        ring.push(3);
        ring.clear();
        assert!(ring.is_empty());
        ring.push(9);
        assert_eq!(ring.recent(2).collect::<Vec<_>>(), vec![9]);
    }

    proptest! {
        #[test]
        fn behaves_like_a_bounded_vec(cap in 1usize..10, values in prop::collection::vec(any::<i16>(), 0..40)) {
            let mut ring = Ring::with_capacity(cap);
            let mut model: Vec<i16> = Vec::new();
            for v in values {
                ring.push(v);
                model.push(v);
                if model.len() > cap {
                    model.remove(0);
                }
                prop_assert!(ring.len() <= cap);
                prop_assert_eq!(ring.recent(cap).collect::<Vec<_>>(), model.clone());
            }
        }
    }
}
