//! Bounded overwrite-oldest FIFO
//!
//! Storage is a `heapless::Deque` sized by the const parameter `N`; the
//! logical capacity is chosen at runtime and may be anything in `1..=N`.

use heapless::Deque;

use crate::error::InvalidArgument;

/// Fixed-capacity FIFO that evicts its oldest element when full
///
/// Always full after construction: `new` pre-fills `capacity` copies of a
/// seed value, so `len() == capacity()` holds for the buffer's lifetime.
#[derive(Debug, Clone)]
pub struct RingBuffer<T, const N: usize> {
    items: Deque<T, N>,
    capacity: usize,
}

impl<T: Clone, const N: usize> RingBuffer<T, N> {
    /// Create a buffer holding `capacity` copies of `fill`
    pub fn new(capacity: usize, fill: T) -> Result<Self, InvalidArgument> {
        if capacity == 0 {
            return Err(InvalidArgument::ZeroCapacity);
        }
        if capacity > N {
            return Err(InvalidArgument::CapacityTooLarge {
                requested: capacity,
                max: N,
            });
        }

        let mut items = Deque::new();
        for _ in 0..capacity {
            // capacity <= N, cannot overflow
            let _ = items.push_back(fill.clone());
        }

        Ok(Self { items, capacity })
    }
}

impl<T, const N: usize> RingBuffer<T, N> {
    /// Append `item`, returning the evicted oldest element if the buffer was full
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() >= self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        let _ = self.items.push_back(item);
        evicted
    }

    /// Number of stored elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false after construction; present for API completeness
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Logical capacity chosen at construction
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the next push will evict
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }

    /// Element at `index`, counted from the oldest
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.iter().nth(index)
    }

    /// Oldest element
    pub fn oldest(&self) -> Option<&T> {
        self.items.front()
    }

    /// Most recently pushed element
    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefilled() {
        let ring: RingBuffer<u32, 8> = RingBuffer::new(5, 7).unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.capacity(), 5);
        assert!(ring.is_full());
        assert!(ring.iter().all(|&v| v == 7));
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut ring: RingBuffer<u32, 4> = RingBuffer::new(3, 0).unwrap();
        assert_eq!(ring.push(1), Some(0));
        assert_eq!(ring.push(2), Some(0));
        assert_eq!(ring.push(3), Some(0));
        assert_eq!(ring.push(4), Some(1));

        let mut it = ring.iter();
        assert_eq!(it.next(), Some(&2));
        assert_eq!(it.next(), Some(&3));
        assert_eq!(it.next(), Some(&4));
        assert_eq!(it.next(), None);
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn test_iter_restartable() {
        let mut ring: RingBuffer<u8, 4> = RingBuffer::new(2, 0).unwrap();
        ring.push(9);
        let first: u32 = ring.iter().map(|&v| v as u32).sum();
        let second: u32 = ring.iter().map(|&v| v as u32).sum();
        assert_eq!(first, 9);
        assert_eq!(first, second);
    }

    #[test]
    fn test_accessors() {
        let mut ring: RingBuffer<u8, 4> = RingBuffer::new(3, 0).unwrap();
        ring.push(1);
        ring.push(2);
        assert_eq!(ring.oldest(), Some(&0));
        assert_eq!(ring.latest(), Some(&2));
        assert_eq!(ring.get(1), Some(&1));
        assert_eq!(ring.get(3), None);
    }

    #[test]
    fn test_capacity_one() {
        let mut ring: RingBuffer<u8, 1> = RingBuffer::new(1, 0).unwrap();
        assert_eq!(ring.push(5), Some(0));
        assert_eq!(ring.latest(), Some(&5));
        assert_eq!(ring.len(), 1);
    }

    #[test]
    fn test_invalid_capacity() {
        assert_eq!(
            RingBuffer::<u8, 4>::new(0, 0).unwrap_err(),
            InvalidArgument::ZeroCapacity
        );
        assert_eq!(
            RingBuffer::<u8, 4>::new(5, 0).unwrap_err(),
            InvalidArgument::CapacityTooLarge {
                requested: 5,
                max: 4
            }
        );
    }
}
