//! Rotating cursor over a sequence whose length may change between steps.

use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct RotationCursor {
    // `None` until the first advance.
    position: Mutex<Option<usize>>,
}

impl RotationCursor {
    /// A fresh cursor; its first [`advance`](Self::advance) yields 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// A cursor already sitting at `position`.
    pub fn starting_at(position: usize) -> Self {
        Self {
            position: Mutex::new(Some(position)),
        }
    }

    /// Step forward by one modulo `max(size, 1)` and return the new position.
    pub fn advance(&self, size: usize) -> usize {
        let mut position = self
            .position
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let next = match *position {
            None => 0,
            Some(p) => p.wrapping_add(1) % size.max(1),
        };
        *position = Some(next);
        next
    }

    /// Last position produced, if any.
    pub fn position(&self) -> Option<usize> {
        *self
            .position
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_on_empty_stays_at_zero() {
        let cursor = RotationCursor::starting_at(0);
        for _ in 0..5 {
            assert_eq!(cursor.advance(0), 0);
        }
        let fresh = RotationCursor::new();
        assert_eq!(fresh.advance(0), 0);
        assert_eq!(fresh.advance(0), 0);
    }

    #[test]
    fn full_lap_from_zero_wraps_back() {
        for size in 1..=6 {
            let cursor = RotationCursor::starting_at(0);
            let got: Vec<usize> = (0..size).map(|_| cursor.advance(size)).collect();
            let mut expected: Vec<usize> = (1..size).collect();
            expected.push(0);
            assert_eq!(got, expected, "size {size}");
        }
    }

    #[test]
    fn fresh_cursor_starts_at_zero() {
        let cursor = RotationCursor::new();
        assert_eq!(cursor.position(), None);
        let got: Vec<usize> = (0..7).map(|_| cursor.advance(5)).collect();
        assert_eq!(got, vec![0, 1, 2, 3, 4, 0, 1]);
        assert_eq!(cursor.position(), Some(1));
    }

    #[test]
    fn shrinking_size_keeps_position_in_range() {
        let cursor = RotationCursor::starting_at(8);
        assert_eq!(cursor.advance(3), 0);
        assert_eq!(cursor.advance(3), 1);
    }

    #[test]
    fn concurrent_advances_are_serialized() {
        let cursor = std::sync::Arc::new(RotationCursor::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cursor = cursor.clone();
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        cursor.advance(1_000_000);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(cursor.position(), Some(999));
    }
}
