use std::collections::VecDeque;

use super::action::Direction;

/// FIFO of direction changes requested between ticks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveQueue {
    pending: VecDeque<Direction>,
    /// Most recently accepted direction; matches the active heading once drained
    last: Option<Direction>,
}

impl MoveQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `direction` unless it reverses the last accepted one
    pub fn enqueue(&mut self, direction: Direction) -> bool {
        if let Some(last) = self.last {
            if last.is_opposite(direction) {
                return false;
            }
        }

        self.pending.push_back(direction);
        self.last = Some(direction);
        true
    }

    /// Pick the heading for the coming tick.
    ///
    /// Entries equal to `current` are skipped while more remain, so a burst
    /// of repeated key presses does not delay a later turn. An empty queue
    /// keeps `current`.
    pub fn next_heading(&mut self, current: Option<Direction>) -> Option<Direction> {
        let Some(mut next) = self.pending.pop_front() else {
            return current;
        };

        while Some(next) == current {
            match self.pending.pop_front() {
                Some(direction) => next = direction,
                None => break,
            }
        }

        Some(next)
    }

    pub fn clear(&mut self) {
        self.clear_with_last(None);
    }

    pub(crate) fn clear_with_last(&mut self, last: Option<Direction>) {
        self.pending.clear();
        self.last = last;
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_queue_keeps_heading() {
        let mut queue = MoveQueue::new();
        assert_eq!(queue.next_heading(None), None);
        assert_eq!(
            queue.next_heading(Some(Direction::Left)),
            Some(Direction::Left)
        );
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = MoveQueue::new();
        assert!(queue.enqueue(Direction::Up));
        assert!(queue.enqueue(Direction::Left));
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.next_heading(None), Some(Direction::Up));
        assert_eq!(
            queue.next_heading(Some(Direction::Up)),
            Some(Direction::Left)
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_reversal_of_last_queued_is_rejected() {
        let mut queue = MoveQueue::new();
        assert!(queue.enqueue(Direction::Right));
        assert!(!queue.enqueue(Direction::Left));
        assert!(queue.enqueue(Direction::Up));
        // Left is no longer a reversal of the last queued entry
        assert!(queue.enqueue(Direction::Left));
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_reversal_of_active_heading_is_rejected() {
        let mut queue = MoveQueue::new();
        queue.clear_with_last(Some(Direction::Down));
        assert!(!queue.enqueue(Direction::Up));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_duplicates_of_current_are_skipped() {
        let mut queue = MoveQueue::new();
        queue.enqueue(Direction::Right);
        queue.enqueue(Direction::Right);
        queue.enqueue(Direction::Down);

        assert_eq!(
            queue.next_heading(Some(Direction::Right)),
            Some(Direction::Down)
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_trailing_duplicate_is_consumed() {
        let mut queue = MoveQueue::new();
        queue.enqueue(Direction::Right);

        assert_eq!(
            queue.next_heading(Some(Direction::Right)),
            Some(Direction::Right)
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear_forgets_last_direction() {
        let mut queue = MoveQueue::new();
        queue.enqueue(Direction::Right);
        queue.clear();

        assert!(queue.is_empty());
        assert!(queue.enqueue(Direction::Left));
    }
}
