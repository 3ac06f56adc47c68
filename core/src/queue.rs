use std::collections::VecDeque;

use crate::moves::MoveDescriptor;

#[derive(Clone, Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<MoveDescriptor>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, descriptor: MoveDescriptor) {
        self.pending.push_back(descriptor);
    }

    pub fn dequeue(&mut self) -> Option<MoveDescriptor> {
        self.pending.pop_front()
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
    use crate::moves::Face;

    #[test]
    fn fifo_order_across_sources() {
        let mut queue = CommandQueue::new();
        queue.enqueue(Face::R.descriptor());
        queue.enqueue(Face::U.descriptor());
        queue.enqueue(Face::F.descriptor().inverted());
        assert_eq!(queue.dequeue(), Some(Face::R.descriptor()));
        assert_eq!(queue.dequeue(), Some(Face::U.descriptor()));
        assert_eq!(queue.dequeue(), Some(Face::F.descriptor().inverted()));
        assert_eq!(queue.dequeue(), None);
        assert!(queue.is_empty());
    }
}
