use crate::moves::{MoveDescriptor, Provenance};

#[derive(Clone, Debug, Default)]
pub struct History {
    undo: Vec<MoveDescriptor>,
    redo: Vec<MoveDescriptor>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_dequeued(&mut self, descriptor: &MoveDescriptor) {
        match descriptor.provenance {
            Provenance::Manual => {
                self.redo.clear();
                self.undo.push(descriptor.inverted());
            }
            Provenance::Undo => self.redo.push(descriptor.inverted()),
            Provenance::Redo => self.undo.push(descriptor.inverted()),
        }
    }

    pub fn pop_undo(&mut self) -> Option<MoveDescriptor> {
        self.undo
            .pop()
            .map(|mv| mv.with_provenance(Provenance::Undo))
    }

    pub fn pop_redo(&mut self) -> Option<MoveDescriptor> {
        self.redo
            .pop()
            .map(|mv| mv.with_provenance(Provenance::Redo))
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    pub fn undo_stack(&self) -> &[MoveDescriptor] {
        &self.undo
    }

    pub fn redo_stack(&self) -> &[MoveDescriptor] {
        &self.redo
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Face;

    #[test]
    fn manual_clears_redo_and_pushes_inverse() {
        let mut history = History::new();
        history.record_dequeued(&Face::R.descriptor());
        let undone = history.pop_undo().unwrap();
        history.record_dequeued(&undone);
        assert_eq!(history.redo_depth(), 1);

        history.record_dequeued(&Face::U.descriptor());
        assert_eq!(history.redo_depth(), 0);
        assert_eq!(history.undo_stack(), [Face::U.descriptor().inverted()]);
    }

    #[test]
    fn undo_routes_to_redo_and_back() {
        let mut history = History::new();
        history.record_dequeued(&Face::F.descriptor());
        assert_eq!(history.undo_depth(), 1);

        let undone = history.pop_undo().unwrap();
        assert_eq!(undone.provenance, Provenance::Undo);
        assert_eq!(undone.direction, -Face::F.descriptor().direction);
        history.record_dequeued(&undone);
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 1);

        let redone = history.pop_redo().unwrap();
        assert_eq!(redone.provenance, Provenance::Redo);
        assert_eq!(redone.direction, Face::F.descriptor().direction);
        history.record_dequeued(&redone);
        assert_eq!(history.undo_depth(), 1);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn empty_pops_are_noops() {
        let mut history = History::new();
        assert_eq!(history.pop_undo(), None);
        assert_eq!(history.pop_redo(), None);
    }
}
