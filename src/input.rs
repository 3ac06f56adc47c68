use kyubu_core::{Axis, Face, MoveDescriptor};

pub(crate) const DRAG_THRESHOLD_PX: f32 = 30.0;
pub(crate) const VIEW_ROTATE_SPEED: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KeyCommand {
    Turn { face: Face, reverse: bool },
    Undo,
    Redo,
}

pub(crate) fn classify_key(key: &str, shift: bool, ctrl: bool) -> Option<KeyCommand> {
    if ctrl {
        return match key.to_ascii_lowercase().as_str() {
            "z" if shift => Some(KeyCommand::Redo),
            "z" => Some(KeyCommand::Undo),
            "y" => Some(KeyCommand::Redo),
            _ => None,
        };
    }
    let mut chars = key.chars();
    let letter = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Face::from_letter(letter).map(|face| KeyCommand::Turn {
        face,
        reverse: shift,
    })
}

// Dominant drag axis picks the layer, regardless of camera orientation.
pub(crate) fn classify_slice_drag(dx: f32, dy: f32, lattice: [i8; 3]) -> Option<MoveDescriptor> {
    if dx.abs().max(dy.abs()) <= DRAG_THRESHOLD_PX {
        return None;
    }
    if dx.abs() > dy.abs() {
        Some(MoveDescriptor::manual(
            Axis::Y,
            lattice[1],
            if dx > 0.0 { 1 } else { -1 },
        ))
    } else {
        Some(MoveDescriptor::manual(
            Axis::X,
            lattice[0],
            if dy > 0.0 { 1 } else { -1 },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_keys_with_shift_reverse() {
        assert_eq!(
            classify_key("r", false, false),
            Some(KeyCommand::Turn {
                face: Face::R,
                reverse: false
            })
        );
        assert_eq!(
            classify_key("U", true, false),
            Some(KeyCommand::Turn {
                face: Face::U,
                reverse: true
            })
        );
        assert_eq!(classify_key("q", false, false), None);
        assert_eq!(classify_key("Enter", false, false), None);
    }

    #[test]
    fn undo_redo_shortcuts() {
        assert_eq!(classify_key("z", false, true), Some(KeyCommand::Undo));
        assert_eq!(classify_key("y", false, true), Some(KeyCommand::Redo));
        assert_eq!(classify_key("Z", true, true), Some(KeyCommand::Redo));
        assert_eq!(classify_key("z", false, false), None);
    }

    #[test]
    fn short_drags_are_clicks() {
        assert_eq!(classify_slice_drag(10.0, -8.0, [1, 0, -1]), None);
    }

    #[test]
    fn horizontal_drag_turns_the_grabbed_row() {
        let mv = classify_slice_drag(80.0, 12.0, [1, -1, 0]).unwrap();
        assert_eq!(mv.axis, Axis::Y);
        assert_eq!(mv.layer, -1);
        assert_eq!(mv.direction, 1);

        let mv = classify_slice_drag(-45.0, 0.0, [0, 1, 1]).unwrap();
        assert_eq!(mv.axis, Axis::Y);
        assert_eq!(mv.layer, 1);
        assert_eq!(mv.direction, -1);
    }

    #[test]
    fn vertical_drag_turns_the_grabbed_column() {
        let mv = classify_slice_drag(5.0, 60.0, [-1, 1, 0]).unwrap();
        assert_eq!(mv.axis, Axis::X);
        assert_eq!(mv.layer, -1);
        assert_eq!(mv.direction, 1);

        let mv = classify_slice_drag(0.0, -31.0, [1, 0, 1]).unwrap();
        assert_eq!(mv.axis, Axis::X);
        assert_eq!(mv.layer, 1);
        assert_eq!(mv.direction, -1);
    }
}
