use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    Manual,
    Undo,
    Redo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDescriptor {
    pub axis: Axis,
    pub layer: i8,
    pub direction: i8,
    pub provenance: Provenance,
}

impl MoveDescriptor {
    pub fn manual(axis: Axis, layer: i8, direction: i8) -> Self {
        Self {
            axis,
            layer,
            direction,
            provenance: Provenance::Manual,
        }
    }

    pub fn inverted(self) -> Self {
        Self {
            direction: -self.direction,
            ..self
        }
    }

    pub fn with_provenance(self, provenance: Provenance) -> Self {
        Self { provenance, ..self }
    }

    pub fn notation(&self) -> String {
        for face in Face::ALL {
            let base = face.descriptor();
            if base.axis == self.axis && base.layer == self.layer {
                return if self.direction == base.direction {
                    face.letter().to_string()
                } else {
                    format!("{}'", face.letter())
                };
            }
        }
        format!("{:?}{}{:+}", self.axis, self.layer, self.direction)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    R,
    L,
    U,
    D,
    F,
    B,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::R, Face::L, Face::U, Face::D, Face::F, Face::B];

    pub fn descriptor(self) -> MoveDescriptor {
        match self {
            Face::R => MoveDescriptor::manual(Axis::X, 1, -1),
            Face::L => MoveDescriptor::manual(Axis::X, -1, 1),
            Face::U => MoveDescriptor::manual(Axis::Y, 1, -1),
            Face::D => MoveDescriptor::manual(Axis::Y, -1, 1),
            Face::F => MoveDescriptor::manual(Axis::Z, 1, -1),
            Face::B => MoveDescriptor::manual(Axis::Z, -1, 1),
        }
    }

    pub fn letter(self) -> char {
        match self {
            Face::R => 'R',
            Face::L => 'L',
            Face::U => 'U',
            Face::D => 'D',
            Face::F => 'F',
            Face::B => 'B',
        }
    }

    pub fn from_letter(letter: char) -> Option<Face> {
        match letter.to_ascii_uppercase() {
            'R' => Some(Face::R),
            'L' => Some(Face::L),
            'U' => Some(Face::U),
            'D' => Some(Face::D),
            'F' => Some(Face::F),
            'B' => Some(Face::B),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("unknown face '{0}'")]
    UnknownFace(String),
}

pub fn parse_moves(input: &str) -> Result<Vec<MoveDescriptor>, MoveParseError> {
    let mut moves = Vec::new();
    for token in input.split_whitespace() {
        let (letter, prime) = match token.strip_suffix('\'') {
            Some(rest) => (rest, true),
            None => (token, false),
        };
        let face = letter
            .chars()
            .next()
            .filter(|_| letter.chars().count() == 1)
            .and_then(Face::from_letter)
            .ok_or_else(|| MoveParseError::UnknownFace(token.to_string()))?;
        let descriptor = face.descriptor();
        moves.push(if prime {
            descriptor.inverted()
        } else {
            descriptor
        });
    }
    Ok(moves)
}
