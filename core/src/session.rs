use serde::Serialize;
use thiserror::Error;

use crate::history::History;
use crate::lattice::{mat_mul, rotate_point, rotation_matrix, CubeGrid, LAYER_SIZE};
use crate::moves::{Axis, Face, MoveDescriptor};
use crate::queue::CommandQueue;

pub const ROTATION_MS: f64 = 120.0;
pub const SCRAMBLE_LEN: usize = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RotationError {
    #[error("layer selection {axis:?}/{layer} matched {found} cubelets, expected {LAYER_SIZE}")]
    SelectionMismatch { axis: Axis, layer: i8, found: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MovePhase {
    Animating,
    Snapping,
}

#[derive(Clone, Debug)]
struct ActiveRotation {
    descriptor: MoveDescriptor,
    members: Vec<usize>,
    started_ms: f64,
    angle: f32,
    phase: MovePhase,
}

#[derive(Clone, Copy, Debug)]
pub struct CubeletTransform {
    pub position: [f32; 3],
    pub rotation: [[f32; 3]; 3],
}

#[derive(Serialize)]
pub struct CubeletSnapshot {
    pub id: usize,
    pub lattice: [i8; 3],
    pub orientation: [[i8; 3]; 3],
}

#[derive(Serialize)]
pub struct SessionSnapshot {
    pub cubelets: Vec<CubeletSnapshot>,
    pub queued: usize,
    pub animating: bool,
    pub undo_depth: usize,
    pub redo_depth: usize,
}

pub struct CubeSession {
    grid: CubeGrid,
    queue: CommandQueue,
    history: History,
    active: Option<ActiveRotation>,
}

impl CubeSession {
    pub fn new() -> Self {
        Self {
            grid: CubeGrid::solved(),
            queue: CommandQueue::new(),
            history: History::new(),
            active: None,
        }
    }

    pub fn enqueue(&mut self, descriptor: MoveDescriptor) {
        self.queue.enqueue(descriptor);
    }

    pub fn enqueue_face(&mut self, face: Face, reverse: bool) {
        let descriptor = face.descriptor();
        self.enqueue(if reverse {
            descriptor.inverted()
        } else {
            descriptor
        });
    }

    pub fn request_undo(&mut self) -> bool {
        match self.history.pop_undo() {
            Some(descriptor) => {
                self.queue.enqueue(descriptor);
                true
            }
            None => false,
        }
    }

    pub fn request_redo(&mut self) -> bool {
        match self.history.pop_redo() {
            Some(descriptor) => {
                self.queue.enqueue(descriptor);
                true
            }
            None => false,
        }
    }

    pub fn scramble(&mut self, seed: u32) -> bool {
        if self.active.is_some() || !self.queue.is_empty() {
            return false;
        }
        self.history.clear();
        for descriptor in scramble_moves(seed) {
            self.queue.enqueue(descriptor);
        }
        true
    }

    pub fn tick(&mut self, now_ms: f64) -> Result<(), RotationError> {
        if let Some(active) = self.active.as_mut() {
            let elapsed = (now_ms - active.started_ms).max(0.0);
            let progress = (elapsed / ROTATION_MS).min(1.0) as f32;
            active.angle = ease_in_out(progress)
                * std::f32::consts::FRAC_PI_2
                * active.descriptor.direction as f32;
            if progress >= 1.0 {
                active.phase = MovePhase::Snapping;
            }
            if active.phase == MovePhase::Snapping {
                if let Some(done) = self.active.take() {
                    self.grid.apply_quarter_turn(
                        &done.members,
                        done.descriptor.axis,
                        done.descriptor.direction,
                    );
                }
            }
            return Ok(());
        }

        let Some(descriptor) = self.queue.dequeue() else {
            return Ok(());
        };
        let members = self.grid.layer_members(descriptor.axis, descriptor.layer);
        if members.len() != LAYER_SIZE {
            return Err(RotationError::SelectionMismatch {
                axis: descriptor.axis,
                layer: descriptor.layer,
                found: members.len(),
            });
        }
        self.history.record_dequeued(&descriptor);
        self.active = Some(ActiveRotation {
            descriptor,
            members,
            started_ms: now_ms,
            angle: 0.0,
            phase: MovePhase::Animating,
        });
        Ok(())
    }

    pub fn animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn grid(&self) -> &CubeGrid {
        &self.grid
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn transforms(&self) -> Vec<CubeletTransform> {
        let (members, axis, angle) = match &self.active {
            Some(active) => (
                active.members.as_slice(),
                active.descriptor.axis,
                active.angle,
            ),
            None => (&[][..], Axis::X, 0.0),
        };
        self.grid
            .cubelets()
            .iter()
            .map(|cubelet| {
                let base_rotation = cubelet.orientation.to_f32();
                if members.contains(&cubelet.id) {
                    CubeletTransform {
                        position: rotate_point(axis, angle, cubelet.position),
                        rotation: mat_mul(rotation_matrix(axis, angle), base_rotation),
                    }
                } else {
                    CubeletTransform {
                        position: cubelet.position,
                        rotation: base_rotation,
                    }
                }
            })
            .collect()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            cubelets: self
                .grid
                .cubelets()
                .iter()
                .map(|c| CubeletSnapshot {
                    id: c.id,
                    lattice: c.lattice(),
                    orientation: c.orientation.0,
                })
                .collect(),
            queued: self.queue.len(),
            animating: self.active.is_some(),
            undo_depth: self.history.undo_depth(),
            redo_depth: self.history.redo_depth(),
        }
    }
}

impl Default for CubeSession {
    fn default() -> Self {
        Self::new()
    }
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

pub fn splitmix32(mut value: u32) -> u32 {
    value = value.wrapping_add(0x9E37_79B9);
    let mut z = value;
    z = (z ^ (z >> 16)).wrapping_mul(0x85EB_CA6B);
    z = (z ^ (z >> 13)).wrapping_mul(0xC2B2_AE35);
    z ^ (z >> 16)
}

pub fn rand_unit(seed: u32, salt: u32) -> f32 {
    let mixed = splitmix32(seed ^ salt);
    let top = mixed >> 8;
    top as f32 / ((1u32 << 24) as f32)
}

pub fn scramble_moves(seed: u32) -> Vec<MoveDescriptor> {
    (0..SCRAMBLE_LEN as u32)
        .map(|i| {
            let pick = (rand_unit(seed, i * 2) * 6.0) as usize;
            let face = Face::ALL[pick.min(5)];
            let descriptor = face.descriptor();
            if rand_unit(seed, i * 2 + 1) > 0.5 {
                descriptor.inverted()
            } else {
                descriptor
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_pins_endpoints_and_midpoint() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn scramble_is_deterministic_per_seed() {
        assert_eq!(scramble_moves(7), scramble_moves(7));
        assert_ne!(scramble_moves(7), scramble_moves(8));
        assert_eq!(scramble_moves(7).len(), SCRAMBLE_LEN);
    }

    #[test]
    fn scramble_only_uses_face_turns() {
        for descriptor in scramble_moves(0xDEAD_BEEF) {
            assert_ne!(descriptor.layer, 0);
            assert!(descriptor.direction == 1 || descriptor.direction == -1);
        }
    }

    #[test]
    fn queue_holds_while_a_move_animates() {
        let mut session = CubeSession::new();
        session.enqueue(Face::R.descriptor());
        session.enqueue(Face::U.descriptor());
        session.tick(0.0).unwrap();
        assert!(session.animating());
        assert_eq!(session.queued(), 1);

        session.tick(ROTATION_MS / 2.0).unwrap();
        assert!(session.animating());
        assert_eq!(session.queued(), 1);

        session.tick(ROTATION_MS + 1.0).unwrap();
        assert!(!session.animating());
        session.tick(ROTATION_MS + 2.0).unwrap();
        assert!(session.animating());
        assert_eq!(session.queued(), 0);
    }
}
