use serde::{Deserialize, Serialize};

use crate::moves::Axis;

pub const CUBELET_SPACING: f32 = 1.05;
pub const CUBELET_COUNT: usize = 27;
pub const LAYER_SIZE: usize = 9;
pub const LAYER_TOLERANCE: f32 = 0.1;

// Integer rotation matrix, row-major, entries in {-1, 0, 1}.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orientation(pub [[i8; 3]; 3]);

impl Orientation {
    pub const IDENTITY: Orientation = Orientation([[1, 0, 0], [0, 1, 0], [0, 0, 1]]);

    pub fn quarter_turn(axis: Axis, direction: i8) -> Orientation {
        let d = direction;
        match axis {
            Axis::X => Orientation([[1, 0, 0], [0, 0, -d], [0, d, 0]]),
            Axis::Y => Orientation([[0, 0, d], [0, 1, 0], [-d, 0, 0]]),
            Axis::Z => Orientation([[0, -d, 0], [d, 0, 0], [0, 0, 1]]),
        }
    }

    pub fn rotated(self, axis: Axis, direction: i8) -> Orientation {
        let r = Orientation::quarter_turn(axis, direction).0;
        let m = self.0;
        let mut out = [[0i8; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = r[i][0] * m[0][j] + r[i][1] * m[1][j] + r[i][2] * m[2][j];
            }
        }
        Orientation(out)
    }

    pub fn apply(&self, v: [i8; 3]) -> [i8; 3] {
        let m = self.0;
        [
            m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
            m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
            m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
        ]
    }

    pub fn to_f32(&self) -> [[f32; 3]; 3] {
        let m = self.0;
        [
            [m[0][0] as f32, m[0][1] as f32, m[0][2] as f32],
            [m[1][0] as f32, m[1][1] as f32, m[1][2] as f32],
            [m[2][0] as f32, m[2][1] as f32, m[2][2] as f32],
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cubelet {
    pub id: usize,
    pub position: [f32; 3],
    pub orientation: Orientation,
}

impl Cubelet {
    pub fn lattice(&self) -> [i8; 3] {
        [
            (self.position[0] / CUBELET_SPACING).round() as i8,
            (self.position[1] / CUBELET_SPACING).round() as i8,
            (self.position[2] / CUBELET_SPACING).round() as i8,
        ]
    }
}

pub fn snap_coord(value: f32) -> f32 {
    (value / CUBELET_SPACING).round() * CUBELET_SPACING
}

pub fn rotate_point(axis: Axis, angle: f32, p: [f32; 3]) -> [f32; 3] {
    let (sin, cos) = angle.sin_cos();
    let [x, y, z] = p;
    match axis {
        Axis::X => [x, y * cos - z * sin, y * sin + z * cos],
        Axis::Y => [x * cos + z * sin, y, -x * sin + z * cos],
        Axis::Z => [x * cos - y * sin, x * sin + y * cos, z],
    }
}

pub fn rotation_matrix(axis: Axis, angle: f32) -> [[f32; 3]; 3] {
    let (sin, cos) = angle.sin_cos();
    match axis {
        Axis::X => [[1.0, 0.0, 0.0], [0.0, cos, -sin], [0.0, sin, cos]],
        Axis::Y => [[cos, 0.0, sin], [0.0, 1.0, 0.0], [-sin, 0.0, cos]],
        Axis::Z => [[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]],
    }
}

pub fn mat_mul(a: [[f32; 3]; 3], b: [[f32; 3]; 3]) -> [[f32; 3]; 3] {
    let mut out = [[0.0f32; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
        }
    }
    out
}

#[derive(Clone, Debug, PartialEq)]
pub struct CubeGrid {
    cubelets: Vec<Cubelet>,
}

impl CubeGrid {
    pub fn solved() -> Self {
        let mut cubelets = Vec::with_capacity(CUBELET_COUNT);
        for x in -1i8..=1 {
            for y in -1i8..=1 {
                for z in -1i8..=1 {
                    cubelets.push(Cubelet {
                        id: cubelets.len(),
                        position: [
                            x as f32 * CUBELET_SPACING,
                            y as f32 * CUBELET_SPACING,
                            z as f32 * CUBELET_SPACING,
                        ],
                        orientation: Orientation::IDENTITY,
                    });
                }
            }
        }
        Self { cubelets }
    }

    pub fn cubelets(&self) -> &[Cubelet] {
        &self.cubelets
    }

    pub fn layer_members(&self, axis: Axis, layer: i8) -> Vec<usize> {
        let target = layer as f32 * CUBELET_SPACING;
        let index = axis.index();
        self.cubelets
            .iter()
            .filter(|c| (c.position[index] - target).abs() < LAYER_TOLERANCE)
            .map(|c| c.id)
            .collect()
    }

    pub fn apply_quarter_turn(&mut self, members: &[usize], axis: Axis, direction: i8) {
        for &id in members {
            let cubelet = &mut self.cubelets[id];
            let rotated = rotate_point(
                axis,
                direction as f32 * std::f32::consts::FRAC_PI_2,
                cubelet.position,
            );
            cubelet.position = [
                snap_coord(rotated[0]),
                snap_coord(rotated[1]),
                snap_coord(rotated[2]),
            ];
            cubelet.orientation = cubelet.orientation.rotated(axis, direction);
        }
    }

    pub fn lattice_aligned(&self) -> bool {
        self.cubelets.iter().all(|c| {
            c.position
                .iter()
                .all(|&v| v == snap_coord(v) && (v / CUBELET_SPACING).round().abs() <= 1.0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_grid_has_27_on_lattice() {
        let grid = CubeGrid::solved();
        assert_eq!(grid.cubelets().len(), CUBELET_COUNT);
        assert!(grid.lattice_aligned());
    }

    #[test]
    fn every_layer_selects_nine() {
        let grid = CubeGrid::solved();
        for axis in Axis::ALL {
            for layer in -1i8..=1 {
                assert_eq!(grid.layer_members(axis, layer).len(), LAYER_SIZE);
            }
        }
    }

    #[test]
    fn four_quarter_turns_compose_to_identity() {
        let mut grid = CubeGrid::solved();
        let start = grid.clone();
        let members = grid.layer_members(Axis::X, 1);
        for _ in 0..4 {
            grid.apply_quarter_turn(&members, Axis::X, -1);
        }
        assert_eq!(grid, start);
    }

    #[test]
    fn quarter_turn_keeps_lattice_exact() {
        let mut grid = CubeGrid::solved();
        let members = grid.layer_members(Axis::Y, -1);
        grid.apply_quarter_turn(&members, Axis::Y, 1);
        assert!(grid.lattice_aligned());
        assert_eq!(grid.layer_members(Axis::Y, -1).len(), LAYER_SIZE);
    }

    #[test]
    fn orientation_matrix_stays_integral() {
        let mut orientation = Orientation::IDENTITY;
        for axis in [Axis::X, Axis::Z, Axis::Y, Axis::X] {
            orientation = orientation.rotated(axis, -1);
        }
        for row in orientation.0 {
            for cell in row {
                assert!(cell.abs() <= 1);
            }
        }
        for row in orientation.0 {
            let norm: i8 = row.iter().map(|c| c * c).sum();
            assert_eq!(norm, 1);
        }
    }
}
