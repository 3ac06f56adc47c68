use kyubu_core::lattice::{mat_mul, rotation_matrix};
use kyubu_core::{Axis, CubeletTransform};

// Face order +X, -X, +Y, -Y, +Z, -Z.
pub(crate) const FACE_COLORS: [&str; 6] = [
    "#b71234", "#ff5800", "#0046ad", "#009b48", "#ffffff", "#ffd500",
];

const FACE_NORMALS: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

const FACE_CORNERS: [[[f32; 3]; 4]; 6] = [
    [
        [0.5, -0.5, -0.5],
        [0.5, 0.5, -0.5],
        [0.5, 0.5, 0.5],
        [0.5, -0.5, 0.5],
    ],
    [
        [-0.5, -0.5, -0.5],
        [-0.5, 0.5, -0.5],
        [-0.5, 0.5, 0.5],
        [-0.5, -0.5, 0.5],
    ],
    [
        [-0.5, 0.5, -0.5],
        [0.5, 0.5, -0.5],
        [0.5, 0.5, 0.5],
        [-0.5, 0.5, 0.5],
    ],
    [
        [-0.5, -0.5, -0.5],
        [0.5, -0.5, -0.5],
        [0.5, -0.5, 0.5],
        [-0.5, -0.5, 0.5],
    ],
    [
        [-0.5, -0.5, 0.5],
        [0.5, -0.5, 0.5],
        [0.5, 0.5, 0.5],
        [-0.5, 0.5, 0.5],
    ],
    [
        [-0.5, -0.5, -0.5],
        [0.5, -0.5, -0.5],
        [0.5, 0.5, -0.5],
        [-0.5, 0.5, -0.5],
    ],
];

const CAMERA_DISTANCE: f32 = 8.0;
const FIT_RATIO: f32 = 0.125;

#[derive(Clone, Copy, Debug)]
pub(crate) struct ViewInput {
    pub yaw: f32,
    pub pitch: f32,
    pub scale: f32,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct FaceQuad {
    pub cubelet: usize,
    pub color: &'static str,
    pub points: [[f32; 2]; 4],
    pub depth: f32,
}

fn mat_apply(m: [[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

// Painter's order: furthest first, topmost geometry at the tail.
pub(crate) fn project_scene(
    transforms: &[CubeletTransform],
    view: ViewInput,
    width: f32,
    height: f32,
) -> Vec<FaceQuad> {
    let view_matrix = mat_mul(
        rotation_matrix(Axis::X, view.pitch),
        rotation_matrix(Axis::Y, view.yaw),
    );
    let px_per_unit = width.min(height) * FIT_RATIO * view.scale;
    let center_x = width * 0.5;
    let center_y = height * 0.5;

    let mut quads = Vec::with_capacity(transforms.len() * 3);
    for (id, transform) in transforms.iter().enumerate() {
        for face in 0..6 {
            let normal_world = mat_apply(transform.rotation, FACE_NORMALS[face]);
            let normal_view = mat_apply(view_matrix, normal_world);
            let center_world = add(
                transform.position,
                mat_apply(transform.rotation, scale3(FACE_NORMALS[face], 0.5)),
            );
            let center_view = mat_apply(view_matrix, center_world);
            let to_camera = [
                -center_view[0],
                -center_view[1],
                CAMERA_DISTANCE - center_view[2],
            ];
            if dot(normal_view, to_camera) <= 0.0 {
                continue;
            }
            let mut points = [[0.0f32; 2]; 4];
            for (slot, corner) in points.iter_mut().zip(FACE_CORNERS[face]) {
                let world = add(transform.position, mat_apply(transform.rotation, corner));
                let v = mat_apply(view_matrix, world);
                let persp = CAMERA_DISTANCE / (CAMERA_DISTANCE - v[2]);
                *slot = [
                    center_x + v[0] * persp * px_per_unit,
                    center_y - v[1] * persp * px_per_unit,
                ];
            }
            quads.push(FaceQuad {
                cubelet: id,
                color: FACE_COLORS[face],
                points,
                depth: center_view[2],
            });
        }
    }
    quads.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    quads
}

pub(crate) fn pick(quads: &[FaceQuad], x: f32, y: f32) -> Option<usize> {
    quads
        .iter()
        .rev()
        .find(|quad| point_in_quad(&quad.points, x, y))
        .map(|quad| quad.cubelet)
}

fn point_in_quad(points: &[[f32; 2]; 4], x: f32, y: f32) -> bool {
    let mut sign = 0.0f32;
    for i in 0..4 {
        let a = points[i];
        let b = points[(i + 1) % 4];
        let cross = (b[0] - a[0]) * (y - a[1]) - (b[1] - a[1]) * (x - a[0]);
        if cross == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = cross;
        } else if sign * cross < 0.0 {
            return false;
        }
    }
    true
}

fn add(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn scale3(v: [f32; 3], s: f32) -> [f32; 3] {
    [v[0] * s, v[1] * s, v[2] * s]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[cfg(test)]
mod tests {
    use super::*;
    use kyubu_core::CubeSession;

    const VIEW_FRONT: ViewInput = ViewInput {
        yaw: 0.0,
        pitch: 0.0,
        scale: 1.0,
    };

    fn solved_quads() -> Vec<FaceQuad> {
        let session = CubeSession::new();
        project_scene(&session.transforms(), VIEW_FRONT, 800.0, 600.0)
    }

    #[test]
    fn head_on_view_shows_only_white() {
        let quads = solved_quads();
        assert!(!quads.is_empty());
        assert!(quads.iter().all(|q| q.color != "#ffd500"));
        assert!(quads.iter().rev().take(9).all(|q| q.color == "#ffffff"));
    }

    #[test]
    fn pick_center_hits_the_front_center_cubelet() {
        let quads = solved_quads();
        assert_eq!(pick(&quads, 400.0, 300.0), Some(14));
    }

    #[test]
    fn pick_misses_outside_the_cube() {
        let quads = solved_quads();
        assert_eq!(pick(&quads, 5.0, 5.0), None);
    }

    #[test]
    fn rotated_view_exposes_more_faces() {
        let session = CubeSession::new();
        let view = ViewInput {
            yaw: 0.6,
            pitch: 0.5,
            scale: 1.0,
        };
        let quads = project_scene(&session.transforms(), view, 800.0, 600.0);
        let mut colors: Vec<&str> = quads.iter().map(|q| q.color).collect();
        colors.sort_unstable();
        colors.dedup();
        assert!(colors.len() >= 3);
    }
}
