pub mod history;
pub mod lattice;
pub mod moves;
pub mod queue;
pub mod session;

pub use history::History;
pub use lattice::{
    snap_coord, CubeGrid, Cubelet, Orientation, CUBELET_COUNT, CUBELET_SPACING, LAYER_SIZE,
    LAYER_TOLERANCE,
};
pub use moves::{parse_moves, Axis, Face, MoveDescriptor, MoveParseError, Provenance};
pub use queue::CommandQueue;
pub use session::{
    scramble_moves, CubeSession, CubeletTransform, RotationError, SessionSnapshot, ROTATION_MS,
    SCRAMBLE_LEN,
};
