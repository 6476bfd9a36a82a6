use glam::Vec3;

// Shared layout and animation tuning constants.

// Card size in scene units (~63.5 x 88.9 mm trading card)
pub const CARD_W: f32 = 0.635;
pub const CARD_H: f32 = 0.889;
pub const CARD_T: f32 = 0.004; // thickness

// Pack footprint relative to a card
pub const PACK_W: f32 = CARD_W * 1.24;
pub const PACK_H: f32 = CARD_H * 1.36;
pub const PACK_D: f32 = CARD_W * 0.25;
pub const PACK_SEGMENTS: [u32; 3] = [28, 38, 2];

// Scene placement
pub const PACK_POSITION: Vec3 = Vec3::new(0.0, 0.35, 0.0);
pub const ORBIT_TARGET: Vec3 = Vec3::new(0.0, 0.35, 0.0);
pub const STACK_BASE_Y_OFFSET: f32 = 0.02; // above the pack origin
pub const STACK_SPACING: f32 = CARD_T * 1.05; // vertical gap between stacked cards
pub const STACK_HIDDEN_Z: f32 = -0.06; // fully wrapped by the pouch

// Fanned (revealed) layout
pub const FAN_SPACING_X: f32 = 0.8;
pub const FAN_LIFT_Y: f32 = 0.45;
pub const FAN_Z: f32 = 0.45;
pub const FAN_ANGLE_STEP_DEG: f32 = 4.5;

// Damping rates (1/s)
pub const OPEN_DAMPING_RATE: f32 = 3.2;
pub const FLIP_DAMPING_RATE: f32 = 6.0; // flips read snappier than the pack

// Reveal gate over open progress
pub const REVEAL_START: f32 = 0.35;
pub const REVEAL_END: f32 = 1.0;

// Snap tolerance for discrete flip state
pub const PROGRESS_EPSILON: f32 = 0.001;

// Upper bound on a single frame step (seconds)
pub const MAX_FRAME_DT: f32 = 0.033;

// Camera projection
pub const CAMERA_FOVY_DEG: f32 = 55.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 200.0;

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.08;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_STEP: f32 = 0.95; // per wheel notch

// Scatter ranges for the hidden stack
pub const SCATTER_X_SPAN: f32 = 0.35;
pub const SCATTER_Z_MIN: f32 = 0.15;
pub const SCATTER_Z_SPAN: f32 = 0.2;
pub const SCATTER_Y_SPAN: f32 = 0.05;

#[inline]
pub fn stack_base_y() -> f32 {
    PACK_POSITION.y + STACK_BASE_Y_OFFSET
}
