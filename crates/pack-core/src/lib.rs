//! Platform-free core of the card pack opener: pouch sculpting, entity
//! assembly, animation drivers, picking and responsive layout.
//!
//! Nothing in here touches the browser or the GPU, so the whole animation
//! can be stepped deterministically on the host.

pub mod camera;
pub mod clock;
pub mod constants;
pub mod crimp;
pub mod drivers;
pub mod easing;
pub mod entities;
pub mod error;
pub mod interaction;
pub mod material;
pub mod mesh;
pub mod picking;
pub mod sculpt;
pub mod session;
pub mod viewport;

pub use camera::{Camera, OrbitControls};
pub use clock::{Clock, FrameClock, InstantClock, ManualClock};
pub use constants::*;
pub use entities::{Card, Pack};
pub use error::ConfigError;
pub use interaction::ClickIntent;
pub use material::{MaterialSpec, TextureId, TextureRegistry, TextureSource};
pub use mesh::{BoxDimensions, BoxMesh, Face, FaceGroup};
pub use session::{FrameState, SceneConfig, Session};
pub use viewport::{Layout, Viewport, ViewportClass};

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
