// Scene look and DOM wiring constants used by the web frontend.

// DOM ids
pub const CANVAS_ID: &str = "c";
pub const OPEN_BUTTON_ID: &str = "openPack";
pub const RESET_BUTTON_ID: &str = "reset";
pub const CANVAS_ARIA_LABEL: &str = "Card pack opening animation";

// Background colour (sRGB hex)
pub const BACKGROUND_HEX: u32 = 0x06080e;

// Lights: direction is the light position, shining at the origin
pub const AMBIENT_INTENSITY: f32 = 0.4;
pub const KEY_LIGHT_POS: [f32; 3] = [2.0, 3.0, 1.0];
pub const KEY_LIGHT_INTENSITY: f32 = 2.2;
pub const RIM_LIGHT_POS: [f32; 3] = [-2.0, 2.0, -2.0];
pub const RIM_LIGHT_INTENSITY: f32 = 1.2;

// Render targets
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;
pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
pub const MAX_ANISOTROPY: u16 = 16;
pub const MSAA_SAMPLES: u32 = 4;

// Largest texture edge uploaded as-is; bigger images are downscaled
pub const MAX_TEXTURE_EDGE: u32 = 4096;

// Wheel delta (pixels) treated as one zoom notch
pub const WHEEL_NOTCH_PX: f32 = 100.0;
