// Front-end layout and look. Gameplay tuning lives in shortwave-core.

// Window
pub const WINDOW_TITLE: &str = "Shortwave";
pub const WINDOW_SIZE: [f64; 2] = [1280.0, 720.0];

// Scene layout (world units, orthographic)
pub const VIEW_HALF_WIDTH: f32 = 6.5; // traces are 10 units wide
pub const TEMPLATE_Y: f32 = 1.8; // template drawn above
pub const PLAYER_Y: f32 = -1.8; // player drawn below

// Palette
pub const CLEAR_COLOR: [f64; 3] = [0.02, 0.02, 0.04];
pub const TEMPLATE_COLOR: [f32; 3] = [0.85, 0.88, 0.95]; // pale
pub const PLAYER_COLOR: [f32; 3] = [0.3, 0.95, 0.45]; // phosphor green

// GPU buffers
pub const INITIAL_VERTEX_CAPACITY: usize = 2048;
