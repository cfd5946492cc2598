pub const MIN_WINDOW_WIDTH: u32 = 640;
pub const MIN_WINDOW_HEIGHT: u32 = 480;

pub const DEFAULT_MODEL_PATH: &str = "assets/models/scene.gltf";
pub const DEFAULT_TARGET_FPS: u32 = 60;
pub const BACKGROUND_FPS: u32 = 30;
