use raylib::prelude::Color;

pub const WINDOW_WIDTH: i32 = 1280;           // Default window width
pub const WINDOW_HEIGHT: i32 = 720;           // Default window height
pub const FPS: u32 = 60;                      // Frames per second

pub const SWIPE_MIN_DISTANCE: f32 = 50.0;     // Horizontal travel needed for a swipe (pixels)
pub const RESIZE_DEBOUNCE_MS: u64 = 250;      // Quiet time before chrome is refreshed after a resize
pub const CLICK_SLOP: f32 = 8.0;              // Pointer travel under which a press/release is a click

pub const NAV_BAR_HEIGHT: f32 = 56.0;         // Bottom navigation bar
pub const PROGRESS_HEIGHT: f32 = 4.0;         // Progress bar above the navigation bar
pub const STATUS_HEIGHT: f32 = 22.0;          // Announcement line under the navigation bar
pub const BUTTON_WIDTH: f32 = 140.0;
pub const JUMP_FIELD_WIDTH: f32 = 90.0;
pub const CHROME_PADDING: f32 = 10.0;
pub const SLIDE_FILL: f32 = 0.9;              // Share of the slide area an image may cover

pub const TITLE_FONT_SIZE: i32 = 48;
pub const CHROME_FONT_SIZE: i32 = 20;
pub const STATUS_FONT_SIZE: i32 = 16;

pub const BACKGROUND: Color = Color::new(18, 18, 24, 255);
pub const CHROME_BACKGROUND: Color = Color::new(32, 32, 42, 255);
pub const BUTTON_ENABLED: Color = Color::new(33, 128, 141, 255);
pub const BUTTON_DISABLED: Color = Color::new(70, 70, 80, 255);
pub const PROGRESS_FILL: Color = Color::new(50, 184, 198, 255);
pub const REGION_OUTLINE: Color = Color::new(50, 184, 198, 160);
pub const FIELD_FOCUSED: Color = Color::new(230, 230, 240, 255);
pub const FIELD_IDLE: Color = Color::new(150, 150, 160, 255);
