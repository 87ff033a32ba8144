pub mod model;
pub mod view;

pub use model::{SpinFrame, WheelState};
pub use view::draw;

pub const WHEEL_SIZE: i32 = 400;
pub const RIM_INSET: f64 = 10.0; // gap between widget edge and wheel
pub const SECTOR_BORDER_WIDTH: f64 = 2.0;
pub const POINTER_WIDTH: f64 = 24.0;
pub const POINTER_DEPTH: f64 = 28.0;
pub const HUB_RADIUS: f64 = 14.0;
pub const LABEL_FONT_SIZE: f64 = 14.0;
pub const LABEL_MAX_CHARS: usize = 18;
