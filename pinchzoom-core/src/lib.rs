pub mod config;
pub mod engine;
pub mod events;
pub mod gestures;
pub mod points;
pub mod spring;
pub mod state;
pub mod transforms;

pub use config::{PinchZoomConfig, ResetTrigger};
pub use engine::PinchZoomEngine;
pub use events::GestureEvent;
pub use gestures::{GestureArena, PointerInput};
pub use points::Point;
pub use spring::Spring;
pub use state::TransformState;
pub use transforms::{compose_transform_ops, pose_matrix, pose_transform_ops, Mat3, TransformOp};
