pub mod app;
pub mod components;
pub mod dismiss;
pub mod overlay;
pub mod theme;

pub use app::{Screen, VoxpadApp};
pub use dismiss::{DismissState, DragEvent, DragPhase};
pub use overlay::{OverlayContent, OverlayHandle, OverlayRegistry};
pub use theme::Theme;
