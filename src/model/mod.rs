pub mod overlay;
pub mod schedule;
pub mod task;
pub mod timeline;
pub mod viewport;
pub mod weather;

pub use overlay::{OverlayKind, OverlayRegistry};
pub use schedule::Schedule;
pub use task::{Dependency, Task, Trade};
pub use timeline::{RenderPolicy, TimeRange, ViewMode};
pub use viewport::{ViewportController, ViewportGeometry};
pub use weather::{WeatherCondition, WeatherRecord};
