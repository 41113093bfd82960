pub mod axis;
pub mod color;
pub mod events;
pub mod plot_configs;
pub mod point;

// Re-export everything for convenience
pub use axis::*;
pub use color::*;
pub use events::*;
pub use plot_configs::*;
pub use point::*;
