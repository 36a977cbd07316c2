// Core polling pipeline and settings

pub mod config;
pub mod extract;
pub mod glances;
pub mod icons;
pub mod presentation;
pub mod scheduler;
pub mod theme;

// Re-export commonly used items
pub use config::Settings;
pub use glances::{Endpoint, GlancesClient, MetricSnapshot, MetricSource};
pub use presentation::{PresentationAdapter, RenderTarget};
pub use scheduler::{CycleReport, ExtractionConfig, PollScheduler, POLL_INTERVAL};
pub use theme::{Rgb, ThemeColors};
