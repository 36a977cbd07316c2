// UI and formatting module

pub mod formatters;
pub mod panel;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_outcome, format_time, summarize_cycle, to_color};
pub use panel::{run_panel, LoopExit, PanelOptions};
