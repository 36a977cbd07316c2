//! Terminal rendition of the appliance display.
//!
//! Two columns of one arc gauge and three compact cards each, redrawn every
//! loop iteration from the [`PanelModel`] the presentation adapter writes to.

mod app;
mod event_handler;
pub mod layout;
mod model;
mod render;

pub use app::{run_panel, LoopExit, PanelApp, PanelOptions, LOOP_YIELD};
pub use event_handler::PanelEvent;
pub use layout::build_widgets;
pub use model::{ArcState, CardState, LabelState, PanelModel};
pub use render::{render_panel, StatusLine};
