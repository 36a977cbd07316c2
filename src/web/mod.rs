//! Web control surface.
//!
//! An axum server on its own tokio runtime. Handlers only touch the shared
//! settings and send [`ControlCommand`]s; the panel loop applies them, so
//! widgets keep a single writer.

mod handlers;
pub mod status;

pub use handlers::router;
pub use status::{DeviceStatus, HostVitals, LoadEstimator};

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::core::config::{Settings, SharedSettings};
use crate::error::{PanelError, Result};

/// Requests from the web surface to the panel loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Active theme or dark mode changed; recolor the panel.
    ThemeChanged,
    /// `true` puts the display to sleep.
    DisplaySleep(bool),
    Restart,
}

/// State handed to every handler.
#[derive(Clone)]
pub struct WebState {
    pub settings: SharedSettings,
    /// Where settings are persisted; `None` uses the default location.
    pub settings_path: Option<PathBuf>,
    pub commands: Sender<ControlCommand>,
    pub status: Arc<DeviceStatus>,
    pub assets_dir: Option<PathBuf>,
}

impl WebState {
    pub fn send(&self, command: ControlCommand) {
        if self.commands.send(command).is_err() {
            log::warn!("Panel loop gone, dropping {:?}", command);
        }
    }

    /// Save settings; a failed write is logged and the change stays in memory.
    pub fn persist(&self, settings: &Settings) {
        let result = match &self.settings_path {
            Some(path) => settings.save_to_path(path),
            None => settings.save(),
        };
        if let Err(e) = result {
            log::warn!("Failed to save settings: {:#}", e);
        }
    }
}

/// Tokio runtime hosting the web server and the vitals task.
pub struct WebRuntime {
    addr: SocketAddr,
    shutdown_tx: broadcast::Sender<()>,
    _runtime_handle: tokio::runtime::Runtime,
}

impl WebRuntime {
    pub fn start(state: WebState, port: u16) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("web-worker")
            .build()?;

        let (shutdown_tx, _) = broadcast::channel::<()>(1);

        let requested = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = runtime
            .block_on(tokio::net::TcpListener::bind(requested))
            .map_err(|e| PanelError::web(format!("Failed to bind {}: {}", requested, e)))?;
        let addr = listener.local_addr()?;

        runtime.spawn(status::vitals_task(
            Arc::clone(&state.status),
            shutdown_tx.subscribe(),
        ));

        let app = router(state);
        let mut shutdown = shutdown_tx.subscribe();
        runtime.spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            });
            if let Err(e) = server.await {
                log::error!("Web server stopped: {}", e);
            }
        });

        log::info!("Web control surface listening on {}", addr);

        Ok(Self {
            addr,
            shutdown_tx,
            _runtime_handle: runtime,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(self) {
        log::debug!("Shutting down web runtime");
        let _ = self.shutdown_tx.send(());
        // Runtime will shutdown when dropped
    }
}
