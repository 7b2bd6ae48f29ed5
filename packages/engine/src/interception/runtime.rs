// packages/engine/src/interception/runtime.rs
//! Interception install lifecycle
//!
//! ```text
//! NotInstalled ──install(ready)──┬── ready Ok  ──► Installed
//!                                └── ready Err ──► Failed(reason)
//! ```
//!
//! Installation runs at most once per runtime; later `install` calls return
//! the first outcome. In real mode, or when interception is disabled in
//! configuration, installation is skipped and the runtime stays
//! `NotInstalled`. Every state other than `Installed` means requests go to
//! the fallback route layer.

use crate::interception::http_interceptor::InterceptLayer;
use crate::mode::Mode;
use crate::routing::HandlerRegistry;
use crate::utils::config::InterceptionConfig;
use crate::utils::errors::Result;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{error, info, warn};

/// Observable install state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallState {
    NotInstalled,
    Installed,
    Failed(String),
}

impl InstallState {
    fn label(&self) -> &'static str {
        match self {
            InstallState::NotInstalled => "not_installed",
            InstallState::Installed => "installed",
            InstallState::Failed(_) => "failed",
        }
    }
}

struct RuntimeInner {
    registry: Arc<HandlerRegistry>,
    mode: Mode,
    config: InterceptionConfig,
    state: RwLock<InstallState>,
    outcome: OnceCell<InstallState>,
}

/// Client-side interception runtime. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct InterceptionRuntime {
    inner: Arc<RuntimeInner>,
}

impl InterceptionRuntime {
    pub fn new(registry: Arc<HandlerRegistry>, mode: Mode) -> Self {
        Self::with_config(registry, mode, InterceptionConfig::default())
    }

    pub fn with_config(
        registry: Arc<HandlerRegistry>,
        mode: Mode,
        config: InterceptionConfig,
    ) -> Self {
        Self {
            inner: Arc::new(RuntimeInner {
                registry,
                mode,
                config,
                state: RwLock::new(InstallState::NotInstalled),
                outcome: OnceCell::new(),
            }),
        }
    }

    /// Install once `ready` resolves. Never fails: a failed hook is logged
    /// and leaves the runtime in [`InstallState::Failed`].
    pub async fn install<F>(&self, ready: F) -> InstallState
    where
        F: Future<Output = Result<()>>,
    {
        self.inner
            .outcome
            .get_or_init(|| async move {
                let outcome = self.attempt_install(ready).await;
                metrics::counter!("mock_install_total", "outcome" => outcome.label()).increment(1);
                *self.inner.state.write() = outcome.clone();
                outcome
            })
            .await
            .clone()
    }

    /// Install with a hook that is already ready
    pub async fn install_now(&self) -> InstallState {
        self.install(async { Ok(()) }).await
    }

    async fn attempt_install<F>(&self, ready: F) -> InstallState
    where
        F: Future<Output = Result<()>>,
    {
        if !self.inner.mode.is_mock() {
            info!("Mock disabled, interception not installed");
            return InstallState::NotInstalled;
        }

        if !self.inner.config.enabled {
            info!("Interception disabled by configuration");
            return InstallState::NotInstalled;
        }

        match ready.await {
            Ok(()) => {
                info!(
                    "Interception installed with {} handlers",
                    self.inner.registry.len()
                );
                InstallState::Installed
            }
            Err(e) => {
                error!("Failed to install interception: {}", e);
                warn!("Requests will be answered by the fallback route layer");
                InstallState::Failed(e.to_string())
            }
        }
    }

    pub fn state(&self) -> InstallState {
        self.inner.state.read().clone()
    }

    pub fn is_installed(&self) -> bool {
        matches!(*self.inner.state.read(), InstallState::Installed)
    }

    pub fn mode(&self) -> Mode {
        self.inner.mode
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.inner.registry
    }

    pub(crate) fn log_requests(&self) -> bool {
        self.inner.config.log_requests
    }

    /// Tower layer that answers matching requests while installed
    pub fn layer(&self) -> InterceptLayer {
        InterceptLayer::new(self.clone())
    }
}
