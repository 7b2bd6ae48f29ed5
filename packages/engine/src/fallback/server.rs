// packages/engine/src/fallback/server.rs
//! HTTP server hosting the fallback routes
//!
//! One task per accepted connection; each request runs to completion on
//! that task.

use crate::fallback::router::FallbackRouter;
use crate::utils::errors::{MockError, Result};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

/// Bound fallback server
pub struct FallbackServer {
    router: Arc<FallbackRouter>,
    listener: TcpListener,
}

impl FallbackServer {
    /// Bind the listening socket
    pub async fn bind(addr: SocketAddr, router: FallbackRouter) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| MockError::Transport(format!("Failed to bind {}: {}", addr, e)))?;

        Ok(Self {
            router: Arc::new(router),
            listener,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until `shutdown` resolves
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        info!(
            "Fallback routes listening on {} ({} mode)",
            self.local_addr()?,
            self.router.mode()
        );

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Fallback server shutting down");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, addr)) => self.spawn_connection(stream, addr),
                    Err(e) => error!("Failed to accept connection: {}", e),
                },
            }
        }
    }

    fn spawn_connection(&self, stream: tokio::net::TcpStream, addr: SocketAddr) {
        let router = Arc::clone(&self.router);

        tokio::spawn(async move {
            debug!("Accepted connection from {}", addr);

            let service = service_fn(move |request| {
                let router = Arc::clone(&router);
                async move { Ok::<_, Infallible>(router.handle(request).await) }
            });

            if let Err(e) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                error!("Connection error: {}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract;
    use crate::mode::Mode;

    #[tokio::test]
    async fn test_bind_ephemeral_and_shutdown() {
        let router = FallbackRouter::new(Arc::new(contract::registry().unwrap()), Mode::Mock);
        let server = FallbackServer::bind("127.0.0.1:0".parse().unwrap(), router)
            .await
            .unwrap();

        assert_ne!(server.local_addr().unwrap().port(), 0);
        server.serve_with_shutdown(async {}).await.unwrap();
    }
}
