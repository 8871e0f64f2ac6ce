use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::oneshot};

use crate::{Error, Res, api::{self, CallbackState}};

/// Local HTTP endpoint that receives exactly one authorization redirect.
pub struct CallbackListener {
    listener: TcpListener,
    addr: SocketAddr,
}

impl CallbackListener {
    /// Binds to `redirect_host` (`host:port`).
    ///
    /// Call this before sending the user to the sign-in page so the redirect
    /// always finds a listening socket.
    pub async fn bind(redirect_host: &str) -> Res<Self> {
        let listener = TcpListener::bind(redirect_host)
            .await
            .map_err(|source| Error::Listener {
                addr: redirect_host.to_string(),
                source,
            })?;
        let addr = listener.local_addr().map_err(|source| Error::Listener {
            addr: redirect_host.to_string(),
            source,
        })?;

        Ok(CallbackListener { listener, addr })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Serves `/callback` until the first request arrives or `timeout`
    /// passes, then stops serving.
    ///
    /// Returns the authorization code when the request carried
    /// `expected_state` and a code, and the matching error otherwise.
    pub async fn await_authorization(self, expected_state: &str, timeout: Duration) -> Res<String> {
        let (tx, rx) = oneshot::channel();
        let state = Arc::new(CallbackState::new(expected_state, tx));

        let app = Router::new().route("/callback", get(api::callback).layer(Extension(state)));

        let addr = self.addr;
        let server = tokio::spawn(async move { axum::serve(self.listener, app).await });

        let outcome = tokio::time::timeout(timeout, rx).await;
        server.abort();

        match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(Error::Listener {
                addr: addr.to_string(),
                source: std::io::Error::other("listener stopped before the callback arrived"),
            }),
            Err(_) => Err(Error::AuthorizationTimeout(timeout)),
        }
    }
}
