//! Listener: plain HTTP through `axum::serve`, or TLS through a
//! `tokio-rustls` accept loop feeding `hyper-util`'s auto (h1/h2) builder.
//!
//! TLS material is read and checked before the socket is bound, so a bad
//! certificate never leaves a half-started listener behind. IPv6 listeners
//! are bound with `IPV6_V6ONLY` cleared and accept IPv4-mapped peers
//! whatever the host default.

use std::future::Future;
use std::io::{self, BufReader};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::{ConnectInfo, Request};
use hyper::body::Incoming;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto;
use hyper_util::service::TowerToHyperService;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio_rustls::TlsAcceptor;
use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tokio_rustls::rustls::{self, ServerConfig};
use tower::ServiceExt;

const BACKLOG: i32 = 1024;
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);
const ACCEPT_BACKOFF: Duration = Duration::from_secs(1);

/// Certificate chain and private key, both PEM.
#[derive(Debug, Clone)]
pub struct TlsFiles {
    pub certificate: PathBuf,
    pub key: PathBuf,
}

/// A bound listener, optionally wrapped in TLS.
pub struct Transport {
    listener: TcpListener,
    tls: Option<TlsAcceptor>,
    handshake_timeout: Duration,
}

impl Transport {
    /// Load TLS material (if any) and bind `addr`.
    ///
    /// # Errors
    ///
    /// Returns an error if a TLS file is missing or unusable, or if the
    /// address cannot be bound.
    pub async fn prepare(addr: SocketAddr, tls: Option<&TlsFiles>) -> Result<Self, TransportError> {
        let tls = tls.map(acceptor).transpose()?;
        let listener = bind(addr)
            .and_then(TcpListener::from_std)
            .map_err(|source| TransportError::Bind { addr, source })?;
        Ok(Self {
            listener,
            tls,
            handshake_timeout: HANDSHAKE_TIMEOUT,
        })
    }

    /// Drop TLS clients that have not finished the handshake after
    /// `timeout`.
    #[must_use]
    pub fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = timeout;
        self
    }

    /// Address the listener is bound to.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket is no longer valid.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    #[must_use]
    pub fn is_tls(&self) -> bool {
        self.tls.is_some()
    }

    /// Serve `app` until `shutdown` resolves, then let in-flight requests
    /// finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails.
    pub async fn serve<F>(self, app: Router, shutdown: F) -> Result<(), TransportError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match self.tls {
            None => axum::serve(
                self.listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(TransportError::Serve),
            Some(acceptor) => {
                serve_tls(
                    self.listener,
                    acceptor,
                    self.handshake_timeout,
                    app,
                    shutdown,
                )
                .await;
                Ok(())
            }
        }
    }
}

/// Non-blocking listening socket for `addr`, dual-stack when `addr` is IPv6.
fn bind(addr: SocketAddr) -> io::Result<std::net::TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    if addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    #[cfg(unix)]
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;
    Ok(socket.into())
}

async fn serve_tls<F>(
    listener: TcpListener,
    acceptor: TlsAcceptor,
    handshake_timeout: Duration,
    app: Router,
    shutdown: F,
) where
    F: Future<Output = ()> + Send + 'static,
{
    // Every connection task holds a receiver; the sender sees `closed` once
    // the last one is gone.
    let (drain_tx, drain_rx) = watch::channel(());
    tokio::pin!(shutdown);
    loop {
        let (stream, peer) = tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok(pair) => pair,
                Err(err) => {
                    if let Some(pause) = accept_backoff(&err) {
                        tracing::warn!(error = %err, "accept failed, retrying");
                        tokio::time::sleep(pause).await;
                    }
                    continue;
                }
            },
            () = &mut shutdown => break,
        };

        let acceptor = acceptor.clone();
        let app = app.clone();
        let mut drain = drain_rx.clone();
        tokio::spawn(async move {
            let stream = match tokio::time::timeout(handshake_timeout, acceptor.accept(stream)).await
            {
                Ok(Ok(stream)) => stream,
                Ok(Err(err)) => {
                    tracing::warn!(%peer, error = %err, "TLS handshake failed");
                    return;
                }
                Err(_) => {
                    tracing::warn!(%peer, "TLS handshake timed out");
                    return;
                }
            };
            let service = app.map_request(move |mut request: Request<Incoming>| {
                request.extensions_mut().insert(ConnectInfo(peer));
                request
            });
            let builder = auto::Builder::new(TokioExecutor::new());
            let connection = builder
                .serve_connection_with_upgrades(TokioIo::new(stream), TowerToHyperService::new(service));
            tokio::pin!(connection);
            let mut draining = false;
            loop {
                tokio::select! {
                    result = connection.as_mut() => {
                        if let Err(err) = result {
                            tracing::debug!(%peer, error = %err, "connection closed with error");
                        }
                        break;
                    }
                    _ = drain.changed(), if !draining => {
                        draining = true;
                        connection.as_mut().graceful_shutdown();
                    }
                }
            }
        });
    }

    drop(drain_rx);
    tracing::debug!("TLS listener stopped, draining connections");
    let _ = drain_tx.send(());
    drain_tx.closed().await;
}

/// How long to pause after a failed `accept`; `None` to retry at once.
///
/// Errors about a single peer leave the listener healthy. Anything else,
/// such as running out of file descriptors, is worth a pause before
/// trying again.
fn accept_backoff(err: &io::Error) -> Option<Duration> {
    match err.kind() {
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionReset => None,
        _ => Some(ACCEPT_BACKOFF),
    }
}

fn acceptor(files: &TlsFiles) -> Result<TlsAcceptor, TransportError> {
    let certs = load_certs(&files.certificate)?;
    let key = load_key(&files.key)?;

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let mut config = ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_no_client_auth()
        .with_single_cert(certs, key)?;
    config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

    Ok(TlsAcceptor::from(Arc::new(config)))
}

fn load_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, TransportError> {
    let pem = read(path, "certificate")?;
    let certs = rustls_pemfile::certs(&mut BufReader::new(pem.as_slice()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| TransportError::Read {
            kind: "certificate",
            path: path.to_path_buf(),
            source,
        })?;
    if certs.is_empty() {
        return Err(TransportError::NoCertificate(path.to_path_buf()));
    }
    Ok(certs)
}

fn load_key(path: &Path) -> Result<PrivateKeyDer<'static>, TransportError> {
    let pem = read(path, "private key")?;
    rustls_pemfile::private_key(&mut BufReader::new(pem.as_slice()))
        .map_err(|source| TransportError::Read {
            kind: "private key",
            path: path.to_path_buf(),
            source,
        })?
        .ok_or_else(|| TransportError::NoPrivateKey(path.to_path_buf()))
}

fn read(path: &Path, kind: &'static str) -> Result<Vec<u8>, TransportError> {
    std::fs::read(path).map_err(|source| TransportError::Read {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

/// Listener start-up and runtime errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to read {kind} from {}", path.display())]
    Read {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no certificate found in {}", .0.display())]
    NoCertificate(PathBuf),
    #[error("no private key found in {}", .0.display())]
    NoPrivateKey(PathBuf),
    #[error("invalid TLS configuration")]
    Rustls(#[from] rustls::Error),
    #[error("failed to bind {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("listener failed")]
    Serve(#[source] io::Error),
}
