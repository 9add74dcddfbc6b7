//! Transport to the SPDK control socket
//!
//! [`Transport`] is the seam between the client and the wire: it receives a
//! method name and a parameter map, assigns the request ID, writes the
//! JSON-RPC request and waits for the matching reply. [`SocketTransport`] is
//! the implementation used against a running daemon.
//!
//! # Framing
//!
//! SPDK writes each reply as a bare JSON value with no delimiter, so the
//! transport reads into a buffer until one complete value can be decoded.
//!
//! # Timeouts
//!
//! By default a call waits for as long as the daemon takes. A response
//! timeout can be set with [`SocketTransport::with_response_timeout`]. A
//! reply that arrives after its call timed out carries an older ID than the
//! one the next call waits for; it is logged and skipped.

use async_trait::async_trait;
use spdk_rpc_core::{codec, Id, JsonRpcResponse, Params, Request, TransportError};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Historical location of the SPDK control socket
pub const DEFAULT_SOCKET_PATH: &str = "/var/tmp/spdk.sock";

const READ_CHUNK_SIZE: usize = 4096;

/// Delivers requests to the daemon and returns its replies
///
/// One call is in flight at a time; `&mut self` enforces that.
#[async_trait]
pub trait Transport: Send {
    /// Send one request and wait for its reply
    ///
    /// A reply carrying an `error` member is returned as
    /// `TransportError::Rpc`, so an `Ok` response is always a success.
    async fn call(&mut self, method: &str, params: Params) -> Result<JsonRpcResponse, TransportError>;

    /// Release the underlying connection
    async fn close(&mut self) -> Result<(), TransportError>;
}

/// Address of the daemon's control socket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Unix domain socket path
    Unix(PathBuf),
    /// TCP `host:port`
    Tcp(String),
}

impl Default for Endpoint {
    fn default() -> Self {
        Endpoint::Unix(PathBuf::from(DEFAULT_SOCKET_PATH))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Unix(path) => write!(f, "{}", path.display()),
            Endpoint::Tcp(addr) => write!(f, "tcp://{}", addr),
        }
    }
}

impl FromStr for Endpoint {
    type Err = std::convert::Infallible;

    /// `tcp://host:port` selects TCP; `unix:///path` or a bare path selects
    /// a Unix socket.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(addr) = s.strip_prefix("tcp://") {
            Ok(Endpoint::Tcp(addr.to_string()))
        } else if let Some(path) = s.strip_prefix("unix://") {
            Ok(Endpoint::Unix(PathBuf::from(path)))
        } else {
            Ok(Endpoint::Unix(PathBuf::from(s)))
        }
    }
}

impl From<&str> for Endpoint {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(endpoint) => endpoint,
            Err(never) => match never {},
        }
    }
}

impl From<PathBuf> for Endpoint {
    fn from(path: PathBuf) -> Self {
        Endpoint::Unix(path)
    }
}

trait SocketStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> SocketStream for T {}

/// JSON-RPC transport over a byte stream socket
pub struct SocketTransport {
    stream: Box<dyn SocketStream>,
    buffer: Vec<u8>,
    next_id: i64,
    response_timeout: Option<Duration>,
}

impl SocketTransport {
    /// Connect to the daemon at `endpoint`
    #[tracing::instrument(skip_all, fields(endpoint = %endpoint))]
    pub async fn connect(endpoint: &Endpoint) -> Result<Self, TransportError> {
        let stream: Box<dyn SocketStream> = match endpoint {
            #[cfg(unix)]
            Endpoint::Unix(path) => Box::new(tokio::net::UnixStream::connect(path).await?),
            #[cfg(not(unix))]
            Endpoint::Unix(_) => {
                return Err(TransportError::Io(
                    "Unix domain sockets are not supported on this platform".to_string(),
                ))
            }
            Endpoint::Tcp(addr) => Box::new(tokio::net::TcpStream::connect(addr.as_str()).await?),
        };

        tracing::debug!("Connected to control socket");
        Ok(Self::from_stream(stream))
    }

    /// Wrap an already connected stream
    pub fn new<S>(stream: S) -> Self
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        Self::from_stream(Box::new(stream))
    }

    fn from_stream(stream: Box<dyn SocketStream>) -> Self {
        Self {
            stream,
            buffer: Vec::new(),
            next_id: 1,
            response_timeout: None,
        }
    }

    /// Fail calls whose reply takes longer than `timeout`
    pub fn with_response_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.response_timeout = timeout;
        self
    }

    fn next_id(&mut self) -> Id {
        let id = self.next_id;
        self.next_id += 1;
        Id::Number(id)
    }

    async fn read_response(&mut self) -> Result<JsonRpcResponse, TransportError> {
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        loop {
            if let Some(response) = codec::decode_next_response(&mut self.buffer)? {
                return Ok(response);
            }

            let read = self.stream.read(&mut chunk).await?;
            if read == 0 {
                return Err(TransportError::ConnectionClosed);
            }
            self.buffer.extend_from_slice(&chunk[..read]);
        }
    }

    /// Read replies until one is not a leftover from an earlier call
    async fn read_matching(&mut self, id: &Id) -> Result<JsonRpcResponse, TransportError> {
        loop {
            let response = self.read_response().await?;
            match (&response.id, id) {
                (Id::Number(actual), Id::Number(expected)) if actual < expected => {
                    tracing::warn!(stale = *actual, expected = *expected, "Discarding reply to an earlier request");
                }
                _ => return Ok(response),
            }
        }
    }
}

#[async_trait]
impl Transport for SocketTransport {
    async fn call(&mut self, method: &str, params: Params) -> Result<JsonRpcResponse, TransportError> {
        let id = self.next_id();
        let request = Request {
            method: method.to_string(),
            params,
        }
        .into_json_rpc(id.clone());

        let text = codec::encode_request(&request)?;
        self.stream.write_all(text.as_bytes()).await?;
        self.stream.flush().await?;

        tracing::trace!(method, id = %id, "Request sent, waiting for response");

        let mut response = match self.response_timeout {
            Some(limit) => tokio::time::timeout(limit, self.read_matching(&id))
                .await
                .map_err(|_| TransportError::Timeout)??,
            None => self.read_matching(&id).await?,
        };

        if response.id != id {
            return Err(TransportError::IdMismatch {
                expected: id,
                actual: response.id,
            });
        }

        if let Some(error) = response.error.take() {
            return Err(TransportError::Rpc(error));
        }

        Ok(response)
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.stream.shutdown().await?;
        Ok(())
    }
}
