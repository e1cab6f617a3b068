use std::sync::Arc;

use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::http::parser::{parse_http_request, ParseError};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::router::Router;

/// Serves exactly one request on a stream, then closes it.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    router: Arc<Router>,
    max_request_size: usize,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

/// What the read phase produced.
#[derive(Debug)]
pub enum Incoming {
    Request(Request),
    Malformed(ParseError),
    TooLarge,
    /// Peer closed without sending anything.
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>, max_request_size: usize) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(max_request_size.saturating_add(1).min(8192)),
            state: ConnectionState::Reading,
            router,
            max_request_size,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        Incoming::Request(req) => ConnectionState::Processing(req),
                        Incoming::Malformed(e) => {
                            warn!(error = %e, "malformed request");
                            ConnectionState::Writing(ResponseWriter::new(&Response::bad_request()))
                        }
                        Incoming::TooLarge => {
                            warn!(limit = self.max_request_size, "request too large");
                            ConnectionState::Writing(ResponseWriter::new(
                                &Response::payload_too_large(),
                            ))
                        }
                        Incoming::Closed => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(req) => {
                    let response = self.router.dispatch(req).await;
                    info!(
                        method = %req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        "request handled"
                    );

                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        if let Err(e) = self.stream.shutdown().await {
            debug!(error = %e, "shutdown after response failed");
        }
        Ok(())
    }

    /// Reads until one request parses.
    ///
    /// Only a short body keeps the loop going; a head that fails to parse
    /// after a read is answered as malformed right away.
    pub async fn read_request(&mut self) -> anyhow::Result<Incoming> {
        loop {
            let room = self.max_request_size + 1 - self.buffer.len();
            let n = self
                .stream
                .read_buf(&mut (&mut self.buffer).limit(room))
                .await?;

            if n == 0 {
                if self.buffer.is_empty() {
                    debug!("peer closed before sending a request");
                    return Ok(Incoming::Closed);
                }
                return Ok(Incoming::Malformed(ParseError::Incomplete));
            }

            if self.buffer.len() > self.max_request_size {
                return Ok(Incoming::TooLarge);
            }

            match parse_http_request(&self.buffer) {
                Ok((request, _consumed)) => return Ok(Incoming::Request(request)),
                Err(ParseError::Incomplete) => continue,
                Err(e) => return Ok(Incoming::Malformed(e)),
            }
        }
    }
}
