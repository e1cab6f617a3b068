use tracing::{debug, error, warn};

use crate::files::FileStore;
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::router::{ECHO_PREFIX, FILES_PREFIX, Handler, HandlerFuture};

/// `/` and `/index.html`: empty 200.
pub struct RootHandler;

impl Handler for RootHandler {
    fn call<'a>(&'a self, _req: &'a Request) -> HandlerFuture<'a> {
        Box::pin(async { Response::ok() })
    }
}

/// `GET /echo/{s}`: returns `{s}` verbatim, no percent-decoding.
pub struct EchoHandler;

impl Handler for EchoHandler {
    fn call<'a>(&'a self, req: &'a Request) -> HandlerFuture<'a> {
        Box::pin(async move {
            let echoed = req.path.strip_prefix(ECHO_PREFIX).unwrap_or_default();
            Response::text(echoed)
        })
    }
}

/// `GET /user-agent`: returns the User-Agent header, or an empty body.
pub struct UserAgentHandler;

impl Handler for UserAgentHandler {
    fn call<'a>(&'a self, req: &'a Request) -> HandlerFuture<'a> {
        Box::pin(async move { Response::text(req.user_agent()) })
    }
}

/// `/files/{name}`: GET reads, POST writes, anything else is 405.
pub struct FilesHandler {
    store: FileStore,
}

impl FilesHandler {
    pub const ALLOWED: &'static str = "GET, POST";

    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    async fn get(&self, name: &str) -> Response {
        match self.store.read(name).await {
            Ok(contents) => Response::octet_stream(contents),
            Err(e) => {
                debug!(error = %e, "file not served");
                Response::not_found()
            }
        }
    }

    async fn post(&self, name: &str, body: &[u8]) -> Response {
        match self.store.write(name, body).await {
            Ok(()) => {
                debug!(name = %name, bytes = body.len(), "file written");
                Response::created()
            }
            Err(e) => {
                error!(error = %e, "file write failed");
                Response::internal_error()
            }
        }
    }
}

impl Handler for FilesHandler {
    fn call<'a>(&'a self, req: &'a Request) -> HandlerFuture<'a> {
        Box::pin(async move {
            let name = req.path.strip_prefix(FILES_PREFIX).unwrap_or_default();

            // Bad names are rejected before the method is looked at.
            if let Err(e) = self.store.resolve(name) {
                warn!(error = %e, "rejected file name");
                return Response::bad_request();
            }

            match req.method {
                Method::GET => self.get(name).await,
                Method::POST => self.post(name, &req.body).await,
                _ => Response::method_not_allowed(Self::ALLOWED),
            }
        })
    }
}
