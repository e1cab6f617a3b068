//! Request routing.
//!
//! A [`Router`] is an ordered table of routes. Each route pairs a predicate
//! over the whole request (path and method) with a [`Handler`]. Dispatch walks
//! the table top to bottom and runs the first handler whose predicate holds;
//! when nothing matches the response is a bare 404.
//!
//! ```text
//!   /files/*            -> FilesHandler   (any method)
//!   / | /index.html     -> RootHandler
//!   GET /echo/*         -> EchoHandler
//!   GET /user-agent     -> UserAgentHandler
//!   otherwise           -> 404
//! ```

pub mod handlers;

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::config::FilesConfig;
use crate::files::FileStore;
use crate::http::request::{Method, Request};
use crate::http::response::Response;

pub use handlers::{EchoHandler, FilesHandler, RootHandler, UserAgentHandler};

pub const FILES_PREFIX: &str = "/files/";
pub const ECHO_PREFIX: &str = "/echo/";

pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Response> + Send + 'a>>;

/// Produces the response for a request that matched its route.
pub trait Handler: Send + Sync {
    fn call<'a>(&'a self, req: &'a Request) -> HandlerFuture<'a>;
}

/// Decides whether a route applies to a request.
pub type Predicate = fn(&Request) -> bool;

pub struct Route {
    pub name: &'static str,
    predicate: Predicate,
    handler: Box<dyn Handler>,
}

impl Route {
    pub fn matches(&self, req: &Request) -> bool {
        (self.predicate)(req)
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route").field("name", &self.name).finish()
    }
}

#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// An empty table; every request gets a 404.
    pub fn new() -> Self {
        Self::default()
    }

    /// Full route table including file serving out of `files`.
    pub fn standard(files: FileStore) -> Self {
        Self::new()
            .route("files", is_files, FilesHandler::new(files))
            .route("root", is_root, RootHandler)
            .route("echo", is_echo, EchoHandler)
            .route("user-agent", is_user_agent, UserAgentHandler)
    }

    /// Table without file serving: echo, then root.
    pub fn minimal() -> Self {
        Self::new()
            .route("echo", is_echo, EchoHandler)
            .route("root", is_root, RootHandler)
    }

    pub fn from_config(cfg: &FilesConfig) -> Self {
        if cfg.enabled {
            Self::standard(FileStore::new(&cfg.directory))
        } else {
            Self::minimal()
        }
    }

    /// Appends a route; earlier routes take priority.
    pub fn route(
        mut self,
        name: &'static str,
        predicate: Predicate,
        handler: impl Handler + 'static,
    ) -> Self {
        self.routes.push(Route {
            name,
            predicate,
            handler: Box::new(handler),
        });
        self
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the first route whose predicate accepts `req`.
    pub fn match_route(&self, req: &Request) -> Option<&Route> {
        self.routes.iter().find(|route| route.matches(req))
    }

    pub async fn dispatch(&self, req: &Request) -> Response {
        match self.match_route(req) {
            Some(route) => {
                debug!(route = route.name, path = %req.path, "route matched");
                route.handler.call(req).await
            }
            None => {
                debug!(path = %req.path, "no route matched");
                Response::not_found()
            }
        }
    }
}

fn is_files(req: &Request) -> bool {
    req.path.starts_with(FILES_PREFIX)
}

fn is_root(req: &Request) -> bool {
    req.path == "/" || req.path == "/index.html"
}

fn is_echo(req: &Request) -> bool {
    req.method == Method::GET && req.path.starts_with(ECHO_PREFIX)
}

fn is_user_agent(req: &Request) -> bool {
    req.method == Method::GET && req.path == "/user-agent"
}
