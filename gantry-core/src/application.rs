// Application bootstrap and HTTP transport adapter
//
// Startup runs single-threaded to completion before any request is
// accepted; the registry and route table are frozen behind Arcs at that
// point and only ever read afterward.

use crate::catalog::ComponentCatalog;
use crate::dispatcher::Dispatcher;
use crate::error::Error;
use crate::http::{HttpRequest, HttpResponse};
use crate::injector;
use crate::registry::BeanRegistry;
use crate::router::RouteTable;
use http_body_util::{BodyExt, Full};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{body::Incoming as IncomingBody, Request, Response};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Startup options consumed by the bootstrap pipeline.
#[derive(Debug, Clone, Default)]
pub struct BootOptions {
    /// Root package namespace to scan. Absent means a degraded start with
    /// empty tables: every request answers not-found.
    pub scan_package: Option<String>,
    /// Deployment prefix stripped from request paths before route lookup.
    pub context_path: String,
}

/// A fully initialized container plus its request dispatcher.
pub struct Application {
    registry: Arc<BeanRegistry>,
    routes: Arc<RouteTable>,
    dispatcher: Arc<Dispatcher>,
}

impl Application {
    /// Run the startup pipeline to completion: scan the catalog,
    /// instantiate beans, inject dependencies, build the route table.
    /// Discovery and duplicate-bean failures are fatal here.
    pub fn bootstrap(catalog: &ComponentCatalog, options: BootOptions) -> Result<Self, Error> {
        let (registry, routes) = match options.scan_package.as_deref() {
            Some(root) => {
                let names = catalog.scan(root)?;
                let registry = BeanRegistry::instantiate(catalog, &names)?;
                injector::autowire(&registry);
                let routes = RouteTable::build(&registry);
                (registry, routes)
            }
            None => {
                warn!("No scan package configured, starting with empty registry and route table");
                (BeanRegistry::empty(), RouteTable::empty())
            }
        };
        info!(
            beans = registry.len(),
            routes = routes.len(),
            "Container initialized"
        );

        let registry = Arc::new(registry);
        let routes = Arc::new(routes);
        let dispatcher = Arc::new(Dispatcher::new(
            registry.clone(),
            routes.clone(),
            options.context_path,
        ));
        Ok(Self {
            registry,
            routes,
            dispatcher,
        })
    }

    pub fn registry(&self) -> &BeanRegistry {
        &self.registry
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        self.dispatcher.clone()
    }

    /// Start the HTTP server on the specified port
    pub async fn listen(self, port: u16) -> Result<(), Error> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "Server listening");
        self.serve(listener).await
    }

    /// Serve HTTP/1 connections on an already-bound listener. Useful when
    /// the caller needs the ephemeral port.
    pub async fn serve(self, listener: TcpListener) -> Result<(), Error> {
        let dispatcher = self.dispatcher.clone();
        loop {
            let (stream, _) = listener.accept().await?;
            let io = TokioIo::new(stream);
            let dispatcher = dispatcher.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: Request<IncomingBody>| {
                    let dispatcher = dispatcher.clone();
                    async move { handle_request(req, dispatcher).await }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    error!(error = ?err, "Error serving connection");
                }
            });
        }
    }
}

/// Convert a hyper request, dispatch it, convert the response back.
async fn handle_request(
    req: Request<IncomingBody>,
    dispatcher: Arc<Dispatcher>,
) -> Result<Response<Full<bytes::Bytes>>, hyper::Error> {
    let method = req.method().to_string();
    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let mut request = HttpRequest::new(method, target);
    for (name, value) in req.headers() {
        if let Ok(value) = value.to_str() {
            request.headers.insert(name.to_string(), value.to_string());
        }
    }
    request.body = req.collect().await?.to_bytes().to_vec();

    let mut response = HttpResponse::ok();
    dispatcher.dispatch(&request, &mut response);

    let mut builder = Response::builder().status(response.status);
    for (key, value) in response.headers {
        builder = builder.header(key, value);
    }
    let body = Full::new(bytes::Bytes::from(response.body));
    Ok(builder
        .body(body)
        .unwrap_or_else(|_| Response::new(Full::new(bytes::Bytes::new()))))
}
