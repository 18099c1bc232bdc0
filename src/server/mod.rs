//! HTTP front end: one shared game rendered as a web page, moves posted as
//! forms. Each connection is served on its own thread.

mod assets;
pub mod http;
mod page;
mod routes;

use std::io::{self, BufReader, BufWriter, Read};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::session::Session;

pub use http::{Request, RequestError, Response};
pub use page::Page;
pub use routes::Router;

/// A connection that sends nothing for this long is dropped.
const READ_TIMEOUT: Duration = Duration::from_secs(10);
/// Whole request, however slowly it trickles in, must arrive within this.
const REQUEST_DEADLINE: Duration = Duration::from_secs(30);

/// Reader that fails with `TimedOut` once `until` has passed.
struct Deadline<R> {
    inner: R,
    until: Instant,
}

impl<R: Read> Read for Deadline<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if Instant::now() >= self.until {
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                "request not received in time",
            ));
        }
        self.inner.read(buf)
    }
}

pub struct Server {
    listener: TcpListener,
    router: Arc<Router>,
}

impl Server {
    /// Load the page template and bind the listener. Both failures are fatal.
    pub fn bind(config: &ServerConfig, session: Arc<Session>) -> Result<Self, ServerError> {
        let page = Page::load(config.template.as_deref())?;
        let listener = TcpListener::bind(&config.bind).map_err(|e| ServerError::Bind {
            addr: config.bind.clone(),
            source: e,
        })?;
        let router = Router::new(session, page, config.static_dir.clone());

        Ok(Server {
            listener,
            router: Arc::new(router),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the listener fails.
    pub fn run(self) -> Result<(), ServerError> {
        log::info!("serving Connect Four on http://{}", self.local_addr()?);

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    let router = Arc::clone(&self.router);
                    thread::spawn(move || handle_connection(stream, &router));
                }
                Err(e) => {
                    log::warn!("error accepting connection: {}", e);
                }
            }
        }
        Ok(())
    }
}

fn handle_connection(stream: TcpStream, router: &Router) {
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    if let Err(e) = stream.set_read_timeout(Some(READ_TIMEOUT)) {
        log::warn!("{}: cannot set read timeout: {}", peer, e);
    }
    let reader = match stream.try_clone() {
        Ok(reader) => reader,
        Err(e) => {
            log::warn!("{}: cannot clone stream: {}", peer, e);
            return;
        }
    };

    let mut reader = BufReader::new(Deadline {
        inner: reader,
        until: Instant::now() + REQUEST_DEADLINE,
    });
    let response = match Request::read_from(&mut reader) {
        Ok(request) => {
            let response = router.handle(&request);
            log::info!(
                "{} {} {}{}{} -> {}",
                peer,
                request.method,
                request.path,
                if request.query.is_some() { "?" } else { "" },
                request.query.as_deref().unwrap_or(""),
                response.status
            );
            response
        }
        Err(RequestError::Empty) => return,
        Err(RequestError::BodyTooLarge(size)) => {
            log::warn!("{}: request body of {} bytes rejected", peer, size);
            Response::error(413)
        }
        Err(e) => {
            log::warn!("{}: {}", peer, e);
            Response::error(400)
        }
    };

    if let Err(e) = response.write_to(&mut BufWriter::new(stream)) {
        log::warn!("{}: error writing response: {}", peer, e);
    }
}
