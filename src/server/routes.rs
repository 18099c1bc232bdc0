use std::path::PathBuf;
use std::sync::Arc;

use super::assets::{self, STATIC_PREFIX};
use super::http::{Request, Response};
use super::page::Page;
use crate::input::parse_column;
use crate::session::Session;

/// Maps requests to the shared game.
///
/// | route          | effect                                         |
/// |----------------|------------------------------------------------|
/// | `GET /`        | game page                                      |
/// | `POST /play`   | play the `column` form field, redirect to `/`  |
/// | `POST /reset`  | new game, redirect to `/`                      |
/// | `GET /api/state` | snapshot as JSON                             |
/// | `GET /static/*` | files from the static directory               |
///
/// Other methods on `/play` and `/reset` redirect to `/` without touching
/// the game.
#[derive(Debug)]
pub struct Router {
    session: Arc<Session>,
    page: Page,
    static_dir: PathBuf,
}

impl Router {
    pub fn new(session: Arc<Session>, page: Page, static_dir: PathBuf) -> Self {
        Router {
            session,
            page,
            static_dir,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn handle(&self, request: &Request) -> Response {
        let method = request.method.as_str();
        match request.path.as_str() {
            "/" => match method {
                "GET" => self.home(),
                _ => Response::error(405),
            },
            "/play" => match method {
                "POST" => self.play(request),
                _ => Response::redirect("/"),
            },
            "/reset" => match method {
                "POST" => {
                    self.session.reset();
                    log::info!("game reset");
                    Response::redirect("/")
                }
                _ => Response::redirect("/"),
            },
            "/api/state" => match method {
                "GET" => Response::json(&self.session.snapshot().to_json()),
                _ => Response::error(405),
            },
            path => match path.strip_prefix(STATIC_PREFIX) {
                Some(relative) if method == "GET" => assets::serve(&self.static_dir, relative),
                Some(_) => Response::error(405),
                None => Response::error(404),
            },
        }
    }

    fn home(&self) -> Response {
        // Copy the state under the lock, render after releasing it
        let snapshot = self.session.snapshot();
        Response::html(self.page.render(&snapshot))
    }

    fn play(&self, request: &Request) -> Response {
        let text = request.form_value("column").unwrap_or_default();
        let result = parse_column(&text)
            .map_err(|e| e.to_string())
            .and_then(|column| self.session.play(column).map_err(|e| e.to_string()));

        match result {
            Ok(outcome) => log::info!(
                "{} played column {} -> {}",
                outcome.player.name(),
                outcome.position.col,
                outcome.status.as_str()
            ),
            Err(reason) => log::debug!("ignored move {:?}: {}", text, reason),
        }

        Response::redirect("/")
    }
}
