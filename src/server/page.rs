//! The game page: an HTML template with `{{board}}`, `{{status}}` and
//! `{{player_color}}` placeholders filled from a [`Snapshot`].

use std::fmt::Write;
use std::path::Path;

use crate::error::ServerError;
use crate::game::Snapshot;

const DEFAULT_TEMPLATE: &str = include_str!("../../templates/index.html");
const BOARD_PLACEHOLDER: &str = "{{board}}";

#[derive(Debug, Clone)]
pub struct Page {
    template: String,
}

impl Page {
    /// Load the page template, or use the built-in one when `path` is `None`.
    ///
    /// A template that cannot be read or has nowhere to put the board is an
    /// error: the server has nothing to serve without it.
    pub fn load(path: Option<&Path>) -> Result<Self, ServerError> {
        let Some(path) = path else {
            return Ok(Page {
                template: DEFAULT_TEMPLATE.to_string(),
            });
        };

        let template = std::fs::read_to_string(path).map_err(|e| ServerError::TemplateRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        if !template.contains(BOARD_PLACEHOLDER) {
            return Err(ServerError::TemplateInvalid {
                path: path.to_path_buf(),
                reason: format!("missing {BOARD_PLACEHOLDER} placeholder"),
            });
        }
        Ok(Page { template })
    }

    pub fn render(&self, snapshot: &Snapshot) -> String {
        self.template
            .replace(BOARD_PLACEHOLDER, &render_board(snapshot))
            .replace("{{status}}", &status_line(snapshot))
            .replace("{{player_color}}", color_of(snapshot.player))
    }
}

fn color_of(player: u8) -> &'static str {
    match player {
        1 => "red",
        _ => "yellow",
    }
}

fn status_line(snapshot: &Snapshot) -> String {
    if snapshot.winner != 0 {
        format!(
            "Player {} ({}) wins!",
            snapshot.winner,
            color_of(snapshot.winner)
        )
    } else if snapshot.is_drawn() {
        "It's a draw!".to_string()
    } else {
        format!(
            "Player {} ({}) to play",
            snapshot.player,
            color_of(snapshot.player)
        )
    }
}

/// Column buttons while the game is running, then one `div.cell` per square,
/// top row first. The last placed piece gets the `drop` class.
fn render_board(snapshot: &Snapshot) -> String {
    let playing = snapshot.winner == 0 && !snapshot.is_drawn();
    let mut html = String::from("<div class=\"board\">\n");

    if playing {
        let columns = snapshot.grid.first().map_or(0, Vec::len);
        for col in 0..columns {
            let _ = writeln!(
                html,
                "  <form method=\"post\" action=\"/play\">\
                 <button type=\"submit\" class=\"column\" name=\"column\" value=\"{col}\">\u{25bc}</button>\
                 </form>"
            );
        }
    }

    for (row, cells) in snapshot.grid.iter().enumerate() {
        for (col, label) in cells.iter().enumerate() {
            let dropped = snapshot.last_row == row as i32 && snapshot.last_col == col as i32;
            let class = if dropped { " drop" } else { "" };
            let _ = writeln!(html, "  <div class=\"cell {label}{class}\"></div>");
        }
    }

    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, COLS, RED_WINS_SEQUENCE, ROWS};

    #[test]
    fn test_default_page_renders_empty_board() {
        let page = Page::load(None).unwrap();
        let html = page.render(&GameState::initial().snapshot());

        assert!(html.contains("Player 1 (red) to play"));
        assert!(html.contains("turn-red"));
        assert_eq!(html.matches("class=\"cell empty\"").count(), ROWS * COLS);
        assert_eq!(html.matches("name=\"column\"").count(), COLS);
        assert!(!html.contains("drop\""));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_last_move_is_marked() {
        let mut state = GameState::initial();
        state.play(4).unwrap();
        let html = Page::load(None).unwrap().render(&state.snapshot());

        assert_eq!(html.matches("class=\"cell red drop\"").count(), 1);
        assert!(html.contains("Player 2 (yellow) to play"));
    }

    #[test]
    fn test_finished_game_hides_column_buttons() {
        let mut state = GameState::initial();
        for &col in &RED_WINS_SEQUENCE {
            state.play(col).unwrap();
        }
        let html = Page::load(None).unwrap().render(&state.snapshot());

        assert!(html.contains("Player 1 (red) wins!"));
        assert!(!html.contains("name=\"column\""));
    }

    #[test]
    fn test_custom_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<main>{{status}}|{{board}}</main>").unwrap();

        let page = Page::load(Some(&path)).unwrap();
        let html = page.render(&GameState::initial().snapshot());
        assert!(html.starts_with("<main>Player 1 (red) to play|<div class=\"board\">"));
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let err = Page::load(Some(Path::new("no/such/template.html"))).unwrap_err();
        assert!(matches!(err, ServerError::TemplateRead { .. }));
    }

    #[test]
    fn test_template_without_board_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<main>{{status}}</main>").unwrap();

        let err = Page::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ServerError::TemplateInvalid { .. }));
    }
}
