mod renderfns;

use crate::app::App;
use ratatui::prelude::*;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Min(1),    // Joke
      Constraint::Length(1), // Footer
    ])
    .split(frame.area());

  let screen = app.screen();
  renderfns::draw_header(frame, chunks[0], app.api_host(), screen);
  renderfns::draw_joke_panel(frame, chunks[1], screen);
  renderfns::draw_footer(frame, chunks[2], screen);
}
