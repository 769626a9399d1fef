use crate::screen::Screen;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub const PLACEHOLDER: &str = "Press the button to get a joke!";

/// Draw the joke, or the error / loading / placeholder text in its place
pub fn draw_joke_panel(frame: &mut Frame, area: Rect, screen: &Screen) {
  let title = if screen.is_loading() {
    " Joke (loading...) "
  } else {
    " Joke "
  };

  let block = Block::default()
    .title(title)
    .title_alignment(Alignment::Center)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Blue));

  let inner = block.inner(area);
  frame.render_widget(block, area);

  let paragraph = Paragraph::new(joke_lines(screen))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
  frame.render_widget(paragraph, inner);
}

fn joke_lines(screen: &Screen) -> Vec<Line<'_>> {
  // An error replaces the whole panel
  if let Some(error) = screen.error() {
    return vec![Line::styled(error, Style::default().fg(Color::Red))];
  }

  let mut lines = Vec::new();
  if screen.is_loading() {
    lines.push(Line::styled(
      "Loading...",
      Style::default().fg(Color::DarkGray),
    ));
    lines.push(Line::raw(""));
  }

  match screen.joke() {
    Some(joke) => {
      lines.push(Line::styled(joke.setup.as_str(), Style::default().bold()));
      lines.push(Line::raw(""));
      lines.push(Line::raw(joke.punchline.as_str()));
    }
    None => lines.push(Line::raw(PLACEHOLDER)),
  }

  lines
}
