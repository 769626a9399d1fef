use crate::screen::Screen;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Draw the header bar with app name, API host and online status
pub fn draw_header(frame: &mut Frame, area: Rect, api_host: &str, screen: &Screen) {
  let (mode_label, mode_color) = mode_label(screen.is_online());
  let (net_label, net_color) = connectivity_label(screen.connected());

  let header = Line::from(vec![
    Span::styled(" jokebox ", Style::default().fg(Color::Cyan).bold()),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(format!(" {} ", api_host), Style::default().fg(Color::White)),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(format!(" {} ", mode_label), Style::default().fg(mode_color).bold()),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(format!(" {} ", net_label), Style::default().fg(net_color)),
  ]);

  let paragraph = Paragraph::new(header).style(Style::default().bg(Color::Black));

  frame.render_widget(paragraph, area);
}

/// Status label for the online/offline toggle
pub fn mode_label(online: bool) -> (&'static str, Color) {
  if online {
    ("Online", Color::Green)
  } else {
    ("Offline", Color::Yellow)
  }
}

fn connectivity_label(connected: Option<bool>) -> (&'static str, Color) {
  match connected {
    Some(true) => ("network up", Color::DarkGray),
    Some(false) => ("network down", Color::Red),
    None => ("network ?", Color::DarkGray),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ui::renderfns::testing::render;

  #[test]
  fn test_mode_label() {
    assert_eq!(mode_label(true).0, "Online");
    assert_eq!(mode_label(false).0, "Offline");
  }

  #[test]
  fn test_header_shows_host_and_mode() {
    let mut screen = Screen::new(false);
    screen.set_connected(false);

    let rows = render(80, 1, |frame| {
      let area = frame.area();
      draw_header(frame, area, "example.com", &screen)
    });
    assert!(rows[0].contains("jokebox"));
    assert!(rows[0].contains("example.com"));
    assert!(rows[0].contains("Offline"));
    assert!(rows[0].contains("network down"));
  }
}
