use crate::screen::Screen;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Draw the footer bar with shortcut hints and the last save
pub fn draw_footer(frame: &mut Frame, area: Rect, screen: &Screen) {
  let key = Style::default().fg(Color::Cyan);
  let desc = Style::default().fg(Color::DarkGray);

  // "Get Another Joke" is disabled while loading
  let next_style = if screen.is_loading() {
    Style::default().fg(Color::DarkGray)
  } else {
    key
  };

  let mut spans = vec![
    Span::raw(" "),
    Span::styled("<n>", next_style),
    Span::styled(" another joke", desc),
    Span::raw("   "),
    Span::styled("<s>", key),
    Span::styled(" save jokes", desc),
    Span::raw("   "),
    Span::styled("<o>", key),
    Span::styled(" online/offline", desc),
    Span::raw("   "),
    Span::styled("<q>", key),
    Span::styled(" quit", desc),
  ];

  if let Some(status) = save_status(screen) {
    spans.push(Span::raw("   "));
    spans.push(Span::styled(status, Style::default().fg(Color::Green)));
  }

  let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
  frame.render_widget(paragraph, area);
}

fn save_status(screen: &Screen) -> Option<String> {
  screen.last_save().map(|save| {
    let noun = if save.count == 1 { "joke" } else { "jokes" };
    format!("saved {} {} at {}", save.count, noun, save.at.format("%H:%M:%S"))
  })
}
