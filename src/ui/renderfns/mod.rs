pub mod footer;
pub mod header;
pub mod joke_panel;

pub use footer::draw_footer;
pub use header::draw_header;
pub use joke_panel::draw_joke_panel;
