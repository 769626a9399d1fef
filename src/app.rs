use crate::config::Config;
use crate::connectivity::{ConnectivityMonitor, Watch};
use crate::event::{Event, EventHandler};
use crate::joke::client::JokeClient;
use crate::joke::types::Joke;
use crate::query::Query;
use crate::screen::{Resolution, Screen, FETCH_FAILED};
use crate::selector::{self, Source, VIEWED_WINDOW};
use crate::store::JokeStore;
use crate::ui;
use chrono::Local;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Main application state
pub struct App {
  screen: Screen,

  /// Mirror of the online toggle, read when a request starts
  online: Arc<AtomicBool>,

  /// The "Get Another Joke" request
  fetch: Query<Resolution>,

  client: JokeClient,
  connectivity: ConnectivityMonitor,
  store: JokeStore,
  config: Config,

  /// Event sender for async tasks
  event_tx: mpsc::UnboundedSender<Event>,

  /// Whether to quit
  should_quit: bool,
}

impl App {
  pub async fn new(config: Config) -> Result<Self> {
    let client = JokeClient::new(&config)?;
    let connectivity = ConnectivityMonitor::new(config.probe_addr()?, config.probe_timeout());
    let store = JokeStore::open(&config.database_path()?)?;
    let (tx, _rx) = mpsc::unbounded_channel();

    let online = Arc::new(AtomicBool::new(config.start_online));
    let fetch = Self::joke_query(client.clone(), connectivity.clone(), online.clone());

    Ok(Self {
      screen: Screen::new(config.start_online),
      online,
      fetch,
      client,
      connectivity,
      store,
      config,
      event_tx: tx,
      should_quit: false,
    })
  }

  /// Build the request behind "Get Another Joke".
  ///
  /// Connectivity is probed per request; the toggle is read when the request
  /// starts so a toggle while loading applies to the next one.
  fn joke_query(
    client: JokeClient,
    connectivity: ConnectivityMonitor,
    online: Arc<AtomicBool>,
  ) -> Query<Resolution> {
    Query::new(move || {
      let client = client.clone();
      let connectivity = connectivity.clone();
      let online = online.load(Ordering::SeqCst);
      async move {
        let connected = connectivity.is_connected().await;
        match selector::decide(online, connected) {
          Source::Network => match client.random_joke().await {
            Ok(joke) => Ok(Resolution::Fetched(joke)),
            Err(e) => {
              tracing::error!(error = %e, "Error fetching joke");
              Err(FETCH_FAILED.to_string())
            }
          },
          Source::Rotation => Ok(Resolution::UseRotation),
        }
      }
    })
  }

  pub async fn run(mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Create event handler
    let mut events = EventHandler::new(Duration::from_millis(100));
    self.event_tx = events.sender();

    self.load_initial_data();
    let watch = self.watch_connectivity();

    // Main loop
    let result = self.event_loop(&mut terminal, &mut events).await;

    // Cleanup
    watch.unsubscribe();
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    self.store.close()?;

    result
  }

  async fn event_loop(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    events: &mut EventHandler,
  ) -> Result<()> {
    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      match events.next().await {
        Some(event) => self.handle_event(event),
        None => break,
      }
    }
    Ok(())
  }

  /// Load the stored rotation and seed the store if it is short.
  fn load_initial_data(&mut self) {
    self.reload_rotation();

    if self.config.seed_on_start && self.screen.rotation_len() < VIEWED_WINDOW {
      let client = self.client.clone();
      let tx = self.event_tx.clone();

      tokio::spawn(async move {
        let result = client
          .random_jokes(VIEWED_WINDOW)
          .await
          .map_err(|e| e.to_string());
        let _ = tx.send(Event::Seeded(result));
      });
    }
  }

  fn watch_connectivity(&self) -> Watch {
    let tx = self.event_tx.clone();
    self
      .connectivity
      .subscribe(self.config.probe_interval(), move |connected| {
        let _ = tx.send(Event::Connectivity(connected));
      })
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Tick => self.poll_requests(),
      Event::Connectivity(connected) => self.handle_connectivity(connected),
      Event::Seeded(result) => self.handle_seeded(result),
    }
  }

  fn handle_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        self.should_quit = true;
      }
      KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
      KeyCode::Char('n') | KeyCode::Char(' ') | KeyCode::Enter => self.request_joke(),
      KeyCode::Char('s') => self.save_jokes(),
      KeyCode::Char('o') | KeyCode::Tab => self.toggle_online(),
      _ => {}
    }
  }

  /// Get Another Joke; ignored while a request is loading
  fn request_joke(&mut self) {
    if self.fetch.fetch() {
      self.screen.begin_fetch();
    }
  }

  fn poll_requests(&mut self) {
    if let Some(result) = self.fetch.poll() {
      self.screen.resolve(result);
    }
  }

  fn toggle_online(&mut self) {
    self.screen.toggle_online();
    self.online.store(self.screen.is_online(), Ordering::SeqCst);
    tracing::info!(online = self.screen.is_online(), "mode toggled");
  }

  /// Replace the store with the viewed window, then reload the rotation
  fn save_jokes(&mut self) {
    let viewed = self.screen.viewed();
    match self.store.replace_all(&viewed) {
      Ok(()) => {
        self.screen.mark_saved(viewed.len(), Local::now());
        self.reload_rotation();
      }
      Err(e) => tracing::error!(error = %e, "Error saving jokes"),
    }
  }

  fn reload_rotation(&mut self) {
    match self.store.load_all() {
      Ok(jokes) => {
        tracing::debug!(count = jokes.len(), "loaded stored jokes");
        self.screen.set_rotation(jokes);
      }
      Err(e) => tracing::error!(error = %e, "Error loading stored jokes"),
    }
  }

  fn handle_connectivity(&mut self, connected: bool) {
    self.screen.set_connected(connected);
    if !connected {
      self.reload_rotation();
    }
  }

  fn handle_seeded(&mut self, result: Result<Vec<Joke>, String>) {
    match result {
      Ok(jokes) => {
        for joke in &jokes {
          if let Err(e) = self.store.upsert(joke) {
            tracing::error!(error = %e, "Error storing seeded joke");
          }
        }
        tracing::info!(count = jokes.len(), "seeded joke store");
        self.reload_rotation();
      }
      Err(e) => tracing::error!(error = %e, "Initial joke fetch failed"),
    }
  }

  // Accessors for UI rendering
  pub fn screen(&self) -> &Screen {
    &self.screen
  }

  pub fn api_host(&self) -> &str {
    self.client.endpoint().host_str().unwrap_or("")
  }
}
