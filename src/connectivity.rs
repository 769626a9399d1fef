//! Device connectivity: a one-shot probe and a transition watcher.

use std::time::Duration;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

/// Probes connectivity by opening a TCP connection to a known address
#[derive(Debug, Clone)]
pub struct ConnectivityMonitor {
  probe_addr: String,
  timeout: Duration,
}

impl ConnectivityMonitor {
  pub fn new(probe_addr: impl Into<String>, timeout: Duration) -> Self {
    Self {
      probe_addr: probe_addr.into(),
      timeout,
    }
  }

  /// Whether the probe address is reachable right now
  pub async fn is_connected(&self) -> bool {
    match tokio::time::timeout(self.timeout, TcpStream::connect(&self.probe_addr)).await {
      Ok(Ok(_)) => true,
      Ok(Err(e)) => {
        tracing::debug!(addr = %self.probe_addr, error = %e, "connectivity probe failed");
        false
      }
      Err(_) => {
        tracing::debug!(addr = %self.probe_addr, "connectivity probe timed out");
        false
      }
    }
  }

  /// Probe every `interval` and call `on_change` with the first observation
  /// and then on every transition. The watch stops when the returned handle
  /// is dropped.
  pub fn subscribe<F>(&self, interval: Duration, on_change: F) -> Watch
  where
    F: Fn(bool) + Send + 'static,
  {
    let monitor = self.clone();
    let handle = tokio::spawn(async move {
      let mut ticker = tokio::time::interval(interval);
      ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
      let mut last: Option<bool> = None;

      loop {
        ticker.tick().await;
        let connected = monitor.is_connected().await;
        if last != Some(connected) {
          tracing::info!(connected, "connectivity changed");
          last = Some(connected);
          on_change(connected);
        }
      }
    });

    Watch { handle }
  }
}

/// Subscription handle for connectivity transitions
pub struct Watch {
  handle: JoinHandle<()>,
}

impl Watch {
  pub fn unsubscribe(self) {
    self.handle.abort();
  }
}

impl Drop for Watch {
  fn drop(&mut self) {
    self.handle.abort();
  }
}
