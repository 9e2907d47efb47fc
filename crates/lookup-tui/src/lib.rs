//! lookup TUI — ratatui application shell.
//!
//! [`run`] starts the dataset loads on a background tokio runtime and drives
//! the terminal UI on the calling thread. Loads arrive over a channel and are
//! installed into the session between frames.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use lookup_core::{config::Config, Session};
use tokio::sync::mpsc;

/// Start the TUI with the given configuration.
pub fn run(config: Config) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.ui.theme, "unknown theme, using default");
        theme::Theme::load_default()
    });

    let runtime = tokio::runtime::Runtime::new()?;
    let (tx, rx) = mpsc::unbounded_channel();
    {
        let _guard = runtime.enter();
        lookup_sources::spawn_all(&config.datasets, tx);
    }

    let session = Session::new(config.ui.parity());
    let result = App::new(config, theme, session, rx).run();

    // In-flight fetches are abandoned on exit.
    runtime.shutdown_background();
    result
}
