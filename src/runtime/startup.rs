use crate::app::App;
use crate::config;
use crate::session::Session;

/// Fetch the initial playlist before the terminal takes over.
///
/// A failed first refresh is not fatal: the app starts with an empty store
/// and the failure on the status line, and `R` retries.
pub fn initial_sync(session: &Session, app: &mut App, settings: &config::Settings) {
    session.refresh(app);

    if app.status.is_none() {
        app.set_status(format!(
            "connected to {} ({} songs)",
            settings.server.base_url,
            app.len()
        ));
    }
}
