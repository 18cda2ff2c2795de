#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use anyhow::Context;
use golden_grid::grid::overlay::{self, OverlayWindow};
use golden_grid::grid::resources::FileResources;
use golden_grid::grid::settings_store::{Preferences, PreferencesFile};
use golden_grid::grid::GridFrame;
use golden_grid::gui::EframeDialogs;
use golden_grid::logging;

fn main() -> anyhow::Result<()> {
    let store = PreferencesFile::open_default()?;
    // Logging depends on the loaded preferences, so a load error is reported afterwards.
    let (doc, load_error) = match store.load() {
        Ok(doc) => (doc, None),
        Err(err) => (Default::default(), Some(err)),
    };

    logging::init(doc.log.debug, logging::default_log_path());
    if let Some(err) = load_error {
        tracing::warn!(error = ?err, path = %store.path().display(), "using default preferences");
        // Saving on quit overwrites the file; keep the unreadable original.
        match store.back_up() {
            Ok(Some(backup)) => {
                tracing::warn!(backup = %backup.display(), "kept a copy of the unreadable preferences")
            }
            Ok(None) => {}
            Err(err) => tracing::error!(error = ?err, "failed to back up preferences"),
        }
    }
    tracing::info!(path = %store.path().display(), "golden grid starting");

    let resources = FileResources::discover();
    let mut frame = GridFrame::new(doc, Box::new(store), Box::new(EframeDialogs), &resources);
    let mut window = OverlayWindow::create(frame.initial_client_size())
        .inspect_err(|err| tracing::error!(error = %err, "cannot create the grid window"))
        .context("create grid window")?;
    overlay::run(&mut frame, &mut window)?;

    tracing::info!(reason = ?frame.exit_reason(), "golden grid exited");
    Ok(())
}
