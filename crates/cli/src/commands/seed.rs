//! Write the default staff list and empty rosters to the store.

use maruzzella_core::model::StateSnapshot;

use super::{CliError, open_store};

/// Seed the store.
///
/// Refuses to overwrite existing state unless `force` is set.
///
/// # Errors
///
/// Returns an error if state already exists without `force`, or the store
/// cannot be read or written.
pub async fn run(force: bool) -> Result<(), CliError> {
    let store = open_store().await?;

    if !force && store.load().await?.is_some() {
        return Err(CliError::Usage(
            "State already exists. Pass --force to overwrite it.".to_string(),
        ));
    }

    let state = StateSnapshot::seeded();
    store.save(&state).await?;
    tracing::info!(employees = state.employees.len(), "Seeded default staff");
    Ok(())
}
