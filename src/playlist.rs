use tracing::{error, info};

use crate::ports::{CreationError, DestinationCatalog};

/// Creates the destination playlist with its full membership in one request.
/// The destination either creates all of it or nothing, so there is no cleanup
/// path on failure.
pub async fn create_playlist<D: DestinationCatalog + ?Sized>(
    destination: &D,
    name: &str,
    resolved_ids: &[String],
) -> Result<(), CreationError> {
    if resolved_ids.is_empty() {
        return Err(CreationError::NoTracks);
    }

    match destination.create_playlist(name, resolved_ids).await {
        Ok(()) => {
            info!(name, tracks = resolved_ids.len(), "created destination playlist");
            Ok(())
        }
        Err(err) => {
            error!(name, error = %err, "failed to create destination playlist");
            Err(err)
        }
    }
}
