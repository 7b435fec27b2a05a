use tracing::{debug, info};

use crate::ports::{SourceCatalog, TrackDescriptor};

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("no song was found in the playlist")]
    EmptyPlaylist,
    #[error(transparent)]
    Source(#[from] anyhow::Error),
}

/// Reads every track of a source playlist, following `next` links until the
/// source stops returning one. Order is preserved and nothing is deduplicated.
pub async fn fetch_all<S: SourceCatalog + ?Sized>(
    source: &S,
    playlist_id: &str,
) -> Result<Vec<TrackDescriptor>, ReadError> {
    let mut page = source.first_page(playlist_id).await?;
    let mut tracks = page.tracks;
    let mut pages = 1usize;

    while let Some(next_url) = page.next {
        page = source.next_page(&next_url).await?;
        tracks.append(&mut page.tracks);
        pages += 1;
    }

    debug!(pages, "finished reading source playlist");
    if tracks.is_empty() {
        return Err(ReadError::EmptyPlaylist);
    }
    info!(tracks = tracks.len(), "indexed source playlist");
    Ok(tracks)
}
