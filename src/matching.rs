use std::num::NonZeroUsize;

use futures::{StreamExt, stream};
use tracing::{debug, warn};

use crate::ports::{DestinationCatalog, TrackDescriptor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Matched {
        id: String,
    },
    Unmatched {
        descriptor: TrackDescriptor,
        /// 1-based position in the source playlist
        ordinal: usize,
    },
}

pub fn search_term(descriptor: &TrackDescriptor) -> String {
    format!("{} {}", descriptor.name, descriptor.artist)
}

/// Resolves source tracks to destination catalog IDs by taking the top search
/// hit for "{name} {artist}". There is no secondary verification of the hit.
pub struct TrackMatcher<'a, D: ?Sized> {
    destination: &'a D,
}

impl<'a, D: DestinationCatalog + ?Sized> TrackMatcher<'a, D> {
    pub fn new(destination: &'a D) -> Self {
        Self { destination }
    }

    pub async fn resolve(&self, descriptor: &TrackDescriptor, ordinal: usize) -> MatchResult {
        let term = search_term(descriptor);
        // A failed request is indistinguishable from a miss
        let id = match self.destination.search_song(&term).await {
            Ok(id) => id,
            Err(err) => {
                debug!(ordinal, error = %err, "catalog search failed");
                None
            }
        };

        match id {
            Some(id) => MatchResult::Matched { id },
            None => {
                warn!(
                    ordinal,
                    name = %descriptor.name,
                    artist = %descriptor.artist,
                    album = %descriptor.album,
                    "track not found in destination catalog",
                );
                MatchResult::Unmatched {
                    descriptor: descriptor.clone(),
                    ordinal,
                }
            }
        }
    }

    /// Resolves every descriptor with at most `concurrency` searches in flight.
    /// Results come back in source order regardless of completion order.
    pub async fn resolve_all(
        &self,
        descriptors: &[TrackDescriptor],
        concurrency: NonZeroUsize,
    ) -> Vec<MatchResult> {
        stream::iter(descriptors.iter().enumerate())
            .map(|(i, descriptor)| self.resolve(descriptor, i + 1))
            .buffered(concurrency.get())
            .collect()
            .await
    }
}
