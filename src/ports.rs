use std::fmt;

use anyhow::Result;

/// A track as read from the source playlist. Only the fields used for matching
/// and for the unresolved-tracks report are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    pub name: String,
    /// First listed artist only
    pub artist: String,
    pub album: String,
}

impl fmt::Display for TrackDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.name, self.artist)
    }
}

/// One page of a source playlist, in the order the source API returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePage {
    pub tracks: Vec<TrackDescriptor>,
    /// Absolute URL of the following page, if any
    pub next: Option<String>,
}

/// Read side of the source catalog.
///
/// Implemented by `spotify::Client`.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SourceCatalog: Send + Sync {
    async fn first_page(&self, playlist_id: &str) -> Result<SourcePage>;

    async fn next_page(&self, next_url: &str) -> Result<SourcePage>;
}

#[derive(Debug, thiserror::Error)]
pub enum CreationError {
    #[error("refusing to create a playlist with no tracks")]
    NoTracks,
    #[error("{status}, {body}")]
    Rejected { status: u16, body: String },
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// Search and playlist-creation side of the destination catalog.
///
/// Implemented by `apple_music::Client`.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DestinationCatalog: Send + Sync {
    /// Returns the ID of the top song result for `term`, or `None` when the
    /// search was rejected or came back empty. `Err` is reserved for transport
    /// and decoding failures.
    async fn search_song(&self, term: &str) -> Result<Option<String>>;

    async fn create_playlist(&self, name: &str, song_ids: &[String]) -> Result<(), CreationError>;
}
