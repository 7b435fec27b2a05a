mod api_types;
mod client;

use anyhow::{Context, Result, ensure};

use crate::ports::{SourcePage, TrackDescriptor};

pub use client::Client;

/// Spotify IDs are 22 base62 characters
pub fn validate_playlist_id(id: &str) -> bool {
    id.len() == 22 && id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Accepts a bare playlist ID, a `spotify:playlist:` URI or an
/// `open.spotify.com` link (with or without locale segment and query string).
pub fn parse_playlist_id(reference: &str) -> Result<String> {
    let reference = reference.trim();
    let id = if let Some(id) = reference.strip_prefix("spotify:playlist:") {
        id
    } else if let Some(path) = reference
        .strip_prefix("https://open.spotify.com/")
        .or_else(|| reference.strip_prefix("http://open.spotify.com/"))
    {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut segments = path.split('/');
        segments
            .by_ref()
            .find(|segment| *segment == "playlist")
            .with_context(|| format!("not a Spotify playlist link: {reference}"))?;
        segments.next().unwrap_or_default()
    } else {
        reference
    };
    ensure!(
        validate_playlist_id(id),
        "invalid Spotify playlist reference: {reference}",
    );
    Ok(id.to_owned())
}

impl TryFrom<api_types::playlist_tracks::Root> for SourcePage {
    type Error = anyhow::Error;

    fn try_from(value: api_types::playlist_tracks::Root) -> Result<Self, Self::Error> {
        let tracks = value
            .items
            .into_iter()
            .map(|item| -> Result<TrackDescriptor> {
                let track = item.track;
                let artist = track
                    .artists
                    .into_iter()
                    .next()
                    .with_context(|| format!("track \"{}\" has no artists", track.name))?;
                Ok(TrackDescriptor {
                    name: track.name,
                    artist: artist.name,
                    album: track.album.name,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SourcePage {
            tracks,
            next: value.next,
        })
    }
}
