use serde::Deserialize;

/// `GET /v1/playlists/{id}/tracks`, restricted with `fields=` to what is read below.
///
/// `track` is deliberately not optional: a removed or local item comes back as
/// `null` and fails the whole page instead of being dropped.
#[derive(Deserialize)]
pub struct Root {
    pub(in crate::spotify) items: Vec<PlaylistItem>,
    pub(in crate::spotify) next: Option<String>,
}

#[derive(Deserialize)]
pub struct PlaylistItem {
    pub(in crate::spotify) track: Track,
}

#[derive(Deserialize)]
pub struct Track {
    pub(in crate::spotify) name: String,
    pub(in crate::spotify) artists: Vec<Artist>,
    pub(in crate::spotify) album: Album,
}

#[derive(Deserialize)]
pub struct Artist {
    pub(in crate::spotify) name: String,
}

#[derive(Deserialize)]
pub struct Album {
    pub(in crate::spotify) name: String,
}
