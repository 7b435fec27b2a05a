use serde::Serialize;

/// Body of `POST /v1/me/library/playlists`. Membership goes in as a single
/// `tracks` relationship so the playlist is created in one request.
#[derive(Serialize)]
pub struct NewPlaylist<'a> {
    pub(in crate::apple_music) attributes: Attributes<'a>,
    pub(in crate::apple_music) relationships: Relationships<'a>,
}

#[derive(Serialize)]
pub struct Attributes<'a> {
    pub(in crate::apple_music) name: &'a str,
}

#[derive(Serialize)]
pub struct Relationships<'a> {
    pub(in crate::apple_music) tracks: Tracks<'a>,
}

#[derive(Serialize)]
pub struct Tracks<'a> {
    pub(in crate::apple_music) data: Vec<TrackReference<'a>>,
}

#[derive(Serialize)]
pub struct TrackReference<'a> {
    pub(in crate::apple_music) id: &'a str,
    #[serde(rename = "type")]
    pub(in crate::apple_music) kind: &'static str,
}

impl<'a> NewPlaylist<'a> {
    pub fn new(name: &'a str, song_ids: &'a [String]) -> Self {
        Self {
            attributes: Attributes { name },
            relationships: Relationships {
                tracks: Tracks {
                    data: song_ids
                        .iter()
                        .map(|id| TrackReference {
                            id: id.as_str(),
                            kind: "songs",
                        })
                        .collect(),
                },
            },
        }
    }
}
