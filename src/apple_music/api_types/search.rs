use serde::Deserialize;

/// `GET /v1/catalog/{storefront}/search?types=songs`
///
/// Apple Music omits `results.songs` entirely when nothing matched.
#[derive(Deserialize)]
pub struct Root {
    #[serde(default)]
    pub(in crate::apple_music) results: Results,
}

#[derive(Deserialize, Default)]
pub struct Results {
    pub(in crate::apple_music) songs: Option<SongResults>,
}

#[derive(Deserialize)]
pub struct SongResults {
    pub(in crate::apple_music) data: Vec<Song>,
}

#[derive(Deserialize)]
pub struct Song {
    pub(in crate::apple_music) id: String,
}

impl Root {
    /// Only the top hit is ever considered
    pub fn first_song_id(self) -> Option<String> {
        self.results
            .songs?
            .data
            .into_iter()
            .next()
            .map(|song| song.id)
    }
}
