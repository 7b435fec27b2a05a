use anyhow::{Context, Result};
use tracing::debug;

use crate::config::SpotifyConfig;
use crate::ports::{SourceCatalog, SourcePage};
use crate::spotify::api_types;

/// Spotify caps playlist track pages at 100 items
const PAGE_LIMIT: &str = "100";
const PAGE_FIELDS: &str = "items(track(name,artists(name),album(name))),next";

pub struct Client {
    client: reqwest::Client,
    api_base: String,
}

impl Client {
    pub fn new(config: &SpotifyConfig) -> Result<Self> {
        let headers = {
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                "Authorization",
                format!("Bearer {}", config.access_token).try_into()?,
            );
            headers
        };
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_owned(),
        })
    }

    async fn get_page(&self, request: reqwest::RequestBuilder) -> Result<SourcePage> {
        let page: api_types::playlist_tracks::Root = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("unexpected playlist page from Spotify")?;
        page.try_into()
    }
}

#[async_trait::async_trait]
impl SourceCatalog for Client {
    async fn first_page(&self, playlist_id: &str) -> Result<SourcePage> {
        debug!(playlist_id, "fetching first playlist page");
        self.get_page(
            self.client
                .get(format!("{}/v1/playlists/{playlist_id}/tracks", self.api_base))
                .query(&[("limit", PAGE_LIMIT), ("fields", PAGE_FIELDS)]),
        )
        .await
        .with_context(|| format!("failed to read Spotify playlist {playlist_id}"))
    }

    async fn next_page(&self, next_url: &str) -> Result<SourcePage> {
        debug!(next_url, "fetching next playlist page");
        // `next` already carries the original query string
        self.get_page(self.client.get(next_url))
            .await
            .with_context(|| format!("failed to read Spotify playlist page {next_url}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader;
    use crate::test_utils::StubServer;

    fn client(api_base: &str) -> Client {
        Client::new(&SpotifyConfig {
            access_token: "spotify-token".to_owned(),
            api_base: api_base.to_owned(),
        })
        .unwrap()
    }

    fn page(name: &str, next: Option<String>) -> String {
        serde_json::json!({
            "items": [{"track": {
                "name": name,
                "artists": [{"name": "Artist"}],
                "album": {"name": "Album"},
            }}],
            "next": next,
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_fetch_all_follows_absolute_next_url() {
        let server = StubServer::bind();
        let client = client(&server.base_url);
        let next = format!("{}/v1/playlists/abc/tracks?offset=1&limit=1", server.base_url);
        let handle = server.serve(vec![
            (200, page("Song 1", Some(next))),
            (200, page("Song 2", None)),
        ]);

        let tracks = reader::fetch_all(&client, "abc").await.unwrap();
        let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Song 1", "Song 2"]);

        let requests = handle.join().unwrap();
        assert!(
            requests[0]
                .request_line
                .starts_with("GET /v1/playlists/abc/tracks?")
        );
        assert!(requests[0].request_line.contains("limit=100"));
        assert!(requests[0].request_line.contains("fields="));
        assert_eq!(
            requests[1].request_line,
            "GET /v1/playlists/abc/tracks?offset=1&limit=1 HTTP/1.1",
        );
        for request in &requests {
            assert_eq!(request.header("authorization"), Some("Bearer spotify-token"));
        }
    }

    #[tokio::test]
    async fn test_first_page_error_status() {
        let server = StubServer::bind();
        let client = client(&server.base_url);
        let handle = server.serve(vec![(404, r#"{"error": {"status": 404}}"#.to_owned())]);

        assert!(client.first_page("abc").await.is_err());
        handle.join().unwrap();
    }
}
