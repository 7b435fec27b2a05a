use anyhow::Result;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::apple_music::api_types;
use crate::config::AppleMusicConfig;
use crate::ports::{CreationError, DestinationCatalog};

pub struct Client {
    client: reqwest::Client,
    user_token: String,
    storefront: String,
    api_base: String,
}

impl Client {
    pub fn new(config: &AppleMusicConfig) -> Result<Self> {
        let headers = {
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                "Authorization",
                format!("Bearer {}", config.developer_token).try_into()?,
            );
            if let Some(origin) = &config.origin_header {
                headers.insert("Origin", origin.as_str().try_into()?);
            }
            headers
        };
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            user_token: config.user_token.clone(),
            storefront: config.storefront.clone(),
            api_base: config.api_base.trim_end_matches('/').to_owned(),
        })
    }
}

#[async_trait::async_trait]
impl DestinationCatalog for Client {
    async fn search_song(&self, term: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(format!(
                "{}/v1/catalog/{}/search",
                self.api_base, self.storefront,
            ))
            .header("Music-User-Token", &self.user_token)
            .query(&[("term", term), ("limit", "1"), ("types", "songs")])
            .send()
            .await?;

        // Rejections (rate limiting included) count as "not found"
        let status = response.status();
        if !status.is_success() {
            warn!(%status, term, "catalog search rejected");
            return Ok(None);
        }

        let root: api_types::search::Root = response.json().await?;
        let id = root.first_song_id();
        debug!(term, ?id, "catalog search");
        Ok(id)
    }

    async fn create_playlist(&self, name: &str, song_ids: &[String]) -> Result<(), CreationError> {
        let response = self
            .client
            .post(format!("{}/v1/me/library/playlists", self.api_base))
            .header("Music-User-Token", &self.user_token)
            .json(&api_types::library_playlist::NewPlaylist::new(name, song_ids))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    debug!(%status, error = %err, "failed to read playlist creation response body");
                    String::new()
                }
            };
            return Err(CreationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
