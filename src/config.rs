use std::{num::NonZeroUsize, path::PathBuf};

use anyhow::{Result, ensure};

use crate::apple_music;

pub const SPOTIFY_API_BASE: &str = "https://api.spotify.com";
pub const APPLE_MUSIC_API_BASE: &str = "https://api.music.apple.com";

/// Everything the transfer needs, built once at startup and handed to each
/// component. Nothing below `main` reads the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub spotify: SpotifyConfig,
    pub apple_music: AppleMusicConfig,
    pub transfer: TransferConfig,
    /// Where unresolved tracks are written, if requested
    pub output_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub access_token: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct AppleMusicConfig {
    /// JWT
    pub developer_token: String,
    pub user_token: String,
    /// e.g. `us`
    pub storefront: String,
    pub origin_header: Option<String>,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// Maximum number of catalog searches in flight. 1 keeps matching strictly sequential.
    pub concurrency: NonZeroUsize,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            concurrency: NonZeroUsize::MIN,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.spotify.access_token.is_empty(),
            "missing Spotify access token",
        );
        ensure!(
            apple_music::validate_developer_token(&self.apple_music.developer_token),
            "invalid developer token",
        );
        ensure!(
            !self.apple_music.user_token.is_empty(),
            "missing Apple Music user token",
        );
        ensure!(
            apple_music::validate_storefront(&self.apple_music.storefront),
            "invalid storefront",
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            spotify: SpotifyConfig {
                access_token: "spotify-token".to_owned(),
                api_base: SPOTIFY_API_BASE.to_owned(),
            },
            apple_music: AppleMusicConfig {
                developer_token: "aaa.bbb.ccc".to_owned(),
                user_token: "user-token".to_owned(),
                storefront: "us".to_owned(),
                origin_header: None,
                api_base: APPLE_MUSIC_API_BASE.to_owned(),
            },
            transfer: TransferConfig::default(),
            output_path: None,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_storefront() {
        let mut config = config();
        config.apple_music.storefront = "USA".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_missing_spotify_token() {
        let mut config = config();
        config.spotify.access_token.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_transfer_is_sequential() {
        assert_eq!(TransferConfig::default().concurrency.get(), 1);
    }
}
