mod apple_music;
mod config;
mod logging;
mod matching;
mod playlist;
mod ports;
mod reader;
mod report;
mod spotify;
#[cfg(test)]
mod test_utils;
mod transfer;

use std::{num::NonZeroUsize, path::PathBuf};

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing::{info, warn};

use crate::config::{AppleMusicConfig, Config, SpotifyConfig, TransferConfig};
use crate::transfer::{Transfer, TransferError};

#[derive(Parser)]
#[command(version, author, about, long_about = None)]
struct Cli {
    /// Tracing filter directive (e.g. `info` or `spotify_to_apple_music=debug`)
    #[arg(long, default_value = "warn", global = true, env = "LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copies a Spotify playlist into a new Apple Music library playlist
    Transfer {
        /// Spotify playlist URL, URI or ID
        #[arg(short = 'u', long = "spotify-playlist-url")]
        playlist: String,

        /// Name of the Apple Music playlist to create
        #[arg(short = 'n', long = "playlist-name")]
        name: String,

        /// Write the tracks that could not be found to `--output-path`
        #[arg(short = 'o', long)]
        output: bool,

        /// File the unfound tracks are written to
        #[arg(long, default_value = "output.txt")]
        output_path: PathBuf,

        /// Number of Apple Music searches to run at once
        #[arg(short = 'j', long, default_value = "1")]
        concurrency: NonZeroUsize,

        /// Spotify Web API bearer token with `playlist-read-private` scope
        #[arg(long, env = "SPOTIFY_ACCESS_TOKEN", hide_env_values = true)]
        spotify_token: String,

        /// Apple Music developer token JWT
        #[arg(short = 'D', long, env = "APPLE_MUSIC_DEVELOPER_TOKEN", hide_env_values = true)]
        developer_token: String,

        /// Apple Music User Token
        #[arg(short = 'U', long, env = "APPLE_MUSIC_USER_TOKEN", hide_env_values = true)]
        user_token: String,

        /// Apple Music catalog storefront (e.g. `us`)
        #[arg(short = 'S', long, default_value = "us", env = "APPLE_MUSIC_STOREFRONT")]
        storefront: String,

        /// Origin header value
        #[arg(short = 'O', long = "origin")]
        origin_header: Option<String>,

        #[arg(long, default_value = config::SPOTIFY_API_BASE, hide = true)]
        spotify_api_base: String,

        #[arg(long, default_value = config::APPLE_MUSIC_API_BASE, hide = true)]
        apple_music_api_base: String,
    },

    /// Generate shell completions
    Completions {
        /// The shell to generate the completions for
        #[arg(value_enum)]
        shell: clap_complete_command::Shell,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Transfer {
            playlist,
            name,
            output,
            output_path,
            concurrency,
            spotify_token,
            developer_token,
            user_token,
            storefront,
            origin_header,
            spotify_api_base,
            apple_music_api_base,
        } => {
            logging::init_tracing(&cli.log_level)?;

            let playlist_id = spotify::parse_playlist_id(&playlist)?;
            let config = Config {
                spotify: SpotifyConfig {
                    access_token: spotify_token,
                    api_base: spotify_api_base,
                },
                apple_music: AppleMusicConfig {
                    developer_token,
                    user_token,
                    storefront,
                    origin_header,
                    api_base: apple_music_api_base,
                },
                transfer: TransferConfig { concurrency },
                output_path: output.then_some(output_path),
            };
            config.validate()?;

            let source = spotify::Client::new(&config.spotify)?;
            let destination = apple_music::Client::new(&config.apple_music)?;

            println!("{}", report::stage("Indexing songs from Spotify playlist..."));
            let mut transfer = Transfer::new(&source, &destination, config.transfer.clone());
            let result = transfer.run(&playlist_id, &name).await;
            info!(state = ?transfer.state(), "transfer finished");
            for line in report::render(&name, &result) {
                println!("{line}");
            }

            if let Some(path) = &config.output_path {
                match report::persist_unresolved(path, &result) {
                    Ok(true) => {
                        println!("{}", report::stage("Creating output file"));
                        println!(
                            "{}",
                            report::detail(&format!(
                                "Tracks not found written to {}",
                                path.display(),
                            )),
                        );
                    }
                    Ok(false) => {}
                    Err(err) => warn!(error = %err, "could not write unresolved tracks"),
                }
            }

            // Once matching has run the transfer counts as attempted, whatever the outcome
            if let Err(err @ TransferError::Read(_)) = result {
                return Err(err.into());
            }
        }
        Commands::Completions { shell } => {
            shell.generate(&mut Cli::command(), &mut std::io::stdout());
        }
    }
    Ok(())
}
