pub mod playlist_tracks;
