pub mod library_playlist;
pub mod search;
