//! Event-synchronized music library and playlists.
//!
//! The library is the single source of truth for the song collection; every
//! playlist is a listener that keeps its derived membership in sync with
//! library mutations through synchronous event delivery. Playback is
//! delegated to an injected [`player::Player`] backend, which reports state
//! changes back through the same listener mechanism.

pub mod app_context;
pub mod bus;
pub mod config;
pub mod controller;
pub mod library;
pub mod media_file_discovery;
pub mod metadata;
pub mod player;
pub mod playlist;
pub mod protocol;
pub mod selection;
pub mod song;

#[cfg(test)]
pub(crate) mod testing;

pub use app_context::AppContext;
pub use config::Config;
pub use library::MusicLibrary;
pub use player::{Player, SharedPlayer};
pub use playlist::{Playlist, PlaylistKind, PlaylistList};
pub use protocol::{LibraryEvent, PlaybackState};
pub use selection::SelectionList;
pub use song::{Rating, Song, SongMetaInfo};

/// Installs the colog-backed logger. Call once from the embedding
/// application; repeated calls are ignored.
pub fn init_logging() {
    let mut builder = colog::default_builder();
    builder.filter(None, log::LevelFilter::Debug);
    let _ = builder.try_init();
}
