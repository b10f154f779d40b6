//! Event types shared by the library, the playlists, and the player seam.
//!
//! These are the closed payloads delivered through [`crate::bus::Subject`];
//! every consumer handles them with a single match.

use std::rc::Rc;

use crate::song::{Rating, Song};

/// Library-domain change notification.
///
/// Emitted by the music library after the corresponding mutation completed,
/// so listeners always observe the library in its new state.
#[derive(Debug, Clone)]
pub enum LibraryEvent {
    /// A song was appended to the library.
    SongAdded { song: Rc<Song> },
    /// A song was removed from the library.
    SongRemoved { song: Rc<Song> },
    /// The selected song was rated. Emitted even when saturation left the
    /// rating unchanged; `old_rating`/`new_rating` are the true before/after
    /// values.
    SongRated {
        song: Rc<Song>,
        old_rating: Rating,
        new_rating: Rating,
    },
}

impl LibraryEvent {
    /// The song this event is about.
    pub fn song(&self) -> &Rc<Song> {
        match self {
            LibraryEvent::SongAdded { song }
            | LibraryEvent::SongRemoved { song }
            | LibraryEvent::SongRated { song, .. } => song,
        }
    }
}

/// Playback state reported by the external player backend.
///
/// The core reacts only to [`PlaybackState::Stopped`] and
/// [`PlaybackState::Ended`]; everything else is informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
    /// Playback was stopped before the end of the track.
    Stopped,
    /// The track played through to its natural end.
    Ended,
}
