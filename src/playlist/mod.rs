//! Playlist domain: a shared ordered-membership-with-selection component and
//! the event handlers that keep playlists synchronized with the library.
//!
//! Manual and smart playlists are the same component with different
//! membership kinds. Smart kinds reject user mutation outright; their
//! membership only changes through the crate-private automatic primitives
//! driven by [`LibraryEvent`] processing in [`smart`].

pub mod playlist_list;
pub mod smart;

pub use playlist_list::{PlaylistList, SharedPlaylist};

use std::rc::Rc;

use log::debug;
use uuid::Uuid;

use crate::bus::Listener;
use crate::library::LibraryView;
use crate::player::SharedPlayer;
use crate::protocol::{LibraryEvent, PlaybackState};
use crate::selection::SelectionList;
use crate::song::Song;

/// Membership strategy of a playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistKind {
    /// Membership and order are entirely user-driven.
    Manual,
    /// Top-rated songs, derived from rating events.
    MostLiked,
    /// Sliding window over the most recently added songs.
    MostRecentlyAdded,
}

impl PlaylistKind {
    /// Smart playlists reject user-facing membership mutation.
    pub fn is_smart(self) -> bool {
        !matches!(self, PlaylistKind::Manual)
    }
}

/// An ordered, duplicate-free list of songs with selection and playback
/// state, kept in sync with the library through event processing.
pub struct Playlist {
    id: String,
    name: String,
    kind: PlaylistKind,
    tracks: SelectionList<Rc<Song>>,
    library: LibraryView,
    player: SharedPlayer,
    playing_song: Option<Rc<Song>>,
}

impl Playlist {
    fn new(name: &str, kind: PlaylistKind, library: LibraryView, player: SharedPlayer) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            kind,
            tracks: SelectionList::new(),
            library,
            player,
            playing_song: None,
        }
    }

    /// A user-managed playlist named `name`.
    pub fn manual(name: &str, library: LibraryView, player: SharedPlayer) -> Self {
        Self::new(name, PlaylistKind::Manual, library, player)
    }

    /// The built-in top-rated smart playlist.
    pub fn most_liked(library: LibraryView, player: SharedPlayer) -> Self {
        Self::new("Most Liked", PlaylistKind::MostLiked, library, player)
    }

    /// The built-in recently-added smart playlist.
    pub fn most_recently_added(library: LibraryView, player: SharedPlayer) -> Self {
        Self::new(
            "Most Recently Added",
            PlaylistKind::MostRecentlyAdded,
            library,
            player,
        )
    }

    /// Stable identifier assigned at construction.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PlaylistKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Rc<Song> {
        Rc::clone(self.tracks.get(index))
    }

    /// Snapshot of the members in playlist order.
    pub fn songs(&self) -> Vec<Rc<Song>> {
        self.tracks.iter().cloned().collect()
    }

    pub fn some_selected(&self) -> bool {
        self.tracks.some_selected()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.tracks.selected_index()
    }

    pub fn selected_song(&self) -> Option<Rc<Song>> {
        self.tracks.selected().cloned()
    }

    /// Selects the song at `index`; callers bounds-check first.
    pub fn select(&mut self, index: usize) {
        self.tracks.select(index);
    }

    pub fn next(&mut self) {
        self.tracks.next();
    }

    pub fn previous(&mut self) {
        self.tracks.previous();
    }

    /// True when a song with the same identity key is already a member.
    pub fn contains(&self, song: &Song) -> bool {
        self.tracks.iter().any(|member| member.is_same_track(song))
    }

    /// Appends `song` and selects it. Returns false for smart playlists and
    /// for songs already present (identity comparison by filename).
    pub fn add(&mut self, song: Rc<Song>) -> bool {
        if self.kind.is_smart() {
            return false;
        }
        self.add_track(song)
    }

    /// Removes the selected song. Returns false for smart playlists and when
    /// nothing is selected.
    pub fn remove(&mut self) -> bool {
        if self.kind.is_smart() {
            return false;
        }
        self.tracks.remove().is_some()
    }

    /// Moves the selected song to `index` and selects that position. Returns
    /// false for smart playlists and when nothing is selected.
    pub fn move_up_selected(&mut self, index: usize) -> bool {
        if self.kind.is_smart() {
            return false;
        }
        let Some(song) = self.tracks.remove() else {
            return false;
        };
        self.tracks.insert(index, song);
        self.tracks.select(index);
        true
    }

    /// Stops whatever is playing, then loads and plays the selected song
    /// through the shared player, recording it as playing through this
    /// playlist.
    pub fn play(&mut self) {
        let Some(song) = self.selected_song() else {
            return;
        };
        {
            let mut player = self.player.borrow_mut();
            player.stop();
            player.load(song.filename());
            player.play();
        }
        debug!("Playlist: {} playing {}", self.name, song.filename().display());
        self.playing_song = Some(song);
    }

    /// True iff the current playback was started through this playlist.
    pub fn is_playing(&self) -> bool {
        self.playing_song.is_some()
    }

    /// Stops playback started through this playlist.
    pub fn stop(&mut self) {
        self.player.borrow_mut().stop();
    }

    pub(crate) fn library(&self) -> &LibraryView {
        &self.library
    }

    /// Membership append used by event processing; bypasses the smart-kind
    /// rejection but keeps the duplicate check.
    pub(crate) fn add_automatic(&mut self, song: Rc<Song>) -> bool {
        self.add_track(song)
    }

    /// Positional membership removal used by event processing.
    pub(crate) fn remove_automatic(&mut self, index: usize) {
        self.remove_at_preserving_selection(index);
    }

    fn add_track(&mut self, song: Rc<Song>) -> bool {
        if self.contains(&song) {
            return false;
        }
        self.tracks.add(song);
        true
    }

    /// Removes the member at `index` while keeping, as far as possible, the
    /// same *other* song selected: removing the selected member clears the
    /// selection; removing an earlier member shifts the selected index down.
    fn remove_at_preserving_selection(&mut self, index: usize) {
        if self.tracks.selected_index() == Some(index) {
            self.tracks.remove();
            return;
        }
        let selected = self.tracks.selected_index();
        self.tracks.remove_at(index);
        if let Some(selected) = selected {
            if index < selected {
                self.tracks.select(selected - 1);
            }
        }
    }

    fn drop_removed_member(&mut self, song: &Song) {
        if let Some(index) = self.tracks.position_by(|member| member.is_same_track(song)) {
            self.remove_at_preserving_selection(index);
        }
    }

    /// After a track ended naturally: select it in the member list, advance
    /// to the next member, and keep playing if one exists; otherwise clear
    /// the playing reference.
    fn advance_after_natural_end(&mut self) {
        let Some(playing) = self.playing_song.clone() else {
            return;
        };
        if let Some(index) = self
            .tracks
            .position_by(|member| member.is_same_track(&playing))
        {
            self.tracks.select(index);
        }
        let selection_is_ended_track = self
            .tracks
            .selected()
            .is_some_and(|member| member.is_same_track(&playing));
        if selection_is_ended_track {
            self.tracks.next();
            if self.tracks.some_selected() {
                self.play();
                return;
            }
        }
        self.playing_song = None;
    }
}

impl Listener<LibraryEvent> for Playlist {
    fn on_event(&mut self, event: &LibraryEvent) {
        if let LibraryEvent::SongRemoved { song } = event {
            self.drop_removed_member(song);
        }
        match self.kind {
            PlaylistKind::Manual => {}
            PlaylistKind::MostLiked => smart::sync_most_liked(self, event),
            PlaylistKind::MostRecentlyAdded => smart::sync_most_recently_added(self, event),
        }
    }
}

impl Listener<PlaybackState> for Playlist {
    fn on_event(&mut self, state: &PlaybackState) {
        if !self.is_playing() {
            return;
        }
        match state {
            PlaybackState::Stopped => {
                self.playing_song = None;
            }
            PlaybackState::Ended => {
                if let Some(song) = &self.playing_song {
                    song.inc_times_played();
                }
                self.advance_after_natural_end();
            }
            PlaybackState::Playing | PlaybackState::Paused => {}
        }
    }
}
