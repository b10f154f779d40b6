//! Controller for interactions with the playlist list.

use std::cell::RefCell;
use std::rc::Rc;

use crate::library::MusicLibrary;
use crate::playlist::{PlaylistList, SharedPlaylist};

/// Precondition-guarding facade over one [`PlaylistList`].
pub struct PlaylistsController {
    playlists: Rc<RefCell<PlaylistList>>,
    library: Rc<RefCell<MusicLibrary>>,
}

impl PlaylistsController {
    pub fn new(
        playlists: Rc<RefCell<PlaylistList>>,
        library: Rc<RefCell<MusicLibrary>>,
    ) -> Self {
        Self { playlists, library }
    }

    /// Creates a manual playlist named `name`; it becomes the selected one.
    pub fn create_playlist(&self, name: &str) -> SharedPlaylist {
        self.playlists.borrow_mut().create_manual(name)
    }

    /// Selects the playlist at `index` when the index is in range.
    pub fn select_playlist(&self, index: usize) {
        let mut playlists = self.playlists.borrow_mut();
        if index < playlists.len() {
            playlists.select(index);
        }
    }

    pub fn some_playlist_selected(&self) -> bool {
        self.playlists.borrow().some_selected()
    }

    pub fn selected_playlist(&self) -> Option<SharedPlaylist> {
        self.playlists.borrow().selected()
    }

    /// Unregisters and removes the selected playlist, if any.
    pub fn remove_playlist(&self) {
        self.playlists.borrow_mut().remove();
    }

    pub fn number_of_playlists(&self) -> usize {
        self.playlists.borrow().len()
    }

    /// Number of songs in the selected playlist; zero when none is selected.
    pub fn number_of_songs(&self) -> usize {
        self.selected_playlist()
            .map_or(0, |playlist| playlist.borrow().len())
    }

    /// Adds the library's selected song to the selected playlist. Returns
    /// false when either selection is missing, the playlist is smart, or the
    /// song is already a member.
    pub fn add_song(&self) -> bool {
        let Some(song) = self.library.borrow().selected_song() else {
            return false;
        };
        let Some(playlist) = self.selected_playlist() else {
            return false;
        };
        let added = playlist.borrow_mut().add(song);
        added
    }

    /// Selects the song at `index` in the selected playlist when in range.
    pub fn select_song(&self, index: usize) {
        let Some(playlist) = self.selected_playlist() else {
            return;
        };
        let mut playlist = playlist.borrow_mut();
        if index < playlist.len() {
            playlist.select(index);
        }
    }

    /// True when a playlist is selected and it has a selected song.
    pub fn some_song_selected(&self) -> bool {
        self.selected_playlist()
            .is_some_and(|playlist| playlist.borrow().some_selected())
    }

    /// Removes the selected song from the selected playlist.
    pub fn remove_selected_song(&self) {
        if let Some(playlist) = self.selected_playlist() {
            playlist.borrow_mut().remove();
        }
    }

    /// Moves the selection of the selected playlist one song forward.
    pub fn next_song(&self) {
        if let Some(playlist) = self.selected_playlist() {
            playlist.borrow_mut().next();
        }
    }

    /// Moves the selection of the selected playlist one song back.
    pub fn previous_song(&self) {
        if let Some(playlist) = self.selected_playlist() {
            playlist.borrow_mut().previous();
        }
    }

    /// Plays the selected playlist from its selected song, if both exist.
    pub fn play(&self) {
        if self.some_song_selected() {
            self.playlists.borrow_mut().play();
        }
    }

    /// Stops whichever playlist is currently playing.
    pub fn stop(&self) {
        self.playlists.borrow_mut().stop();
    }
}
