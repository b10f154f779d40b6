//! Ordered collection of playlists, wired into the notification plumbing.
//!
//! Adding a playlist registers it as a library listener and a player
//! listener; removing it unregisters both first. The two built-in smart
//! playlists are seeded at construction and are ordinary members afterwards.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::bus::{ListenerId, SharedListener, Subject};
use crate::library::{LibraryView, MusicLibrary};
use crate::player::SharedPlayer;
use crate::protocol::{LibraryEvent, PlaybackState};
use crate::selection::SelectionList;

use super::Playlist;

/// Shared playlist handle; the same instance sits in the playlist list and
/// in the two listener registries.
pub type SharedPlaylist = Rc<RefCell<Playlist>>;

struct Registration {
    library: ListenerId,
    player: ListenerId,
}

/// The set of playlists attached to one library and one player.
pub struct PlaylistList {
    playlists: SelectionList<SharedPlaylist>,
    library_events: Subject<LibraryEvent>,
    library_view: LibraryView,
    player: SharedPlayer,
    registrations: HashMap<String, Registration>,
}

impl PlaylistList {
    /// Seeds the two built-in smart playlists (Most Liked, then Most
    /// Recently Added, which is left selected).
    pub fn new(library: &MusicLibrary, player: SharedPlayer) -> Self {
        let mut list = Self {
            playlists: SelectionList::new(),
            library_events: library.events(),
            library_view: library.view(),
            player,
            registrations: HashMap::new(),
        };
        let view = list.library_view.clone();
        let player = Rc::clone(&list.player);
        list.add(Playlist::most_liked(view.clone(), Rc::clone(&player)));
        list.add(Playlist::most_recently_added(view, player));
        list
    }

    /// Appends `playlist`, selects it, and registers it with the library and
    /// the player.
    pub fn add(&mut self, playlist: Playlist) -> SharedPlaylist {
        let shared = Rc::new(RefCell::new(playlist));
        let library_id = self
            .library_events
            .register(Rc::clone(&shared) as SharedListener<LibraryEvent>);
        let player_id = self
            .player
            .borrow_mut()
            .register_listener(Rc::clone(&shared) as SharedListener<PlaybackState>);
        let (id, name) = {
            let playlist = shared.borrow();
            (playlist.id().to_string(), playlist.name().to_string())
        };
        debug!("PlaylistList: registered playlist {name} ({id})");
        self.registrations.insert(
            id,
            Registration {
                library: library_id,
                player: player_id,
            },
        );
        self.playlists.add(Rc::clone(&shared));
        shared
    }

    /// Creates, registers, and selects a manual playlist named `name`.
    pub fn create_manual(&mut self, name: &str) -> SharedPlaylist {
        let playlist = Playlist::manual(name, self.library_view.clone(), Rc::clone(&self.player));
        self.add(playlist)
    }

    /// Unregisters and removes the selected playlist. No-op when nothing is
    /// selected.
    pub fn remove(&mut self) {
        let Some(selected) = self.playlists.selected().cloned() else {
            return;
        };
        let id = selected.borrow().id().to_string();
        if let Some(registration) = self.registrations.remove(&id) {
            self.library_events.unregister(registration.library);
            self.player.borrow_mut().unregister_listener(registration.player);
        }
        self.playlists.remove();
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    pub fn get(&self, index: usize) -> SharedPlaylist {
        Rc::clone(self.playlists.get(index))
    }

    /// Selects the playlist at `index`; callers bounds-check first.
    pub fn select(&mut self, index: usize) {
        self.playlists.select(index);
    }

    pub fn some_selected(&self) -> bool {
        self.playlists.some_selected()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.playlists.selected_index()
    }

    pub fn selected(&self) -> Option<SharedPlaylist> {
        self.playlists.selected().cloned()
    }

    pub fn next(&mut self) {
        self.playlists.next();
    }

    pub fn previous(&mut self) {
        self.playlists.previous();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SharedPlaylist> {
        self.playlists.iter()
    }

    /// Starts playback on the selected playlist, if any.
    pub fn play(&mut self) {
        if let Some(playlist) = self.playlists.selected() {
            playlist.borrow_mut().play();
        }
    }

    /// True when any member playlist is currently playing.
    pub fn is_playing(&self) -> bool {
        self.playlists
            .iter()
            .any(|playlist| playlist.borrow().is_playing())
    }

    /// Stops whichever member playlist is currently playing.
    pub fn stop(&mut self) {
        for playlist in self.playlists.iter() {
            if playlist.borrow().is_playing() {
                playlist.borrow_mut().stop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::PlaylistKind;
    use crate::testing::{as_shared_player, song, FakePlayer};

    fn fixture() -> (MusicLibrary, PlaylistList, Rc<RefCell<FakePlayer>>) {
        let player = FakePlayer::shared();
        let library = MusicLibrary::new(as_shared_player(&player));
        let playlists = PlaylistList::new(&library, as_shared_player(&player));
        (library, playlists, player)
    }

    #[test]
    fn test_construction_seeds_the_two_smart_playlists_with_the_second_selected() {
        let (_library, playlists, _player) = fixture();

        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists.get(0).borrow().kind(), PlaylistKind::MostLiked);
        assert_eq!(
            playlists.get(1).borrow().kind(),
            PlaylistKind::MostRecentlyAdded
        );
        assert_eq!(playlists.selected_index(), Some(1));
    }

    #[test]
    fn test_added_playlists_receive_library_events() {
        let (mut library, mut playlists, _player) = fixture();
        let manual = playlists.create_manual("Road Trip");
        library.add(song("a"));
        {
            let library_selected = library.selected_song().expect("song should be selected");
            manual.borrow_mut().add(library_selected);
        }
        library.select(0);

        library.remove();

        assert!(manual.borrow().is_empty());
    }

    #[test]
    fn test_removing_a_playlist_unregisters_it_from_the_library() {
        let (mut library, mut playlists, _player) = fixture();
        // Select and remove the most-recently-added playlist.
        playlists.select(1);
        let removed = playlists.selected().expect("playlist should be selected");
        playlists.remove();

        library.add(song("a"));

        assert!(removed.borrow().is_empty());
        assert_eq!(playlists.len(), 1);
    }

    #[test]
    fn test_removing_a_playlist_unregisters_it_from_the_player() {
        let (mut library, mut playlists, player) = fixture();
        library.add(song("a"));
        let manual = playlists.create_manual("Road Trip");
        {
            let library_selected = library.selected_song().expect("song should be selected");
            manual.borrow_mut().add(library_selected);
        }
        manual.borrow_mut().play();

        playlists.remove();
        FakePlayer::notify(&player, crate::protocol::PlaybackState::Stopped);

        // The playlist never saw the stop notification.
        assert!(manual.borrow().is_playing());
    }

    #[test]
    fn test_play_and_stop_delegate_to_the_playing_member() {
        let (mut library, mut playlists, player) = fixture();
        library.add(song("a"));
        let manual = playlists.create_manual("Road Trip");
        {
            let library_selected = library.selected_song().expect("song should be selected");
            manual.borrow_mut().add(library_selected);
        }

        assert!(!playlists.is_playing());
        playlists.play();
        assert!(playlists.is_playing());

        playlists.stop();
        assert_eq!(player.borrow().stop_calls, 2); // one from play(), one from stop()
    }

    #[test]
    fn test_library_round_trip_leaves_every_playlist_without_the_song() {
        let (mut library, playlists, _player) = fixture();
        let before = library.len();

        library.add(song("a"));
        assert_eq!(playlists.get(1).borrow().len(), 1);

        library.remove();

        assert_eq!(library.len(), before);
        assert!(playlists.get(0).borrow().is_empty());
        assert!(playlists.get(1).borrow().is_empty());
    }
}
