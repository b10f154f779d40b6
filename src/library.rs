//! Library-domain orchestrator.
//!
//! The music library is the single source of truth for the song collection.
//! Every mutation that playlists care about is broadcast as a
//! [`LibraryEvent`] after the library reached its new state, so listeners
//! never observe a half-applied change.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use regex::Regex;

use crate::bus::{Listener, ListenerId, SharedListener, Subject};
use crate::player::SharedPlayer;
use crate::protocol::{LibraryEvent, PlaybackState};
use crate::selection::SelectionList;
use crate::song::Song;

/// Read-only, cheaply clonable view of the library's song sequence.
///
/// Smart playlists hold one of these for their refill/backfill scans instead
/// of a reference to the library itself.
#[derive(Clone)]
pub struct LibraryView {
    songs: Rc<RefCell<SelectionList<Rc<Song>>>>,
}

impl LibraryView {
    pub fn len(&self) -> usize {
        self.songs.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.borrow().is_empty()
    }

    pub fn song_at(&self, index: usize) -> Rc<Song> {
        Rc::clone(self.songs.borrow().get(index))
    }

    /// Snapshot of the current contents in library order.
    pub fn snapshot(&self) -> Vec<Rc<Song>> {
        self.songs.borrow().iter().cloned().collect()
    }
}

/// The song collection, with selection state and event emission.
pub struct MusicLibrary {
    songs: Rc<RefCell<SelectionList<Rc<Song>>>>,
    events: Subject<LibraryEvent>,
    player: SharedPlayer,
    playing_song: Option<Rc<Song>>,
}

impl MusicLibrary {
    pub fn new(player: SharedPlayer) -> Self {
        Self {
            songs: Rc::new(RefCell::new(SelectionList::new())),
            events: Subject::new(),
            player,
            playing_song: None,
        }
    }

    /// A read-only view on the song sequence, for injection into playlists.
    pub fn view(&self) -> LibraryView {
        LibraryView {
            songs: Rc::clone(&self.songs),
        }
    }

    pub(crate) fn events(&self) -> Subject<LibraryEvent> {
        self.events.clone()
    }

    /// Registers `listener` for library events.
    pub fn register_listener(&self, listener: SharedListener<LibraryEvent>) -> ListenerId {
        self.events.register(listener)
    }

    /// Unregisters a previously registered library listener.
    pub fn unregister_listener(&self, id: ListenerId) {
        self.events.unregister(id)
    }

    pub fn len(&self) -> usize {
        self.songs.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Rc<Song> {
        Rc::clone(self.songs.borrow().get(index))
    }

    /// Snapshot of all songs in library order.
    pub fn songs(&self) -> Vec<Rc<Song>> {
        self.songs.borrow().iter().cloned().collect()
    }

    pub fn some_selected(&self) -> bool {
        self.songs.borrow().some_selected()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.songs.borrow().selected_index()
    }

    pub fn selected_song(&self) -> Option<Rc<Song>> {
        self.songs.borrow().selected().cloned()
    }

    /// Selects the song at `index`; callers bounds-check first.
    pub fn select(&mut self, index: usize) {
        self.songs.borrow_mut().select(index);
    }

    pub fn next(&mut self) {
        self.songs.borrow_mut().next();
    }

    pub fn previous(&mut self) {
        self.songs.borrow_mut().previous();
    }

    /// Appends `song`, selects it, and emits [`LibraryEvent::SongAdded`].
    pub fn add(&mut self, song: Song) {
        let song = Rc::new(song);
        self.songs.borrow_mut().add(Rc::clone(&song));
        debug!("MusicLibrary: added {}", song.filename().display());
        self.events.emit(&LibraryEvent::SongAdded { song });
    }

    /// Removes the selected song, then emits [`LibraryEvent::SongRemoved`]
    /// so listeners observe the library without it. No-op when nothing is
    /// selected.
    pub fn remove(&mut self) {
        let removed = self.songs.borrow_mut().remove();
        if let Some(song) = removed {
            debug!("MusicLibrary: removed {}", song.filename().display());
            self.events.emit(&LibraryEvent::SongRemoved { song });
        }
    }

    /// Increments the selected song's rating (saturating) and emits
    /// [`LibraryEvent::SongRated`] with the true before/after values.
    pub fn inc_rate_selected(&mut self) {
        let Some(song) = self.selected_song() else {
            return;
        };
        let old_rating = song.rating();
        song.inc_rating();
        let new_rating = song.rating();
        self.events.emit(&LibraryEvent::SongRated {
            song,
            old_rating,
            new_rating,
        });
    }

    /// Decrements the selected song's rating (saturating) and emits
    /// [`LibraryEvent::SongRated`] with the true before/after values.
    pub fn dec_rate_selected(&mut self) {
        let Some(song) = self.selected_song() else {
            return;
        };
        let old_rating = song.rating();
        song.dec_rating();
        let new_rating = song.rating();
        self.events.emit(&LibraryEvent::SongRated {
            song,
            old_rating,
            new_rating,
        });
    }

    /// Stops whatever is playing, then loads and plays the selected song
    /// through the shared player, recording it as playing through this
    /// library.
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
        self.playing_song = Some(song);
    }

    /// True iff the current playback was started through this library.
    pub fn is_playing(&self) -> bool {
        self.playing_song.is_some()
    }

    /// Stops playback started through this library.
    pub fn stop(&mut self) {
        self.player.borrow_mut().stop();
    }

    /// All songs whose metadata matches `pattern` (search-anywhere, against
    /// title, genre, album, and each artist).
    pub fn get_matches(&self, pattern: &Regex) -> Vec<Rc<Song>> {
        self.songs
            .borrow()
            .iter()
            .filter(|song| song.matches(pattern))
            .cloned()
            .collect()
    }
}

impl Listener<PlaybackState> for MusicLibrary {
    fn on_event(&mut self, state: &PlaybackState) {
        if !self.is_playing() {
            return;
        }
        match state {
            PlaybackState::Stopped => {
                self.playing_song = None;
            }
            PlaybackState::Ended => {
                if let Some(song) = self.playing_song.take() {
                    song.inc_times_played();
                }
            }
            PlaybackState::Playing | PlaybackState::Paused => {}
        }
    }
}
