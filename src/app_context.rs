//! Composition root wiring the library, the playlists, and the controllers.

use std::cell::RefCell;
use std::rc::Rc;

use crate::bus::SharedListener;
use crate::config::Config;
use crate::controller::{LibraryController, PlaylistsController};
use crate::library::MusicLibrary;
use crate::metadata::MetaInfoLoader;
use crate::player::SharedPlayer;
use crate::playlist::PlaylistList;
use crate::protocol::PlaybackState;

/// One assembled instance of the system: library, playlist list, and the two
/// facade controllers, all sharing the injected player handle.
pub struct AppContext {
    library: Rc<RefCell<MusicLibrary>>,
    playlists: Rc<RefCell<PlaylistList>>,
    library_controller: LibraryController,
    playlists_controller: PlaylistsController,
}

impl AppContext {
    /// Builds the system around `player` with `config`-driven metadata
    /// extraction. The library is registered as a player listener before the
    /// seeded playlists, so it is notified first.
    pub fn new(player: SharedPlayer, config: &Config) -> Self {
        let library = Rc::new(RefCell::new(MusicLibrary::new(Rc::clone(&player))));
        player
            .borrow_mut()
            .register_listener(Rc::clone(&library) as SharedListener<PlaybackState>);

        let playlists = {
            let library_ref = library.borrow();
            Rc::new(RefCell::new(PlaylistList::new(
                &library_ref,
                Rc::clone(&player),
            )))
        };

        let library_controller = LibraryController::new(
            Rc::clone(&library),
            MetaInfoLoader::new(&config.metadata),
        );
        let playlists_controller =
            PlaylistsController::new(Rc::clone(&playlists), Rc::clone(&library));

        Self {
            library,
            playlists,
            library_controller,
            playlists_controller,
        }
    }

    pub fn library_controller(&self) -> &LibraryController {
        &self.library_controller
    }

    pub fn playlists_controller(&self) -> &PlaylistsController {
        &self.playlists_controller
    }

    pub fn library(&self) -> Rc<RefCell<MusicLibrary>> {
        Rc::clone(&self.library)
    }

    pub fn playlists(&self) -> Rc<RefCell<PlaylistList>> {
        Rc::clone(&self.playlists)
    }
}
