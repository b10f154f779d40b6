//! Test doubles and fixtures shared by the unit tests.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::bus::{ListenerId, SharedListener, Subject};
use crate::player::{Player, SharedPlayer};
use crate::protocol::PlaybackState;
use crate::song::{Song, SongMetaInfo};

/// Scripted player that records calls and lets tests inject state changes.
pub struct FakePlayer {
    subject: Subject<PlaybackState>,
    pub loaded: Vec<PathBuf>,
    pub play_calls: u32,
    pub stop_calls: u32,
}

impl FakePlayer {
    pub fn shared() -> Rc<RefCell<FakePlayer>> {
        Rc::new(RefCell::new(FakePlayer {
            subject: Subject::new(),
            loaded: Vec::new(),
            play_calls: 0,
            stop_calls: 0,
        }))
    }

    /// Delivers `state` to the registered listeners.
    ///
    /// The subject handle is cloned out first so no borrow of the player is
    /// held while listeners run (listeners call back into the player).
    pub fn notify(player: &Rc<RefCell<FakePlayer>>, state: PlaybackState) {
        let subject = player.borrow().subject.clone();
        subject.emit(&state);
    }

    pub fn last_loaded(&self) -> Option<&Path> {
        self.loaded.last().map(PathBuf::as_path)
    }
}

impl Player for FakePlayer {
    fn load(&mut self, path: &Path) {
        self.loaded.push(path.to_path_buf());
    }

    fn play(&mut self) {
        self.play_calls += 1;
    }

    fn stop(&mut self) {
        self.stop_calls += 1;
    }

    fn register_listener(&mut self, listener: SharedListener<PlaybackState>) -> ListenerId {
        self.subject.register(listener)
    }

    fn unregister_listener(&mut self, id: ListenerId) {
        self.subject.unregister(id)
    }
}

/// Coerces a fake player handle into the trait-object handle the core takes.
pub fn as_shared_player(player: &Rc<RefCell<FakePlayer>>) -> SharedPlayer {
    Rc::clone(player) as SharedPlayer
}

/// A song named `name`, stored at `/music/{name}.mp3`.
pub fn song(name: &str) -> Song {
    Song::new(
        SongMetaInfo {
            title: name.to_string(),
            genre: "Test".to_string(),
            artists: vec!["Tester".to_string()],
            album: "Fixtures".to_string(),
        },
        PathBuf::from(format!("/music/{name}.mp3")),
    )
}
