//! Seam to the external audio playback backend.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use crate::bus::{ListenerId, SharedListener};
use crate::protocol::PlaybackState;

/// External playback backend shared by the library and every playlist.
///
/// Implementations must not call back into their listeners from inside
/// [`Player::load`]/[`Player::play`]/[`Player::stop`]; playback state is
/// reported later through the listener mechanism, one notification at a time.
pub trait Player {
    /// Prepares the file at `path` for playback.
    fn load(&mut self, path: &Path);
    /// Starts playback of the loaded file.
    fn play(&mut self);
    /// Stops playback.
    fn stop(&mut self);
    /// Registers a playback-state listener.
    fn register_listener(&mut self, listener: SharedListener<PlaybackState>) -> ListenerId;
    /// Removes a previously registered playback-state listener.
    fn unregister_listener(&mut self, id: ListenerId);
}

/// Shared player handle injected at construction time.
pub type SharedPlayer = Rc<RefCell<dyn Player>>;
