//! Facade controllers guarding the core's preconditions.
//!
//! The core operations require callers to check selection state first; these
//! controllers are the callers that do, so an embedding application can
//! drive the system without tracking preconditions itself.

pub mod library_controller;
pub mod playlists_controller;

pub use library_controller::LibraryController;
pub use playlists_controller::PlaylistsController;
