//! Controller for interactions with the music library.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use log::{info, warn};
use regex::Regex;

use crate::library::MusicLibrary;
use crate::media_file_discovery::collect_audio_files_from_folder;
use crate::metadata::MetaInfoLoader;
use crate::song::{Rating, Song};

/// Precondition-guarding facade over one [`MusicLibrary`].
pub struct LibraryController {
    library: Rc<RefCell<MusicLibrary>>,
    loader: MetaInfoLoader,
}

impl LibraryController {
    pub fn new(library: Rc<RefCell<MusicLibrary>>, loader: MetaInfoLoader) -> Self {
        Self { library, loader }
    }

    pub fn number_of_songs(&self) -> usize {
        self.library.borrow().len()
    }

    /// Loads metadata for `path` and adds the song. When extraction fails
    /// the add is abandoned and the failure only logged; no song is created.
    pub fn add_song(&self, path: &Path) {
        let Some(meta) = self.loader.load(path) else {
            warn!(
                "LibraryController: failed to load metadata for {}, song not added",
                path.display()
            );
            return;
        };
        self.library
            .borrow_mut()
            .add(Song::new(meta, path.to_path_buf()));
    }

    /// Discovers supported audio files under `folder` and adds each one.
    /// Returns the number of songs actually added.
    pub fn import_folder(&self, folder: &Path) -> usize {
        let before = self.number_of_songs();
        for file in collect_audio_files_from_folder(folder) {
            self.add_song(&file);
        }
        let added = self.number_of_songs() - before;
        info!(
            "LibraryController: imported {} song(s) from {}",
            added,
            folder.display()
        );
        added
    }

    /// Selects the song at `index` when the index is in range.
    pub fn select_song(&self, index: usize) {
        let mut library = self.library.borrow_mut();
        if index < library.len() {
            library.select(index);
        }
    }

    pub fn selected_song(&self) -> Option<Rc<Song>> {
        self.library.borrow().selected_song()
    }

    pub fn selected_song_rating(&self) -> Option<Rating> {
        self.selected_song().map(|song| song.rating())
    }

    /// Removes the selected song, if any.
    pub fn remove_selected_song(&self) {
        self.library.borrow_mut().remove();
    }

    /// Plays the selected song, if any.
    pub fn play(&self) {
        let mut library = self.library.borrow_mut();
        if library.some_selected() {
            library.play();
        }
    }

    /// Stops playback when a song is playing through the library.
    pub fn stop(&self) {
        let mut library = self.library.borrow_mut();
        if library.is_playing() {
            library.stop();
        }
    }

    /// Raises the selected song's rating, if any song is selected.
    pub fn inc_rate_selected(&self) {
        let mut library = self.library.borrow_mut();
        if library.some_selected() {
            library.inc_rate_selected();
        }
    }

    /// Lowers the selected song's rating, if any song is selected.
    pub fn dec_rate_selected(&self) {
        let mut library = self.library.borrow_mut();
        if library.some_selected() {
            library.dec_rate_selected();
        }
    }

    /// Songs whose metadata matches `pattern`; an invalid pattern is
    /// reported as an error.
    pub fn get_matches(&self, pattern: &str) -> Result<Vec<Rc<Song>>, String> {
        let regex =
            Regex::new(pattern).map_err(|error| format!("Invalid search pattern: {error}"))?;
        Ok(self.library.borrow().get_matches(&regex))
    }

    /// Snapshot of all songs in library order.
    pub fn songs(&self) -> Vec<Rc<Song>> {
        self.library.borrow().songs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MetadataConfig;
    use crate::testing::{as_shared_player, FakePlayer};

    fn controller() -> LibraryController {
        let player = FakePlayer::shared();
        let library = Rc::new(RefCell::new(MusicLibrary::new(as_shared_player(&player))));
        LibraryController::new(library, MetaInfoLoader::new(&MetadataConfig::default()))
    }

    #[test]
    fn test_add_song_is_abandoned_when_metadata_extraction_fails() {
        let controller = controller();
        controller.add_song(Path::new("/nonexistent/track.mp3"));
        assert_eq!(controller.number_of_songs(), 0);
    }

    #[test]
    fn test_select_song_ignores_out_of_range_indices() {
        let controller = controller();
        controller.select_song(3);
        assert!(controller.selected_song().is_none());
    }

    #[test]
    fn test_guarded_operations_are_no_ops_with_nothing_selected() {
        let controller = controller();
        controller.remove_selected_song();
        controller.inc_rate_selected();
        controller.dec_rate_selected();
        controller.play();
        controller.stop();
        assert_eq!(controller.number_of_songs(), 0);
    }

    #[test]
    fn test_invalid_search_pattern_is_reported_as_an_error() {
        let controller = controller();
        let result = controller.get_matches("[unclosed");
        assert!(result.is_err());
    }

    #[test]
    fn test_import_folder_counts_only_songs_actually_added() {
        let controller = controller();
        let dir = tempfile::tempdir().expect("temp dir should be created");
        // Empty files carry no readable tags, so every add is abandoned.
        std::fs::write(dir.path().join("a.mp3"), b"").expect("file should be written");

        assert_eq!(controller.import_folder(dir.path()), 0);
        assert_eq!(controller.number_of_songs(), 0);
    }
}
