//! Song model: immutable tag metadata, a mutable rating, and a play counter.

use std::cell::Cell;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use regex::Regex;

/// User rating of a song, ordered from unrated to best.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rating {
    #[default]
    Unrated,
    VeryBad,
    Bad,
    Ok,
    Good,
    VeryGood,
}

impl Rating {
    /// The next rating up, saturating at [`Rating::VeryGood`].
    pub fn inc(self) -> Rating {
        match self {
            Rating::Unrated => Rating::VeryBad,
            Rating::VeryBad => Rating::Bad,
            Rating::Bad => Rating::Ok,
            Rating::Ok => Rating::Good,
            Rating::Good | Rating::VeryGood => Rating::VeryGood,
        }
    }

    /// The next rating down, saturating at [`Rating::Unrated`].
    pub fn dec(self) -> Rating {
        match self {
            Rating::Unrated | Rating::VeryBad => Rating::Unrated,
            Rating::Bad => Rating::VeryBad,
            Rating::Ok => Rating::Bad,
            Rating::Good => Rating::Ok,
            Rating::VeryGood => Rating::Good,
        }
    }
}

/// Immutable tag metadata carried by a song.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SongMetaInfo {
    pub title: String,
    pub genre: String,
    /// Ordered artist names as split from the tag's artist field.
    pub artists: Vec<String>,
    pub album: String,
}

impl SongMetaInfo {
    /// True when `pattern` matches anywhere in the title, genre, album, or
    /// any artist name.
    pub fn matches(&self, pattern: &Regex) -> bool {
        pattern.is_match(&self.title)
            || pattern.is_match(&self.genre)
            || pattern.is_match(&self.album)
            || self.artists.iter().any(|artist| pattern.is_match(artist))
    }
}

/// A song in the collection.
///
/// The filename is the song's identity key: playlist membership tracking
/// compares filenames via [`Song::is_same_track`], while `PartialEq`/`Hash`
/// stay structural over all fields (two songs with the same filename but
/// different rating or play count compare unequal).
#[derive(Debug, PartialEq, Eq)]
pub struct Song {
    meta: SongMetaInfo,
    filename: PathBuf,
    rating: Cell<Rating>,
    play_count: Cell<u32>,
}

impl Song {
    pub fn new(meta: SongMetaInfo, filename: PathBuf) -> Self {
        Self {
            meta,
            filename,
            rating: Cell::new(Rating::Unrated),
            play_count: Cell::new(0),
        }
    }

    pub fn title(&self) -> &str {
        &self.meta.title
    }

    pub fn genre(&self) -> &str {
        &self.meta.genre
    }

    pub fn artists(&self) -> &[String] {
        &self.meta.artists
    }

    pub fn album(&self) -> &str {
        &self.meta.album
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    pub fn rating(&self) -> Rating {
        self.rating.get()
    }

    pub fn inc_rating(&self) {
        self.rating.set(self.rating.get().inc());
    }

    pub fn dec_rating(&self) {
        self.rating.set(self.rating.get().dec());
    }

    pub fn times_played(&self) -> u32 {
        self.play_count.get()
    }

    pub fn inc_times_played(&self) {
        self.play_count.set(self.play_count.get() + 1);
    }

    /// Identity comparison by filename, independent of rating and play count.
    pub fn is_same_track(&self, other: &Song) -> bool {
        self.filename == other.filename
    }

    /// True when `pattern` matches this song's metadata (see
    /// [`SongMetaInfo::matches`]).
    pub fn matches(&self, pattern: &Regex) -> bool {
        self.meta.matches(pattern)
    }
}

impl Hash for Song {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.filename.hash(state);
        self.rating.get().hash(state);
        self.play_count.get().hash(state);
        self.meta.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn meta(title: &str, genre: &str, artists: &[&str], album: &str) -> SongMetaInfo {
        SongMetaInfo {
            title: title.to_string(),
            genre: genre.to_string(),
            artists: artists.iter().map(|artist| artist.to_string()).collect(),
            album: album.to_string(),
        }
    }

    fn hash_of(song: &Song) -> u64 {
        let mut hasher = DefaultHasher::new();
        song.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_rating_increment_saturates_at_very_good() {
        assert_eq!(Rating::Good.inc(), Rating::VeryGood);
        assert_eq!(Rating::VeryGood.inc(), Rating::VeryGood);
    }

    #[test]
    fn test_rating_decrement_saturates_at_unrated() {
        assert_eq!(Rating::VeryBad.dec(), Rating::Unrated);
        assert_eq!(Rating::Unrated.dec(), Rating::Unrated);
    }

    #[test]
    fn test_rating_order_follows_declaration() {
        assert!(Rating::Unrated < Rating::VeryBad);
        assert!(Rating::Bad < Rating::Ok);
        assert!(Rating::Good < Rating::VeryGood);
    }

    #[test]
    fn test_play_counter_starts_at_zero_and_increments() {
        let song = Song::new(meta("t", "g", &["a"], "al"), PathBuf::from("/music/t.mp3"));
        assert_eq!(song.times_played(), 0);
        song.inc_times_played();
        song.inc_times_played();
        assert_eq!(song.times_played(), 2);
    }

    #[test]
    fn test_songs_with_different_filenames_are_not_equal() {
        let left = Song::new(meta("t", "g", &["a"], "al"), PathBuf::from("/music/one.mp3"));
        let right = Song::new(meta("t", "g", &["a"], "al"), PathBuf::from("/music/two.mp3"));
        assert_ne!(left, right);
        assert!(!left.is_same_track(&right));
    }

    #[test]
    fn test_equal_songs_share_a_hash() {
        let left = Song::new(meta("t", "g", &["a"], "al"), PathBuf::from("/music/one.mp3"));
        let right = Song::new(meta("t", "g", &["a"], "al"), PathBuf::from("/music/one.mp3"));
        assert_eq!(left, right);
        assert_eq!(hash_of(&left), hash_of(&right));
    }

    #[test]
    fn test_rating_change_breaks_structural_equality_but_not_identity() {
        let left = Song::new(meta("t", "g", &["a"], "al"), PathBuf::from("/music/one.mp3"));
        let right = Song::new(meta("t", "g", &["a"], "al"), PathBuf::from("/music/one.mp3"));
        right.inc_rating();
        assert_ne!(left, right);
        assert!(left.is_same_track(&right));
    }

    #[test]
    fn test_metadata_pattern_matches_any_field_anywhere() {
        let song = Song::new(
            meta("Night Drive", "Synthwave", &["Ada Nova", "Kite"], "Neon"),
            PathBuf::from("/music/night.mp3"),
        );

        assert!(song.matches(&Regex::new("Drive").expect("pattern should compile")));
        assert!(song.matches(&Regex::new("wave").expect("pattern should compile")));
        assert!(song.matches(&Regex::new("Neo").expect("pattern should compile")));
        assert!(song.matches(&Regex::new("Kite").expect("pattern should compile")));
        assert!(!song.matches(&Regex::new("Jazz").expect("pattern should compile")));
    }
}
