//! Tag-based metadata extraction backed by lofty.

use std::path::Path;

use log::warn;

use lofty::file::TaggedFileExt;
use lofty::prelude::Accessor;
use lofty::read_from_path;

use crate::media_file_discovery::is_supported_audio_file;
use crate::song::SongMetaInfo;

use super::MetaInfoFactory;

// Placeholder when a tag field is missing.
const UNKNOWN_FIELD: &str = "unknown";

/// Reads title/genre/artist/album from the file's primary tag.
pub struct TagMetaInfoFactory {
    artist_separator: String,
}

impl TagMetaInfoFactory {
    pub fn new(artist_separator: String) -> Self {
        Self { artist_separator }
    }

    /// Splits a raw artist field into trimmed artist names.
    fn split_artists(&self, raw: &str) -> Vec<String> {
        raw.split(self.artist_separator.as_str())
            .map(|artist| artist.trim().to_string())
            .collect()
    }
}

impl MetaInfoFactory for TagMetaInfoFactory {
    fn can_load(&self, path: &Path) -> bool {
        is_supported_audio_file(path)
    }

    fn load(&self, path: &Path) -> Option<SongMetaInfo> {
        let tagged_file = match read_from_path(path) {
            Ok(tagged_file) => tagged_file,
            Err(error) => {
                warn!(
                    "TagMetaInfoFactory: failed to read tags from {}: {}",
                    path.display(),
                    error
                );
                return None;
            }
        };

        let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag())?;

        let title = tag
            .title()
            .map(|value| value.into_owned())
            .unwrap_or_else(|| UNKNOWN_FIELD.to_string());
        let genre = tag
            .genre()
            .map(|value| value.into_owned())
            .unwrap_or_else(|| UNKNOWN_FIELD.to_string());
        let artist_field = tag
            .artist()
            .map(|value| value.into_owned())
            .unwrap_or_else(|| UNKNOWN_FIELD.to_string());
        let album = tag
            .album()
            .map(|value| value.into_owned())
            .unwrap_or_else(|| UNKNOWN_FIELD.to_string());

        Some(SongMetaInfo {
            title,
            genre,
            artists: self.split_artists(&artist_field),
            album,
        })
    }
}
