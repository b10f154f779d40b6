//! Metadata extraction service.
//!
//! A [`MetaInfoLoader`] walks its registered per-format factories and asks
//! the first one that claims a path to produce the song's metadata. Load
//! failure is an absent result; callers log it and abandon the add.

pub mod tag_reader;

pub use tag_reader::TagMetaInfoFactory;

use std::path::Path;

use crate::config::MetadataConfig;
use crate::song::SongMetaInfo;

/// One per-format metadata extractor.
pub trait MetaInfoFactory {
    /// True when this factory knows how to read `path`.
    fn can_load(&self, path: &Path) -> bool;
    /// Extracts the metadata, or `None` when the file is unreadable.
    fn load(&self, path: &Path) -> Option<SongMetaInfo>;
}

/// Factory registry fronting the metadata extraction.
pub struct MetaInfoLoader {
    factories: Vec<Box<dyn MetaInfoFactory>>,
}

impl MetaInfoLoader {
    /// A loader with the built-in tag-reading factory.
    pub fn new(config: &MetadataConfig) -> Self {
        Self {
            factories: vec![Box::new(TagMetaInfoFactory::new(
                config.artist_separator.clone(),
            ))],
        }
    }

    /// Adds another factory; consulted after the earlier ones.
    pub fn register_factory(&mut self, factory: Box<dyn MetaInfoFactory>) {
        self.factories.push(factory);
    }

    /// Metadata for `path` from the first factory that claims it, or `None`
    /// when no factory does or extraction fails.
    pub fn load(&self, path: &Path) -> Option<SongMetaInfo> {
        self.factories
            .iter()
            .find(|factory| factory.can_load(path))
            .and_then(|factory| factory.load(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticFactory {
        extension: &'static str,
        title: &'static str,
    }

    impl MetaInfoFactory for StaticFactory {
        fn can_load(&self, path: &Path) -> bool {
            path.extension().and_then(|ext| ext.to_str()) == Some(self.extension)
        }

        fn load(&self, _path: &Path) -> Option<SongMetaInfo> {
            Some(SongMetaInfo {
                title: self.title.to_string(),
                genre: String::new(),
                artists: Vec::new(),
                album: String::new(),
            })
        }
    }

    #[test]
    fn test_loader_asks_the_first_factory_that_claims_the_path() {
        let mut loader = MetaInfoLoader::new(&MetadataConfig::default());
        loader.register_factory(Box::new(StaticFactory {
            extension: "xyz",
            title: "first",
        }));
        loader.register_factory(Box::new(StaticFactory {
            extension: "xyz",
            title: "second",
        }));

        let meta = loader
            .load(Path::new("/music/track.xyz"))
            .expect("registered factory should claim the path");
        assert_eq!(meta.title, "first");
    }

    #[test]
    fn test_loader_returns_none_when_no_factory_claims_the_path() {
        let loader = MetaInfoLoader::new(&MetadataConfig::default());
        assert!(loader.load(Path::new("/music/track.txt")).is_none());
    }

    #[test]
    fn test_loader_returns_none_when_the_claimed_file_is_unreadable() {
        let loader = MetaInfoLoader::new(&MetadataConfig::default());
        // Supported extension, nonexistent file.
        assert!(loader.load(Path::new("/nonexistent/track.mp3")).is_none());
    }
}
