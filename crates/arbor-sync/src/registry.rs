//! Per-language codecs for the generic constructs every language shares.
//!
//! Comments and markers are open-ended, so their wire shape is chosen at run
//! time from the round's language. The table is built once at startup and is
//! immutable afterwards, which lets any number of sessions share it.

use std::sync::Arc;

use arbor_errors::{ConfigError, Result};
use arbor_tree::{Language, Marker, MarkerKind, Space};
use rustc_hash::FxHashMap;

use crate::{Receiver, Sender, binding};

pub type EncodeSpace = fn(&Space, &mut Sender<'_>) -> Result<()>;
pub type DecodeSpace = fn(&mut Receiver<'_>) -> Result<Space>;
pub type EncodeMarker = fn(&dyn Marker, &mut Sender<'_>) -> Result<()>;
pub type DecodeMarker = fn(&mut Receiver<'_>) -> Result<Arc<dyn Marker>>;

/// Encodes a `Space` and its comments.
#[derive(Clone, Copy, Debug)]
pub struct SpaceCodec {
    pub encode: EncodeSpace,
    pub decode: DecodeSpace,
}

#[derive(Clone, Copy, Debug)]
pub struct MarkerCodec {
    pub encode: EncodeMarker,
    pub decode: DecodeMarker,
}

#[derive(Debug)]
pub struct CodecRegistry {
    spaces: FxHashMap<Language, SpaceCodec>,
    markers: FxHashMap<(MarkerKind, Language), MarkerCodec>,
    kinds: Vec<MarkerKind>,
}

impl CodecRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Codecs for the built-in comments and markers of every language.
    pub fn standard() -> Result<Self, ConfigError> {
        let builder = binding::java::register(Self::builder())?;
        let builder = binding::python::register(builder)?;
        builder.build()
    }

    pub fn space(&self, language: Language) -> Result<SpaceCodec, ConfigError> {
        self.spaces.get(&language).copied().ok_or(ConfigError::MissingSpaceCodec(language))
    }

    pub fn marker(&self, kind: MarkerKind, language: Language) -> Result<MarkerCodec, ConfigError> {
        self.markers
            .get(&(kind, language))
            .copied()
            .ok_or(ConfigError::MissingMarkerCodec { kind, language })
    }

    /// Resolves a marker kind read off the wire.
    pub fn marker_kind(&self, name: &str) -> Option<MarkerKind> {
        self.kinds.iter().copied().find(|kind| kind.name() == name)
    }

    pub fn marker_kinds(&self) -> &[MarkerKind] {
        &self.kinds
    }
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    spaces: FxHashMap<Language, SpaceCodec>,
    markers: FxHashMap<(MarkerKind, Language), MarkerCodec>,
    kinds: Vec<MarkerKind>,
}

impl RegistryBuilder {
    /// Announces a marker kind; `build` fails unless every language has a codec for it.
    pub fn declare(mut self, kind: MarkerKind) -> Self {
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
        self
    }

    pub fn space(mut self, language: Language, codec: SpaceCodec) -> Result<Self, ConfigError> {
        if self.spaces.insert(language, codec).is_some() {
            return Err(ConfigError::DuplicateSpaceCodec(language));
        }
        Ok(self)
    }

    pub fn marker(
        self,
        kind: MarkerKind,
        language: Language,
        codec: MarkerCodec,
    ) -> Result<Self, ConfigError> {
        let mut builder = self.declare(kind);
        if builder.markers.insert((kind, language), codec).is_some() {
            return Err(ConfigError::DuplicateMarkerCodec { kind, language });
        }
        Ok(builder)
    }

    pub fn build(self) -> Result<CodecRegistry, ConfigError> {
        for language in Language::ALL {
            if !self.spaces.contains_key(&language) {
                return Err(ConfigError::MissingSpaceCodec(language));
            }
            for &kind in &self.kinds {
                if !self.markers.contains_key(&(kind, language)) {
                    return Err(ConfigError::MissingMarkerCodec { kind, language });
                }
            }
        }

        let Self { spaces, markers, kinds } = self;
        Ok(CodecRegistry { spaces, markers, kinds })
    }
}

#[cfg(test)]
mod tests {
    use arbor_errors::ConfigError;
    use arbor_tree::{Language, MarkerKind, Semicolon, TrailingComma};

    use super::CodecRegistry;
    use crate::binding::{java, python, shared};

    #[test]
    fn standard_registry_covers_every_language() {
        let registry = CodecRegistry::standard().unwrap();
        for language in Language::ALL {
            assert!(registry.space(language).is_ok());
            for &kind in registry.marker_kinds() {
                assert!(registry.marker(kind, language).is_ok(), "{kind} in {language}");
            }
        }
        assert_eq!(registry.marker_kind("trailing-comma"), Some(TrailingComma::KIND));
        assert_eq!(registry.marker_kind("bookmark"), None);
    }

    #[test]
    fn duplicate_space_codec() {
        let builder = java::register(CodecRegistry::builder()).unwrap();
        let error = builder.space(Language::Java, java::SPACE).unwrap_err();
        assert_eq!(error, ConfigError::DuplicateSpaceCodec(Language::Java));
    }

    #[test]
    fn duplicate_marker_codec() {
        let builder = java::register(CodecRegistry::builder()).unwrap();
        let error = builder.marker(Semicolon::KIND, Language::Java, shared::SEMICOLON).unwrap_err();
        assert_eq!(
            error,
            ConfigError::DuplicateMarkerCodec { kind: Semicolon::KIND, language: Language::Java }
        );
    }

    #[test]
    fn missing_language() {
        let builder = java::register(CodecRegistry::builder()).unwrap();
        let error = builder.build().unwrap_err();
        assert_eq!(error, ConfigError::MissingSpaceCodec(Language::Python));
    }

    #[test]
    fn declared_marker_without_codec() {
        const BOOKMARK: MarkerKind = MarkerKind::new("bookmark");

        let builder = java::register(CodecRegistry::builder()).unwrap();
        let builder = python::register(builder).unwrap().declare(BOOKMARK);
        let error = builder.build().unwrap_err();
        assert_eq!(
            error,
            ConfigError::MissingMarkerCodec { kind: BOOKMARK, language: Language::Java }
        );
    }
}
