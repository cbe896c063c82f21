//! Decode options for scene loading
//!
//! This module provides the configuration knobs that change how strictly a
//! `.gsc` container is decoded and which regions are visited.

/// Options for decoding a scene container.
///
/// # Example
///
/// ```
/// use nuscene::DecodeOptions;
///
/// // Fail on texture formats the decoder does not recognise
/// let options = DecodeOptions::new().with_strict_textures(true);
///
/// // Geometry only, e.g. for a quick inspection
/// let options = DecodeOptions::geometry_only();
/// assert!(options.skip_textures);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Treat an unrecognised texture format tag as a fatal
    /// [`Error::UnsupportedFormat`](crate::Error::UnsupportedFormat)
    /// instead of skipping the record.
    /// Default: false
    pub strict_textures: bool,

    /// Do not visit the texture region at all; the scene has no blobs.
    /// Default: false
    pub skip_textures: bool,
}

impl DecodeOptions {
    /// Create options with the default (lenient, full) decode.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strict_textures: false,
            skip_textures: false,
        }
    }

    /// Create options that decode geometry and materials but no textures.
    #[must_use]
    pub fn geometry_only() -> Self {
        Self {
            strict_textures: false,
            skip_textures: true,
        }
    }

    /// Set whether unknown texture formats abort the load.
    #[must_use]
    pub fn with_strict_textures(mut self, strict: bool) -> Self {
        self.strict_textures = strict;
        self
    }

    /// Set whether the texture region is skipped.
    #[must_use]
    pub fn with_skip_textures(mut self, skip: bool) -> Self {
        self.skip_textures = skip;
        self
    }
}
