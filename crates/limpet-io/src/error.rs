use std::path::PathBuf;

/// Failure to turn an XML document into a [`limpet::Scene`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("missing node `{path}`")]
    MissingNode { path: &'static str },
    #[error("`{node}` has no `{attribute}` attribute")]
    MissingAttribute {
        node: String,
        attribute: &'static str,
    },
    #[error("attribute `{attribute}` has malformed value `{value}`")]
    MalformedAttribute {
        attribute: &'static str,
        value: String,
    },
    #[error(transparent)]
    InvalidObject(#[from] limpet::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("unsupported image format `{extension}` (expected png or svg)")]
    UnsupportedFormat { extension: String },
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
