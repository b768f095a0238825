use crate::pagesize::Orientation;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum CardError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to decode a card or overlay image
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// The layout configuration was rejected before anything was drawn
    Config(#[from] ConfigError),

    #[error("page is listed in the page order but missing from the document")]
    PageMissing,

    #[error("no PDF object reference was allocated for {0}")]
    MissingReference(&'static str),
}

/// Problems with the grid, page or text configuration. These are always
/// reported before any drawing happens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("invalid grid '{0}', expected ROWSxCOLS such as 3x3")]
    InvalidGridSpec(String),

    #[error("invalid orientation '{0}', expected 'portrait' or 'landscape'")]
    InvalidOrientation(String),

    #[error("invalid PDF mode '{0}', expected 'grid', 'single-card' or 'cut-ready'")]
    InvalidMode(String),

    #[error(
        "margins and gaps leave no room for a {rows}x{cols} grid on a {orientation} page \
         ({available_width:.1}x{available_height:.1}pt available)"
    )]
    NoRoomForCards {
        rows: usize,
        cols: usize,
        orientation: Orientation,
        available_width: f32,
        available_height: f32,
    },

    #[error(
        "grid with fixed card dimensions ({rows}x{cols}) doesn't fit on {orientation} page: \
         required {required_width:.1}x{required_height:.1}pt, \
         available {page_width:.1}x{page_height:.1}pt"
    )]
    GridDoesNotFit {
        rows: usize,
        cols: usize,
        orientation: Orientation,
        required_width: f32,
        required_height: f32,
        page_width: f32,
        page_height: f32,
    },

    #[error("font size range {min}..={max} is empty")]
    InvalidFontRange { min: u32, max: u32 },
}
