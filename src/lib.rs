#![forbid(unsafe_code)]

pub mod compose;
pub mod error;
pub mod fragment;
pub mod model;
pub mod pipeline;
pub mod raster;
pub mod writer;

pub use compose::compose;
pub use error::{FavgenError, FavgenResult};
pub use fragment::{Fragment, extract_fragment};
pub use model::{
    AccentRect, Canvas, CompositionSpec, GradientStop, GridSpec, Placement, StripMode,
    SvgDocument, TextLabel,
};
pub use pipeline::{
    Batch, BatchConfig, BatchState, BatchSummary, PREVIEW_SIZE, RasterTask, default_config,
};
pub use raster::{RasterImage, rasterize};
pub use writer::{ensure_parent_dir, write_png};
