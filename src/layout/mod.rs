//! Fitting text into boxes on a card.
//!
//! The pipeline is: measure ([TextMetrics]) → wrap under a character budget
//! ([wrap()]) → binary-search the largest font size that fits ([solve]) → place
//! each line ([layout_centered], [layout_left_aligned]).
//!
//! Layout coordinates are canvas-local with the origin at the top-left and y
//! pointing down; [FormCanvas] flips them into PDF space.
//!
//! # Example
//!
//! ```
//! use spell_cards::layout::{layout_centered, LayoutBox, MonospaceMetrics, TextStyle};
//!
//! let mut metrics = MonospaceMetrics::default();
//! let bounds = LayoutBox::new(375.0, 145.0, 670.0, 90.0);
//! let layout = layout_centered(&mut metrics, "Magic Missile", &bounds, &TextStyle::new(1, 36));
//!
//! assert_eq!(layout.size, 36);
//! assert_eq!(layout.lines.len(), 1);
//! ```

mod fit;
mod metrics;
mod text;
mod wrap;

pub use fit::*;
pub use metrics::*;
pub use text::*;
pub use wrap::*;
