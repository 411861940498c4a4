//! pulldown-plot: Volcano plot descriptions.
//!
//! Plots are built as plain data ([`VolcanoPlot`]) and serialized to a
//! Plotly figure (`{ data, layout }`) for the browser to draw.

pub mod figure;
pub mod volcano;

pub use figure::Figure;
pub use volcano::{
    hover_label, render_volcano, Guide, Orientation, PointLayer, VolcanoPlot, HIGHLIGHT_COLOR,
    SIGNIFICANCE_GUIDE,
};
