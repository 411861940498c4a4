//! Volcano plot: LFC against -log10(p), hits colored, genes of interest
//! highlighted on top.

use std::collections::HashSet;

use pulldown_common::{Record, LFC_THRESHOLD};

use crate::figure::{
    Axis, Figure, Layout, Margin, Marker, MarkerColor, MarkerLine, Shape, ShapeLine, Trace,
};

/// -log10(0.05), rounded the way the panel draws it.
pub const SIGNIFICANCE_GUIDE: f64 = 1.3;

pub const HIGHLIGHT_COLOR: &str = "#d47500";
const HIGHLIGHT_SIZE: f64 = 20.0;
const HIGHLIGHT_BORDER: &str = "black";

const GUIDE_COLOR: &str = "grey";
const GUIDE_WIDTH: f64 = 0.5;

/// Hover labels show p-values rounded to this many decimals.
const PVAL_DECIMALS: i32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Dashed threshold line spanning the whole plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guide {
    pub orientation: Orientation,
    pub at: f64,
}

impl Guide {
    fn shape(&self) -> Shape {
        let line = ShapeLine { color: GUIDE_COLOR, width: GUIDE_WIDTH, dash: "dash" };
        match self.orientation {
            Orientation::Horizontal => Shape {
                kind: "line",
                xref: "x domain",
                yref: "y",
                x0: 0.0,
                x1: 1.0,
                y0: self.at,
                y1: self.at,
                layer: "below",
                line,
            },
            Orientation::Vertical => Shape {
                kind: "line",
                xref: "x",
                yref: "y domain",
                x0: self.at,
                x1: self.at,
                y0: 0.0,
                y1: 1.0,
                layer: "below",
                line,
            },
        }
    }
}

/// One scatter layer. All vectors share the row order of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLayer {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub text: Vec<String>,
    /// Normalized identifier per point; sent back on click.
    pub customdata: Vec<String>,
    pub marker: Marker,
}

impl PointLayer {
    fn from_rows(rows: &[&Record], marker: Marker) -> Self {
        Self {
            x: rows.iter().map(|r| r.lfc).collect(),
            y: rows.iter().map(|r| r.neg_log10_pval).collect(),
            text: rows.iter().map(|r| hover_label(r)).collect(),
            customdata: rows.iter().map(|r| r.uniprot.clone()).collect(),
            marker,
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    fn trace(&self) -> Trace<'_> {
        Trace {
            kind: "scatter",
            mode: "markers",
            hoverinfo: "text",
            x: &self.x,
            y: &self.y,
            text: &self.text,
            customdata: &self.customdata,
            marker: &self.marker,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolcanoPlot {
    pub base: PointLayer,
    pub guides: Vec<Guide>,
    pub overlay: Option<PointLayer>,
}

impl VolcanoPlot {
    /// Plotly figure: base trace, then the overlay if any; guides as shapes.
    pub fn figure(&self) -> Figure<'_> {
        let mut data = vec![self.base.trace()];
        if let Some(overlay) = &self.overlay {
            data.push(overlay.trace());
        }
        Figure {
            data,
            layout: Layout {
                showlegend: false,
                hovermode: "closest",
                height: 500,
                margin: Margin { l: 10, b: 0, t: 20, r: 5 },
                xaxis: Axis::titled("LFC"),
                yaxis: Axis::titled("-log10 (pval)"),
                shapes: self.guides.iter().map(Guide::shape).collect(),
            },
        }
    }
}

/// `Gene: g<br>Uniprot: id<br>LFC: x<br>pval: p`
pub fn hover_label(record: &Record) -> String {
    format!(
        "Gene: {}<br>Uniprot: {}<br>LFC: {:?}<br>pval: {}",
        record.gene,
        record.uniprot_raw,
        record.lfc,
        round_to(record.pval, PVAL_DECIMALS)
    )
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

fn threshold_guides() -> Vec<Guide> {
    vec![
        Guide { orientation: Orientation::Horizontal, at: SIGNIFICANCE_GUIDE },
        Guide { orientation: Orientation::Vertical, at: -LFC_THRESHOLD },
        Guide { orientation: Orientation::Vertical, at: LFC_THRESHOLD },
    ]
}

/// Build the plot for one tissue/bait panel.
///
/// `rows` should already be restricted to the panel's tissue and bait.
/// Genes of interest that match no row are ignored; if none match, there
/// is no overlay.
pub fn render_volcano(rows: &[&Record], genes_of_interest: &[String]) -> VolcanoPlot {
    let base = PointLayer::from_rows(
        rows,
        Marker {
            color: MarkerColor::PerPoint(rows.iter().map(|r| r.color).collect()),
            size: None,
            line: None,
        },
    );

    let wanted: HashSet<&str> = genes_of_interest
        .iter()
        .map(String::as_str)
        .filter(|g| !g.is_empty())
        .collect();

    let overlay = if wanted.is_empty() {
        None
    } else {
        let picked: Vec<&Record> = rows
            .iter()
            .copied()
            .filter(|r| wanted.contains(r.gene.as_str()))
            .collect();
        (!picked.is_empty()).then(|| {
            PointLayer::from_rows(
                &picked,
                Marker {
                    color: MarkerColor::Uniform(HIGHLIGHT_COLOR),
                    size: Some(HIGHLIGHT_SIZE),
                    line: Some(MarkerLine { color: HIGHLIGHT_BORDER, width: 1.0 }),
                },
            )
        })
    };

    VolcanoPlot { base, guides: threshold_guides(), overlay }
}
