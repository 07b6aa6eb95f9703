// Card domain models
use super::data_buffer::DataBuffer;
use super::error::PageError;
use super::plot::Visualization;
use std::collections::BTreeMap;

/// Values that a card's format templates (`title`, `value`, ...) resolve against
pub type Record = BTreeMap<String, serde_json::Value>;

/// Layout box: column, row, width and height in grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardBox {
    pub col: u32,
    pub row: u32,
    pub width: u32,
    pub height: u32,
}

impl CardBox {
    /// Parse a box written as `"1 1 4 5"`
    pub fn parse(raw: &str) -> Result<Self, PageError> {
        let invalid = || PageError::InvalidBox(raw.to_string());

        let parts = raw
            .split_whitespace()
            .map(|p| p.parse::<u32>().ok().filter(|n| *n > 0))
            .collect::<Option<Vec<u32>>>()
            .ok_or_else(invalid)?;

        match parts.as_slice() {
            [col, row, width, height] => Ok(Self {
                col: *col,
                row: *row,
                width: *width,
                height: *height,
            }),
            _ => Err(invalid()),
        }
    }
}

impl std::fmt::Display for CardBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.col, self.row, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotCard {
    pub card_box: CardBox,
    pub title: String,
    pub data: DataBuffer,
    pub vis: Visualization,
}

impl PlotCard {
    pub fn new(
        card_box: CardBox,
        title: String,
        data: DataBuffer,
        vis: Visualization,
    ) -> Result<Self, PageError> {
        if let Some(field) = vis.unbound_fields(&data).into_iter().next() {
            return Err(PageError::UnboundField(field));
        }

        Ok(Self {
            card_box,
            title,
            data,
            vis,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicroPlotKind {
    Area,
    Interval,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmallSeriesStatCard {
    pub card_box: CardBox,
    pub title: String,
    pub value: String,
    pub plot_data: DataBuffer,
    pub plot_value: String,
    pub plot_zero_value: Option<f64>,
    pub plot_category: Option<String>,
    pub plot_type: MicroPlotKind,
    pub plot_curve: Option<String>,
    pub plot_color: Option<String>,
    pub data: Option<Record>,
}

impl SmallSeriesStatCard {
    /// Build a card whose micro plot reads `plot_value` (and `plot_category`
    /// for interval plots) from `plot_data`
    pub fn new(
        card_box: CardBox,
        title: String,
        value: String,
        plot_data: DataBuffer,
        plot_value: String,
        plot_type: MicroPlotKind,
        plot_category: Option<String>,
    ) -> Result<Self, PageError> {
        if !plot_data.has_field(&plot_value) {
            return Err(PageError::UnboundField(plot_value));
        }

        match (&plot_type, &plot_category) {
            (MicroPlotKind::Interval, None) => return Err(PageError::MissingPlotCategory),
            (_, Some(category)) if !plot_data.has_field(category) => {
                return Err(PageError::UnboundField(category.clone()));
            }
            _ => {}
        }

        Ok(Self {
            card_box,
            title,
            value,
            plot_data,
            plot_value,
            plot_zero_value: None,
            plot_category,
            plot_type,
            plot_curve: None,
            plot_color: None,
            data: None,
        })
    }

    pub fn zero_value(mut self, zero: f64) -> Self {
        self.plot_zero_value = Some(zero);
        self
    }

    pub fn curve(mut self, curve: impl Into<String>) -> Self {
        self.plot_curve = Some(curve.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.plot_color = Some(color.into());
        self
    }

    pub fn data(mut self, data: Record) -> Self {
        self.data = Some(data);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameSource {
    Path(String),
    Content(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Card {
    Plot(PlotCard),
    LargeStat {
        card_box: CardBox,
        title: String,
        value: String,
        aux_value: String,
        caption: String,
        data: Option<Record>,
    },
    SmallSeriesStat(SmallSeriesStatCard),
    Frame {
        card_box: CardBox,
        title: String,
        source: FrameSource,
    },
}

impl Card {
    /// Build a frame card from an optional path and optional inline content.
    ///
    /// Exactly one of the two must be given. A renderer that receives both
    /// would show `path` and ignore `content`; here that combination is
    /// rejected instead of silently dropping the content.
    pub fn frame(
        card_box: CardBox,
        title: String,
        path: Option<String>,
        content: Option<String>,
    ) -> Result<Self, PageError> {
        let source = match (path, content) {
            (Some(path), None) => FrameSource::Path(path),
            (None, Some(content)) => FrameSource::Content(content),
            _ => return Err(PageError::FrameSource),
        };
        Ok(Card::Frame {
            card_box,
            title,
            source,
        })
    }

    pub fn data(&self) -> Option<&DataBuffer> {
        match self {
            Card::Plot(plot) => Some(&plot.data),
            Card::SmallSeriesStat(stat) => Some(&stat.plot_data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut DataBuffer> {
        match self {
            Card::Plot(plot) => Some(&mut plot.data),
            Card::SmallSeriesStat(stat) => Some(&mut stat.plot_data),
            _ => None,
        }
    }
}
