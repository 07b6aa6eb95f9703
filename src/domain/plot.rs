// Plot visualization domain models
use super::data_buffer::DataBuffer;
use super::error::PageError;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    Line,
    Area,
    Point,
    Interval,
    Path,
}

impl MarkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkKind::Line => "line",
            MarkKind::Area => "area",
            MarkKind::Point => "point",
            MarkKind::Interval => "interval",
            MarkKind::Path => "path",
        }
    }
}

impl FromStr for MarkKind {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(MarkKind::Line),
            "area" => Ok(MarkKind::Area),
            "point" => Ok(MarkKind::Point),
            "interval" => Ok(MarkKind::Interval),
            "path" => Ok(MarkKind::Path),
            other => Err(PageError::UnknownMarkKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    Linear,
    Time,
    Category,
    Log,
}

impl ScaleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleKind::Linear => "linear",
            ScaleKind::Time => "time",
            ScaleKind::Category => "category",
            ScaleKind::Log => "log",
        }
    }
}

impl FromStr for ScaleKind {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(ScaleKind::Linear),
            "time" => Ok(ScaleKind::Time),
            "category" => Ok(ScaleKind::Category),
            "log" => Ok(ScaleKind::Log),
            other => Err(PageError::UnknownScale(other.to_string())),
        }
    }
}

/// A mark attribute that is either bound to a data field (`=price`) or literal
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRef(String);

impl FieldRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Name of the bound field, or `None` for a literal
    pub fn field(&self) -> Option<&str> {
        self.0.strip_prefix('=').filter(|f| !f.is_empty())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub kind: MarkKind,
    pub x: Option<FieldRef>,
    pub x_scale: Option<ScaleKind>,
    pub y: Option<FieldRef>,
    pub y_scale: Option<ScaleKind>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub color: Option<String>,
    pub curve: Option<String>,
    pub label: Option<String>,
    pub label_fill_color: Option<String>,
    pub label_stroke_color: Option<String>,
    pub label_stroke_size: Option<f64>,
}

impl Mark {
    pub fn new(kind: MarkKind) -> Self {
        Self {
            kind,
            x: None,
            x_scale: None,
            y: None,
            y_scale: None,
            y_min: None,
            y_max: None,
            color: None,
            curve: None,
            label: None,
            label_fill_color: None,
            label_stroke_color: None,
            label_stroke_size: None,
        }
    }

    pub fn x(mut self, x: impl Into<String>) -> Self {
        self.x = Some(FieldRef::new(x));
        self
    }

    pub fn x_scale(mut self, scale: ScaleKind) -> Self {
        self.x_scale = Some(scale);
        self
    }

    pub fn y(mut self, y: impl Into<String>) -> Self {
        self.y = Some(FieldRef::new(y));
        self
    }

    pub fn y_scale(mut self, scale: ScaleKind) -> Self {
        self.y_scale = Some(scale);
        self
    }

    pub fn y_min(mut self, y_min: f64) -> Self {
        self.y_min = Some(y_min);
        self
    }

    pub fn y_max(mut self, y_max: f64) -> Self {
        self.y_max = Some(y_max);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn curve(mut self, curve: impl Into<String>) -> Self {
        self.curve = Some(curve.into());
        self
    }

    /// Label template, e.g. `=${{intl price minimum_fraction_digits=2}}`
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label_fill_color(mut self, color: impl Into<String>) -> Self {
        self.label_fill_color = Some(color.into());
        self
    }

    pub fn label_stroke_color(mut self, color: impl Into<String>) -> Self {
        self.label_stroke_color = Some(color.into());
        self
    }

    pub fn label_stroke_size(mut self, size: f64) -> Self {
        self.label_stroke_size = Some(size);
        self
    }

    fn bound_fields(&self) -> impl Iterator<Item = &str> {
        [&self.x, &self.y]
            .into_iter()
            .filter_map(|r| r.as_ref().and_then(FieldRef::field))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Visualization {
    pub marks: Vec<Mark>,
}

impl Visualization {
    pub fn new(marks: Vec<Mark>) -> Result<Self, PageError> {
        if marks.is_empty() {
            return Err(PageError::EmptyVisualization);
        }
        Ok(Self { marks })
    }

    /// Field names bound by any mark but not declared by the buffer
    pub fn unbound_fields(&self, buffer: &DataBuffer) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for field in self.marks.iter().flat_map(Mark::bound_fields) {
            if !buffer.has_field(field) && !missing.iter().any(|m| m == field) {
                missing.push(field.to_string());
            }
        }
        missing
    }
}
