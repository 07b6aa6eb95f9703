// Mapper to convert domain models to the dashboard wire format
use crate::domain::card::{Card, FrameSource, MicroPlotKind, PlotCard, Record, SmallSeriesStatCard};
use crate::domain::data_buffer::{BufferKind, DataBuffer};
use crate::domain::page::Page;
use crate::domain::plot::{Mark, Visualization};
use chrono::SecondsFormat;
use serde::Serialize;

/// Body of a page sync: a reset followed by one put per card
#[derive(Debug, Serialize)]
pub struct PagePatch {
    pub d: Vec<PageOp>,
}

#[derive(Debug, Serialize)]
pub struct PageOp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<CardPayload>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum CardPayload {
    Plot {
        #[serde(rename = "box")]
        card_box: String,
        title: String,
        data: BufferPayload,
        vis: VisPayload,
    },
    LargeStat {
        #[serde(rename = "box")]
        card_box: String,
        title: String,
        value: String,
        aux_value: String,
        caption: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<Record>,
    },
    SmallSeriesStat {
        #[serde(rename = "box")]
        card_box: String,
        title: String,
        value: String,
        plot_data: BufferPayload,
        plot_value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        plot_zero_value: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        plot_category: Option<String>,
        plot_type: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        plot_curve: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        plot_color: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<Record>,
    },
    Frame {
        #[serde(rename = "box")]
        card_box: String,
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
}

#[derive(Debug, Serialize)]
pub enum BufferPayload {
    #[serde(rename = "f")]
    Fixed(BufferBody),
    #[serde(rename = "c")]
    Cyclic(BufferBody),
    #[serde(rename = "m")]
    Map(BufferBody),
}

#[derive(Debug, Serialize)]
pub struct BufferBody {
    pub f: Vec<String>,
    pub n: usize,
    pub d: Vec<(String, f64)>,
}

#[derive(Debug, Serialize)]
pub struct VisPayload {
    pub marks: Vec<MarkPayload>,
}

#[derive(Debug, Serialize)]
pub struct MarkPayload {
    pub mark: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_scale: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_scale: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_stroke_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_stroke_size: Option<f64>,
}

pub fn page_to_patch(page: &Page) -> PagePatch {
    let reset = PageOp { k: None, d: None };
    let puts = page.cards().map(|(key, card)| PageOp {
        k: Some(key.to_string()),
        d: Some(card_to_payload(card)),
    });

    PagePatch {
        d: std::iter::once(reset).chain(puts).collect(),
    }
}

fn card_to_payload(card: &Card) -> CardPayload {
    match card {
        Card::Plot(plot) => plot_to_payload(plot),
        Card::LargeStat {
            card_box,
            title,
            value,
            aux_value,
            caption,
            data,
        } => CardPayload::LargeStat {
            card_box: card_box.to_string(),
            title: title.clone(),
            value: value.clone(),
            aux_value: aux_value.clone(),
            caption: caption.clone(),
            data: data.clone(),
        },
        Card::SmallSeriesStat(stat) => small_series_stat_to_payload(stat),
        Card::Frame {
            card_box,
            title,
            source,
        } => {
            let (path, content) = match source {
                FrameSource::Path(p) => (Some(p.clone()), None),
                FrameSource::Content(c) => (None, Some(c.clone())),
            };
            CardPayload::Frame {
                card_box: card_box.to_string(),
                title: title.clone(),
                path,
                content,
            }
        }
    }
}

fn plot_to_payload(plot: &PlotCard) -> CardPayload {
    CardPayload::Plot {
        card_box: plot.card_box.to_string(),
        title: plot.title.clone(),
        data: buffer_to_payload(&plot.data),
        vis: vis_to_payload(&plot.vis),
    }
}

fn small_series_stat_to_payload(stat: &SmallSeriesStatCard) -> CardPayload {
    let plot_type = match stat.plot_type {
        MicroPlotKind::Area => "area",
        MicroPlotKind::Interval => "interval",
    };

    CardPayload::SmallSeriesStat {
        card_box: stat.card_box.to_string(),
        title: stat.title.clone(),
        value: stat.value.clone(),
        plot_data: buffer_to_payload(&stat.plot_data),
        plot_value: stat.plot_value.clone(),
        plot_zero_value: stat.plot_zero_value,
        plot_category: stat.plot_category.clone(),
        plot_type,
        plot_curve: stat.plot_curve.clone(),
        plot_color: stat.plot_color.clone(),
        data: stat.data.clone(),
    }
}

fn buffer_to_payload(buffer: &DataBuffer) -> BufferPayload {
    let body = BufferBody {
        f: buffer.fields.clone(),
        n: buffer.size,
        d: buffer
            .rows
            .iter()
            .map(|p| {
                (
                    p.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
                    p.value,
                )
            })
            .collect(),
    };

    match buffer.kind {
        BufferKind::Fixed => BufferPayload::Fixed(body),
        BufferKind::Cyclic => BufferPayload::Cyclic(body),
        BufferKind::Map => BufferPayload::Map(body),
    }
}

fn vis_to_payload(vis: &Visualization) -> VisPayload {
    VisPayload {
        marks: vis.marks.iter().map(mark_to_payload).collect(),
    }
}

fn mark_to_payload(mark: &Mark) -> MarkPayload {
    MarkPayload {
        mark: mark.kind.as_str(),
        x: mark.x.as_ref().map(|r| r.as_str().to_string()),
        x_scale: mark.x_scale.map(|s| s.as_str()),
        y: mark.y.as_ref().map(|r| r.as_str().to_string()),
        y_scale: mark.y_scale.map(|s| s.as_str()),
        y_min: mark.y_min,
        y_max: mark.y_max,
        color: mark.color.clone(),
        curve: mark.curve.clone(),
        label: mark.label.clone(),
        label_fill_color: mark.label_fill_color.clone(),
        label_stroke_color: mark.label_stroke_color.clone(),
        label_stroke_size: mark.label_stroke_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::CardBox;
    use crate::domain::plot::{MarkKind, ScaleKind};
    use crate::domain::sample::DataPoint;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn labelled_page() -> Page {
        let mut data = DataBuffer::declare("date price", 50).unwrap();
        let t0 = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        data.replace(vec![DataPoint::new(t0, 10.0)]).unwrap();

        let mark = Mark::new(MarkKind::Line)
            .x_scale(ScaleKind::Time)
            .x("=date")
            .y("=price")
            .y_min(0.0)
            .label("=${{intl price minimum_fraction_digits=2 maximum_fraction_digits=2}}")
            .label_fill_color("rgba(0,0,0,0.65)")
            .label_stroke_color("#fff")
            .label_stroke_size(2.0);
        let vis = Visualization::new(vec![mark]).unwrap();
        let card = PlotCard::new(
            CardBox::parse("1 1 4 5").unwrap(),
            "Labels, less messy".to_string(),
            data,
            vis,
        )
        .unwrap();

        let mut page = Page::new("/demo").unwrap();
        page.add("example", Card::Plot(card)).unwrap();
        page
    }

    #[test]
    fn test_plot_card_payload() {
        let value = serde_json::to_value(page_to_patch(&labelled_page())).unwrap();

        assert_eq!(
            value,
            json!({
                "d": [
                    {},
                    {
                        "k": "example",
                        "d": {
                            "view": "plot",
                            "box": "1 1 4 5",
                            "title": "Labels, less messy",
                            "data": {
                                "f": {
                                    "f": ["date", "price"],
                                    "n": 50,
                                    "d": [["2020-01-01T00:00:00Z", 10.0]]
                                }
                            },
                            "vis": {
                                "marks": [{
                                    "mark": "line",
                                    "x": "=date",
                                    "x_scale": "time",
                                    "y": "=price",
                                    "y_min": 0.0,
                                    "label": "=${{intl price minimum_fraction_digits=2 maximum_fraction_digits=2}}",
                                    "label_fill_color": "rgba(0,0,0,0.65)",
                                    "label_stroke_color": "#fff",
                                    "label_stroke_size": 2.0
                                }]
                            }
                        }
                    }
                ]
            })
        );
    }

    #[test]
    fn test_empty_page_is_reset_only() {
        let page = Page::new("/empty").unwrap();
        let value = serde_json::to_value(page_to_patch(&page)).unwrap();
        assert_eq!(value, json!({ "d": [{}] }));
    }

    #[test]
    fn test_other_card_views() {
        let mut page = Page::new("/stats").unwrap();
        let b = CardBox::parse("1 1 2 2").unwrap();
        page.add(
            "big",
            Card::LargeStat {
                card_box: b,
                title: "Price".into(),
                value: "$12.00".into(),
                aux_value: "+3%".into(),
                caption: "since open".into(),
                data: Some(Record::from([(
                    "change".to_string(),
                    json!(0.03),
                )])),
            },
        )
        .unwrap();
        page.add(
            "small",
            Card::SmallSeriesStat(
                SmallSeriesStatCard::new(
                    b,
                    "Trend".into(),
                    "12".into(),
                    DataBuffer::declare("date price", -10).unwrap(),
                    "price".into(),
                    MicroPlotKind::Interval,
                    Some("date".into()),
                )
                .unwrap()
                .zero_value(0.0)
                .color("$red"),
            ),
        )
        .unwrap();
        page.add("doc", Card::frame(b, "Docs".into(), Some("/doc.html".into()), None).unwrap())
            .unwrap();

        let value = serde_json::to_value(page_to_patch(&page)).unwrap();
        let ops = value["d"].as_array().unwrap();

        assert_eq!(ops[1]["d"]["view"], "large_stat");
        assert_eq!(ops[1]["d"]["aux_value"], "+3%");
        assert_eq!(ops[2]["d"]["view"], "small_series_stat");
        assert_eq!(ops[2]["d"]["plot_type"], "interval");
        assert_eq!(ops[2]["d"]["plot_data"]["c"]["n"], 10);
        assert_eq!(ops[1]["d"]["data"], json!({ "change": 0.03 }));
        assert_eq!(ops[2]["d"]["plot_category"], "date");
        assert_eq!(ops[2]["d"]["plot_color"], "$red");
        assert!(ops[2]["d"].get("data").is_none());
        assert_eq!(ops[3]["d"]["view"], "frame");
        assert_eq!(ops[3]["d"]["path"], "/doc.html");
        assert!(ops[3]["d"].get("content").is_none());
    }
}
