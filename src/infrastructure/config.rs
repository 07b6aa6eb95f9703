use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct WaveConfig {
    pub server: ServerSettings,
    pub demo: DemoSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub address: String,
    pub access_key_id: String,
    pub access_key_secret: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DemoSettings {
    pub route: String,
    pub key: String,
    #[serde(rename = "box")]
    pub card_box: String,
    pub title: String,
    pub samples: usize,
    pub seed: Option<u64>,
    #[serde(default)]
    pub updates: u32,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    pub mark: MarkConfig,
    #[serde(default)]
    pub series: SeriesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MarkConfig {
    pub kind: String,
    pub x: String,
    pub y: String,
    pub x_scale: Option<String>,
    pub y_scale: Option<String>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub color: Option<String>,
    pub curve: Option<String>,
    pub label: Option<String>,
    pub label_fill_color: Option<String>,
    pub label_stroke_color: Option<String>,
    pub label_stroke_size: Option<f64>,
}

/// Shape of the synthetic series feeding the chart
#[derive(Debug, Deserialize, Clone)]
pub struct SeriesConfig {
    #[serde(default = "default_fields")]
    pub fields: String,
    #[serde(default)]
    pub min: f64,
    #[serde(default = "default_max")]
    pub max: f64,
    #[serde(default = "default_variation")]
    pub variation: f64,
    pub start_value: Option<f64>,
    /// RFC 3339 start time; defaults to now
    pub start: Option<String>,
    #[serde(default = "default_step_secs")]
    pub step_secs: i64,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            fields: default_fields(),
            min: 0.0,
            max: default_max(),
            variation: default_variation(),
            start_value: None,
            start: None,
            step_secs: default_step_secs(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_interval_ms() -> u64 {
    1_000
}

fn default_fields() -> String {
    "date price".to_string()
}

fn default_max() -> f64 {
    100.0
}

fn default_variation() -> f64 {
    10.0
}

fn default_step_secs() -> i64 {
    86_400
}

/// Load `config/wave.toml`, with `WAVE__SECTION__KEY` environment overrides
pub fn load_wave_config() -> anyhow::Result<WaveConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/wave"))
        .add_source(
            config::Environment::with_prefix("WAVE")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
[server]
address = "http://localhost:10101"
access_key_id = "access_key_id"
access_key_secret = "access_key_secret"

[demo]
route = "/demo"
key = "example"
box = "1 1 4 5"
title = "Labels, less messy"
samples = 50

[demo.mark]
kind = "line"
x_scale = "time"
x = "=date"
y = "=price"
y_min = 0
label = "=${{intl price minimum_fraction_digits=2 maximum_fraction_digits=2}}"
label_fill_color = "rgba(0,0,0,0.65)"
label_stroke_color = "#fff"
label_stroke_size = 2
"##;

    fn parse(source: &str) -> WaveConfig {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_parse_demo_config() {
        let cfg = parse(SAMPLE);

        assert_eq!(cfg.server.timeout_ms, 10_000);
        assert_eq!(cfg.demo.card_box, "1 1 4 5");
        assert_eq!(cfg.demo.samples, 50);
        assert_eq!(cfg.demo.updates, 0);
        assert_eq!(cfg.demo.mark.kind, "line");
        assert_eq!(cfg.demo.mark.y_min, Some(0.0));
        assert_eq!(cfg.demo.mark.label_stroke_color.as_deref(), Some("#fff"));
        assert_eq!(cfg.demo.series.fields, "date price");
        assert_eq!(cfg.demo.series.step_secs, 86_400);
    }
}
