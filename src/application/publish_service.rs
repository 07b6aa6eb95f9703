// Publish service - Use case for building and syncing the demo plot page
use crate::application::sample_source::{take_points, SampleSource};
use crate::application::site::Site;
use crate::domain::card::{Card, CardBox, PlotCard};
use crate::domain::data_buffer::DataBuffer;
use crate::domain::page::{CardRef, Page};
use crate::domain::plot::{Mark, MarkKind, ScaleKind, Visualization};
use crate::infrastructure::config::{DemoSettings, MarkConfig};
use std::time::Duration;

#[derive(Clone)]
pub struct PlotPublishService {
    site: Site,
    settings: DemoSettings,
}

impl PlotPublishService {
    pub fn new(site: Site, settings: DemoSettings) -> Self {
        Self { site, settings }
    }

    /// Build the page with an empty plot card under the configured key
    pub fn build_page(&self) -> anyhow::Result<(Page, CardRef)> {
        let s = &self.settings;

        let data = DataBuffer::declare(&s.series.fields, s.samples as i64)?;
        let vis = Visualization::new(vec![mark_from_config(&s.mark)?])?;
        let card = PlotCard::new(CardBox::parse(&s.card_box)?, s.title.clone(), data, vis)?;

        let mut page = self.site.page(&s.route)?;
        let handle = page.add(s.key.clone(), Card::Plot(card))?;
        Ok((page, handle))
    }

    /// Fill the chart with fresh samples and sync the page once
    pub async fn publish(&self, source: &mut dyn SampleSource) -> anyhow::Result<(Page, CardRef)> {
        let (mut page, handle) = self.build_page()?;

        let points = take_points(source, self.settings.samples);
        page.set_data(&handle, points)?;

        self.site.sync(&page).await?;
        tracing::info!(
            "Published {} samples to {} [{}]",
            self.settings.samples,
            page.route,
            handle.key
        );

        Ok((page, handle))
    }

    /// Push one new sample into the chart and sync again
    pub async fn refresh(
        &self,
        page: &mut Page,
        handle: &CardRef,
        source: &mut dyn SampleSource,
    ) -> anyhow::Result<()> {
        let point = source.next_sample().into_point();
        page.push_data(handle, point)?;
        self.site.sync(page).await?;
        tracing::debug!("Refreshed {} [{}]", page.route, handle.key);
        Ok(())
    }

    /// Publish, then refresh `updates` times at the configured interval
    pub async fn run(&self, source: &mut dyn SampleSource) -> anyhow::Result<Page> {
        if self.settings.updates > 0 && self.settings.interval_ms == 0 {
            anyhow::bail!(
                "Refresh interval must be positive when {} updates are requested",
                self.settings.updates
            );
        }

        let (mut page, handle) = self.publish(source).await?;

        if self.settings.updates > 0 {
            let mut ticker = tokio::time::interval(Duration::from_millis(self.settings.interval_ms));
            // First tick completes immediately
            ticker.tick().await;

            for _ in 0..self.settings.updates {
                ticker.tick().await;
                self.refresh(&mut page, &handle, source).await?;
            }
        }

        Ok(page)
    }
}

fn mark_from_config(config: &MarkConfig) -> anyhow::Result<Mark> {
    let kind: MarkKind = config.kind.parse()?;
    let mut mark = Mark::new(kind).x(config.x.clone()).y(config.y.clone());

    if let Some(scale) = &config.x_scale {
        mark = mark.x_scale(scale.parse::<ScaleKind>()?);
    }
    if let Some(scale) = &config.y_scale {
        mark = mark.y_scale(scale.parse::<ScaleKind>()?);
    }
    if let Some(y_min) = config.y_min {
        mark = mark.y_min(y_min);
    }
    if let Some(y_max) = config.y_max {
        mark = mark.y_max(y_max);
    }
    if let Some(color) = &config.color {
        mark = mark.color(color.clone());
    }
    if let Some(curve) = &config.curve {
        mark = mark.curve(curve.clone());
    }
    if let Some(label) = &config.label {
        mark = mark.label(label.clone());
    }
    if let Some(color) = &config.label_fill_color {
        mark = mark.label_fill_color(color.clone());
    }
    if let Some(color) = &config.label_stroke_color {
        mark = mark.label_stroke_color(color.clone());
    }
    if let Some(size) = config.label_stroke_size {
        mark = mark.label_stroke_size(size);
    }

    Ok(mark)
}
