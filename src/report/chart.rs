//! Line chart of recent publication/patent activity, rendered to an RGB bitmap.

use super::fonts::CHART_FONT;
use crate::dataset::SeriesPoint;
use crate::error::{Result, TechTrendsError};
use image::{DynamicImage, ImageOutputFormat, RgbImage};
use plotters::prelude::*;
use std::io::Cursor;

pub const CHART_WIDTH: u32 = 800;
pub const CHART_HEIGHT: u32 = 440;

const BACKGROUND: RGBColor = RGBColor(0xf8, 0xf9, 0xfa);
const PUBLICATIONS: RGBColor = RGBColor(0x00, 0xcc, 0x96);
const PATENTS: RGBColor = RGBColor(0xff, 0x4b, 0x4b);

fn chart_err<E: std::fmt::Display>(err: E) -> TechTrendsError {
    TechTrendsError::Chart {
        message: err.to_string(),
    }
}

fn value_bounds(points: &[SeriesPoint]) -> (f64, f64) {
    let (lo, hi) = points
        .iter()
        .flat_map(|p| [p.publications, p.patents])
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((hi - lo) * 0.08).max(1.0);
    (lo - pad, hi + pad)
}

/// Draw both series into an image; the caller must have loaded report fonts first
pub fn render(title: &str, points: &[SeriesPoint]) -> Result<DynamicImage> {
    if points.is_empty() {
        return Err(TechTrendsError::Chart {
            message: "no data points to plot".into(),
        });
    }

    let mut buffer = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&BACKGROUND).map_err(chart_err)?;

        let (y_min, y_max) = value_bounds(points);
        let x_max = (points.len().saturating_sub(1)).max(1) as f64;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, (CHART_FONT, 20))
            .margin(16)
            .x_label_area_size(38)
            .y_label_area_size(48)
            .build_cartesian_2d(0f64..x_max, y_min..y_max)
            .map_err(chart_err)?;

        let label_for = |x: &f64| {
            let idx = x.round().max(0.0) as usize;
            points
                .get(idx)
                .map(|p| p.date.format("%Y-%m").to_string())
                .unwrap_or_default()
        };

        chart
            .configure_mesh()
            .x_desc("Год")
            .y_desc("Количество")
            .x_labels(8)
            .x_label_formatter(&label_for)
            .label_style((CHART_FONT, 12))
            .axis_desc_style((CHART_FONT, 14))
            .light_line_style(BLACK.mix(0.05))
            .bold_line_style(BLACK.mix(0.15))
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(LineSeries::new(
                points
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (i as f64, p.publications)),
                PUBLICATIONS.stroke_width(2),
            ))
            .map_err(chart_err)?
            .label("Публикации")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], PUBLICATIONS.stroke_width(2)));

        chart
            .draw_series(LineSeries::new(
                points.iter().enumerate().map(|(i, p)| (i as f64, p.patents)),
                PATENTS.stroke_width(2),
            ))
            .map_err(chart_err)?
            .label("Патенты")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], PATENTS.stroke_width(2)));

        chart
            .configure_series_labels()
            .label_font((CHART_FONT, 12))
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK.mix(0.3))
            .position(SeriesLabelPosition::UpperLeft)
            .draw()
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }

    let image = RgbImage::from_raw(CHART_WIDTH, CHART_HEIGHT, buffer).ok_or_else(|| {
        TechTrendsError::Chart {
            message: "bitmap size mismatch".into(),
        }
    })?;
    Ok(DynamicImage::ImageRgb8(image))
}

pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageOutputFormat::Png)
        .map_err(chart_err)?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn bounds_are_padded() {
        let points = [SeriesPoint {
            date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            publications: 100.0,
            patents: 50.0,
        }];
        let (lo, hi) = value_bounds(&points);
        assert!(lo < 50.0);
        assert!(hi > 100.0);
        assert_eq!(value_bounds(&[]), (0.0, 1.0));
    }

    #[test]
    fn empty_series_is_an_error() {
        assert!(render("empty", &[]).is_err());
    }
}
