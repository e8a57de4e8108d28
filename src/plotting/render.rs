//! Draws a [`Figure`] with plotters.
//!
//! The orchestrator only knows the [`RenderSurface`] trait; [`FileSurface`] is the surface
//! used by the command line and writes a PNG or SVG image.
use crate::plotting::figure::{Figure, LegendPosition};
use crate::plotting::settings::OutputFormat;
use log::info;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Cannot render to {path}: {message}")]
    Output { path: PathBuf, message: String },
}

fn draw_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Something that can display a figure.
pub trait RenderSurface {
    /// Forgets whatever was shown before.
    fn clear(&mut self);
    fn show(&mut self, figure: &Figure) -> Result<(), RenderError>;
}

/// Draws the figure on any plotters drawing area.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    figure: &Figure,
) -> Result<(), RenderError> {
    root.fill(&WHITE).map_err(draw_error)?;
    let (x_min, x_max) = figure.x_limits;
    let (y_min, y_max) = figure.y_limits;

    let mut builder = ChartBuilder::on(root);
    builder.margin(10).x_label_area_size(40).y_label_area_size(60);
    if !figure.title.is_empty() {
        builder.caption(&figure.title, ("sans-serif", 30));
    }
    let mut chart = builder
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(draw_error)?;

    {
        let mut mesh = chart.configure_mesh();
        if !figure.grid {
            mesh.disable_mesh();
        }
        mesh.x_desc(figure.x_label.as_str())
            .y_desc(figure.y_label.as_str())
            .draw()
            .map_err(draw_error)?;
    }

    for (col, curve) in figure.curves.iter().enumerate() {
        let segments = curve.visible_segments(y_min, y_max);
        // one series per curve so the legend gets exactly one entry, visible or not
        chart
            .draw_series(
                segments
                    .into_iter()
                    .map(|segment| PathElement::new(segment, Palette99::pick(col).stroke_width(2))),
            )
            .map_err(draw_error)?
            .label(curve.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], Palette99::pick(col).stroke_width(2))
            });
    }

    if let Some(position) = figure.legend {
        let position = match position {
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
        };
        chart
            .configure_series_labels()
            .position(position)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(draw_error)?;
    }
    root.present().map_err(draw_error)?;
    Ok(())
}

/// Writes every shown figure to one image file, replacing the previous image.
#[derive(Debug, Clone)]
pub struct FileSurface {
    pub path: PathBuf,
    pub size: (u32, u32),
    pub format: OutputFormat,
    rendered: Option<PathBuf>,
}

impl FileSurface {
    pub fn new(path: impl Into<PathBuf>, size: (u32, u32), format: OutputFormat) -> Self {
        FileSurface {
            path: path.into(),
            size,
            format,
            rendered: None,
        }
    }

    /// The image written by the last successful `show`, if it has not been cleared.
    pub fn rendered(&self) -> Option<&Path> {
        self.rendered.as_deref()
    }
}

impl RenderSurface for FileSurface {
    fn clear(&mut self) {
        self.rendered = None;
    }

    fn show(&mut self, figure: &Figure) -> Result<(), RenderError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                return Err(RenderError::Output {
                    path: self.path.clone(),
                    message: format!("directory {} does not exist", parent.display()),
                });
            }
        }
        match self.format {
            OutputFormat::Png => {
                let root = BitMapBackend::new(&self.path, self.size).into_drawing_area();
                draw_figure(&root, figure)?;
            }
            OutputFormat::Svg => {
                let root = SVGBackend::new(&self.path, self.size).into_drawing_area();
                draw_figure(&root, figure)?;
            }
        }
        info!(
            "{} curve(s) rendered to {}",
            figure.curves.len(),
            self.path.display()
        );
        self.rendered = Some(self.path.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;
    use tempfile::tempdir;

    fn sine_figure() -> Figure {
        let x = Array1::linspace(-5.0, 5.0, 200);
        let y = x.mapv(f64::sin);
        let mut figure = Figure::default();
        figure.plot(x, y, "sin(x)");
        figure.set_xlim(-5.0, 5.0);
        figure.set_ylim(-2.0, 2.0);
        figure.set_xlabel("x");
        figure.set_ylabel("y");
        figure.set_grid(true);
        figure.set_legend(LegendPosition::UpperRight);
        figure
    }

    #[test]
    fn test_missing_directory_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("plot.svg");
        let mut surface = FileSurface::new(&path, (400, 300), OutputFormat::Svg);
        let err = surface.show(&sine_figure()).unwrap_err();
        assert!(matches!(err, RenderError::Output { .. }));
        assert!(surface.rendered().is_none());
    }

    #[test]
    #[ignore = "text layout needs a system sans-serif font"]
    fn test_svg_is_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        let mut surface = FileSurface::new(&path, (400, 300), OutputFormat::Svg);
        surface.show(&sine_figure()).unwrap();
        assert_eq!(surface.rendered(), Some(path.as_path()));
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        surface.clear();
        assert!(surface.rendered().is_none());
    }

    #[test]
    #[ignore = "text layout needs a system sans-serif font"]
    fn test_png_is_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plot.png");
        let mut surface = FileSurface::new(&path, (400, 300), OutputFormat::Png);
        surface.show(&sine_figure()).unwrap();
        assert!(path.exists());
    }
}
