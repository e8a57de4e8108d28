//! One plot attempt: validate the form, parse and evaluate the formulas, build the figure
//! and hand it to a rendering surface.
use crate::plotting::evaluator::{FormulaEvalError, function_value, sample_grid};
use crate::plotting::figure::{Figure, LegendPosition};
use crate::plotting::form::PlotForm;
use crate::plotting::formula_list::formula_list;
use crate::plotting::formula_parser::{FormulaParseError, formula_parse};
use crate::plotting::range_validator::RangeError;
use crate::plotting::render::{RenderError, RenderSurface};
use crate::plotting::settings::PlotSettings;
use log::{info, warn};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use thiserror::Error;

/// Everything that can go wrong in a plot attempt. The `Display` text is what the user
/// sees in the error slot.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlotError {
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Parse(#[from] FormulaParseError),
    #[error(transparent)]
    Eval(#[from] FormulaEvalError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Outcome of a plot attempt that reached the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotReport {
    pub figure: Figure,
    /// parse and per-curve evaluation errors, in the order they happened
    pub errors: Vec<PlotError>,
}

impl PlotReport {
    /// Text of the error slot after this attempt: the last recorded error, or empty.
    pub fn error_message(&self) -> String {
        self.errors
            .last()
            .map(|e| e.to_string())
            .unwrap_or_default()
    }
}

#[derive(Tabled)]
struct CurveSummary {
    #[tabled(rename = "formula")]
    label: String,
    points: usize,
    #[tabled(rename = "y min")]
    y_min: String,
    #[tabled(rename = "y max")]
    y_max: String,
}

fn summary_table(figure: &Figure) -> String {
    let rows: Vec<CurveSummary> = figure
        .curves
        .iter()
        .map(|curve| {
            let finite = curve.y.iter().copied().filter(|y| y.is_finite());
            let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
                (lo.min(y), hi.max(y))
            });
            let show = |v: f64| {
                if v.is_finite() {
                    format!("{:.4}", v)
                } else {
                    "-".to_string()
                }
            };
            CurveSummary {
                label: curve.label.clone(),
                points: curve.x.len(),
                y_min: show(lo),
                y_max: show(hi),
            }
        })
        .collect();
    let mut table = Table::new(&rows);
    table.with(Style::modern_rounded());
    table.to_string()
}

/// Runs one plot attempt against the current form.
///
/// A range error stops before anything is drawn. A parse error empties the batch but the
/// figure with its axes is still shown. An evaluation error only drops its own curve.
///
/// ```
/// use mathplot::plotting::form::PlotForm;
/// use mathplot::plotting::figure::Figure;
/// use mathplot::plotting::plot_driver::plot_graph;
/// use mathplot::plotting::render::{RenderError, RenderSurface};
/// use mathplot::plotting::settings::PlotSettings;
///
/// #[derive(Default)]
/// struct Screen(Option<Figure>);
/// impl RenderSurface for Screen {
///     fn clear(&mut self) { self.0 = None; }
///     fn show(&mut self, figure: &Figure) -> Result<(), RenderError> {
///         self.0 = Some(figure.clone());
///         Ok(())
///     }
/// }
///
/// let form = PlotForm::new("x^2; sin(x)");
/// let mut screen = Screen::default();
/// let report = plot_graph(&form, &PlotSettings::default(), &mut screen).unwrap();
/// assert_eq!(report.figure.curves.len(), 2);
/// assert_eq!(report.error_message(), "");
/// ```
pub fn plot_graph<S: RenderSurface + ?Sized>(
    form: &PlotForm,
    settings: &PlotSettings,
    surface: &mut S,
) -> Result<PlotReport, PlotError> {
    let range = form.axis_range().inspect_err(|e| warn!("{}", e))?;
    surface.clear();
    let grid = sample_grid(&range, settings.samples());
    info!(
        "plotting on [{}, {}] with {} samples",
        range.x_min,
        range.x_max,
        grid.len()
    );

    let mut figure = Figure::default();
    let mut errors: Vec<PlotError> = Vec::new();
    let formulas = match formula_parse(&formula_list(&form.formula), settings.exponent_substitution)
    {
        Ok(formulas) => formulas,
        Err(e) => {
            warn!("{}", e);
            errors.push(e.into());
            Vec::new()
        }
    };
    for formula in &formulas {
        match function_value(formula, &grid, settings.domain_policy) {
            Ok(values) => figure.plot(grid.clone(), values, &formula.text),
            Err(e) => {
                warn!("{} ({})", e, e.source);
                errors.push(e.into());
            }
        }
    }

    figure.set_xlim(range.x_min, range.x_max);
    figure.set_ylim(range.y_min, range.y_max);
    figure.set_xlabel(&form.x_title);
    figure.set_ylabel(&form.y_title);
    figure.set_title(&form.title);
    figure.set_grid(true);
    if form.legend {
        figure.set_legend(LegendPosition::UpperRight);
    }

    surface.show(&figure)?;
    if !figure.curves.is_empty() {
        info!("\n{}", summary_table(&figure));
    }
    Ok(PlotReport { figure, errors })
}
