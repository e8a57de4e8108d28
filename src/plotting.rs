/// raw text state of the plot form
pub mod form;
/// sample count, exponent handling, domain policy and image format of a plot request
pub mod settings;
/// validation of the axis-limit fields
pub mod range_validator;
/// splitting of the formula field into formula entries
pub mod formula_list;
/// batch parsing of formula entries into symbolic expressions
pub mod formula_parser;
/// sample grid and per-curve evaluation
pub mod evaluator;
/// curves, limits, labels and legend handed to a rendering surface
pub mod figure;
///________________________________________________________________________________________________________________________________
/// rendering surfaces: the trait the orchestrator talks to and the plotters-backed image writer
///________________________________________________________________________________________________________________________________
pub mod render;
///________________________________________________________________________________________________________________________________
/// # Plot orchestrator
/// one plot attempt from the raw form to the rendered figure
///# Example
/// ```
/// use mathplot::plotting::form::PlotForm;
/// use mathplot::plotting::range_validator::RangeError;
/// use mathplot::plotting::plot_driver::{plot_graph, PlotError};
/// use mathplot::plotting::render::FileSurface;
/// use mathplot::plotting::settings::{OutputFormat, PlotSettings};
/// let form = PlotForm::new("x").with_x_range("1", "-1");
/// let mut surface = FileSurface::new("never_written.png", (800, 600), OutputFormat::Png);
/// let err = plot_graph(&form, &PlotSettings::default(), &mut surface).unwrap_err();
/// assert_eq!(err, PlotError::Range(RangeError::XOrder));
/// assert!(surface.rendered().is_none());
/// ```
///________________________________________________________________________________________________________________________________
pub mod plot_driver;
/// interactive command session around a form
pub mod session;
