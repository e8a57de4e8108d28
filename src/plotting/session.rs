//! Line-oriented plotting session. It holds a form that commands edit, the error slot and
//! the last plotted figure.
//!
//! ```
//! use mathplot::plotting::form::PlotForm;
//! use mathplot::plotting::figure::Figure;
//! use mathplot::plotting::render::{RenderError, RenderSurface};
//! use mathplot::plotting::session::{Session, SessionControl};
//! use mathplot::plotting::settings::PlotSettings;
//!
//! struct Nowhere;
//! impl RenderSurface for Nowhere {
//!     fn clear(&mut self) {}
//!     fn show(&mut self, _: &Figure) -> Result<(), RenderError> { Ok(()) }
//! }
//!
//! let mut session = Session::new(PlotForm::default(), PlotSettings::default(), Nowhere);
//! session.execute("formula x^2");
//! session.execute("add ; ln(x)");
//! session.execute("plot");
//! assert_eq!(session.error(), "Wrong typed formula 2: ln(x)");
//! assert_eq!(session.execute("quit").0, SessionControl::Quit);
//! ```
use crate::Utils::logger::save_curves;
use crate::plotting::evaluator::ARGUMENT;
use crate::plotting::figure::Figure;
use crate::plotting::form::PlotForm;
use crate::plotting::plot_driver::{PlotError, plot_graph};
use crate::plotting::render::RenderSurface;
use crate::plotting::settings::PlotSettings;
use log::info;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};

pub const HELP: &str = "\
commands:
  formula <text>    replace the formula field (formulas separated by \"; \")
  add <text>        append text to the formula field
  xmin|xmax <text>  set an x-axis limit
  ymin|ymax <text>  set a y-axis limit
  xtitle <text>     set the x-axis title
  ytitle <text>     set the y-axis title
  title <text>      set the plot title
  legend on|off     toggle the legend
  plot              plot the formulas
  show              print the form and the last error
  clear             reset the form
  export <path>     write the last plotted curves (.csv or tab-separated text)
  help              print this text
  quit              leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    Continue,
    Quit,
}

#[derive(Tabled)]
struct FieldRow {
    field: &'static str,
    value: String,
}

pub struct Session<S: RenderSurface> {
    pub form: PlotForm,
    pub settings: PlotSettings,
    surface: S,
    error: String,
    last_figure: Option<Figure>,
}

impl<S: RenderSurface> Session<S> {
    pub fn new(form: PlotForm, settings: PlotSettings, surface: S) -> Self {
        Session {
            form,
            settings,
            surface,
            error: String::new(),
            last_figure: None,
        }
    }

    /// Current text of the error slot.
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn last_figure(&self) -> Option<&Figure> {
        self.last_figure.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Runs one plot attempt and fills the error slot. Returns a status line.
    pub fn plot(&mut self) -> String {
        self.error.clear();
        match plot_graph(&self.form, &self.settings, &mut self.surface) {
            Ok(report) => {
                self.error = report.error_message();
                let status = format!("{} curve(s) plotted", report.figure.curves.len());
                self.last_figure = Some(report.figure);
                status
            }
            Err(e) => {
                // the old plot survives a range error, anything later has cleared it
                if !matches!(e, PlotError::Range(_)) {
                    self.last_figure = None;
                }
                self.error = e.to_string();
                "nothing plotted".to_string()
            }
        }
    }

    fn show(&self) -> String {
        let mut rows: Vec<FieldRow> = self
            .form
            .fields()
            .into_iter()
            .map(|(field, value)| FieldRow { field, value })
            .collect();
        rows.push(FieldRow {
            field: "error",
            value: self.error.clone(),
        });
        let mut table = Table::new(&rows);
        table.with(Style::modern_rounded());
        table.to_string()
    }

    fn export(&self, path: &str) -> String {
        let Some(figure) = &self.last_figure else {
            return "nothing to export, plot first".to_string();
        };
        match save_curves(figure, ARGUMENT, Path::new(path)) {
            Ok(()) => {
                info!("curves exported to {}", path);
                format!("{} curve(s) written to {}", figure.curves.len(), path)
            }
            Err(e) => format!("cannot export to {}: {}", path, e),
        }
    }

    /// Executes one command line. Returns whether to go on and the text to print.
    pub fn execute(&mut self, line: &str) -> (SessionControl, String) {
        let line = line.trim_end_matches(['\r', '\n']);
        let (command, argument) = match line.trim_start().split_once(' ') {
            Some((command, argument)) => (command, argument),
            None => (line.trim(), ""),
        };
        let output = match command {
            "" => String::new(),
            "formula" => {
                self.form.formula = argument.to_string();
                String::new()
            }
            "add" => {
                self.form.formula_add(argument);
                String::new()
            }
            "xmin" => set_field(&mut self.form.x_min, argument),
            "xmax" => set_field(&mut self.form.x_max, argument),
            "ymin" => set_field(&mut self.form.y_min, argument),
            "ymax" => set_field(&mut self.form.y_max, argument),
            "xtitle" => set_field(&mut self.form.x_title, argument),
            "ytitle" => set_field(&mut self.form.y_title, argument),
            "title" => set_field(&mut self.form.title, argument),
            "legend" => match argument.trim() {
                "on" | "true" => {
                    self.form.legend = true;
                    String::new()
                }
                "off" | "false" => {
                    self.form.legend = false;
                    String::new()
                }
                other => format!("legend expects on or off, got \"{}\"", other),
            },
            "plot" => {
                let status = self.plot();
                if self.error.is_empty() {
                    status
                } else {
                    format!("{}\nerror: {}", status, self.error)
                }
            }
            "show" => self.show(),
            "clear" => {
                self.form = PlotForm::default();
                self.error.clear();
                String::new()
            }
            "export" => self.export(argument.trim()),
            "help" => HELP.to_string(),
            "quit" | "exit" => return (SessionControl::Quit, String::new()),
            other => format!("unknown command \"{}\", type help", other),
        };
        (SessionControl::Continue, output)
    }

    /// Reads commands until `quit` or the end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<SessionControl> {
        for line in input.lines() {
            let (control, text) = self.execute(&line?);
            if !text.is_empty() {
                writeln!(output, "{}", text)?;
            }
            if control == SessionControl::Quit {
                return Ok(SessionControl::Quit);
            }
        }
        Ok(SessionControl::Continue)
    }
}

fn set_field(field: &mut String, value: &str) -> String {
    *field = value.to_string();
    String::new()
}

/// Ends the process; used when the session is told to quit.
pub fn quit() -> ! {
    info!("session closed");
    std::process::exit(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::render::RenderError;
    use std::fs;
    use tempfile::tempdir;

    #[derive(Default)]
    struct CountingSurface {
        shown: usize,
    }

    impl RenderSurface for CountingSurface {
        fn clear(&mut self) {}

        fn show(&mut self, _figure: &Figure) -> Result<(), RenderError> {
            self.shown += 1;
            Ok(())
        }
    }

    fn session() -> Session<CountingSurface> {
        Session::new(
            PlotForm::default(),
            PlotSettings::default(),
            CountingSurface::default(),
        )
    }

    #[test]
    fn test_commands_edit_the_form() {
        let mut s = session();
        s.execute("formula x^2");
        s.execute("add ; sin(x)");
        s.execute("xmin -5");
        s.execute("ymax 2.5");
        s.execute("title my plot");
        s.execute("legend on");
        assert_eq!(s.form.formula, "x^2; sin(x)");
        assert_eq!(s.form.x_min, "-5");
        assert_eq!(s.form.y_max, "2.5");
        assert_eq!(s.form.title, "my plot");
        assert!(s.form.legend);
        let (_, message) = s.execute("legend maybe");
        assert!(message.contains("legend expects"));
    }

    #[test]
    fn test_plot_fills_error_slot_and_clears_it() {
        let mut s = session();
        s.execute("formula x; !!bad!!");
        let (_, message) = s.execute("plot");
        assert!(message.contains("Wrong formula 2: !!bad!!"));
        assert_eq!(s.last_figure().map(|f| f.curves.len()), Some(0));
        s.execute("formula x");
        s.execute("plot");
        assert_eq!(s.error(), "");
        assert_eq!(s.last_figure().map(|f| f.curves.len()), Some(1));
        assert_eq!(s.surface().shown, 2);
    }

    #[test]
    fn test_range_error_keeps_previous_figure() {
        let mut s = session();
        s.execute("formula x");
        s.execute("plot");
        s.execute("xmin abc");
        let (_, message) = s.execute("plot");
        assert_eq!(s.error(), "Wrong specified the minimum limit of X axis");
        assert!(message.contains("nothing plotted"));
        assert!(s.last_figure().is_some());
        assert_eq!(s.surface().shown, 1);
    }

    #[test]
    fn test_show_lists_fields() {
        let mut s = session();
        s.execute("formula cos(x)");
        let (_, table) = s.execute("show");
        assert!(table.contains("cos(x)"));
        assert!(table.contains("x_min"));
        assert!(table.contains("error"));
    }

    #[test]
    fn test_clear_resets_form() {
        let mut s = session();
        s.execute("formula x");
        s.execute("xmax 3");
        s.execute("clear");
        assert_eq!(s.form, PlotForm::default());
    }

    #[test]
    fn test_export_last_figure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("curves.csv");
        let mut s = session();
        let (_, message) = s.execute(&format!("export {}", path.display()));
        assert!(message.contains("plot first"));
        s.settings.samples = 3;
        s.execute("formula x; 2");
        s.execute("plot");
        s.execute(&format!("export {}", path.display()));
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().next(), Some("x,x,2"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_run_stops_at_quit() {
        let mut s = session();
        let input = "formula x\nplot\nquit\nformula y\n";
        let mut output = Vec::new();
        let control = s.run(input.as_bytes(), &mut output).unwrap();
        assert_eq!(control, SessionControl::Quit);
        assert_eq!(s.form.formula, "x");
        assert!(String::from_utf8(output).unwrap().contains("1 curve(s) plotted"));
    }

    #[test]
    fn test_run_until_end_of_input() {
        let mut s = session();
        let mut output = Vec::new();
        let control = s.run("bogus\n".as_bytes(), &mut output).unwrap();
        assert_eq!(control, SessionControl::Continue);
        assert!(String::from_utf8(output).unwrap().contains("unknown command"));
    }
}
