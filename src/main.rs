//! mathplot - plots formulas of x from the command line.
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use mathplot::Utils::logger::{init_logger, level_filter, save_curves};
use mathplot::plotting::evaluator::ARGUMENT;
use mathplot::plotting::form::PlotForm;
use mathplot::plotting::plot_driver::plot_graph;
use mathplot::plotting::render::FileSurface;
use mathplot::plotting::session::{Session, SessionControl, quit};
use mathplot::plotting::settings::{DomainPolicy, OutputFormat, PlotSettings};
use mathplot::symbolic::parse_expr::ExponentSubstitution;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "mathplot")]
#[command(about = "Plots formulas of x such as \"x^2; sin(x)\"", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// debug, info, warn, error or off
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// also write the log into log_<date>_<time>.txt
    #[arg(long, global = true)]
    log_file: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plot once and write the image
    Plot {
        #[command(flatten)]
        request: PlotRequest,

        /// write the plotted curves to this file (.csv, otherwise tab-separated)
        #[arg(long)]
        export_csv: Option<PathBuf>,
    },
    /// Edit the form and plot interactively, one command per line on stdin
    Session {
        #[command(flatten)]
        request: PlotRequest,
    },
}

#[derive(Args, Debug)]
struct PlotRequest {
    /// form document to start from
    #[arg(long)]
    form: Option<PathBuf>,
    /// formulas separated by "; "
    #[arg(long, allow_hyphen_values = true)]
    formula: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    x_min: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    x_max: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    y_min: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    y_max: Option<String>,
    #[arg(long)]
    x_title: Option<String>,
    #[arg(long)]
    y_title: Option<String>,
    #[arg(long)]
    title: Option<String>,
    /// draw the legend in the upper right corner
    #[arg(long, conflicts_with = "no_legend")]
    legend: bool,
    /// no legend, even if the form document asks for one
    #[arg(long)]
    no_legend: bool,
    /// number of points of the sample grid
    #[arg(long)]
    samples: Option<usize>,
    /// only treat a standalone `e` or a scientific-notation exponent as Euler's number
    #[arg(long)]
    scope_aware_e: bool,
    /// draw curves with undefined points as separate pieces instead of rejecting them
    #[arg(long)]
    gaps: bool,
    /// png or svg
    #[arg(long, default_value = "png")]
    format: OutputFormat,
    /// image path, plot_<date>_<time>.<format> by default
    #[arg(long)]
    output: Option<PathBuf>,
}

impl PlotRequest {
    /// defaults, then the form document, then the flags
    fn form(&self) -> Result<PlotForm, Box<dyn Error>> {
        let mut form = match &self.form {
            Some(path) => PlotForm::from_file(path)?,
            None => PlotForm::default(),
        };
        let overrides = [
            (&self.formula, &mut form.formula),
            (&self.x_min, &mut form.x_min),
            (&self.x_max, &mut form.x_max),
            (&self.y_min, &mut form.y_min),
            (&self.y_max, &mut form.y_max),
            (&self.x_title, &mut form.x_title),
            (&self.y_title, &mut form.y_title),
            (&self.title, &mut form.title),
        ];
        for (flag, field) in overrides {
            if let Some(value) = flag {
                *field = value.clone();
            }
        }
        if self.legend {
            form.legend = true;
        } else if self.no_legend {
            form.legend = false;
        }
        Ok(form)
    }

    fn settings(&self) -> PlotSettings {
        let defaults = PlotSettings::default();
        PlotSettings {
            samples: self.samples.unwrap_or(defaults.samples),
            exponent_substitution: if self.scope_aware_e {
                ExponentSubstitution::ScopeAware
            } else {
                ExponentSubstitution::Blind
            },
            domain_policy: if self.gaps {
                DomainPolicy::Gaps
            } else {
                DomainPolicy::Strict
            },
            format: self.format,
            ..defaults
        }
    }

    fn surface(&self, settings: &PlotSettings) -> FileSurface {
        let path = self.output.clone().unwrap_or_else(|| {
            let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
            PathBuf::from(format!(
                "plot_{}.{}",
                date_and_time,
                settings.format.extension()
            ))
        });
        FileSurface::new(path, (settings.width, settings.height), settings.format)
    }
}

fn plot(request: &PlotRequest, export_csv: Option<&PathBuf>) -> Result<(), Box<dyn Error>> {
    let form = request.form()?;
    let settings = request.settings();
    let mut surface = request.surface(&settings);
    let report = plot_graph(&form, &settings, &mut surface)?;
    for e in &report.errors {
        warn!("{}", e);
    }
    let message = report.error_message();
    if !message.is_empty() {
        eprintln!("{}", message);
    }
    println!(
        "{} curve(s) plotted to {}",
        report.figure.curves.len(),
        surface.path.display()
    );
    if let Some(path) = export_csv {
        save_curves(&report.figure, ARGUMENT, path)?;
        info!("curves exported to {}", path.display());
    }
    Ok(())
}

fn run_session(request: &PlotRequest) -> Result<(), Box<dyn Error>> {
    let settings = request.settings();
    let surface = request.surface(&settings);
    let mut session = Session::new(request.form()?, settings, surface);
    println!("type help for the list of commands");
    let stdin = io::stdin();
    if session.run(stdin.lock(), io::stdout())? == SessionControl::Quit {
        quit();
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let level = level_filter(&cli.log_level)
        .ok_or_else(|| format!("unknown log level \"{}\"", cli.log_level))?;
    if let Some(path) = init_logger(level, cli.log_file)? {
        info!("logging into {}", path.display());
    }
    match &cli.command {
        Command::Plot {
            request,
            export_csv,
        } => plot(request, export_csv.as_ref()),
        Command::Session { request } => run_session(request),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn request(args: &[&str]) -> PlotRequest {
        let cli = Cli::try_parse_from([&["mathplot", "plot"][..], args].concat()).unwrap();
        match cli.command {
            Command::Plot { request, .. } => request,
            other => panic!("expected plot, got {:?}", other),
        }
    }

    #[test]
    fn test_flags_override_form_document() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "formulas\n  formula: x^2\noptions\n  legend: true\n").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let form = request(&["--form", &path]).form().unwrap();
        assert_eq!(form.formula, "x^2");
        assert!(form.legend);

        let form = request(&["--form", &path, "--no-legend", "--x-min", "-3"]).form().unwrap();
        assert!(!form.legend);
        assert_eq!(form.x_min, "-3");
        assert_eq!(form.formula, "x^2");
    }

    #[test]
    fn test_legend_flags() {
        assert!(request(&["--legend"]).form().unwrap().legend);
        assert!(!request(&["--no-legend"]).form().unwrap().legend);
        assert!(Cli::try_parse_from(["mathplot", "plot", "--legend", "--no-legend"]).is_err());
    }
}
