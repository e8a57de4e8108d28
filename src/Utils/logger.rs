use crate::plotting::figure::Figure;
use chrono::Local;
use csv::Writer;
use itertools::Itertools;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Maps a `--log-level` value to a level filter.
pub fn level_filter(level: &str) -> Option<LevelFilter> {
    match level.to_lowercase().as_str() {
        "trace" => Some(LevelFilter::Trace),
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" => Some(LevelFilter::Warn),
        "error" => Some(LevelFilter::Error),
        "off" => Some(LevelFilter::Off),
        _ => None,
    }
}

/// Name of the log file for a run started now: `log_<date>_<time>.txt`.
pub fn log_file_name() -> PathBuf {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    PathBuf::from(format!("log_{}.txt", date_and_time))
}

/// Terminal logging, plus a timestamped log file when `to_file` is set.
/// Returns the log file path when one was created.
pub fn init_logger(level: LevelFilter, to_file: bool) -> io::Result<Option<PathBuf>> {
    if level == LevelFilter::Off {
        return Ok(None);
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    let mut log_path = None;
    if to_file {
        let name = log_file_name();
        loggers.push(WriteLogger::new(level, Config::default(), File::create(&name)?));
        log_path = Some(name);
    }
    // a second initialisation in the same process keeps the first logger
    let _ = CombinedLogger::init(loggers);
    Ok(log_path)
}

// column titles and rows (x first, then one value per curve) of a figure's curves
fn curve_table(figure: &Figure, arg: &str) -> (Vec<String>, Vec<Vec<String>>) {
    let mut headers = vec![arg.to_string()];
    headers.extend(figure.curves.iter().map(|c| c.label.clone()));
    let rows = match figure.curves.first() {
        Some(first) => {
            let len = figure.curves.iter().map(|c| c.y.len()).min().unwrap_or(0);
            (0..len.min(first.x.len()))
                .map(|i| {
                    let mut row = vec![first.x[i].to_string()];
                    row.extend(figure.curves.iter().map(|c| c.y[i].to_string()));
                    row
                })
                .collect()
        }
        None => Vec::new(),
    };
    (headers, rows)
}

/// Writes the curves of a figure as tab-separated text.
pub fn save_curves_to_file(figure: &Figure, arg: &str, filename: &Path) -> io::Result<()> {
    let mut file = File::create(filename)?;
    let (headers, rows) = curve_table(figure, arg);
    writeln!(file, "{}", headers.iter().join("\t"))?;
    for row in rows {
        writeln!(file, "{}", row.iter().join("\t"))?;
    }
    Ok(())
}

/// Writes the curves of a figure as CSV: the argument column, then one column per curve.
pub fn save_curves_to_csv(figure: &Figure, arg: &str, filename: &Path) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    let (headers, rows) = curve_table(figure, arg);
    writer.write_record(&headers)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Picks the writer from the extension: `.csv` gets CSV, anything else tab-separated text.
pub fn save_curves(figure: &Figure, arg: &str, filename: &Path) -> io::Result<()> {
    let is_csv = filename
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        save_curves_to_csv(figure, arg, filename)
    } else {
        save_curves_to_file(figure, arg, filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::fs;
    use tempfile::tempdir;

    fn figure() -> Figure {
        let mut figure = Figure::default();
        figure.plot(array![0.0, 1.0, 2.0], array![0.0, 1.0, 4.0], "x^2");
        figure.plot(array![0.0, 1.0, 2.0], array![1.0, 1.0, 1.0], "1");
        figure
    }

    #[test]
    fn test_level_filter() {
        assert_eq!(level_filter("debug"), Some(LevelFilter::Debug));
        assert_eq!(level_filter("WARN"), Some(LevelFilter::Warn));
        assert_eq!(level_filter("off"), Some(LevelFilter::Off));
        assert_eq!(level_filter("loud"), None);
    }

    #[test]
    fn test_log_file_name() {
        let name = log_file_name().to_string_lossy().to_string();
        assert!(name.starts_with("log_"));
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn test_save_curves_to_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("curves.csv");
        save_curves(&figure(), "x", &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["x,x^2,1", "0,0,1", "1,1,1", "2,4,1"]);
    }

    #[test]
    fn test_save_curves_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("curves.txt");
        save_curves(&figure(), "x", &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().next(), Some("x\tx^2\t1"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_empty_figure_writes_only_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        save_curves_to_csv(&Figure::default(), "x", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "x");
    }
}
