//! Parses form documents: section titles on their own line, each followed by `key: value`
//! lines. A value is the rest of its line, so formulas keep their `;`, `,` and spaces,
//! trailing ones included.
//!
//! ```text
//! formulas
//!   formula: x^2; sin(x)
//! axes
//!   x_min: -5
//!   x_max: 5
//! options
//!   legend: true
//! ```
use crate::plotting::form::PlotForm;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, line_ending, not_line_ending, space0},
    combinator::{eof, map, opt, recognize},
    multi::{many0, many1},
    sequence::{delimited, pair, terminated},
};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// sections of a form document and the keys each one accepts
pub const FORM_TEMPLATE: [(&str, &[&str]); 4] = [
    ("formulas", &["formula"]),
    ("axes", &["x_min", "x_max", "y_min", "y_max"]),
    ("labels", &["x_title", "y_title", "title"]),
    ("options", &["legend"]),
];

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Cannot read form document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Form document is malformed near \"{0}\"")]
    Syntax(String),
    #[error("Unknown section \"{0}\" in form document")]
    UnknownSection(String),
    #[error("Unknown key \"{key}\" in section \"{section}\"")]
    UnknownKey { section: String, key: String },
    #[error("legend must be true or false, got \"{0}\"")]
    InvalidLegend(String),
}

type Section = (String, Vec<(String, String)>);

fn identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    map(parser, String::from).parse(input)
}

/// A title alone on its line.
fn parse_title(input: &str) -> IResult<&str, String> {
    let (input, _) = space0(input)?;
    terminated(identifier, pair(space0, alt((line_ending, eof)))).parse(input)
}

/// `key: value`, the value running to the end of the line untrimmed.
fn parse_key_value_pair(input: &str) -> IResult<&str, (String, String)> {
    let (input, _) = space0(input)?;
    let (input, key) = identifier(input)?;
    let (input, _) = delimited(space0, tag(":"), space0).parse(input)?;
    let (input, value) = not_line_ending(input)?;
    let (input, _) = opt(line_ending).parse(input)?;
    Ok((input, (key, value.to_string())))
}

fn parse_section(input: &str) -> IResult<&str, Section> {
    (parse_title, many0(parse_key_value_pair)).parse(input)
}

/// Drops blank lines and lines starting with //, # or %.
fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty()
                && !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

fn first_line(input: &str) -> String {
    input.lines().next().unwrap_or_default().trim().to_string()
}

/// Splits a document into its sections, in document order.
pub fn parse_document(input: &str) -> Result<Vec<Section>, FormError> {
    let text = filter_comments(input);
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let (rest, sections) = many1(parse_section)
        .parse(text.as_str())
        .map_err(|_| FormError::Syntax(first_line(&text)))?;
    if !rest.trim().is_empty() {
        return Err(FormError::Syntax(first_line(rest)));
    }
    Ok(sections)
}

/// Checks every section and key against [`FORM_TEMPLATE`].
pub fn check_against_template(sections: &[Section]) -> Result<(), FormError> {
    for (title, pairs) in sections {
        let (_, keys) = FORM_TEMPLATE
            .iter()
            .find(|(name, _)| *name == title.as_str())
            .ok_or_else(|| FormError::UnknownSection(title.clone()))?;
        if let Some((key, _)) = pairs.iter().find(|(key, _)| !keys.contains(&key.as_str())) {
            return Err(FormError::UnknownKey {
                section: title.clone(),
                key: key.clone(),
            });
        }
    }
    Ok(())
}

impl PlotForm {
    /// Fills a default form from a document. Keys missing from the document keep their
    /// default value; a key given twice keeps the last value.
    pub fn from_document(input: &str) -> Result<PlotForm, FormError> {
        let sections = parse_document(input)?;
        check_against_template(&sections)?;
        let mut form = PlotForm::default();
        for (key, value) in sections.into_iter().flat_map(|(_, pairs)| pairs) {
            match key.as_str() {
                "formula" => form.formula = value,
                "x_min" => form.x_min = value,
                "x_max" => form.x_max = value,
                "y_min" => form.y_min = value,
                "y_max" => form.y_max = value,
                "x_title" => form.x_title = value,
                "y_title" => form.y_title = value,
                "title" => form.title = value,
                "legend" => {
                    form.legend = value
                        .trim()
                        .to_lowercase()
                        .parse::<bool>()
                        .map_err(|_| FormError::InvalidLegend(value.clone()))?
                }
                _ => {}
            }
        }
        Ok(form)
    }

    pub fn from_file(path: &Path) -> Result<PlotForm, FormError> {
        let text = fs::read_to_string(path).map_err(|source| FormError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        PlotForm::from_document(&text)
    }
}
