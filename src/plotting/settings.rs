use crate::symbolic::parse_expr::ExponentSubstitution;
use strum_macros::{Display, EnumString};

/// number of points of the sample grid
pub const DEFAULT_SAMPLES: usize = 1000;
/// image size in pixels
pub const DEFAULT_SIZE: (u32, u32) = (1000, 600);

/// What happens to a curve whose samples are not all finite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum DomainPolicy {
    /// the curve is an evaluation error and is not drawn
    #[default]
    Strict,
    /// non-finite samples break the line into separate segments
    Gaps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

/// Knobs of a plot request that are not part of the form.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSettings {
    pub samples: usize,
    pub exponent_substitution: ExponentSubstitution,
    pub domain_policy: DomainPolicy,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

impl Default for PlotSettings {
    fn default() -> Self {
        PlotSettings {
            samples: DEFAULT_SAMPLES,
            exponent_substitution: ExponentSubstitution::default(),
            domain_policy: DomainPolicy::default(),
            width: DEFAULT_SIZE.0,
            height: DEFAULT_SIZE.1,
            format: OutputFormat::default(),
        }
    }
}

impl PlotSettings {
    /// a grid needs both endpoints
    pub fn samples(&self) -> usize {
        self.samples.max(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PlotSettings::default();
        assert_eq!(settings.samples(), 1000);
        assert_eq!(settings.exponent_substitution, ExponentSubstitution::Blind);
        assert_eq!(settings.domain_policy, DomainPolicy::Strict);
        assert_eq!((settings.width, settings.height), (1000, 600));
    }

    #[test]
    fn test_samples_never_below_two() {
        let settings = PlotSettings {
            samples: 1,
            ..Default::default()
        };
        assert_eq!(settings.samples(), 2);
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("gaps".parse::<DomainPolicy>().unwrap(), DomainPolicy::Gaps);
        assert_eq!("svg".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
        assert!("jpeg".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Png.extension(), "png");
    }
}
