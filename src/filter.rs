use crate::composition::CompositionResult;

/// A closed interval `[min, max]` over floats, parsed from `<min>,<max>`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

/// Error type for parsing an interval string.
#[derive(Debug)]
pub struct ParseIntervalErr(String);

impl std::fmt::Display for ParseIntervalErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid interval format: {}", self.0)
    }
}

impl std::error::Error for ParseIntervalErr {}

/// Which end of an interval a bound sits at. Each end accepts its own infinity.
#[derive(Copy, Clone)]
enum Bound {
    Lower,
    Upper,
}

impl Bound {
    fn parse(self, raw: &str) -> Result<f64, ParseIntervalErr> {
        let (name, unbounded, value) = match self {
            Bound::Lower => ("minimum", "-inf", f64::NEG_INFINITY),
            Bound::Upper => ("maximum", "inf", f64::INFINITY),
        };

        let raw = raw.trim();
        if raw == unbounded {
            return Ok(value);
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(ParseIntervalErr(format!(
                "Invalid {name} value: '{raw}' (should be any finite float or `{unbounded}`)"
            ))),
        }
    }
}

impl<'a> TryFrom<&'a str> for Interval {
    type Error = ParseIntervalErr;

    fn try_from(arg: &'a str) -> Result<Interval, Self::Error> {
        let arg_lc = arg.to_lowercase();
        let Some((lower, upper)) = arg_lc.split_once(',').filter(|(_, u)| !u.contains(',')) else {
            return Err(ParseIntervalErr(indoc::formatdoc! {"
            Expected '<min>,<max>', got '{arg}'. Each bound is a float, and the \
            bounds may be left open with `-inf` or `inf`:
              --gc 40,60
              --len 100,inf
            "}));
        };

        let min = Bound::Lower.parse(lower)?;
        let max = Bound::Upper.parse(upper)?;

        if min > max {
            return Err(ParseIntervalErr(format!(
                "minimum {min} is greater than maximum {max}"
            )));
        }

        Ok(Interval { min, max })
    }
}

impl Interval {
    pub const UNBOUNDED: Interval = Interval {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// Both ends are inclusive.
    pub fn contains(&self, v: f64) -> bool {
        (self.min <= v) && (v <= self.max)
    }
}

/// Which composition results to report.
#[derive(Copy, Clone, Debug)]
pub struct FilterOpts {
    pub len: Interval,
    pub gc: Interval,
}

impl Default for FilterOpts {
    fn default() -> Self {
        FilterOpts {
            len: Interval::UNBOUNDED,
            gc: Interval::UNBOUNDED,
        }
    }
}

pub fn filter(result: &CompositionResult, opts: &FilterOpts) -> bool {
    opts.len.contains(result.length as f64) && opts.gc.contains(result.gc_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bounded() {
        let i = Interval::try_from("40,60").unwrap();
        assert_eq!(i, Interval { min: 40.0, max: 60.0 });
    }

    #[test]
    fn parse_unbounded() {
        let i = Interval::try_from("-INF, inf").unwrap();
        assert_eq!(i, Interval::UNBOUNDED);
    }

    #[test]
    fn open_bounds_only_at_their_end() {
        assert!(Interval::try_from("inf,inf").is_err());
        assert!(Interval::try_from("0,-inf").is_err());
        assert!(Interval::try_from("1,2,3").is_err());
        assert!(Interval::try_from("nan,1").is_err());
    }

    #[test]
    fn parse_errors() {
        assert!(Interval::try_from("40").is_err());
        assert!(Interval::try_from("a,60").is_err());
        assert!(Interval::try_from("0,b").is_err());
        assert!(Interval::try_from("60,40").is_err());
    }

    #[test]
    fn inclusive_bounds() {
        let i = Interval::try_from("0,100").unwrap();
        assert!(i.contains(0.0));
        assert!(i.contains(100.0));
        assert!(!i.contains(100.5));
    }

    #[test]
    fn filters_on_both_fields() {
        let opts = FilterOpts {
            len: Interval::try_from("4,inf").unwrap(),
            gc: Interval::try_from("40,60").unwrap(),
        };

        assert!(filter(&CompositionResult { length: 4, gc_content: 50.0 }, &opts));
        assert!(!filter(&CompositionResult { length: 3, gc_content: 50.0 }, &opts));
        assert!(!filter(&CompositionResult { length: 10, gc_content: 75.0 }, &opts));
        assert!(filter(&CompositionResult { length: 10, gc_content: 75.0 }, &FilterOpts::default()));
    }
}
