// Duration literal lexemes
//
// Format: <digits><unit>[<digits><unit>...], units strictly decreasing and
// each used at most once: 1h30m is valid, 30m1h and 1m1m are not.
//
//   y  - year (365 days)
//   w  - week
//   d  - day
//   h  - hour
//   m  - minute
//   s  - second
//   ms - millisecond

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::digit1,
    combinator::{map_res, value},
    multi::many1,
    sequence::pair,
};

/// Signed span of time in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration {
    pub milliseconds: i64,
}

impl Duration {
    pub const ZERO: Duration = Duration::from_millis(0);

    pub const fn from_millis(ms: i64) -> Self {
        Self { milliseconds: ms }
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    pub const fn as_millis(&self) -> i64 {
        self.milliseconds
    }

    pub const fn is_zero(&self) -> bool {
        self.milliseconds == 0
    }

    /// Negated duration, `None` on overflow
    pub fn checked_neg(self) -> Option<Self> {
        self.milliseconds.checked_neg().map(Self::from_millis)
    }
}

impl std::fmt::Display for Duration {
    /// Renders the largest units first: `90m` prints as `1h30m`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.milliseconds == 0 {
            return write!(f, "0s");
        }
        if self.milliseconds < 0 {
            write!(f, "-")?;
        }
        let mut ms = self.milliseconds.unsigned_abs();
        for unit in DurationUnit::DESCENDING {
            let size = unit.millis() as u64;
            let count = ms / size;
            if count > 0 {
                write!(f, "{}{}", count, unit.suffix())?;
                ms %= size;
            }
        }
        Ok(())
    }
}

/// Duration unit, ordered from smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum DurationUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Year,
}

impl DurationUnit {
    const DESCENDING: [DurationUnit; 7] = [
        DurationUnit::Year,
        DurationUnit::Week,
        DurationUnit::Day,
        DurationUnit::Hour,
        DurationUnit::Minute,
        DurationUnit::Second,
        DurationUnit::Millisecond,
    ];

    const fn millis(&self) -> i64 {
        match self {
            DurationUnit::Millisecond => 1,
            DurationUnit::Second => 1_000,
            DurationUnit::Minute => 60_000,
            DurationUnit::Hour => 3_600_000,
            DurationUnit::Day => 86_400_000,
            DurationUnit::Week => 604_800_000,
            DurationUnit::Year => 31_536_000_000,
        }
    }

    const fn suffix(&self) -> &'static str {
        match self {
            DurationUnit::Millisecond => "ms",
            DurationUnit::Second => "s",
            DurationUnit::Minute => "m",
            DurationUnit::Hour => "h",
            DurationUnit::Day => "d",
            DurationUnit::Week => "w",
            DurationUnit::Year => "y",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DurationError {
    UnitOrder,
    Overflow,
}

/// Sum the components, rejecting units out of order and overflow.
fn compute_duration_millis(components: Vec<(i64, DurationUnit)>) -> Result<Duration, DurationError> {
    let mut total_ms: i64 = 0;
    let mut previous: Option<DurationUnit> = None;
    for (count, unit) in components {
        if previous.is_some_and(|prev| unit >= prev) {
            return Err(DurationError::UnitOrder);
        }
        previous = Some(unit);
        let component_ms = count
            .checked_mul(unit.millis())
            .ok_or(DurationError::Overflow)?;
        total_ms = total_ms
            .checked_add(component_ms)
            .ok_or(DurationError::Overflow)?;
    }
    Ok(Duration::from_millis(total_ms))
}

/// Parse an unsigned duration literal such as `5m` or `1h30m`.
///
/// ```
/// use promql_ast::lexer::duration::duration;
///
/// let (rest, d) = duration("1h30m]").unwrap();
/// assert_eq!(rest, "]");
/// assert_eq!(d.as_millis(), 5_400_000);
/// assert!(duration("30m1h").is_err());
/// ```
pub fn duration(input: &str) -> IResult<&str, Duration> {
    map_res(many1(duration_component), compute_duration_millis).parse(input)
}

fn duration_component(input: &str) -> IResult<&str, (i64, DurationUnit)> {
    pair(map_res(digit1, |s: &str| s.parse::<i64>()), duration_unit).parse(input)
}

fn duration_unit(input: &str) -> IResult<&str, DurationUnit> {
    alt((
        // "ms" before "m"
        value(DurationUnit::Millisecond, tag("ms")),
        value(DurationUnit::Second, tag("s")),
        value(DurationUnit::Minute, tag("m")),
        value(DurationUnit::Hour, tag("h")),
        value(DurationUnit::Day, tag("d")),
        value(DurationUnit::Week, tag("w")),
        value(DurationUnit::Year, tag("y")),
    ))
    .parse(input)
}
