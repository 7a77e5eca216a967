//! The `quantize` query extension.
//!
//! Queries may carry one clause of the form
//! `quantize to <n><s|m|h> using <rollup>` optionally followed by `|`. The metrics
//! API does not accept it inline, so it is cut out of the query and sent as
//! separate quantization and rollup fields.

use std::{fmt, str::FromStr};

use crate::error::CoreError;

const KEYWORD: &str = "quantize";
const EXPECTED_SHAPE: &str = "quantize to <n><s|m|h> using <avg|min|max|sum|count>";

/// Aggregation applied inside each quantization bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rollup {
    Avg,
    Min,
    Max,
    Sum,
    Count,
}

impl Rollup {
    /// Name as the metrics API expects it (title case).
    pub fn as_str(&self) -> &'static str {
        match self {
            Rollup::Avg => "Avg",
            Rollup::Min => "Min",
            Rollup::Max => "Max",
            Rollup::Sum => "Sum",
            Rollup::Count => "Count",
        }
    }
}

impl fmt::Display for Rollup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rollup {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avg" => Ok(Rollup::Avg),
            "min" => Ok(Rollup::Min),
            "max" => Ok(Rollup::Max),
            "sum" => Ok(Rollup::Sum),
            "count" => Ok(Rollup::Count),
            other => Err(CoreError::malformed(format!(
                "unknown quantize rollup '{other}' (expected avg, min, max, sum or count)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizeSpec {
    pub interval_millis: i64,
    pub rollup: Rollup,
}

/// A query with its quantize clause removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub query: String,
    pub quantize: QuantizeSpec,
}

/// Split the single required quantize clause out of `query`.
pub fn parse_query(query: &str) -> Result<ParsedQuery, CoreError> {
    if query.matches(KEYWORD).count() != 1 {
        return Err(CoreError::malformed("expected exactly one quantize clause"));
    }
    let start = query.find(KEYWORD).unwrap_or_default();

    let mut scan = Scanner::new(query, start);
    let clause = scan.clause().ok_or_else(|| {
        CoreError::malformed(format!("quantize clause must match `{EXPECTED_SHAPE}`"))
    })?;

    let interval_millis = interval_millis(clause.amount, clause.unit)?;
    let rollup = clause.rollup.parse::<Rollup>()?;

    let rewritten = rewrite(&query[..start], &query[scan.pos..]);
    if rewritten.is_empty() {
        return Err(CoreError::malformed(
            "query is empty once the quantize clause is removed",
        ));
    }

    Ok(ParsedQuery {
        query: rewritten,
        quantize: QuantizeSpec {
            interval_millis,
            rollup,
        },
    })
}

struct Clause<'a> {
    amount: &'a str,
    unit: char,
    rollup: &'a str,
}

/// Byte cursor over the query, positioned on the clause keyword.
struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str, pos: usize) -> Self {
        Self { src, pos }
    }

    /// `quantize WS to WS <digits><letter> WS using WS <letters> WS* |?`
    fn clause(&mut self) -> Option<Clause<'a>> {
        self.literal(KEYWORD)?;
        self.spaces(1)?;
        self.literal("to")?;
        self.spaces(1)?;
        let amount = self.take_while(|b| b.is_ascii_digit())?;
        let unit = self.lowercase_letter()?;
        self.spaces(1)?;
        self.literal("using")?;
        self.spaces(1)?;
        let rollup = self.take_while(|b| b.is_ascii_lowercase())?;
        self.spaces(0)?;
        if self.rest().starts_with('|') {
            self.pos += 1;
        }
        Some(Clause {
            amount,
            unit,
            rollup,
        })
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn literal(&mut self, word: &str) -> Option<()> {
        self.rest().starts_with(word).then(|| self.pos += word.len())
    }

    fn spaces(&mut self, min: usize) -> Option<()> {
        let run = self
            .rest()
            .bytes()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        self.pos += run;
        (run >= min).then_some(())
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> Option<&'a str> {
        let len = self.rest().bytes().take_while(|b| pred(*b)).count();
        if len == 0 {
            return None;
        }
        let token = &self.src[self.pos..self.pos + len];
        self.pos += len;
        Some(token)
    }

    fn lowercase_letter(&mut self) -> Option<char> {
        let c = self.rest().bytes().next().filter(u8::is_ascii_lowercase)?;
        self.pos += 1;
        Some(c as char)
    }
}

fn interval_millis(amount: &str, unit: char) -> Result<i64, CoreError> {
    let factor: i64 = match unit {
        's' => 1_000,
        'm' => 60_000,
        'h' => 3_600_000,
        other => {
            return Err(CoreError::malformed(format!(
                "unknown quantize interval unit '{other}' (expected s, m or h)"
            )));
        }
    };

    amount
        .parse::<i64>()
        .ok()
        .and_then(|n| n.checked_mul(factor))
        .ok_or_else(|| {
            CoreError::malformed(format!("quantize interval {amount}{unit} is too large"))
        })
}

/// Join what surrounded the clause with a single space and drop one dangling pipe.
fn rewrite(before: &str, after: &str) -> String {
    let joined = format!("{} {}", before.trim_end(), after.trim_start());
    let trimmed = joined.trim();
    trimmed
        .strip_suffix('|')
        .map(str::trim_end)
        .unwrap_or(trimmed)
        .to_string()
}
