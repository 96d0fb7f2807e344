//! Range expressions and the pages they map to.
//!
//! Accepted expressions:
//! - `all`: every page of the profile
//! - a number of up to five digits: a single page offset
//! - a longer number: a single post id
//! - `start-end`: offsets when both bounds fit the post count (`start` and
//!   `end` are accepted as literals), otherwise an inclusive post id range
//!
//! A five-digit post id is read as an offset; there is no way to tell the
//! two apart from the expression alone.

use std::cmp::Ordering;

use crate::api::PAGE_SIZE;
use crate::error::{Error, Result};
use crate::media::compare_post_ids;

/// Longest all-digit token still treated as a page offset.
const MAX_OFFSET_DIGITS: usize = 5;

/// One unit of work produced by [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRange {
    /// Fetch the page at this offset.
    Offset(u64),
    /// Scan every page, keeping posts accepted by the filter.
    Ids(IdFilter),
}

/// Post id selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdFilter {
    Single(String),
    /// Inclusive, `low <= high`.
    Range { low: String, high: String },
}

impl IdFilter {
    /// Inclusive range between two ids, in either order.
    pub fn range(a: &str, b: &str) -> Self {
        let (low, high) = if compare_post_ids(a, b) == Ordering::Greater {
            (b, a)
        } else {
            (a, b)
        };

        IdFilter::Range {
            low: low.to_string(),
            high: high.to_string(),
        }
    }

    /// Whether a post id is selected.
    pub fn matches(&self, id: &str) -> bool {
        match self {
            IdFilter::Single(wanted) => compare_post_ids(id, wanted) == Ordering::Equal,
            IdFilter::Range { low, high } => {
                compare_post_ids(id, low) != Ordering::Less
                    && compare_post_ids(id, high) != Ordering::Greater
            }
        }
    }

    /// Ids that must all be seen before scanning can stop.
    pub fn endpoints(&self) -> Vec<&str> {
        match self {
            IdFilter::Single(id) => vec![id.as_str()],
            IdFilter::Range { low, high } => vec![low.as_str(), high.as_str()],
        }
    }
}

/// Offsets of every page of a profile with `total_count` posts.
pub fn all_offsets(total_count: u64) -> Vec<u64> {
    (0..total_count).step_by(PAGE_SIZE as usize).collect()
}

/// Turn a range expression into the fetches that satisfy it.
pub fn resolve(expr: &str, total_count: u64) -> Result<Vec<FetchRange>> {
    let trimmed = expr.trim();
    let invalid = || Error::InvalidRangeExpression(expr.to_string());

    if trimmed == "all" {
        return Ok(all_offsets(total_count)
            .into_iter()
            .map(FetchRange::Offset)
            .collect());
    }

    if is_digits(trimmed) {
        if trimmed.len() <= MAX_OFFSET_DIGITS {
            let offset = trimmed.parse().map_err(|_| invalid())?;
            return Ok(vec![FetchRange::Offset(offset)]);
        }
        return Ok(vec![FetchRange::Ids(IdFilter::Single(trimmed.to_string()))]);
    }

    let (start, end) = trimmed.split_once('-').ok_or_else(invalid)?;

    let start = match start {
        "start" => "0",
        s if is_digits(s) => s,
        _ => return Err(invalid()),
    };
    let end = match end {
        "end" => None,
        e if is_digits(e) => Some(e),
        _ => return Err(invalid()),
    };

    let start_offset = start.parse::<u64>().ok().filter(|s| *s <= total_count);
    let end_offset = match end {
        None => Some(total_count),
        Some(e) => e.parse::<u64>().ok().filter(|e| *e <= total_count),
    };

    match (start_offset, end_offset) {
        (Some(start), Some(end)) => {
            if end < start {
                return Err(invalid());
            }
            let pages = (end - start).div_ceil(PAGE_SIZE);
            Ok((0..pages)
                .map(|i| FetchRange::Offset(start + i * PAGE_SIZE))
                .collect())
        }
        _ => {
            let end = end.map(str::to_string).unwrap_or_else(|| total_count.to_string());
            Ok(vec![FetchRange::Ids(IdFilter::range(start, &end))])
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(ranges: &[FetchRange]) -> Vec<u64> {
        ranges
            .iter()
            .map(|r| match r {
                FetchRange::Offset(o) => *o,
                FetchRange::Ids(f) => panic!("unexpected id filter {f:?}"),
            })
            .collect()
    }

    #[test]
    fn test_all() {
        assert_eq!(offsets(&resolve("all", 237).unwrap()), vec![0, 50, 100, 150, 200]);
        assert_eq!(offsets(&resolve("all", 50).unwrap()), vec![0]);
        assert!(resolve("all", 0).unwrap().is_empty());
    }

    #[test]
    fn test_single_offset() {
        assert_eq!(offsets(&resolve("150", 237).unwrap()), vec![150]);
        assert_eq!(offsets(&resolve("99999", 10).unwrap()), vec![99999]);
    }

    #[test]
    fn test_long_number_is_post_id() {
        assert_eq!(
            resolve("12345678", 237).unwrap(),
            vec![FetchRange::Ids(IdFilter::Single("12345678".into()))]
        );
        assert!(matches!(
            resolve("123456", 237).unwrap()[0],
            FetchRange::Ids(IdFilter::Single(_))
        ));
    }

    #[test]
    fn test_offset_ranges() {
        assert_eq!(offsets(&resolve("100-end", 237).unwrap()), vec![100, 150, 200]);
        assert_eq!(offsets(&resolve("0-60", 120).unwrap()), vec![0, 50]);
        assert_eq!(offsets(&resolve("start-end", 120).unwrap()), vec![0, 50, 100]);
        assert_eq!(offsets(&resolve("start-100", 237).unwrap()), vec![0, 50]);
        assert_eq!(offsets(&resolve("0-50", 237).unwrap()), vec![0]);
        assert!(resolve("50-50", 237).unwrap().is_empty());
    }

    #[test]
    fn test_reversed_offset_range_is_invalid() {
        assert!(matches!(
            resolve("100-50", 237),
            Err(Error::InvalidRangeExpression(_))
        ));
    }

    #[test]
    fn test_id_ranges() {
        assert_eq!(
            resolve("9000001-9000100", 237).unwrap(),
            vec![FetchRange::Ids(IdFilter::Range {
                low: "9000001".into(),
                high: "9000100".into(),
            })]
        );
        // Endpoints are ordered regardless of input order.
        assert_eq!(
            resolve("9000100-9000001", 237).unwrap(),
            vec![FetchRange::Ids(IdFilter::Range {
                low: "9000001".into(),
                high: "9000100".into(),
            })]
        );
        // One bound beyond the post count is enough to switch to ids.
        assert_eq!(
            resolve("start-555555", 237).unwrap(),
            vec![FetchRange::Ids(IdFilter::Range {
                low: "0".into(),
                high: "555555".into(),
            })]
        );
    }

    #[test]
    fn test_invalid_expressions() {
        for expr in ["", "newest", "1-2-3", "a-b", "10-", "-10", "all-end", "1.5"] {
            match resolve(expr, 100) {
                Err(Error::InvalidRangeExpression(original)) => assert_eq!(original, expr),
                other => panic!("{expr:?} resolved to {other:?}"),
            }
        }
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert_eq!(offsets(&resolve("  all ", 60).unwrap()), vec![0, 50]);
    }

    #[test]
    fn test_id_filter_matching() {
        let filter = IdFilter::range("100", "99");
        assert!(filter.matches("99"));
        assert!(filter.matches("100"));
        assert!(!filter.matches("98"));
        assert!(!filter.matches("1000"));
        assert_eq!(filter.endpoints(), vec!["99", "100"]);

        let single = IdFilter::Single("42".into());
        assert!(single.matches("42"));
        assert!(!single.matches("420"));
    }

    #[test]
    fn test_all_offsets() {
        assert_eq!(all_offsets(101), vec![0, 50, 100]);
        assert_eq!(all_offsets(100), vec![0, 50]);
    }
}
