//! Query Builder
//!
//! Turns raw request parameters into validated store predicates.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ColumnTrait, Condition,
    sea_query::{Expr, Func, LikeExpr},
};

use crate::entities::products;
use crate::error::AppError;

/// A calendar month as the instants `[start, end)`, both at midnight UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MonthRange {
    /// Midnight at the start of the last day of the month ("day 0" of the
    /// following month).
    pub fn last_day(&self) -> DateTime<Utc> {
        self.end - chrono::Duration::days(1)
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// `start <= dateOfSale < end`
    pub fn half_open(&self) -> Condition {
        Condition::all()
            .add(products::Column::DateOfSale.gte(self.start))
            .add(products::Column::DateOfSale.lt(self.end))
    }

    /// `start <= dateOfSale <= last_day()`
    ///
    /// Used by the statistics and bar-chart reports, which stop at midnight
    /// of the month's last day.
    pub fn through_last_day(&self) -> Condition {
        Condition::all()
            .add(products::Column::DateOfSale.gte(self.start))
            .add(products::Column::DateOfSale.lte(self.last_day()))
    }
}

/// Parse a `YYYY-MM` month parameter into its date range.
pub fn build_month_range_filter(month: Option<&str>) -> Result<MonthRange, AppError> {
    let month = match month {
        Some(m) if !m.is_empty() => m,
        _ => return Err(AppError::Validation("month is required (YYYY-MM)".to_string())),
    };

    let invalid = || AppError::Validation(format!("invalid month \"{}\", expected YYYY-MM", month));

    let bytes = month.as_bytes();
    let well_formed = bytes.len() == 7
        && bytes[4] == b'-'
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[5..].iter().all(u8::is_ascii_digit);
    if !well_formed {
        return Err(invalid());
    }

    let year: i32 = month[..4].parse().map_err(|_| invalid())?;
    let month_number: u32 = month[5..].parse().map_err(|_| invalid())?;

    let start = NaiveDate::from_ymd_opt(year, month_number, 1).ok_or_else(invalid)?;
    let (next_year, next_month) = if month_number == 12 {
        (year + 1, 1)
    } else {
        (year, month_number + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1).ok_or_else(invalid)?;

    Ok(MonthRange {
        start: midnight_utc(start).ok_or_else(invalid)?,
        end: midnight_utc(end).ok_or_else(invalid)?,
    })
}

fn midnight_utc(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

/// Free-text search over title, description and price.
///
/// Title and description match case-insensitively on a literal substring;
/// price matches only when the term parses as a number equal to it. An empty
/// or whitespace-only term yields `None`, meaning no restriction.
///
/// Case folding of non-ASCII letters is only guaranteed on Postgres: SQLite's
/// `LOWER()` folds ASCII only, so a mixed-case non-ASCII term can miss there.
pub fn build_search_filter(term: &str) -> Option<Condition> {
    if term.trim().is_empty() {
        return None;
    }

    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));

    let mut condition = Condition::any()
        .add(
            Expr::expr(Func::lower(Expr::col(products::Column::Title)))
                .like(LikeExpr::new(pattern.clone()).escape('\\')),
        )
        .add(
            Expr::expr(Func::lower(Expr::col(products::Column::Description)))
                .like(LikeExpr::new(pattern).escape('\\')),
        );

    if let Ok(price) = term.trim().parse::<f64>() {
        if price.is_finite() {
            condition = condition.add(products::Column::Price.eq(price));
        }
    }

    Some(condition)
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 1-based page selection for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            per_page: Self::DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_PER_PAGE: u64 = 10;

    /// Largest LIMIT/OFFSET the database drivers accept
    pub const MAX_ROWS: u64 = i64::MAX as u64;

    /// Validate the `page` and `perPage` parameters, applying defaults for
    /// absent or empty values.
    ///
    /// `perPage` and the resulting offset must both fit in an `i64`.
    pub fn from_params(page: Option<&str>, per_page: Option<&str>) -> Result<Self, AppError> {
        let pagination = Self {
            page: parse_positive("page", page)?.unwrap_or(Self::DEFAULT_PAGE),
            per_page: parse_positive("perPage", per_page)?.unwrap_or(Self::DEFAULT_PER_PAGE),
        };

        match (pagination.page - 1).checked_mul(pagination.per_page) {
            Some(offset) if offset <= Self::MAX_ROWS => Ok(pagination),
            _ => Err(AppError::Validation(format!(
                "page {} with perPage {} is out of range",
                pagination.page, pagination.per_page
            ))),
        }
    }

    /// Number of records to skip
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page).min(Self::MAX_ROWS)
    }

    pub fn limit(&self) -> u64 {
        self.per_page
    }
}

fn parse_positive(name: &str, value: Option<&str>) -> Result<Option<u64>, AppError> {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return Ok(None),
    };

    match value.parse::<u64>() {
        Ok(n) if (1..=Pagination::MAX_ROWS).contains(&n) => Ok(Some(n)),
        _ => Err(AppError::Validation(format!(
            "{} must be a positive integer, got \"{}\"",
            name, value
        ))),
    }
}
