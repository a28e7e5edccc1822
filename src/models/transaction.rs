use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::entities::products;

/// Query parameters for GET /api/transactions
///
/// Everything is taken as text so that bad values surface as validation
/// errors instead of extractor rejections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsQuery {
    /// Calendar month as `YYYY-MM`
    pub month: Option<String>,
    /// Free-text search over title, description and price
    pub search: Option<String>,
    /// 1-based page number (default: 1)
    pub page: Option<String>,
    /// Page size (default: 10)
    pub per_page: Option<String>,
}

/// A record as delivered by the seed source, before validation.
///
/// Extra fields in the seed payload (`id`, `image`, `sold`, ...) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub date_of_sale: Option<String>,
}

impl RawRecord {
    /// Check the record invariants and turn it into an insertable row.
    pub fn validate(self) -> Result<products::ActiveModel, String> {
        let title = required_text("title", self.title)?;
        let description = required_text("description", self.description)?;
        let category = required_text("category", self.category)?;

        let price = self.price.ok_or("price is required")?;
        if !price.is_finite() {
            return Err(format!("price {} is not a finite number", price));
        }

        let raw_date = self.date_of_sale.ok_or("dateOfSale is required")?;
        let date_of_sale = parse_sale_date(&raw_date)
            .ok_or_else(|| format!("dateOfSale \"{}\" is not a valid date", raw_date))?;

        Ok(products::ActiveModel {
            title: Set(title),
            description: Set(description),
            price: Set(price),
            category: Set(category),
            date_of_sale: Set(date_of_sale),
            ..Default::default()
        })
    }
}

fn required_text(field: &str, value: Option<String>) -> Result<String, String> {
    match value {
        Some(text) if !text.is_empty() => Ok(text),
        Some(_) => Err(format!("{} must not be empty", field)),
        None => Err(format!("{} is required", field)),
    }
}

/// Parse a sale date from the seed payload.
///
/// Accepts RFC 3339 (offset normalized to UTC), a naive `YYYY-MM-DDTHH:MM:SS`
/// timestamp taken as UTC, or a bare `YYYY-MM-DD` date at midnight UTC.
pub fn parse_sale_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A stored record as returned by GET /api/transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    /// RFC 3339, UTC
    pub date_of_sale: String,
}

impl From<products::Model> for TransactionRecord {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            price: model.price,
            category: model.category,
            date_of_sale: model.date_of_sale.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
