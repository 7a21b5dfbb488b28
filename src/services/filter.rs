//! Storage-agnostic transaction filter

use chrono::Datelike;

use crate::models::Transaction;

use super::{month::Month, price_band::PriceRange};

/// Predicate over transaction records.
///
/// The month part is always present. The search part, when set, matches the
/// title, the description or the decimal text of the price, case-insensitively.
/// All parts are combined with AND. Repository adapters either translate the
/// filter into their native query language or evaluate [`matches`](Self::matches).
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    pub month: Month,
    pub search: Option<String>,
    pub price: Option<PriceRange>,
    pub sold: Option<bool>,
}

impl TransactionFilter {
    /// Build the month + search predicate. Blank searches are dropped.
    pub fn new(month: Month, search: Option<&str>) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            month,
            search,
            price: None,
            sold: None,
        }
    }

    /// Restrict to a price range
    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price = Some(range);
        self
    }

    /// Restrict to sold or unsold records
    pub fn with_sold(mut self, sold: bool) -> Self {
        self.sold = Some(sold);
        self
    }

    /// Evaluate the predicate against a record held in memory
    pub fn matches(&self, record: &Transaction) -> bool {
        if record.date_of_sale.month() != self.month.number() {
            return false;
        }
        if let Some(sold) = self.sold {
            if record.sold != sold {
                return false;
            }
        }
        if let Some(range) = self.price {
            if !range.contains(record.price) {
                return false;
            }
        }
        match self.search {
            Some(ref term) => {
                let term = term.to_lowercase();
                record.title.to_lowercase().contains(&term)
                    || record.description.to_lowercase().contains(&term)
                    || price_text(record.price).contains(&term)
            }
            None => true,
        }
    }
}

/// Text of a price as PostgreSQL renders `float8` (`50`, `329.85`, `1e+21`).
/// Exponent form is used below 1e-4 and from 1e15 up.
pub fn price_text(price: f64) -> String {
    if price == 0.0 || !price.is_finite() {
        return price.to_string();
    }

    let scientific = format!("{:e}", price);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => return price.to_string(),
    };

    if (-4..15).contains(&exponent) {
        price.to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}
