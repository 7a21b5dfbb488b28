//! Fixed price bands used by the bar chart

/// Price interval used as a filter refinement.
///
/// Matches `greater_than < price <= at_most`; a `None` bound is open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub greater_than: Option<f64>,
    pub at_most: Option<f64>,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        self.greater_than.map_or(true, |lower| price > lower)
            && self.at_most.map_or(true, |upper| price <= upper)
    }
}

/// One histogram band, labelled `min-max` (or `min-above` when open-ended)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBand {
    pub min: u32,
    pub max: Option<u32>,
}

/// Contiguous, non-overlapping bands covering every non-negative price
pub const PRICE_BANDS: [PriceBand; 10] = [
    PriceBand { min: 0, max: Some(100) },
    PriceBand { min: 101, max: Some(200) },
    PriceBand { min: 201, max: Some(300) },
    PriceBand { min: 301, max: Some(400) },
    PriceBand { min: 401, max: Some(500) },
    PriceBand { min: 501, max: Some(600) },
    PriceBand { min: 601, max: Some(700) },
    PriceBand { min: 701, max: Some(800) },
    PriceBand { min: 801, max: Some(900) },
    PriceBand { min: 901, max: None },
];

impl PriceBand {
    pub fn label(&self) -> String {
        match self.max {
            Some(max) => format!("{}-{}", self.min, max),
            None => format!("{}-above", self.min),
        }
    }

    /// Filter range for this band. The lower edge is exclusive of the
    /// previous band's maximum so that fractional prices such as 100.5
    /// still fall in exactly one band.
    pub fn price_range(&self) -> PriceRange {
        PriceRange {
            greater_than: self.min.checked_sub(1).map(f64::from),
            at_most: self.max.map(f64::from),
        }
    }
}
