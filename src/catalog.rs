//! Catalog
//!
//! Listing order, pagination and the small value types products carry.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Products per listing page.
pub const PAGE_SIZE: u32 = 12;

/// Errors raised when parsing catalog values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogValueError {
    /// Unrecognised product label.
    #[error("unknown product label {0:?}")]
    UnknownLabel(String),

    /// Unrecognised size.
    #[error("unknown size {0:?}")]
    UnknownSize(String),

    /// Rating outside 1..=5.
    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(i64),
}

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    /// Most viewed first.
    #[default]
    Popularity,

    /// Newest first.
    Date,

    /// Cheapest first.
    PriceLow,

    /// Most expensive first.
    PriceHigh,

    /// Highest approved-review average first, ties by views.
    Rating,
}

impl ProductSort {
    /// Stable identifier used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::Date => "date",
            Self::PriceLow => "price_low",
            Self::PriceHigh => "price_high",
            Self::Rating => "rating",
        }
    }

    /// Parse a query-string key, falling back to [`ProductSort::Popularity`].
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "date" => Self::Date,
            "price_low" => Self::PriceLow,
            "price_high" => Self::PriceHigh,
            "rating" => Self::Rating,
            _ => Self::Popularity,
        }
    }
}

/// A resolved listing page. Numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Current page.
    pub number: u32,

    /// Page count, at least one.
    pub total_pages: u32,

    /// Matching products across all pages.
    pub total_items: u64,
}

impl Page {
    /// Resolve the requested page against `total_items`.
    ///
    /// Missing or zero requests give the first page; requests past the end give the last.
    #[must_use]
    pub fn resolve(requested: Option<u32>, total_items: u64) -> Self {
        let total_pages = u32::try_from(total_items.div_ceil(u64::from(PAGE_SIZE)))
            .unwrap_or(u32::MAX)
            .max(1);

        Self {
            number: requested.unwrap_or(1).clamp(1, total_pages),
            total_pages,
            total_items,
        }
    }

    /// Rows to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.number.saturating_sub(1)) * u64::from(PAGE_SIZE)
    }

    /// Rows to take.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        PAGE_SIZE
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Merchandising badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductLabel {
    /// Newly listed.
    New,
    /// Marked down.
    Sale,
    /// Trending.
    Hot,
    /// Best seller.
    Top,
    /// Sold out.
    Out,
}

impl ProductLabel {
    /// Stable identifier used in storage and transport.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Sale => "sale",
            Self::Hot => "hot",
            Self::Top => "top",
            Self::Out => "out",
        }
    }

    /// Shopper-facing text.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::New => "جدید",
            Self::Sale => "تخفیف",
            Self::Hot => "داغ",
            Self::Top => "برتر",
            Self::Out => "ناموجود",
        }
    }
}

impl FromStr for ProductLabel {
    type Err = CatalogValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "new" => Ok(Self::New),
            "sale" => Ok(Self::Sale),
            "hot" => Ok(Self::Hot),
            "top" => Ok(Self::Top),
            "out" => Ok(Self::Out),
            other => Err(CatalogValueError::UnknownLabel(other.to_string())),
        }
    }
}

/// Garment size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeOption {
    /// Extra small.
    Xs,
    /// Small.
    S,
    /// Medium.
    M,
    /// Large.
    L,
    /// Extra large.
    Xl,
    /// Double extra large.
    Xxl,
}

impl SizeOption {
    /// Stable identifier used in storage and transport.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::S => "s",
            Self::M => "m",
            Self::L => "l",
            Self::Xl => "xl",
            Self::Xxl => "xxl",
        }
    }
}

impl FromStr for SizeOption {
    type Err = CatalogValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "xs" => Ok(Self::Xs),
            "s" => Ok(Self::S),
            "m" => Ok(Self::M),
            "l" => Ok(Self::L),
            "xl" => Ok(Self::Xl),
            "xxl" => Ok(Self::Xxl),
            _ => Err(CatalogValueError::UnknownSize(value.to_string())),
        }
    }
}

/// Review score, 1 to 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    /// The score.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = CatalogValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(score @ 1..=5) => Ok(Self(score)),
            _ => Err(CatalogValueError::RatingOutOfRange(value)),
        }
    }
}

/// Whole-percent markdown from `old_price` to `price`, rounded down. Zero without a markdown.
#[must_use]
pub fn discount_percentage(price: u64, old_price: Option<u64>) -> u64 {
    match old_price {
        Some(old_price) if old_price > price => {
            (old_price - price).saturating_mul(100) / old_price
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn unknown_sort_falls_back_to_popularity() {
        assert_eq!(ProductSort::from_key("price_high"), ProductSort::PriceHigh);
        assert_eq!(ProductSort::from_key("cheapest"), ProductSort::Popularity);
        assert_eq!(ProductSort::from_key(""), ProductSort::default());
    }

    #[test]
    fn page_clamps_to_range() {
        let page = Page::resolve(Some(9), 30);

        assert_eq!(page.number, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.offset(), 24);
        assert!(!page.has_next());
        assert!(page.has_previous());

        assert_eq!(Page::resolve(Some(0), 30).number, 1);
        assert_eq!(Page::resolve(None, 30).number, 1);
    }

    #[test]
    fn empty_listing_still_has_one_page() {
        let page = Page::resolve(Some(4), 0);

        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn rating_bounds() -> TestResult {
        assert_eq!(Rating::try_from(5)?.get(), 5);
        assert!(Rating::try_from(0).is_err());
        assert!(Rating::try_from(6).is_err());
        assert!(Rating::try_from(-1).is_err());

        Ok(())
    }

    #[test]
    fn size_and_label_parse() -> TestResult {
        assert_eq!("XL".parse::<SizeOption>()?, SizeOption::Xl);
        assert_eq!("sale".parse::<ProductLabel>()?, ProductLabel::Sale);
        assert!("huge".parse::<SizeOption>().is_err());

        Ok(())
    }

    #[test]
    fn markdown_percentage_rounds_down() {
        assert_eq!(discount_percentage(70_000, Some(100_000)), 30);
        assert_eq!(discount_percentage(66_667, Some(100_000)), 33);
        assert_eq!(discount_percentage(100_000, Some(90_000)), 0);
        assert_eq!(discount_percentage(100_000, None), 0);
    }
}
