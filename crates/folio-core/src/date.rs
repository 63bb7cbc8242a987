//! # Transaction Date Module
//!
//! Provides [`TxnDate`], the validated calendar date attached to every
//! transaction.
//!
//! ## Why a Dedicated Type?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE STRINGLY-TYPED DATE PROBLEM                                        │
//! │                                                                         │
//! │  If dates live as raw "MM-DD-YYYY" strings, every consumer must slice   │
//! │  them positionally:                                                     │
//! │    year  = &s[6..10]   month = &s[0..2]   day = &s[3..5]                │
//! │                                                                         │
//! │  One malformed record ("2024-01-15", "Jan 15") and the aggregation      │
//! │  either panics or silently files revenue under a garbage key.           │
//! │                                                                         │
//! │  OUR SOLUTION: Validate Once, At The Boundary                           │
//! │    TxnDate parses and calendar-checks the string on construction.       │
//! │    Everything downstream works with a date that cannot be malformed.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Exactly `MM-DD-YYYY` (10 characters, zero-padded). This is the canonical
//! serialized form in the ledger snapshot and the only form [`TxnDate`]
//! parses.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// The canonical chrono format string for `MM-DD-YYYY`.
const DATE_FORMAT: &str = "%m-%d-%Y";

/// Length of the canonical form. Checked before parsing so that chrono's
/// tolerance for unpadded components ("1-5-2024") cannot admit
/// non-canonical strings.
const DATE_LEN: usize = 10;

// =============================================================================
// TxnDate Type
// =============================================================================

/// A validated transaction date with canonical form `MM-DD-YYYY`.
///
/// ## Design Decisions
/// - **Wraps [`chrono::NaiveDate`]**: calendar correctness (leap years,
///   month lengths) comes from chrono, not hand-rolled arithmetic
/// - **Construction always validates**: there is no way to hold a `TxnDate`
///   for February 30th or for a string of the wrong shape
/// - **Serde through the canonical string**: ledger snapshots store
///   `"01-15-2024"`, never a struct encoding
///
/// ## Ordering
/// `TxnDate` orders chronologically (derived from `NaiveDate`). The
/// zero-padded component keys order the same way lexically, which is what
/// keeps the sales report's string-keyed groupings chronological.
///
/// ## Example
/// ```rust
/// use folio_core::date::TxnDate;
///
/// let date: TxnDate = "01-15-2024".parse().unwrap();
/// assert_eq!(date.year_key(), "2024");
/// assert_eq!(date.month_key(), "01");
/// assert_eq!(date.day_key(), "15");
/// assert_eq!(date.to_string(), "01-15-2024");
///
/// // Calendar-impossible dates are rejected, not wrapped around
/// assert!("02-30-2024".parse::<TxnDate>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct TxnDate(NaiveDate);

impl TxnDate {
    /// Builds a date from calendar components.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::date::TxnDate;
    ///
    /// let date = TxnDate::from_ymd(2024, 1, 15).unwrap();
    /// assert_eq!(date.to_string(), "01-15-2024");
    ///
    /// assert!(TxnDate::from_ymd(2023, 2, 30).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(TxnDate)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "date".to_string(),
                reason: format!("{year:04}-{month:02}-{day:02} is not a calendar date"),
            })
    }

    /// Returns today's date from the UTC clock.
    ///
    /// This is the timestamp stamped onto transactions at checkout time.
    pub fn today() -> Self {
        TxnDate(Utc::now().date_naive())
    }

    /// The 4-digit year grouping key (`"2024"`).
    pub fn year_key(&self) -> String {
        format!("{:04}", self.0.year())
    }

    /// The 2-digit month grouping key (`"01"`).
    pub fn month_key(&self) -> String {
        format!("{:02}", self.0.month())
    }

    /// The 2-digit day grouping key (`"15"`).
    pub fn day_key(&self) -> String {
        format!("{:02}", self.0.day())
    }

    /// The underlying calendar date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

// =============================================================================
// Parsing & Formatting
// =============================================================================

impl FromStr for TxnDate {
    type Err = ValidationError;

    /// Parses the canonical `MM-DD-YYYY` form.
    ///
    /// ## Rules
    /// - Exactly 10 characters (zero-padded components)
    /// - Components must be numeric with `-` separators
    /// - The result must be a real calendar date
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != DATE_LEN {
            return Err(ValidationError::InvalidFormat {
                field: "date".to_string(),
                reason: format!("expected MM-DD-YYYY, got {:?}", s),
            });
        }

        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(TxnDate)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "date".to_string(),
                reason: format!("expected MM-DD-YYYY, got {:?}", s),
            })
    }
}

impl fmt::Display for TxnDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// Serde deserialization goes through the validating parser.
impl TryFrom<String> for TxnDate {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Serde serialization emits the canonical string.
impl From<TxnDate> for String {
    fn from(date: TxnDate) -> Self {
        date.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
