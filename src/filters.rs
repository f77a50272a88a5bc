//! Filtering module for practice sessions
//!
//! Optional pre-aggregation filters: a date range (evaluated in the
//! configured timezone, so `--since` means "since that local day") and an
//! instrument name. All filters are optional and combine.
//!
//! # Examples
//!
//! ```
//! use pjstat::filters::SessionFilter;
//! use chrono::NaiveDate;
//!
//! // Sessions logged under "Piano" during January 2024
//! let filter = SessionFilter::new()
//!     .with_since(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
//!     .with_until(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
//!     .with_instrument("Piano".to_string());
//! ```

use chrono::NaiveDate;
use chrono_tz::Tz;
use pjstat_core::types::PracticeSession;

/// Filter configuration for practice sessions
#[derive(Debug, Clone)]
pub struct SessionFilter {
    /// Start date filter (inclusive)
    pub since_date: Option<NaiveDate>,
    /// End date filter (inclusive)
    pub until_date: Option<NaiveDate>,
    /// Instrument name filter
    pub instrument: Option<String>,
    /// Timezone the date filters are evaluated in
    pub tz: Tz,
}

impl Default for SessionFilter {
    fn default() -> Self {
        Self {
            since_date: None,
            until_date: None,
            instrument: None,
            tz: Tz::UTC,
        }
    }
}

impl SessionFilter {
    /// Create a new filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start date filter
    pub fn with_since(mut self, date: NaiveDate) -> Self {
        self.since_date = Some(date);
        self
    }

    /// Set the end date filter
    pub fn with_until(mut self, date: NaiveDate) -> Self {
        self.until_date = Some(date);
        self
    }

    /// Set the instrument filter
    pub fn with_instrument(mut self, instrument: String) -> Self {
        self.instrument = Some(instrument);
        self
    }

    /// Set the timezone used to evaluate the date filters
    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.tz = tz;
        self
    }

    /// Check if a session passes the filter
    pub fn matches(&self, session: &PracticeSession) -> bool {
        let session_date = session.start_time.to_daily_date_with_tz(&self.tz);
        let session_date = session_date.inner();

        if let Some(since) = &self.since_date
            && session_date < since
        {
            return false;
        }

        if let Some(until) = &self.until_date
            && session_date > until
        {
            return false;
        }

        if let Some(instrument_filter) = &self.instrument {
            match &session.instrument {
                Some(instrument) => {
                    if instrument != instrument_filter {
                        return false;
                    }
                }
                // A session with no instrument never matches an instrument filter
                None => return false,
            }
        }

        true
    }

    /// Filter a stream of sessions
    ///
    /// Applies the configured filters to a session stream, passing errors
    /// through untouched.
    pub async fn filter_stream<S>(
        self,
        stream: S,
    ) -> impl futures::Stream<Item = pjstat_core::error::Result<PracticeSession>>
    where
        S: futures::Stream<Item = pjstat_core::error::Result<PracticeSession>>,
    {
        use futures::StreamExt;

        stream.filter_map(move |result| {
            let filter = self.clone();
            async move {
                match result {
                    Ok(session) => {
                        if filter.matches(&session) {
                            Some(Ok(session))
                        } else {
                            None
                        }
                    }
                    Err(e) => Some(Err(e)),
                }
            }
        })
    }
}
