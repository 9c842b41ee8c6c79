//! Search session state.
//!
//! A [`SearchSession`] holds everything the results view depends on: the
//! form inputs, the fetch mode, the paging offset, the sort order and the
//! current result batch. It performs no I/O. Callers ask it for the next
//! query, run that query elsewhere, and hand the batch back.
//!
//! Every fetch is tagged with a [`RequestTicket`]. Only the batch belonging
//! to the most recently issued ticket is applied; completions of older
//! requests are discarded, so a slow response can never overwrite a newer one.

use crate::business::{Business, ResultBatch};
use crate::category::{Category, CategoryIndex, CategoryRecord};
use crate::constants::{
    BIZ_DISPLAY_LIMIT, BIZ_SEARCH_LIMIT, CAT_CODE_DEFAULT, CAT_VAL_DEFAULT,
    DISTANCE_DEFAULT_MILES, DISTANCE_MILES_MAX, ZIP_DEFAULT,
};
use crate::error::AppError;
use crate::favorites::FavoritesSet;
use crate::form::{accepts_zip_input, compute_zip_final, miles_to_meters};
use crate::paging::{compute_page_offset, page_links, PageLinks};
use crate::sort::{sort_results, SortDir, SortField};

/// Which flow produced the displayed results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Search,
    Favorite,
}

impl FetchMode {
    /// Label used in the pager summary.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FetchMode::Search => "search results",
            FetchMode::Favorite => "favorites",
        }
    }
}

/// Variables for one business search query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub limit: u32,
    pub offset: u32,
    pub zip_code: String,
    pub radius_meters: f64,
    /// Category alias, when a category is selected.
    pub category: Option<String>,
}

/// Handle for an issued fetch. Pass it back with the batch it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    pub mode: FetchMode,
    pub offset: u32,
}

/// Pager line contents: the shown offset range, the total and the mode label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerSummary {
    pub start: u32,
    pub end: u32,
    pub total: u32,
    pub label: &'static str,
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    fetch_mode: Option<FetchMode>,
    offset: u32,
    sort_field: SortField,
    sort_dir: SortDir,
    zip: Option<String>,
    zip_final: Option<String>,
    distance_miles: u32,
    selected_category: Option<Category>,
    typed_category: Option<String>,
    result_count_total: Option<u32>,
    results: Option<Vec<Business>>,
    generation: u64,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self {
            fetch_mode: None,
            offset: 0,
            sort_field: SortField::Distance,
            sort_dir: SortDir::Asc,
            zip: Some(ZIP_DEFAULT.to_string()),
            zip_final: compute_zip_final(Some(ZIP_DEFAULT)),
            distance_miles: DISTANCE_DEFAULT_MILES,
            selected_category: Some(Category::from(CategoryRecord {
                alias: CAT_CODE_DEFAULT.to_string(),
                title: CAT_VAL_DEFAULT.to_string(),
            })),
            typed_category: Some(CAT_VAL_DEFAULT.to_string()),
            result_count_total: None,
            results: None,
            generation: 0,
        }
    }
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn fetch_mode(&self) -> Option<FetchMode> {
        self.fetch_mode
    }

    #[must_use]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    #[must_use]
    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    #[must_use]
    pub fn sort_dir(&self) -> SortDir {
        self.sort_dir
    }

    #[must_use]
    pub fn zip(&self) -> Option<&str> {
        self.zip.as_deref()
    }

    #[must_use]
    pub fn zip_final(&self) -> Option<&str> {
        self.zip_final.as_deref()
    }

    #[must_use]
    pub fn distance_miles(&self) -> u32 {
        self.distance_miles
    }

    #[must_use]
    pub fn distance_meters(&self) -> f64 {
        miles_to_meters(f64::from(self.distance_miles))
    }

    #[must_use]
    pub fn selected_category(&self) -> Option<&Category> {
        self.selected_category.as_ref()
    }

    #[must_use]
    pub fn typed_category(&self) -> Option<&str> {
        self.typed_category.as_deref()
    }

    #[must_use]
    pub fn result_count_total(&self) -> Option<u32> {
        self.result_count_total
    }

    #[must_use]
    pub fn results(&self) -> Option<&[Business]> {
        self.results.as_deref()
    }

    /// Applies typed zip input. Returns `false` (and keeps the old value) if
    /// the input is not even a partial zip code. Empty input clears the zip.
    pub fn set_zip(&mut self, raw: &str) -> bool {
        if raw.is_empty() {
            self.zip = None;
            self.zip_final = None;
            return true;
        }
        if !accepts_zip_input(raw) {
            return false;
        }
        self.zip = Some(raw.to_string());
        self.zip_final = compute_zip_final(Some(raw));
        true
    }

    /// Sets the search radius.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] outside `1..=25` miles.
    pub fn set_distance_miles(&mut self, miles: u32) -> Result<(), AppError> {
        if !(1..=DISTANCE_MILES_MAX).contains(&miles) {
            return Err(AppError::configuration(format!(
                "distance must be between 1 and {DISTANCE_MILES_MAX} miles, got {miles}"
            )));
        }
        self.distance_miles = miles;
        Ok(())
    }

    /// Stores typed category text and resolves it to a category when the
    /// text names exactly one.
    pub fn set_category_text(&mut self, index: &CategoryIndex, text: &str) {
        self.typed_category = (!text.is_empty()).then(|| text.to_string());
        self.selected_category = index.exact_single_match(text).cloned();
    }

    /// Selects a suggestion directly.
    pub fn select_category(&mut self, category: Category) {
        self.typed_category = Some(category.title.clone());
        self.selected_category = Some(category);
    }

    pub fn clear_category(&mut self) {
        self.typed_category = None;
        self.selected_category = None;
    }

    /// Search submission is disabled until the zip is complete.
    #[must_use]
    pub fn is_form_disabled(&self) -> bool {
        self.zip_final.is_none()
    }

    /// Builds search variables for `offset` from the current form state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if no zip is set.
    pub fn search_params(&self, offset: u32) -> Result<SearchParams, AppError> {
        let zip_code = self
            .zip
            .clone()
            .ok_or_else(|| AppError::configuration("zip must be set"))?;
        Ok(SearchParams {
            limit: BIZ_SEARCH_LIMIT,
            offset,
            zip_code,
            radius_meters: self.distance_meters(),
            category: self.selected_category.as_ref().map(|c| c.alias.clone()),
        })
    }

    /// Issues a ticket for a new fetch, superseding every earlier ticket.
    pub fn begin_request(&mut self, mode: FetchMode, offset: u32) -> RequestTicket {
        self.generation += 1;
        RequestTicket {
            generation: self.generation,
            mode,
            offset,
        }
    }

    /// Returns `true` if no newer request has been issued since `ticket`.
    #[must_use]
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Applies a search batch. Returns `false` and leaves state untouched when
    /// the ticket is stale.
    pub fn apply_search_batch(
        &mut self,
        ticket: RequestTicket,
        batch: ResultBatch,
        favorites: &FavoritesSet,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let mut business = batch.business;
        sort_results(&mut business, self.sort_field, self.sort_dir, favorites);

        self.fetch_mode = Some(FetchMode::Search);
        self.offset = ticket.offset;
        self.result_count_total = Some(batch.total);
        self.results = Some(business);
        true
    }

    /// Applies a favorites batch and resets the search-specific form fields.
    /// An empty batch also switches the sort to `name asc`; otherwise the
    /// sort order is kept and the batch stays in response order.
    /// Returns `false` and leaves state untouched when the ticket is stale.
    pub fn apply_favorites_batch(&mut self, ticket: RequestTicket, batch: ResultBatch) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        if batch.business.is_empty() {
            self.sort_field = SortField::Name;
            self.sort_dir = SortDir::Asc;
        }
        self.fetch_mode = Some(FetchMode::Favorite);
        self.clear_category();
        self.zip = None;
        self.zip_final = None;
        self.distance_miles = DISTANCE_DEFAULT_MILES;
        self.offset = 0;
        self.result_count_total = Some(batch.total);
        self.results = Some(batch.business);
        true
    }

    /// Column-header click: a new field keeps the direction, the current
    /// field flips it. The displayed results are re-sorted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if there are no results yet.
    pub fn toggle_sort(&mut self, field: SortField, favorites: &FavoritesSet) -> Result<(), AppError> {
        let results = self
            .results
            .as_mut()
            .ok_or_else(|| AppError::configuration("results must be set"))?;
        if self.sort_field == field {
            self.sort_dir = self.sort_dir.flipped();
        } else {
            self.sort_field = field;
        }
        sort_results(results, self.sort_field, self.sort_dir, favorites);
        Ok(())
    }

    /// Sets field and direction outright and re-sorts any displayed results.
    pub fn set_sort(&mut self, field: SortField, dir: SortDir, favorites: &FavoritesSet) {
        self.sort_field = field;
        self.sort_dir = dir;
        if let Some(results) = self.results.as_mut() {
            sort_results(results, field, dir, favorites);
        }
    }

    /// Fetch mode of the displayed results, required for paging.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] before the first batch is applied.
    pub fn require_fetch_mode(&self) -> Result<FetchMode, AppError> {
        self.fetch_mode
            .ok_or_else(|| AppError::configuration("fetch mode must be set"))
    }

    /// Offset `page_delta` pages away, using the display page size.
    #[must_use]
    pub fn page_offset(&self, page_delta: i32) -> u32 {
        compute_page_offset(
            self.offset,
            page_delta,
            BIZ_DISPLAY_LIMIT,
            self.result_count_total,
        )
    }

    /// Pager links; only search results are paged.
    #[must_use]
    pub fn page_links(&self) -> PageLinks {
        if self.fetch_mode != Some(FetchMode::Search) {
            return PageLinks {
                show_prev: false,
                show_next: false,
            };
        }
        page_links(self.offset, self.result_count_total, BIZ_DISPLAY_LIMIT)
    }

    /// Summary line for the pager.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if no batch has been applied.
    pub fn pager_summary(&self) -> Result<PagerSummary, AppError> {
        let mode = self.require_fetch_mode()?;
        let results = self
            .results
            .as_ref()
            .ok_or_else(|| AppError::configuration("results must be set"))?;
        let total = self
            .result_count_total
            .ok_or_else(|| AppError::configuration("result count total must be set"))?;
        let shown = u32::try_from(results.len()).unwrap_or(u32::MAX);
        Ok(PagerSummary {
            start: self.offset,
            end: self.offset.saturating_add(shown),
            total,
            label: mode.label(),
        })
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
