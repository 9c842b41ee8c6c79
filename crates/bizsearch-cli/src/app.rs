//! Session controller shared by the one-shot commands and the shell.
//!
//! [`App`] borrows the query client and the store pool built in `main` and
//! owns everything derived from them: the category index, the current
//! favorites snapshot and the search session. Failures from either
//! collaborator surface as [`AppError::Io`].

use bizsearch_client::QueryClient;
use bizsearch_core::{
    AppError, Category, CategoryIndex, FavoritesSet, FetchMode, SearchSession, SortDir, SortField,
};
use sqlx::SqlitePool;

pub(crate) struct App<'a> {
    client: &'a QueryClient,
    pool: &'a SqlitePool,
    index: CategoryIndex,
    favorites: FavoritesSet,
    session: SearchSession,
}

impl<'a> App<'a> {
    /// Loads categories and favorites concurrently. No search is run.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] if either load fails.
    pub(crate) async fn start(client: &'a QueryClient, pool: &'a SqlitePool) -> Result<Self, AppError> {
        let (categories, favorites) = tokio::try_join!(
            async {
                client
                    .fetch_categories()
                    .await
                    .map_err(|e| AppError::io("failed to load categories", e))
            },
            async {
                bizsearch_db::load_favorites_set(pool)
                    .await
                    .map_err(|e| AppError::io("failed to load favorites", e))
            },
        )?;

        let index = CategoryIndex::build(categories);
        tracing::info!(
            categories = index.len(),
            favorites = favorites.len(),
            "startup loads complete"
        );

        Ok(Self {
            client,
            pool,
            index,
            favorites,
            session: SearchSession::new(),
        })
    }

    pub(crate) fn session(&self) -> &SearchSession {
        &self.session
    }

    pub(crate) fn session_mut(&mut self) -> &mut SearchSession {
        &mut self.session
    }

    pub(crate) fn index(&self) -> &CategoryIndex {
        &self.index
    }

    pub(crate) fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    pub(crate) fn suggest(&self, query: &str) -> Vec<Category> {
        self.index.suggest(query).into_iter().cloned().collect()
    }

    pub(crate) fn set_category_text(&mut self, text: &str) {
        self.session.set_category_text(&self.index, text);
    }

    /// Fetches one search page at `offset` with the current form values.
    ///
    /// # Errors
    ///
    /// - [`AppError::Configuration`] if no zip is set.
    /// - [`AppError::Io`] if the query service fails.
    pub(crate) async fn search(&mut self, offset: u32) -> Result<(), AppError> {
        let params = self.session.search_params(offset)?;
        let ticket = self.session.begin_request(FetchMode::Search, offset);
        let batch = self
            .client
            .search_businesses(&params)
            .await
            .map_err(|e| AppError::io("business search failed", e))?;

        let returned = batch.business.len();
        if self.session.apply_search_batch(ticket, batch, &self.favorites) {
            tracing::debug!(offset, returned, "applied search batch");
        } else {
            tracing::debug!(offset, "discarded stale search batch");
        }
        Ok(())
    }

    /// Fetches every favorited business and switches to favorites mode.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] if the query service fails.
    pub(crate) async fn show_favorites(&mut self) -> Result<(), AppError> {
        let ids = self.favorites.to_list();
        let ticket = self.session.begin_request(FetchMode::Favorite, 0);
        let batch = self
            .client
            .fetch_businesses_by_id(&ids)
            .await
            .map_err(|e| AppError::io("favorites lookup failed", e))?;

        if !self.session.apply_favorites_batch(ticket, batch) {
            tracing::debug!("discarded stale favorites batch");
        }
        Ok(())
    }

    /// Moves `page_delta` pages in the current fetch mode.
    ///
    /// # Errors
    ///
    /// - [`AppError::Configuration`] before any results were shown.
    /// - [`AppError::Io`] if the refetch fails.
    pub(crate) async fn page(&mut self, page_delta: i32) -> Result<(), AppError> {
        match self.session.require_fetch_mode()? {
            FetchMode::Search => {
                let offset = self.session.page_offset(page_delta);
                self.search(offset).await
            }
            FetchMode::Favorite => self.show_favorites().await,
        }
    }

    /// Flips membership of `business_id` in the store, then reloads the
    /// snapshot. Returns the new membership.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] if the write or the reload fails.
    pub(crate) async fn toggle_favorite(&mut self, business_id: &str) -> Result<bool, AppError> {
        let was_favorite = self.favorites.has(business_id);
        if was_favorite {
            bizsearch_db::delete_favorite(self.pool, business_id)
                .await
                .map_err(|e| AppError::io("failed to remove favorite", e))?;
        } else {
            bizsearch_db::put_favorite(self.pool, business_id)
                .await
                .map_err(|e| AppError::io("failed to add favorite", e))?;
        }
        self.favorites = bizsearch_db::load_favorites_set(self.pool)
            .await
            .map_err(|e| AppError::io("failed to reload favorites", e))?;

        tracing::info!(business_id, favorite = !was_favorite, "toggled favorite");
        Ok(self.favorites.has(business_id))
    }

    /// Column-header click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if no results are displayed.
    pub(crate) fn toggle_sort(&mut self, field: SortField) -> Result<(), AppError> {
        self.session.toggle_sort(field, &self.favorites)
    }

    pub(crate) fn set_sort(&mut self, field: SortField, dir: SortDir) {
        self.session.set_sort(field, dir, &self.favorites);
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
