//! One-shot `search` and `suggest` commands.

use bizsearch_client::QueryClient;
use bizsearch_core::{CategoryIndex, SortDir, SortField};
use sqlx::SqlitePool;

use crate::app::App;
use crate::render::{render_pager, render_results, render_suggestions};

/// Form values for a one-shot search.
#[derive(Debug, Clone)]
pub(crate) struct SearchOptions {
    pub zip: String,
    pub miles: u32,
    pub category: Option<String>,
    pub offset: u32,
    pub sort: SortField,
    pub dir: SortDir,
}

/// Runs a single search page and prints it.
///
/// # Errors
///
/// Returns an error if the zip is incomplete, the radius is out of range,
/// the category does not name exactly one category, or a remote call fails.
pub(crate) async fn run_search(
    client: &QueryClient,
    pool: &SqlitePool,
    opts: SearchOptions,
) -> anyhow::Result<()> {
    let mut app = App::start(client, pool).await?;

    let session = app.session_mut();
    if !session.set_zip(&opts.zip) || session.is_form_disabled() {
        anyhow::bail!("'{}' is not a complete zip code", opts.zip);
    }
    session.set_distance_miles(opts.miles)?;

    match opts.category.as_deref() {
        None => {}
        Some("") => app.session_mut().clear_category(),
        Some(category) => {
            app.set_category_text(category);
            if app.session().selected_category().is_none() {
                let hints: Vec<String> = app.suggest(category).into_iter().map(|c| c.title).collect();
                anyhow::bail!(
                    "'{category}' does not name exactly one category (suggestions: {})",
                    hints.join(", ")
                );
            }
        }
    }

    app.set_sort(opts.sort, opts.dir);
    app.search(opts.offset).await?;

    print!("{}", render_results(app.session(), app.favorites()));
    if let Some(pager) = render_pager(app.session()) {
        println!("{pager}");
    }
    Ok(())
}

/// Prints category suggestions for `query`.
///
/// # Errors
///
/// Returns an error if the category list cannot be fetched.
pub(crate) async fn run_suggest(client: &QueryClient, query: &str) -> anyhow::Result<()> {
    let categories = client.fetch_categories().await?;
    let index = CategoryIndex::build(categories);
    let suggestions: Vec<_> = index.suggest(query).into_iter().cloned().collect();
    print!("{}", render_suggestions(&suggestions));
    Ok(())
}
