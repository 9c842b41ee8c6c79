//! `favorites` subcommand handlers.

use bizsearch_client::QueryClient;
use bizsearch_core::{SortDir, SortField};
use sqlx::SqlitePool;

use crate::app::App;
use crate::render::{render_pager, render_results};

/// # Errors
///
/// Returns an error if the store query fails.
pub(crate) async fn run_favorites_list(pool: &SqlitePool) -> anyhow::Result<()> {
    let rows = bizsearch_db::list_favorites(pool).await?;
    if rows.is_empty() {
        println!("no favorites yet; add one with `favorites add <business-id>`");
        return Ok(());
    }

    println!("{:<22}BUSINESS ID", "ADDED");
    for row in &rows {
        println!(
            "{:<22}{}",
            row.created_at.format("%Y-%m-%d %H:%M:%S"),
            row.business_id
        );
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the store write fails.
pub(crate) async fn run_favorites_add(pool: &SqlitePool, business_id: &str) -> anyhow::Result<()> {
    if bizsearch_db::put_favorite(pool, business_id).await? {
        println!("added {business_id}");
    } else {
        println!("{business_id} is already a favorite");
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the store write fails.
pub(crate) async fn run_favorites_remove(
    pool: &SqlitePool,
    business_id: &str,
) -> anyhow::Result<()> {
    if bizsearch_db::delete_favorite(pool, business_id).await? {
        println!("removed {business_id}");
    } else {
        println!("{business_id} was not a favorite");
    }
    Ok(())
}

/// Fetches every favorited business and prints them.
///
/// # Errors
///
/// Returns an error if a startup load or the lookup fails.
pub(crate) async fn run_favorites_show(
    client: &QueryClient,
    pool: &SqlitePool,
    sort: SortField,
    dir: SortDir,
) -> anyhow::Result<()> {
    let mut app = App::start(client, pool).await?;
    app.show_favorites().await?;
    app.set_sort(sort, dir);

    print!("{}", render_results(app.session(), app.favorites()));
    if let Some(pager) = render_pager(app.session()) {
        println!("{pager}");
    }
    Ok(())
}
