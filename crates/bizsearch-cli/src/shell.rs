//! Interactive search session.
//!
//! Reads one command per line from stdin and drives an [`App`]. The first
//! search runs with the default form values as soon as the startup loads
//! finish. A fatal [`AppError`](bizsearch_core::AppError) ends the session.

use bizsearch_client::QueryClient;
use bizsearch_core::{Category, SortField};
use sqlx::SqlitePool;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::app::App;
use crate::render::{render_pager, render_results, render_suggestions};

const PROMPT: &str = "bizsearch> ";

const HELP: &str = "\
commands:
  zip <code>          set the zip code (empty clears)
  miles <1-25>        set the search radius
  category [text|n]   set the category by title, or pick suggestion n; no argument clears
  suggest <prefix>    list matching categories
  search              run the search with the current form
  next | prev         page through search results
  sort <field>        sort by distance, name, location or favorite (repeat to flip)
  fav <row|id>        toggle a favorite
  favorites           show favorited businesses
  help                show this help
  quit                leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Empty,
    Zip(String),
    Miles(u32),
    Category(String),
    Suggest(String),
    Search,
    Next,
    Prev,
    Sort(SortField),
    Fav(String),
    Favorites,
    Help,
    Quit,
}

/// Parses one input line. `Err` carries a usage message for the user.
pub(crate) fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    match word {
        "" => Ok(ShellCommand::Empty),
        "zip" => Ok(ShellCommand::Zip(rest.to_string())),
        "miles" => rest
            .parse::<u32>()
            .map(ShellCommand::Miles)
            .map_err(|_| "usage: miles <1-25>".to_string()),
        "category" => Ok(ShellCommand::Category(rest.to_string())),
        "suggest" if !rest.is_empty() => Ok(ShellCommand::Suggest(rest.to_string())),
        "suggest" => Err("usage: suggest <prefix>".to_string()),
        "search" => Ok(ShellCommand::Search),
        "next" => Ok(ShellCommand::Next),
        "prev" => Ok(ShellCommand::Prev),
        "sort" => rest
            .parse::<SortField>()
            .map(ShellCommand::Sort)
            .map_err(|_| "usage: sort <distance|name|location|favorite>".to_string()),
        "fav" if !rest.is_empty() => Ok(ShellCommand::Fav(rest.to_string())),
        "fav" => Err("usage: fav <row|id>".to_string()),
        "favorites" => Ok(ShellCommand::Favorites),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command '{other}'; type `help`")),
    }
}

/// Resolves a `fav` argument: a 1-based row number of the displayed table,
/// otherwise a business id as typed.
fn resolve_business_id(app: &App<'_>, arg: &str) -> Option<String> {
    if let Ok(row) = arg.parse::<usize>() {
        return app
            .session()
            .results()
            .and_then(|results| results.get(row.checked_sub(1)?))
            .map(|b| b.id.clone());
    }
    Some(arg.to_string())
}

fn print_results(app: &App<'_>) {
    print!("{}", render_results(app.session(), app.favorites()));
    if let Some(pager) = render_pager(app.session()) {
        println!("{pager}");
    }
}

/// Runs the shell until `quit`, end of input or a fatal error.
///
/// # Errors
///
/// Returns the first fatal error; stdin read failures are reported the same way.
pub(crate) async fn run_shell(client: &QueryClient, pool: &SqlitePool) -> anyhow::Result<()> {
    let mut app = App::start(client, pool).await?;
    println!(
        "{} categories loaded; type `help` for commands",
        app.index().len()
    );
    app.search(0).await?;
    print_results(&app);

    let mut suggestions: Vec<Category> = Vec::new();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(usage) => {
                println!("{usage}");
                continue;
            }
        };

        match command {
            ShellCommand::Empty => {}
            ShellCommand::Quit => break,
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Zip(raw) => {
                let session = app.session_mut();
                if !session.set_zip(&raw) {
                    println!("'{raw}' is not a zip code; keeping {}", session.zip().unwrap_or("(none)"));
                } else if session.is_form_disabled() {
                    println!("zip incomplete; search is disabled until it is a 5-digit or ZIP+4 code");
                }
            }
            ShellCommand::Miles(miles) => {
                if let Err(e) = app.session_mut().set_distance_miles(miles) {
                    println!("{e}");
                }
            }
            ShellCommand::Category(text) => {
                let pick = text
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| suggestions.get(n.checked_sub(1)?).cloned());
                if let Some(category) = pick {
                    app.session_mut().select_category(category);
                } else {
                    app.set_category_text(&text);
                }
                match (app.session().selected_category(), app.session().typed_category()) {
                    (Some(category), _) => println!("category: {} ({})", category.title, category.alias),
                    (None, Some(typed)) => {
                        println!("'{typed}' does not name exactly one category; searching all categories");
                    }
                    (None, None) => println!("category cleared"),
                }
            }
            ShellCommand::Suggest(prefix) => {
                suggestions = app.suggest(&prefix);
                print!("{}", render_suggestions(&suggestions));
            }
            ShellCommand::Search => {
                if app.session().is_form_disabled() {
                    println!("enter a complete zip code first");
                    continue;
                }
                app.search(0).await?;
                print_results(&app);
            }
            ShellCommand::Next => {
                app.page(1).await?;
                print_results(&app);
            }
            ShellCommand::Prev => {
                app.page(-1).await?;
                print_results(&app);
            }
            ShellCommand::Sort(field) => {
                app.toggle_sort(field)?;
                print_results(&app);
            }
            ShellCommand::Fav(arg) => {
                let Some(business_id) = resolve_business_id(&app, &arg) else {
                    println!("no row {arg} on this page");
                    continue;
                };
                let now_favorite = app.toggle_favorite(&business_id).await?;
                println!(
                    "{business_id} {}",
                    if now_favorite { "added to favorites" } else { "removed from favorites" }
                );
                print_results(&app);
            }
            ShellCommand::Favorites => {
                app.show_favorites().await?;
                print_results(&app);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse_command("search"), Ok(ShellCommand::Search));
        assert_eq!(parse_command("  next "), Ok(ShellCommand::Next));
        assert_eq!(parse_command("prev"), Ok(ShellCommand::Prev));
        assert_eq!(parse_command("favorites"), Ok(ShellCommand::Favorites));
        assert_eq!(parse_command("exit"), Ok(ShellCommand::Quit));
        assert_eq!(parse_command(""), Ok(ShellCommand::Empty));
    }

    #[test]
    fn parses_arguments() {
        assert_eq!(parse_command("zip 90401"), Ok(ShellCommand::Zip("90401".to_string())));
        assert_eq!(parse_command("zip"), Ok(ShellCommand::Zip(String::new())));
        assert_eq!(parse_command("miles 5"), Ok(ShellCommand::Miles(5)));
        assert_eq!(
            parse_command("category Thai Massage"),
            Ok(ShellCommand::Category("Thai Massage".to_string()))
        );
        assert_eq!(parse_command("sort name"), Ok(ShellCommand::Sort(SortField::Name)));
        assert_eq!(parse_command("fav 3"), Ok(ShellCommand::Fav("3".to_string())));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_command("miles five").is_err());
        assert!(parse_command("sort rating").is_err());
        assert!(parse_command("suggest").is_err());
        assert!(parse_command("fav").is_err());
        assert!(parse_command("launch").is_err());
    }
}
