use super::*;
use crate::business::Location;
use crate::category::CategoryRecord;
use crate::favorites::FavoriteRecord;

fn biz(id: &str, name: &str, distance: f64) -> Business {
    Business {
        id: id.to_string(),
        name: name.to_string(),
        url: format!("https://www.yelp.com/biz/{id}"),
        distance: Some(distance),
        photos: Vec::new(),
        location: Location {
            city: Some("Santa Monica".to_string()),
            zip_code: Some("90402".to_string()),
        },
        categories: Vec::new(),
    }
}

fn batch(total: u32, business: Vec<Business>) -> ResultBatch {
    ResultBatch { total, business }
}

fn favs(ids: &[&str]) -> FavoritesSet {
    let records: Vec<FavoriteRecord> = ids
        .iter()
        .map(|id| FavoriteRecord {
            business_id: (*id).to_string(),
        })
        .collect();
    FavoritesSet::load(&records)
}

fn index() -> CategoryIndex {
    CategoryIndex::build(vec![
        CategoryRecord {
            alias: "thai".to_string(),
            title: "Thai".to_string(),
        },
        CategoryRecord {
            alias: "thaimassage".to_string(),
            title: "Thai Massage".to_string(),
        },
        CategoryRecord {
            alias: "pizza".to_string(),
            title: "Pizza".to_string(),
        },
    ])
}

fn ids(session: &SearchSession) -> Vec<&str> {
    session
        .results()
        .unwrap_or_default()
        .iter()
        .map(|b| b.id.as_str())
        .collect()
}

#[test]
fn defaults_match_initial_search() {
    let s = SearchSession::new();
    assert_eq!(s.fetch_mode(), None);
    assert_eq!(s.zip(), Some("90402"));
    assert_eq!(s.zip_final(), Some("90402"));
    assert_eq!(s.distance_miles(), 1);
    assert_eq!(s.sort_field(), SortField::Distance);
    assert_eq!(s.sort_dir(), SortDir::Asc);
    assert!(!s.is_form_disabled());
    assert!(s.results().is_none());
    assert_eq!(s.typed_category(), Some("Restaurants"));
    assert_eq!(
        s.search_params(0).unwrap().category.as_deref(),
        Some("restaurants")
    );
}

#[test]
fn partial_zip_disables_submission() {
    let mut s = SearchSession::new();
    assert!(s.set_zip("9040"));
    assert_eq!(s.zip(), Some("9040"));
    assert_eq!(s.zip_final(), None);
    assert!(s.is_form_disabled());

    assert!(s.set_zip("90401-12"));
    assert!(s.is_form_disabled());
    assert!(s.set_zip("90401-1234"));
    assert_eq!(s.zip_final(), Some("90401-1234"));
    assert!(!s.is_form_disabled());
}

#[test]
fn rejected_zip_keeps_previous_value() {
    let mut s = SearchSession::new();
    assert!(!s.set_zip("9040a"));
    assert_eq!(s.zip(), Some("90402"));
    assert_eq!(s.zip_final(), Some("90402"));
}

#[test]
fn empty_zip_clears() {
    let mut s = SearchSession::new();
    assert!(s.set_zip(""));
    assert_eq!(s.zip(), None);
    assert!(s.is_form_disabled());
    assert!(s.search_params(0).is_err());
}

#[test]
fn distance_bounds() {
    let mut s = SearchSession::new();
    s.set_distance_miles(25).unwrap();
    assert!((s.distance_meters() - 40_000.0).abs() < f64::EPSILON);
    assert!(s.set_distance_miles(0).is_err());
    assert!(s.set_distance_miles(26).is_err());
    assert_eq!(s.distance_miles(), 25);
}

#[test]
fn category_text_resolves_only_unique_exact_title() {
    let idx = index();
    let mut s = SearchSession::new();

    s.set_category_text(&idx, "piz");
    assert_eq!(s.typed_category(), Some("piz"));
    assert!(s.selected_category().is_none());

    s.set_category_text(&idx, "PIZZA");
    assert_eq!(s.selected_category().map(|c| c.alias.as_str()), Some("pizza"));

    // "thai" is also a prefix of "thaimassage": not a unique hit.
    s.set_category_text(&idx, "thai");
    assert!(s.selected_category().is_none());

    s.set_category_text(&idx, "");
    assert_eq!(s.typed_category(), None);
}

#[test]
fn selecting_suggestion_sets_text() {
    let idx = index();
    let mut s = SearchSession::new();
    let thai = idx.suggest("thai")[0].clone();
    s.select_category(thai);
    assert_eq!(s.typed_category(), Some("Thai"));
    assert_eq!(s.selected_category().map(|c| c.alias.as_str()), Some("thai"));
}

#[test]
fn search_params_carry_form_state() {
    let idx = index();
    let mut s = SearchSession::new();
    s.set_distance_miles(2).unwrap();
    s.set_category_text(&idx, "Pizza");
    let params = s.search_params(40).unwrap();
    assert_eq!(params.limit, 20);
    assert_eq!(params.offset, 40);
    assert_eq!(params.zip_code, "90402");
    assert!((params.radius_meters - 3_218.688).abs() < 1e-9);
    assert_eq!(params.category.as_deref(), Some("pizza"));
}

#[test]
fn search_batch_is_sorted_and_recorded() {
    let mut s = SearchSession::new();
    let ticket = s.begin_request(FetchMode::Search, 20);
    let applied = s.apply_search_batch(
        ticket,
        batch(57, vec![biz("far", "Far", 900.0), biz("near", "Near", 10.0)]),
        &FavoritesSet::default(),
    );
    assert!(applied);
    assert_eq!(s.fetch_mode(), Some(FetchMode::Search));
    assert_eq!(s.offset(), 20);
    assert_eq!(s.result_count_total(), Some(57));
    assert_eq!(ids(&s), vec!["near", "far"]);
}

#[test]
fn stale_batch_is_discarded() {
    let mut s = SearchSession::new();
    let first = s.begin_request(FetchMode::Search, 0);
    let second = s.begin_request(FetchMode::Search, 20);

    assert!(s.apply_search_batch(second, batch(40, vec![biz("b", "B", 1.0)]), &FavoritesSet::default()));
    assert!(!s.apply_search_batch(first, batch(99, vec![biz("a", "A", 1.0)]), &FavoritesSet::default()));

    assert_eq!(s.offset(), 20);
    assert_eq!(s.result_count_total(), Some(40));
    assert_eq!(ids(&s), vec!["b"]);
}

#[test]
fn favorites_batch_resets_search_fields_and_keeps_sort() {
    let idx = index();
    let mut s = SearchSession::new();
    s.set_category_text(&idx, "Pizza");
    s.set_distance_miles(10).unwrap();
    let t = s.begin_request(FetchMode::Search, 40);
    s.apply_search_batch(t, batch(100, vec![biz("x", "X", 1.0)]), &FavoritesSet::default());

    let t = s.begin_request(FetchMode::Favorite, 0);
    assert!(s.apply_favorites_batch(
        t,
        batch(2, vec![biz("b", "Zed", 9.0), biz("a", "Alpha", 5.0)]),
    ));

    assert_eq!(s.fetch_mode(), Some(FetchMode::Favorite));
    assert_eq!(s.offset(), 0);
    assert_eq!(s.zip(), None);
    assert_eq!(s.zip_final(), None);
    assert_eq!(s.distance_miles(), 1);
    assert!(s.selected_category().is_none());
    assert!(s.typed_category().is_none());
    assert_eq!(s.sort_field(), SortField::Distance);
    assert_eq!(s.sort_dir(), SortDir::Asc);
    assert_eq!(ids(&s), vec!["b", "a"]);
}

#[test]
fn empty_favorites_batch() {
    let mut s = SearchSession::new();
    let t = s.begin_request(FetchMode::Favorite, 0);
    s.set_sort(SortField::Location, SortDir::Desc, &FavoritesSet::default());
    assert!(s.apply_favorites_batch(t, ResultBatch::default()));
    assert_eq!(s.sort_field(), SortField::Name);
    assert_eq!(s.sort_dir(), SortDir::Asc);
    assert_eq!(s.result_count_total(), Some(0));
    assert_eq!(s.results(), Some(&[][..]));
    let summary = s.pager_summary().unwrap();
    assert_eq!(summary.total, 0);
    assert_eq!(summary.label, "favorites");
}

#[test]
fn toggle_sort_flips_same_field_and_keeps_dir_for_new_field() {
    let mut s = SearchSession::new();
    let t = s.begin_request(FetchMode::Search, 0);
    s.apply_search_batch(
        t,
        batch(3, vec![biz("b", "Bravo", 2.0), biz("a", "Alpha", 3.0), biz("c", "Charlie", 1.0)]),
        &FavoritesSet::default(),
    );
    assert_eq!(ids(&s), vec!["c", "b", "a"]);

    s.toggle_sort(SortField::Distance, &FavoritesSet::default()).unwrap();
    assert_eq!(s.sort_dir(), SortDir::Desc);
    assert_eq!(ids(&s), vec!["a", "b", "c"]);

    s.toggle_sort(SortField::Name, &FavoritesSet::default()).unwrap();
    assert_eq!(s.sort_field(), SortField::Name);
    assert_eq!(s.sort_dir(), SortDir::Desc);
    assert_eq!(ids(&s), vec!["c", "b", "a"]);
}

#[test]
fn toggle_sort_without_results_is_configuration_error() {
    let mut s = SearchSession::new();
    let err = s
        .toggle_sort(SortField::Name, &FavoritesSet::default())
        .unwrap_err();
    assert!(matches!(err, AppError::Configuration(_)));
}

#[test]
fn paging_requires_fetch_mode() {
    let s = SearchSession::new();
    assert!(s.require_fetch_mode().is_err());
    assert!(s.pager_summary().is_err());
}

#[test]
fn pager_links_only_in_search_mode() {
    let mut s = SearchSession::new();
    let page: Vec<Business> = (0..20).map(|i| biz(&format!("b{i}"), "N", f64::from(i))).collect();
    let t = s.begin_request(FetchMode::Search, 20);
    s.apply_search_batch(t, batch(57, page.clone()), &FavoritesSet::default());

    let links = s.page_links();
    assert!(links.show_prev);
    assert!(links.show_next);
    assert_eq!(s.page_offset(1), 40);
    assert_eq!(s.page_offset(-1), 0);

    let summary = s.pager_summary().unwrap();
    assert_eq!(
        (summary.start, summary.end, summary.total, summary.label),
        (20, 40, 57, "search results")
    );

    let t = s.begin_request(FetchMode::Favorite, 0);
    s.apply_favorites_batch(t, batch(20, page));
    let links = s.page_links();
    assert!(!links.show_prev);
    assert!(!links.show_next);
}

#[test]
fn set_sort_applies_before_and_after_results() {
    let mut s = SearchSession::new();
    s.set_sort(SortField::Name, SortDir::Desc, &FavoritesSet::default());
    let t = s.begin_request(FetchMode::Search, 0);
    s.apply_search_batch(
        t,
        batch(2, vec![biz("a", "Alpha", 1.0), biz("b", "Bravo", 2.0)]),
        &FavoritesSet::default(),
    );
    assert_eq!(ids(&s), vec!["b", "a"]);

    let set = favs(&["a"]);
    s.set_sort(SortField::Favorite, SortDir::Desc, &set);
    assert_eq!(ids(&s), vec!["a", "b"]);
}
