use super::*;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn business(id: &str, name: &str, distance: f64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "url": format!("https://www.yelp.com/biz/{id}"),
        "distance": distance,
        "photos": [],
        "location": { "city": "Santa Monica", "zip_code": "90402" },
        "categories": []
    })
}

async fn mock_categories(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "alias": "thai", "title": "Thai" },
            { "alias": "pizza", "title": "Pizza" }
        ])))
        .mount(server)
        .await;
}

async fn store() -> SqlitePool {
    let pool = bizsearch_db::connect_in_memory().await.unwrap();
    bizsearch_db::run_migrations(&pool).await.unwrap();
    pool
}

fn client(server: &MockServer) -> QueryClient {
    QueryClient::new(&server.uri(), 30, "bizsearch-test").unwrap()
}

#[tokio::test]
async fn start_loads_categories_and_favorites() {
    let server = MockServer::start().await;
    mock_categories(&server).await;
    let pool = store().await;
    bizsearch_db::put_favorite(&pool, "fav-1").await.unwrap();
    let client = client(&server);

    let app = App::start(&client, &pool).await.unwrap();
    assert_eq!(app.index().len(), 2);
    assert!(app.favorites().has("fav-1"));
    assert!(app.session().fetch_mode().is_none());
}

#[tokio::test]
async fn start_fails_with_io_error_when_categories_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let pool = store().await;
    let client = client(&server);

    let err = App::start(&client, &pool).await.err().expect("start should fail");
    assert!(matches!(err, AppError::Io { .. }));
}

#[tokio::test]
async fn search_then_page_forward() {
    let server = MockServer::start().await;
    mock_categories(&server).await;

    let page0: Vec<_> = (0..20).map(|i| business(&format!("p0-{i}"), "N", f64::from(i))).collect();
    let page1: Vec<_> = (0..5).map(|i| business(&format!("p1-{i}"), "N", f64::from(i))).collect();

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(serde_json::json!({ "variables": { "offset": 0, "categories": "thai" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "search": { "total": 25, "business": page0 } }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(serde_json::json!({ "variables": { "offset": 20 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "search": { "total": 25, "business": page1 } }
        })))
        .mount(&server)
        .await;

    let pool = store().await;
    let client = client(&server);
    let mut app = App::start(&client, &pool).await.unwrap();
    app.set_category_text("thai");
    app.search(0).await.unwrap();
    assert_eq!(app.session().results().map(<[_]>::len), Some(20));
    assert!(app.session().page_links().show_next);

    app.page(1).await.unwrap();
    assert_eq!(app.session().offset(), 20);
    assert_eq!(app.session().results().map(<[_]>::len), Some(5));
    assert!(!app.session().page_links().show_next);
}

#[tokio::test]
async fn first_search_uses_default_category() {
    let server = MockServer::start().await;
    mock_categories(&server).await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(serde_json::json!({
            "variables": { "offset": 0, "zip_code": "90402", "categories": "restaurants" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "search": { "total": 1, "business": [business("r", "Rustic Canyon", 900.0)] } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pool = store().await;
    let client = client(&server);
    let mut app = App::start(&client, &pool).await.unwrap();
    app.search(0).await.unwrap();
    assert_eq!(app.session().result_count_total(), Some(1));
}

#[tokio::test]
async fn paging_before_any_search_is_configuration_error() {
    let server = MockServer::start().await;
    mock_categories(&server).await;
    let pool = store().await;
    let client = client(&server);
    let mut app = App::start(&client, &pool).await.unwrap();

    let err = app.page(1).await.unwrap_err();
    assert!(matches!(err, AppError::Configuration(_)));
}

#[tokio::test]
async fn toggle_favorite_writes_then_reloads() {
    let server = MockServer::start().await;
    mock_categories(&server).await;
    let pool = store().await;
    let client = client(&server);
    let mut app = App::start(&client, &pool).await.unwrap();

    assert!(app.toggle_favorite("biz-1").await.unwrap());
    assert!(app.favorites().has("biz-1"));
    assert_eq!(bizsearch_db::list_favorites(&pool).await.unwrap().len(), 1);

    assert!(!app.toggle_favorite("biz-1").await.unwrap());
    assert!(!app.favorites().has("biz-1"));
    assert!(bizsearch_db::list_favorites(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn show_favorites_with_empty_store_skips_lookup() {
    let server = MockServer::start().await;
    mock_categories(&server).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    let pool = store().await;
    let client = client(&server);
    let mut app = App::start(&client, &pool).await.unwrap();

    app.show_favorites().await.unwrap();
    assert_eq!(app.session().fetch_mode(), Some(FetchMode::Favorite));
    assert_eq!(app.session().result_count_total(), Some(0));
    assert_eq!(app.session().sort_field(), SortField::Name);
}

#[tokio::test]
async fn show_favorites_keeps_sort_and_response_order() {
    let server = MockServer::start().await;
    mock_categories(&server).await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "b0": business("z", "Zucchini Bar", 0.0),
                "b1": business("a", "Apple Pan", 0.0)
            }
        })))
        .mount(&server)
        .await;
    let pool = store().await;
    bizsearch_db::put_favorite(&pool, "z").await.unwrap();
    bizsearch_db::put_favorite(&pool, "a").await.unwrap();
    let client = client(&server);
    let mut app = App::start(&client, &pool).await.unwrap();

    app.show_favorites().await.unwrap();
    let names: Vec<_> = app
        .session()
        .results()
        .unwrap()
        .iter()
        .map(|b| b.name.as_str())
        .collect();
    assert_eq!(names, vec!["Zucchini Bar", "Apple Pan"]);
    assert_eq!(app.session().sort_field(), SortField::Distance);
    assert_eq!(app.session().result_count_total(), Some(2));
}
