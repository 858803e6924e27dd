//! Tests for the catalog client module

use super::*;
use crate::error::Error;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(uri: &str) -> CatalogConfig {
    CatalogConfig {
        base_url: uri.to_string(),
        covers_base_url: "https://covers.example.com".to_string(),
        retries: 1,
        base_delay: Duration::from_millis(10),
        timeout: Duration::from_secs(2),
        rate_limit: None,
    }
}

#[tokio::test]
async fn test_browse_subject() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subjects/fantasy.json"))
        .and(query_param("limit", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "fantasy",
            "works": [
                {
                    "key": "/works/OL1W",
                    "title": "The Hobbit",
                    "cover_id": 111,
                    "authors": [{"key": "/authors/OL1A", "name": "J. R. R. Tolkien"}]
                },
                {
                    "key": "/works/OL2W",
                    "title": "Earthsea",
                    "authors": []
                },
                {
                    "title": "No key, dropped"
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(test_config(&mock_server.uri()));
    let page = client.browse_subject("Fantasy", 12).await.unwrap();

    assert_eq!(page.subject, "fantasy");
    assert_eq!(page.works.len(), 2);

    let first = &page.works[0];
    assert_eq!(first.key, "/works/OL1W");
    assert_eq!(first.slug, "works-OL1W");
    assert_eq!(first.title, "The Hobbit");
    assert_eq!(first.cover_id, Some(111));
    assert_eq!(first.cover_url, "https://covers.example.com/b/id/111-L.jpg");
    assert_eq!(first.authors[0].name, "J. R. R. Tolkien");

    // No cover falls back to the placeholder
    assert!(page.works[1].cover_url.contains("placehold"));
}

#[tokio::test]
async fn test_browse_subject_rejects_blank() {
    let client = CatalogClient::new(test_config("http://127.0.0.1:9"));
    let result = client.browse_subject("   ", 12).await;
    assert!(matches!(result, Err(Error::Validation { .. })));
}

#[tokio::test]
async fn test_search_maps_docs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "dune"))
        .and(query_param("limit", "24"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "numFound": 321,
            "docs": [
                {
                    "key": "/works/OL893415W",
                    "cover_i": 222,
                    "title": "Dune",
                    "author_name": ["Frank Herbert"]
                },
                {
                    "cover_edition_key": "OL7353617M",
                    "title": "Dune Messiah",
                    "author_name": ["Frank Herbert"]
                },
                {
                    "title": "keyless, dropped"
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(test_config(&mock_server.uri()));
    let page = client.search("  dune ", 24).await.unwrap();

    assert_eq!(page.num_found, 321);
    assert_eq!(page.books.len(), 2);
    assert_eq!(page.books[0].slug, "works-OL893415W");
    assert_eq!(page.books[0].authors[0].name, "Frank Herbert");
    // An edition-only doc slugs as an edition
    assert_eq!(page.books[1].slug, "books-OL7353617M");
}

#[tokio::test]
async fn test_search_rejects_blank_query() {
    let client = CatalogClient::new(test_config("http://127.0.0.1:9"));
    let result = client.search("", 24).await;
    assert!(matches!(result, Err(Error::Validation { .. })));
}

#[tokio::test]
async fn test_book_detail_normalizes_work() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/OL45804W.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "key": "/works/OL45804W",
            "title": "Fantastic Mr Fox",
            "description": {"type": "/type/text", "value": "A cunning fox outwits three farmers."},
            "subjects": ["Foxes", "Farmers", {"name": "Fiction"}],
            "first_publish_date": "1970",
            "covers": [6498519, 8904777],
            "authors": [
                {"author": {"key": "/authors/OL34184A"}},
                {"author": {"key": "/authors/OL9999A"}}
            ],
            "languages": [{"key": "/languages/eng"}, {"key": "/languages/fre"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/authors/OL34184A.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "Roald Dahl"})),
        )
        .mount(&mock_server)
        .await;

    // Second author lookup fails; the page still renders
    Mock::given(method("GET"))
        .and(path("/authors/OL9999A.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(test_config(&mock_server.uri()));
    let book = client.book_detail("works-OL45804W").await.unwrap();

    assert_eq!(book.title, "Fantastic Mr Fox");
    assert_eq!(book.description, "A cunning fox outwits three farmers.");
    assert_eq!(book.subjects, vec!["Foxes", "Farmers", "Fiction"]);
    assert_eq!(book.first_publish.as_deref(), Some("1970"));
    assert_eq!(book.cover_id, Some(6498519));
    assert_eq!(
        book.cover_url,
        "https://covers.example.com/b/id/6498519-L.jpg"
    );
    assert_eq!(book.authors.len(), 2);
    assert_eq!(book.authors[0].name, "Roald Dahl");
    assert_eq!(book.authors[1].name, "Anonymous");
    assert_eq!(book.languages, vec!["English", "French"]);
    assert_eq!(book.key, "/works/OL45804W");
    assert!(book.catalog_url.ends_with("/works/OL45804W"));
}

#[tokio::test]
async fn test_book_detail_edition_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books/OL7353617M.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "key": "/books/OL7353617M",
            "title": "Dune",
            "publishers": "Ace Books",
            "publish_date": "1990",
            "pagination": "viii, 537 p.",
            "isbn_10": ["0441172717"],
            "isbn_13": ["9780441172719"],
            "first_sentence": "In the week before their departure to Arrakis...",
            "series": ["Dune saga"],
            "created": {"value": "2008-04-29T13:35:46.876380"}
        })))
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(test_config(&mock_server.uri()));
    let book = client.book_detail("books-OL7353617M").await.unwrap();

    // A lone publisher string still becomes a list
    assert_eq!(book.publishers, vec!["Ace Books"]);
    assert_eq!(book.number_of_pages, Some(537));
    assert_eq!(book.isbn_10, vec!["0441172717"]);
    assert_eq!(book.series, vec!["Dune saga"]);
    assert_eq!(
        book.first_sentence.as_deref(),
        Some("In the week before their departure to Arrakis...")
    );
    assert_eq!(book.publish_date.as_deref(), Some("1990"));
    // No description on the edition
    assert_eq!(book.description, "No description available.");
    // Without a cover we get the placeholder
    assert!(book.cover_url.contains("placehold"));
}

#[tokio::test]
async fn test_book_detail_created_stamp_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/OL10W.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "title": "Undated",
            "created": {"value": "2008-04-29T13:35:46.876380"}
        })))
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(test_config(&mock_server.uri()));
    let book = client.book_detail("works-OL10W").await.unwrap();

    assert_eq!(book.first_publish.as_deref(), Some("2008-04-29"));
    // Key falls back to the request path when the document lacks one
    assert_eq!(book.key, "/works/OL10W");
}

#[tokio::test]
async fn test_book_detail_invalid_slug() {
    let client = CatalogClient::new(test_config("http://127.0.0.1:9"));

    let result = client.book_detail("authors-OL1A").await;
    assert!(matches!(result, Err(Error::InvalidSlug { .. })));

    let result = client.book_detail("nonsense").await;
    assert!(matches!(result, Err(Error::InvalidSlug { .. })));
}

#[tokio::test]
async fn test_book_detail_missing_work() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/OL0W.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(test_config(&mock_server.uri()));
    let result = client.book_detail("works-OL0W").await;

    assert!(matches!(result, Err(Error::Status { status: 404 })));
}

#[tokio::test]
async fn test_check_probe() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subjects/fantasy.json"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"works": []})))
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(test_config(&mock_server.uri()));
    assert!(client.check().await.is_ok());
}
