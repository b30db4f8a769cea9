//! Integration tests for the explanation pass
//!
//! These tests serve fixture pages with real paragraphs and verify the
//! sentences extracted for each hop of a path.

use linktrace::explain::{explain, ExplainError};
use linktrace::search::{Orchestrator, SearchLimits};
use linktrace::url::{PageId, Site};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn site_for(server: &MockServer) -> Site {
    Site::new(
        Url::parse(&server.uri()).expect("Failed to parse mock server URL"),
        "div.content p".to_string(),
        vec!["/wiki/".to_string()],
    )
}

/// Mounts a page whose content area holds the given paragraph markup
async fn mount_paragraph(server: &MockServer, page_path: &str, paragraph: &str) {
    let body = format!(
        r#"<html><body><div class="content"><p>{}</p></div></body></html>"#,
        paragraph
    );
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_explain_two_hop_path() {
    let server = MockServer::start().await;
    let site = site_for(&server);
    let client = reqwest::Client::new();

    mount_paragraph(
        &server,
        "/wiki/Start",
        r#"Example X refers to <a href="/wiki/Y">Y</a>. See also Z."#,
    )
    .await;
    mount_paragraph(
        &server,
        "/wiki/Y",
        r#"From here the story moves to <a href="/wiki/End">the end</a>. Done."#,
    )
    .await;

    let path_pages = vec![
        PageId::new("/wiki/Start"),
        PageId::new("/wiki/Y"),
        PageId::new("/wiki/End"),
    ];

    let reports = explain(&client, &site, &path_pages).await;
    assert_eq!(reports.len(), 2);

    let first = reports[0].outcome.as_ref().expect("hop 1 failed");
    assert_eq!(first.hop, 1);
    assert_eq!(first.text, "Example X refers to Y.");
    assert_eq!(
        first.target_url.as_str(),
        format!("{}/wiki/Y", server.uri())
    );

    let second = reports[1].outcome.as_ref().expect("hop 2 failed");
    assert_eq!(second.text, "From here the story moves to the end.");
}

#[tokio::test]
async fn test_partial_explanation() {
    let server = MockServer::start().await;
    let site = site_for(&server);
    let client = reqwest::Client::new();

    // Hop 2's source page carries no link to its destination (page content
    // changed between the search and explanation phases)
    mount_paragraph(
        &server,
        "/wiki/P1",
        r#"Opening mentions <a href="/wiki/P2">P2</a> early. Rest."#,
    )
    .await;
    mount_paragraph(&server, "/wiki/P2", r#"Nothing links onward from here."#).await;
    mount_paragraph(
        &server,
        "/wiki/P3",
        r#"Finally we reach <a href="/wiki/P4">P4</a> at last. Coda."#,
    )
    .await;

    let path_pages = vec![
        PageId::new("/wiki/P1"),
        PageId::new("/wiki/P2"),
        PageId::new("/wiki/P3"),
        PageId::new("/wiki/P4"),
    ];

    let reports = explain(&client, &site, &path_pages).await;
    assert_eq!(reports.len(), 3);

    assert_eq!(
        reports[0].outcome.as_ref().expect("hop 1 failed").text,
        "Opening mentions P2 early."
    );
    assert!(matches!(
        reports[1].outcome.as_ref().unwrap_err(),
        ExplainError::LinkNotFound { .. }
    ));
    assert_eq!(
        reports[2].outcome.as_ref().expect("hop 3 failed").text,
        "Finally we reach P4 at last."
    );
}

#[tokio::test]
async fn test_explain_hop_fetch_failure_is_per_hop() {
    let server = MockServer::start().await;
    let site = site_for(&server);
    let client = reqwest::Client::new();

    Mock::given(method("GET"))
        .and(path("/wiki/Gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_paragraph(
        &server,
        "/wiki/Alive",
        r#"Still standing, links to <a href="/wiki/Final">Final</a> page. End."#,
    )
    .await;

    let path_pages = vec![
        PageId::new("/wiki/Gone"),
        PageId::new("/wiki/Alive"),
        PageId::new("/wiki/Final"),
    ];

    let reports = explain(&client, &site, &path_pages).await;

    assert!(matches!(
        reports[0].outcome.as_ref().unwrap_err(),
        ExplainError::Fetch(_)
    ));
    assert_eq!(
        reports[1].outcome.as_ref().expect("hop 2 failed").text,
        "Still standing, links to Final page."
    );
}

#[tokio::test]
async fn test_search_then_explain_pipeline() {
    let server = MockServer::start().await;
    let site = site_for(&server);
    let client = reqwest::Client::new();

    mount_paragraph(
        &server,
        "/wiki/Start",
        r#"The journey begins at <a href="/wiki/Middle">the middle</a> point. Onward."#,
    )
    .await;
    mount_paragraph(
        &server,
        "/wiki/Middle",
        r#"Halfway through we find <a href="/wiki/Target">the target</a> itself. Fin."#,
    )
    .await;

    let orchestrator = Orchestrator::new(client.clone(), site.clone(), SearchLimits::default());
    let outcome = orchestrator
        .run(&PageId::new("/wiki/Start"), &PageId::new("/wiki/Target"))
        .await
        .expect("Search failed");

    assert_eq!(outcome.hops(), 2);

    let reports = explain(&client, &site, &outcome.path).await;
    assert_eq!(reports.len(), 2);
    assert_eq!(
        reports[0].outcome.as_ref().expect("hop 1 failed").text,
        "The journey begins at the middle point."
    );
    assert_eq!(
        reports[1].outcome.as_ref().expect("hop 2 failed").text,
        "Halfway through we find the target itself."
    );
}
