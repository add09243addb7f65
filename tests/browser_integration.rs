//! Gathering against a real headless Chromium and a local mock publisher.
//!
//! Ignored by default: needs a Chromium/Chrome binary on the machine.
//! Run with `cargo test --test browser_integration -- --ignored`.

use suppinfo_core::parser::Identifier;
use suppinfo_core::resolver::{BrowserOptions, ChromeRenderer, Endpoints, IdentifierResolver};
use suppinfo_core::{GatherOutcome, LinkGatherer};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LANDING_HTML: &str = r#"<!doctype html>
<html><body>
  <a href="/files/si.pdf">SI</a>
  <a href="/files/si.pdf">SI again</a>
  <a href="files/esi.DOCX">ESI</a>
  <a href="mailto:editor@example.com?subject=x.pdf">mail</a>
  <a href="/article/full">full text</a>
</body></html>"#;

const SCRIPTED_HTML: &str = r#"<!doctype html>
<html><body>
  <div id="supplementary"></div>
  <script>
    setTimeout(() => {
      const box = document.getElementById('supplementary');
      box.innerHTML = '<a href="/mmc1.pdf">mmc1</a><a href="/mmc2.pdf?download=1">mmc2</a>';
    }, 50);
  </script>
</body></html>"#;

async fn html_mock(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

async fn gatherer(server: &MockServer) -> LinkGatherer {
    let renderer = ChromeRenderer::launch(&BrowserOptions::default())
        .await
        .unwrap();
    let resolver = IdentifierResolver::with_endpoints(
        Box::new(renderer),
        Endpoints::new(server.uri(), server.uri()),
    );
    LinkGatherer::new(resolver)
}

#[tokio::test]
#[ignore = "requires a Chromium binary"]
async fn test_gather_real_browser_static_and_publisher_routes() {
    let server = MockServer::start().await;
    html_mock(&server, "/10.1021/acs.test.1", LANDING_HTML).await;
    html_mock(&server, "/doi/suppl/10.31635/ccs.test.1", LANDING_HTML).await;

    let gatherer = gatherer(&server).await;
    let ids = vec![
        Identifier::parse("10.1021/acs.test.1").unwrap(),
        Identifier::parse("10.31635/ccs.test.1").unwrap(),
        Identifier::parse("10.1021/missing").unwrap(),
    ];

    let report = gatherer.gather(&ids).await;
    gatherer.resolver().shutdown().await.unwrap();

    let expected = [
        format!("{}/files/si.pdf", server.uri()),
        format!("{}/files/esi.DOCX", server.uri()),
    ];
    assert_eq!(
        report.mapping.get("10.1021/acs.test.1").unwrap().as_slice(),
        expected
    );
    assert_eq!(
        report.mapping.get("10.31635/ccs.test.1").unwrap().as_slice(),
        expected
    );
    // wiremock answers unknown paths with 404; the page still renders, with no links.
    assert!(report.mapping.get("10.1021/missing").unwrap().is_empty());
    assert_eq!(report.mapping.len(), 3);
}

#[tokio::test]
#[ignore = "requires a Chromium binary"]
async fn test_gather_real_browser_settled_route_reads_scripted_links() {
    let server = MockServer::start().await;
    html_mock(&server, "/10.1016/j.test.1", SCRIPTED_HTML).await;

    let gatherer = gatherer(&server).await;
    let id = Identifier::parse("10.1016/j.test.1").unwrap();

    let outcome = gatherer.gather_one(&id).await;
    gatherer.resolver().shutdown().await.unwrap();

    let GatherOutcome::Found(links) = outcome else {
        panic!("expected links, got {outcome:?}");
    };
    assert_eq!(links.as_slice(), [format!("{}/mmc1.pdf", server.uri())]);
}
