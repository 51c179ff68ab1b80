//! Loading documents over HTTP from a local `tiny_http` server.
//!
//! Each test starts a server on an ephemeral port with a fixed route table,
//! points an `HttpFetcher` at it and checks how the loader recovers.

use affiliate_site::config::BuildConfig;
use affiliate_site::document::{self, Layout};
use affiliate_site::loader::{self, HttpFetcher};
use affiliate_site::page;
use affiliate_site::types::DocStatus;
use std::thread;
use std::time::Duration;
use tiny_http::{Response, Server};

const PRODUCTS: &str = r#"{"products": [
    {"id": "desk-lamp", "name": "Desk Lamp", "category": "Lighting", "rating": 4.5,
     "amazonUrl": "https://www.amazon.com/dp/B000LAMP"}
]}"#;

/// Serve `routes` (path, status, body) for `requests` requests, then stop.
fn serve(routes: Vec<(&'static str, u16, &'static str)>, requests: usize) -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();

    thread::spawn(move || {
        for _ in 0..requests {
            let Ok(request) = server.recv() else { return };
            let route = routes.iter().find(|(path, _, _)| *path == request.url());
            let response = match route {
                Some((_, status, body)) => Response::from_string(*body).with_status_code(*status),
                None => Response::from_string("not found").with_status_code(404),
            };
            let _ = request.respond(response);
        }
    });

    format!("http://{}", addr)
}

fn fetcher(base_url: &str, timeout: Duration) -> HttpFetcher {
    HttpFetcher::new(base_url, timeout).unwrap()
}

#[test]
fn config_500_falls_back_to_defaults_and_page_renders() {
    let base = serve(
        vec![
            ("/config/site-config.json", 500, "boom"),
            ("/config/products.json", 200, PRODUCTS),
        ],
        2,
    );
    let data = loader::load_site_data(&fetcher(&base, Duration::from_secs(5)));

    assert!(matches!(data.report.config, DocStatus::Fallback(ref reason) if reason.contains("500")));
    assert_eq!(data.report.catalog, DocStatus::Loaded);
    assert_eq!(data.config.site_title, "Product Reviews");
    assert_eq!(data.catalog.len(), 1);

    let config = BuildConfig::default();
    let state = page::build_product(&data, &config, "desk-lamp");
    let html = document::render_document(&state, &Layout::default(), &config.search).into_string();
    assert!(html.contains("<title>Desk Lamp Review | Product Reviews</title>"));
    assert!(html.contains("tag=your-affiliate-id"));
}

#[test]
fn missing_products_document_gives_empty_catalog() {
    let base = serve(
        vec![(
            "/config/site-config.json",
            200,
            r#"{"siteTitle": "Gear Lab", "amazonAffiliateId": "gearlab-20"}"#,
        )],
        2,
    );
    let data = loader::load_site_data(&fetcher(&base, Duration::from_secs(5)));

    assert_eq!(data.report.config, DocStatus::Loaded);
    assert!(matches!(data.report.catalog, DocStatus::Fallback(_)));
    assert_eq!(data.config.site_title, "Gear Lab");
    assert!(data.catalog.is_empty());

    let state = page::build_home(&data, &BuildConfig::default());
    assert_eq!(
        state.section_html(page::MountPoint::FeaturedProductsGrid),
        Some("")
    );
}

#[test]
fn base_url_trailing_slash_is_ignored() {
    let base = serve(
        vec![
            ("/config/site-config.json", 200, r#"{"siteTitle": "Slash"}"#),
            ("/config/products.json", 200, PRODUCTS),
        ],
        2,
    );
    let data = loader::load_site_data(&fetcher(&format!("{base}/"), Duration::from_secs(5)));
    assert_eq!(data.config.site_title, "Slash");
    assert_eq!(data.catalog.len(), 1);
}

#[test]
fn hung_server_times_out_into_defaults() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    thread::spawn(move || {
        // Accept both requests and never answer them
        let mut held = Vec::new();
        for _ in 0..2 {
            match server.recv() {
                Ok(request) => held.push(request),
                Err(_) => return,
            }
        }
        thread::sleep(Duration::from_secs(5));
    });

    let base = format!("http://{}", addr);
    let data = loader::load_site_data(&fetcher(&base, Duration::from_millis(500)));

    assert!(matches!(data.report.config, DocStatus::Fallback(_)));
    assert!(matches!(data.report.catalog, DocStatus::Fallback(_)));
    assert_eq!(data.config.site_title, "Product Reviews");
    assert!(data.catalog.is_empty());
}
