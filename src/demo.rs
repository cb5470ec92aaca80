// Demo/fallback result generation for runs without a live API key.
use crate::model::{NormalizedProduct, PartCategory};
use crate::utils::format_currency;
use serde_json::json;
use url::Url;

const STORES: [&str; 6] = [
    "AutoZone",
    "Advance Auto Parts",
    "O'Reilly Auto Parts",
    "NAPA",
    "RockAuto",
    "Amazon Automotive",
];

const BASE_PRICES: [f64; 6] = [29.99, 45.99, 67.99, 89.99, 124.99, 199.99];

/// Builds a deterministic set of clearly-flagged sample products for the
/// given query. Every record carries `verified = false`; callers must never
/// mix these with live results.
pub fn demo_results(query: &str) -> Vec<NormalizedProduct> {
    STORES
        .iter()
        .zip(BASE_PRICES)
        .enumerate()
        .map(|(i, (store, price))| {
            let oem = i % 2 == 0;
            let grade = if oem { "Premium OEM" } else { "Aftermarket Quality" };
            NormalizedProduct {
                title: format!("{query} - {grade}"),
                price_display: format_currency(price),
                price_numeric: price,
                source: store.to_string(),
                link: shopping_search_link(&format!("{query} {store}")),
                rating: Some(json!(format!("{:.1}", 4.0 + i as f64 * 0.1))),
                review_count: Some(json!((100 + i * 50).to_string())),
                part_category: if oem {
                    PartCategory::Oem
                } else {
                    PartCategory::Aftermarket
                },
                verified: false,
            }
        })
        .collect()
}

/// An absolute Google Shopping search URL, usable when no direct product
/// link exists.
pub fn shopping_search_link(query: &str) -> String {
    let mut url = Url::parse("https://www.google.com/search").expect("static base url");
    url.query_pairs_mut()
        .append_pair("tbm", "shop")
        .append_pair("q", &format!("{query} auto parts"));
    url.to_string()
}
