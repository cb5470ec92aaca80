// Raw shopping-result normalization: field probing, price cleanup,
// part-category classification.
use crate::model::{NormalizedProduct, PartCategory};
use crate::utils::format_currency;
use serde_json::Value;
use tracing::debug;

/// Display string used when no parseable price exists. A zero price must
/// never be rendered as "$0.00".
pub const PRICE_UNKNOWN: &str = "Precio no disponible";

/// Store label used when the result names no retailer.
pub const DEFAULT_SOURCE: &str = "Online Store";

// The upstream API is not consistent about field names; each list is probed
// in order and the first usable value wins.
const LINK_FIELDS: [&str; 3] = ["link", "product_link", "url"];
const SOURCE_FIELDS: [&str; 3] = ["source", "store", "seller"];

const OEM_KEYWORDS: [&str; 4] = ["oem", "original", "genuine", "factory"];
const PREMIUM_KEYWORDS: [&str; 5] = [
    "premium",
    "performance",
    "heavy duty",
    "professional",
    "commercial grade",
];

/// Converts raw upstream result records into display-ready products.
///
/// Malformed items (blank title, missing or non-absolute link) are skipped
/// and never abort the pass. At most `max_results` accepted items are
/// returned; skipped items do not count against the cap.
pub fn normalize_results(raw_items: &[Value], max_results: usize) -> Vec<NormalizedProduct> {
    let mut products = Vec::new();
    let mut skipped = 0usize;

    for item in raw_items {
        if products.len() >= max_results {
            break;
        }
        match normalize_item(item) {
            Some(product) => products.push(product),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {skipped} malformed result(s)");
    }
    products
}

fn normalize_item(item: &Value) -> Option<NormalizedProduct> {
    let title = item.get("title")?.as_str()?.trim();
    if title.is_empty() {
        return None;
    }

    // A product is only worth showing if its outbound link works; fabricated
    // placeholders like "#" are rejected here.
    let link = probe_str(item, &LINK_FIELDS)?;
    if !is_absolute_http(link) {
        debug!("Dropping \"{title}\": link is not absolute http(s)");
        return None;
    }

    let source = probe_str(item, &SOURCE_FIELDS)
        .unwrap_or(DEFAULT_SOURCE)
        .to_string();

    let (price_display, price_numeric) = extract_price(item.get("price"));

    Some(NormalizedProduct {
        title: title.to_string(),
        price_display,
        price_numeric,
        source,
        link: link.to_string(),
        rating: item.get("rating").cloned(),
        review_count: item.get("reviews").cloned(),
        part_category: classify_part(title),
        verified: true,
    })
}

fn probe_str<'a>(item: &'a Value, fields: &[&str]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|f| item.get(*f).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
}

fn is_absolute_http(link: &str) -> bool {
    link.starts_with("http://") || link.starts_with("https://")
}

/// Produces the display string and numeric value for a raw price field.
/// Numeric values are formatted as currency; strings are cleaned and parsed
/// but displayed as received. Anything unparseable becomes the unknown
/// sentinel with a numeric value of 0.0.
fn extract_price(raw: Option<&Value>) -> (String, f64) {
    match raw {
        Some(Value::Number(n)) => {
            let value = n.as_f64().unwrap_or(0.0);
            if value > 0.0 {
                (format_currency(value), value)
            } else {
                (PRICE_UNKNOWN.to_string(), 0.0)
            }
        }
        // A string that cleans to zero is as unknown as a missing one; it
        // must not be shown as a real price.
        Some(Value::String(s)) if !s.trim().is_empty() => match parse_price_string(s) {
            Some(value) if value > 0.0 => (s.trim().to_string(), value),
            _ => (PRICE_UNKNOWN.to_string(), 0.0),
        },
        _ => (PRICE_UNKNOWN.to_string(), 0.0),
    }
}

fn parse_price_string(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    if cleaned.is_empty() {
        return None;
    }

    // Malformed strings like "12.50.00" keep the integer part plus the first
    // two digits after the first dot.
    let cleaned = match cleaned.match_indices('.').nth(1) {
        Some(_) => {
            let first_dot = cleaned.find('.').unwrap_or(cleaned.len());
            let decimals: String = cleaned[first_dot + 1..]
                .chars()
                .filter(|c| c.is_ascii_digit())
                .take(2)
                .collect();
            format!("{}.{}", &cleaned[..first_dot], decimals)
        }
        None => cleaned,
    };

    cleaned.parse::<f64>().ok().filter(|v| *v >= 0.0)
}

/// Classifies a part by title keywords. OEM keywords win over Premium when
/// both match; everything else is Aftermarket.
pub fn classify_part(title: &str) -> PartCategory {
    let title = title.to_lowercase();
    if OEM_KEYWORDS.iter().any(|kw| title.contains(kw)) {
        PartCategory::Oem
    } else if PREMIUM_KEYWORDS.iter().any(|kw| title.contains(kw)) {
        PartCategory::Premium
    } else {
        PartCategory::Aftermarket
    }
}
