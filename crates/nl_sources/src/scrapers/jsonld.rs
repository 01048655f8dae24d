use scraper::{Html, Selector};
use serde_json::Value;

/// Extracts the `articleBody` from JSON-LD metadata in the HTML document.
/// Looks through top-level objects, arrays and `@graph` lists.
pub fn extract_article_body(document: &Html) -> Option<String> {
    let script_selector = Selector::parse("script[type='application/ld+json']").ok()?;

    for script in document.select(&script_selector) {
        let Ok(json) = serde_json::from_str::<Value>(script.text().collect::<String>().trim()) else {
            continue;
        };
        if let Some(body) = find_article_body(&json) {
            return Some(body.to_string());
        }
    }

    None
}

fn find_article_body(json: &Value) -> Option<&str> {
    match json {
        Value::Array(items) => items.iter().find_map(find_article_body),
        Value::Object(obj) => {
            if let Some(body) = obj.get("articleBody").and_then(|b| b.as_str()) {
                let body = body.trim();
                if !body.is_empty() {
                    return Some(body);
                }
            }
            obj.get("@graph").and_then(find_article_body)
        }
        _ => None,
    }
}
