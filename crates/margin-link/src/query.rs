use crate::codec::{decode_lenient, encode};
use crate::error::LinkError;
use percent_encoding::percent_decode_str;

/// Query parameters that may carry an embedded document, in lookup order.
pub const MARKDOWN_PARAMS: [&str; 2] = ["markdown", "md"];

/// Builds a frontend URL that carries the whole document.
///
/// ```
/// let link = margin_link::share_link("https://margin.example/", "# Hi");
/// assert_eq!(link, "https://margin.example/?markdown=IyBIaQ");
/// ```
pub fn share_link(origin: &str, markdown: &str) -> String {
    format!(
        "{}/?{}={}",
        origin.trim_end_matches('/'),
        MARKDOWN_PARAMS[0],
        encode(markdown)
    )
}

/// Extracts and decodes an embedded document from a URL query string.
///
/// `markdown` wins over `md`; an empty value counts as absent. Returns
/// `None` when neither parameter carries a value.
pub fn markdown_from_query(query: &str) -> Option<Result<String, LinkError>> {
    let query = query.strip_prefix('?').unwrap_or(query);

    MARKDOWN_PARAMS
        .iter()
        .find_map(|name| first_value(query, name).filter(|value| !value.is_empty()))
        .map(|token| decode_lenient(&token))
}

/// First value of `name` in an `application/x-www-form-urlencoded` string.
fn first_value(query: &str, name: &str) -> Option<String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| form_decode(key) == name)
        .map(|(_, value)| form_decode(value))
}

fn form_decode(component: &str) -> String {
    let spaced = component.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
