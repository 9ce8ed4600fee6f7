//! Spreadsheet link discovery on the application listing page.

use scraper::{Html, Selector};
use url::Url;

pub const SPREADSHEET_EXTENSIONS: [&str; 2] = [".xlsx", ".xls"];

/// An anchor on the listing page that looks like a workbook download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetLink {
    pub href: String,
    pub text: String,
}

/// Collects every `<a href>` whose target or visible text suggests a
/// spreadsheet, in document order.
pub fn spreadsheet_links(html: &str) -> Vec<SpreadsheetLink> {
    let document = Html::parse_document(html);
    let Ok(anchors) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&anchors)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?.to_string();
            let text = anchor
                .text()
                .map(str::trim)
                .collect::<String>()
                .to_lowercase();
            is_spreadsheet_link(&href, &text).then_some(SpreadsheetLink { href, text })
        })
        .collect()
}

pub fn is_spreadsheet_link(href: &str, link_text: &str) -> bool {
    has_spreadsheet_extension(href)
        || href.to_lowercase().contains(".xls")
        || link_text.contains("excel")
        || link_text.contains("download")
}

pub fn has_spreadsheet_extension(name: &str) -> bool {
    SPREADSHEET_EXTENSIONS
        .iter()
        .any(|extension| name.ends_with(extension))
}

/// Root-relative links go to `base_origin`, absolute links are kept, and
/// anything else is relative to the listing page.
pub fn resolve_link(href: &str, base_origin: &Url, page_url: &Url) -> Result<Url, url::ParseError> {
    if href.starts_with('/') {
        base_origin.join(href)
    } else if href.starts_with("http") {
        Url::parse(href)
    } else {
        page_url.join(href)
    }
}

/// Local filename for a link: its last path segment without the query
/// string, with `.xlsx` appended when it carries no spreadsheet extension.
pub fn derive_filename(href: &str) -> String {
    let without_query = href.split('?').next().unwrap_or_default();
    let mut filename = without_query
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();
    if !has_spreadsheet_extension(&filename) {
        filename.push_str(".xlsx");
    }
    filename
}
