use crate::results::PageMeta;
use scraper::{ElementRef, Html, Selector};

const TITLE_SELECTOR: &str = "title";
const OG_DESCRIPTION_SELECTOR: &str = r#"meta[property="og:description"]"#;
const DESCRIPTION_SELECTOR: &str = r#"meta[name="description"]"#;
const OG_IMAGE_SELECTOR: &str = r#"meta[property="og:image"]"#;

/// Parses an HTML document into page metadata
///
/// Each field is extracted independently; anything missing comes back as an
/// empty string. An empty input yields an empty record.
pub fn parse_meta(html: &str) -> PageMeta {
    if html.trim().is_empty() {
        return PageMeta::default();
    }

    let doc = Html::parse_document(html);

    let title = extract_title(&doc);

    // The standard tag is only consulted when no og:description tag exists at all
    let description = match select_first(&doc, OG_DESCRIPTION_SELECTOR) {
        Some(tag) => meta_content(tag),
        None => select_first(&doc, DESCRIPTION_SELECTOR)
            .map(meta_content)
            .unwrap_or_default(),
    };

    let image = select_first(&doc, OG_IMAGE_SELECTOR)
        .map(meta_content)
        .unwrap_or_default();

    ::log::debug!(
        "HTML meta parser found title={} description={} image={}",
        !title.is_empty(),
        !description.is_empty(),
        !image.is_empty()
    );

    PageMeta::new(title, description, image)
}

/// Extracts the trimmed document title
pub fn extract_title(doc: &Html) -> String {
    select_first(doc, TITLE_SELECTOR)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Trimmed `content` attribute of a meta tag
fn meta_content(tag: ElementRef<'_>) -> String {
    tag.value()
        .attr("content")
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn select_first<'a>(doc: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    doc.select(&selector).next()
}
