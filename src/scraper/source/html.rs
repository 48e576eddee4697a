//! Small helpers over `scraper` element selection.

use scraper::{ElementRef, Selector};

/// Collected, trimmed text content of an element.
pub fn text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// First element matching `selector` under `el`.
pub fn first<'a>(el: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    el.select(selector).next()
}

/// Text of the first match, if any.
pub fn first_text(el: ElementRef<'_>, selector: &Selector) -> Option<String> {
    first(el, selector).map(text).filter(|t| !t.is_empty())
}

/// Attribute of the first match, if any.
pub fn first_attr(el: ElementRef<'_>, selector: &Selector, name: &str) -> Option<String> {
    first(el, selector)
        .and_then(|el| el.value().attr(name))
        .map(str::to_string)
        .filter(|v| !v.is_empty())
}

/// Image URL from the first match, preferring the lazy-load attribute.
pub fn first_image(el: ElementRef<'_>, selector: &Selector) -> Option<String> {
    first(el, selector).and_then(|img| {
        img.value()
            .attr("data-src")
            .or_else(|| img.value().attr("src"))
            .map(str::to_string)
            .filter(|v| !v.is_empty())
    })
}
