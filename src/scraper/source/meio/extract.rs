//! Selector rules for meionovels.com (Madara WordPress theme).

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::types::{Chapter, ChapterContent, Novel, NovelDetail, NovelPage};
use crate::scraper::{Genre, source::html};

static NOVEL_CARD: Lazy<Selector> = Lazy::new(|| Selector::parse(".page-item-detail").unwrap());
static CARD_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse(".post-title a").unwrap());
static CARD_THUMB: Lazy<Selector> = Lazy::new(|| Selector::parse(".item-thumb img").unwrap());
static CARD_CHAPTER: Lazy<Selector> = Lazy::new(|| Selector::parse(".chapter a").unwrap());
static NEXT_PAGE: Lazy<Selector> = Lazy::new(|| Selector::parse(".nav-previous a").unwrap());

static SEARCH_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".c-tabs-item__content, .row.c-tabs-item").unwrap());
static SEARCH_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse(".post-title a, h3 a").unwrap());
static SEARCH_THUMB: Lazy<Selector> = Lazy::new(|| Selector::parse(".tab-thumb img, img").unwrap());

static DETAIL_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse(".post-title h1").unwrap());
static DETAIL_COVER: Lazy<Selector> = Lazy::new(|| Selector::parse(".summary_image img").unwrap());
static DETAIL_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".summary__content, .description-summary").unwrap());
static DETAIL_AUTHOR: Lazy<Selector> = Lazy::new(|| Selector::parse(".author-content a").unwrap());
static DETAIL_ARTIST: Lazy<Selector> = Lazy::new(|| Selector::parse(".artist-content a").unwrap());
static DETAIL_RATING: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".post-total-rating .score").unwrap());
static DETAIL_GENRES: Lazy<Selector> = Lazy::new(|| Selector::parse(".genres-content a").unwrap());
static STATUS_ITEM: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".post-status .post-content_item").unwrap());
static CONTENT_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse(".post-content_item").unwrap());
static ITEM_HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse(".summary-heading").unwrap());
static ITEM_CONTENT: Lazy<Selector> = Lazy::new(|| Selector::parse(".summary-content").unwrap());

static CHAPTER_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse(".wp-manga-chapter").unwrap());
static CHAPTER_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static CHAPTER_DATE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".chapter-release-date").unwrap());

static BREADCRUMB_ACTIVE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".breadcrumb li.active").unwrap());
static BREADCRUMB_NOVEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".breadcrumb li:nth-child(3) a").unwrap());
static READING_CONTENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".reading-content .text-left, .reading-content").unwrap());
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static PREV_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".prev_page, .nav-previous a").unwrap());
static NEXT_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".next_page, .nav-next a").unwrap());

static GENRE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#".genres a[href*="novel-genre"]"#).unwrap());

static NOVEL_SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/novel/([^/]+)/?$").unwrap());
static GENRE_SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/novel-genre/([^/]+)/?$").unwrap());
static GENRE_COUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(\d+\)\s*$").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static TRAILING_UI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*(Show more|Show less|Read more|Read less|\.\.\.)\s*$").unwrap());
static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n\s*\n+").unwrap());
static SPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static LINE_EDGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]+|[ \t]+$").unwrap());

/// Strip the theme's expand/collapse UI tail and collapse whitespace runs.
pub fn clean_description(description: &str) -> String {
    let cleaned = TRAILING_UI_RE.replace(description, "");
    let cleaned = TRAILING_UI_RE.replace(&cleaned, "");
    let cleaned = BLANK_RUN_RE.replace_all(&cleaned, "\n\n");
    let cleaned = SPACE_RUN_RE.replace_all(&cleaned, " ");
    let cleaned = LINE_EDGE_RE.replace_all(&cleaned, "");
    cleaned.trim().to_string()
}

pub fn novel_slug(url: &str) -> String {
    NOVEL_SLUG_RE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Chapter path relative to the novel, keeping nested volume segments.
pub fn chapter_slug(url: &str, novel: &str) -> Option<String> {
    let marker = format!("/novel/{novel}/");
    let idx = url.find(&marker)?;
    let rest = url[idx + marker.len()..].trim_end_matches('/');
    (!rest.is_empty()).then(|| rest.to_string())
}

fn parse_card(el: ElementRef<'_>) -> Option<Novel> {
    let title_el = html::first(el, &CARD_TITLE)?;
    let href = title_el.value().attr("href").unwrap_or_default();
    let title = html::text(title_el);
    if title.is_empty() {
        return None;
    }

    let chapter_el = html::first(el, &CARD_CHAPTER);

    Some(Novel {
        slug: novel_slug(href),
        title,
        cover: html::first_image(el, &CARD_THUMB).unwrap_or_default(),
        latest_chapter: chapter_el.map(html::text).filter(|t| !t.is_empty()),
        latest_chapter_url: chapter_el
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string),
    })
}

pub fn parse_novel_list(body: &str) -> NovelPage {
    let doc = Html::parse_document(body);

    NovelPage {
        novels: doc.select(&NOVEL_CARD).filter_map(parse_card).collect(),
        has_next: doc.select(&NEXT_PAGE).next().is_some(),
    }
}

pub fn parse_search(body: &str) -> Vec<Novel> {
    let doc = Html::parse_document(body);

    doc.select(&SEARCH_ROW)
        .filter_map(|el| {
            let title_el = html::first(el, &SEARCH_TITLE)?;
            let title = html::text(title_el);
            if title.is_empty() {
                return None;
            }
            let href = title_el.value().attr("href").unwrap_or_default();

            Some(Novel {
                slug: novel_slug(href),
                title,
                cover: html::first_image(el, &SEARCH_THUMB).unwrap_or_default(),
                latest_chapter: None,
                latest_chapter_url: None,
            })
        })
        .collect()
}

pub fn parse_novel_detail(body: &str, slug: &str) -> Option<NovelDetail> {
    let doc = Html::parse_document(body);

    let title = doc.select(&DETAIL_TITLE).next().map(html::text)?;
    if title.is_empty() {
        return None;
    }

    let description = doc
        .select(&DETAIL_DESCRIPTION)
        .next()
        .map(html::text)
        .map(|d| clean_description(&d))
        .unwrap_or_default();

    let labelled = |items: &Selector, label: &str| -> String {
        doc.select(items)
            .find(|item| {
                html::first_text(*item, &ITEM_HEADING)
                    .map(|h| h.to_lowercase().contains(label))
                    .unwrap_or(false)
            })
            .and_then(|item| html::first_text(item, &ITEM_CONTENT))
            .unwrap_or_default()
    };

    Some(NovelDetail {
        slug: slug.to_string(),
        title,
        cover: doc
            .select(&DETAIL_COVER)
            .next()
            .and_then(|img| {
                img.value()
                    .attr("data-src")
                    .or_else(|| img.value().attr("src"))
            })
            .unwrap_or_default()
            .to_string(),
        description,
        author: doc
            .select(&DETAIL_AUTHOR)
            .next()
            .map(html::text)
            .unwrap_or_default(),
        artist: doc
            .select(&DETAIL_ARTIST)
            .next()
            .map(html::text)
            .unwrap_or_default(),
        genres: doc
            .select(&DETAIL_GENRES)
            .map(html::text)
            .filter(|t| !t.is_empty())
            .collect(),
        status: labelled(&STATUS_ITEM, "status"),
        novel_type: labelled(&CONTENT_ITEM, "type"),
        rating: doc
            .select(&DETAIL_RATING)
            .next()
            .map(html::text)
            .unwrap_or_default(),
    })
}

pub fn parse_chapters(body: &str, novel: &str) -> Vec<Chapter> {
    let doc = Html::parse_document(body);

    doc.select(&CHAPTER_ROW)
        .filter_map(|row| {
            let link = html::first(row, &CHAPTER_LINK)?;
            let href = link.value().attr("href").unwrap_or_default();
            let title = html::text(link);
            if title.is_empty() {
                return None;
            }

            Some(Chapter {
                slug: chapter_slug(href, novel).unwrap_or_default(),
                title,
                url: href.to_string(),
                date: html::first_text(row, &CHAPTER_DATE),
            })
        })
        .collect()
}

/// Text content of an element, skipping script/ad subtrees.
fn text_excluding(el: ElementRef<'_>, out: &mut String) {
    const SKIP: &[&str] = &["script", "style", "noscript", "ins"];

    for child in el.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            if SKIP.contains(&child_el.value().name())
                || child_el.value().attr("class").is_some_and(|c| {
                    c.split_whitespace()
                        .any(|c| c == "ads" || c == "adsbygoogle")
                })
            {
                continue;
            }
            text_excluding(child_el, out);
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
}

pub fn parse_chapter_content(
    body: &str,
    novel_slug: &str,
    chapter: &str,
) -> Option<ChapterContent> {
    let doc = Html::parse_document(body);

    let content_el = doc.select(&READING_CONTENT).next()?;

    let mut paragraphs: Vec<String> = content_el
        .select(&PARAGRAPH)
        .map(html::text)
        .filter(|t| !t.is_empty())
        .collect();

    if paragraphs.is_empty() {
        let mut raw = String::new();
        text_excluding(content_el, &mut raw);
        paragraphs = raw
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
    }

    let nav = |selector: &Selector| {
        doc.select(selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| chapter_slug(href, novel_slug))
    };

    Some(ChapterContent {
        title: doc
            .select(&BREADCRUMB_ACTIVE)
            .next()
            .map(html::text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| chapter.to_string()),
        novel_title: doc
            .select(&BREADCRUMB_NOVEL)
            .next()
            .map(html::text)
            .unwrap_or_default(),
        novel_slug: novel_slug.to_string(),
        content: paragraphs.join("\n\n"),
        prev_chapter: nav(&PREV_LINK),
        next_chapter: nav(&NEXT_LINK),
    })
}

pub fn parse_genres(body: &str) -> Vec<Genre> {
    let doc = Html::parse_document(body);

    doc.select(&GENRE_LINK)
        .filter_map(|el| {
            let href = el.value().attr("href").unwrap_or_default();
            let slug = GENRE_SLUG_RE
                .captures(href)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())?;

            let raw = html::text(el);
            let name = GENRE_COUNT_RE.replace(&raw, "");
            let name = WHITESPACE_RE.replace_all(name.trim(), " ").to_string();

            (!name.is_empty()).then_some(Genre { name, slug })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_cleaning_strips_ui_tail() {
        let raw = "A boy  reincarnates.\n\n\n\nHe   grows stronger.   Show more";
        let cleaned = clean_description(raw);
        assert_eq!(cleaned, "A boy reincarnates.\n\nHe grows stronger.");
        assert!(!cleaned.contains("Show more"));
    }

    #[test]
    fn description_cleaning_strips_stacked_tails() {
        let raw = "Story text... Read more";
        assert_eq!(clean_description(raw), "Story text");
    }

    #[test]
    fn novel_list_with_next_page() {
        let body = r#"
        <div class="page-item-detail">
          <div class="item-thumb"><img data-src="https://meionovels.com/c/maou.jpg" src="ph.gif"></div>
          <div class="post-title"><a href="https://meionovels.com/novel/maou-gakuin/">The Misfit of Demon King Academy</a></div>
          <div class="chapter"><a href="https://meionovels.com/novel/maou-gakuin/chapter-101/">Chapter 101</a></div>
        </div>
        <div class="page-item-detail"><div class="post-title"><a href="x"></a></div></div>
        <div class="nav-previous"><a href="/novel/page/2/">Older</a></div>
        "#;

        let page = parse_novel_list(body);
        assert_eq!(page.novels.len(), 1);
        assert!(page.has_next);

        let novel = &page.novels[0];
        assert_eq!(novel.slug, "maou-gakuin");
        assert_eq!(novel.cover, "https://meionovels.com/c/maou.jpg");
        assert_eq!(novel.latest_chapter.as_deref(), Some("Chapter 101"));
    }

    #[test]
    fn novel_detail_reads_labelled_items() {
        let body = r#"
        <div class="post-title"><h1>Reincarnated Blacksmith</h1></div>
        <div class="summary_image"><img src="/cover.jpg"></div>
        <div class="summary__content">Forged anew.   Show more</div>
        <div class="author-content"><a>Aoi Tanaka</a></div>
        <div class="artist-content"><a>K. Ito</a></div>
        <div class="genres-content"><a>Action</a><a>Fantasy</a></div>
        <div class="post-status">
          <div class="post-content_item">
            <div class="summary-heading">Status</div>
            <div class="summary-content">OnGoing</div>
          </div>
        </div>
        <div class="post-content_item">
          <div class="summary-heading">Type</div>
          <div class="summary-content">Web Novel</div>
        </div>
        <div class="post-total-rating"><span class="score">4.5</span></div>
        "#;

        let detail = parse_novel_detail(body, "reincarnated-blacksmith").expect("has title");
        assert_eq!(detail.title, "Reincarnated Blacksmith");
        assert_eq!(detail.description, "Forged anew.");
        assert_eq!(detail.author, "Aoi Tanaka");
        assert_eq!(detail.artist, "K. Ito");
        assert_eq!(detail.genres, vec!["Action", "Fantasy"]);
        assert_eq!(detail.status, "OnGoing");
        assert_eq!(detail.novel_type, "Web Novel");
        assert_eq!(detail.rating, "4.5");
    }

    #[test]
    fn detail_without_title_is_none() {
        assert!(parse_novel_detail("<div></div>", "x").is_none());
    }

    #[test]
    fn chapters_keep_nested_slugs() {
        let body = r#"
        <ul>
          <li class="wp-manga-chapter">
            <a href="https://meionovels.com/novel/maou-gakuin/volume-1/chapter-2/">Volume 1 Chapter 2</a>
            <span class="chapter-release-date">June 1, 2024</span>
          </li>
          <li class="wp-manga-chapter">
            <a href="https://meionovels.com/novel/maou-gakuin/chapter-1/">Chapter 1</a>
          </li>
        </ul>
        "#;

        let chapters = parse_chapters(body, "maou-gakuin");
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].slug, "volume-1/chapter-2");
        assert_eq!(chapters[0].date.as_deref(), Some("June 1, 2024"));
        assert_eq!(chapters[1].slug, "chapter-1");
        assert!(chapters[1].date.is_none());
    }

    #[test]
    fn chapter_content_joins_paragraphs_and_links_navigation() {
        let body = r#"
        <ol class="breadcrumb">
          <li>Home</li><li>Novels</li><li><a href="/novel/maou-gakuin/">Maou Gakuin</a></li>
          <li class="active">Chapter 2</li>
        </ol>
        <div class="reading-content"><div class="text-left">
          <script>trackPageview()</script>
          <p>First paragraph.</p>
          <p></p>
          <p>Second paragraph.</p>
        </div></div>
        <a class="prev_page" href="https://meionovels.com/novel/maou-gakuin/chapter-1/">Prev</a>
        <a class="next_page" href="https://meionovels.com/novel/maou-gakuin/chapter-3/">Next</a>
        "#;

        let content = parse_chapter_content(body, "maou-gakuin", "chapter-2").expect("content");
        assert_eq!(content.title, "Chapter 2");
        assert_eq!(content.novel_title, "Maou Gakuin");
        assert_eq!(content.content, "First paragraph.\n\nSecond paragraph.");
        assert_eq!(content.prev_chapter.as_deref(), Some("chapter-1"));
        assert_eq!(content.next_chapter.as_deref(), Some("chapter-3"));
    }

    #[test]
    fn chapter_content_falls_back_to_raw_text() {
        let body = r#"
        <div class="reading-content">
            <script>var ads = 1;</script>
            Line one.
            <br>
            Line two.
        </div>
        "#;

        let content = parse_chapter_content(body, "maou-gakuin", "chapter-9").expect("content");
        assert!(content.content.contains("Line one."));
        assert!(content.content.contains("Line two."));
        assert!(!content.content.contains("var ads"));
    }

    #[test]
    fn genres_drop_post_counts() {
        let body = r#"
        <div class="genres">
          <a href="https://meionovels.com/novel-genre/action/">Action (120)</a>
          <a href="https://meionovels.com/novel-genre/slice-of-life/">Slice   of Life (3)</a>
          <a href="https://meionovels.com/tag/other/">Other</a>
        </div>
        "#;

        let genres = parse_genres(body);
        assert_eq!(genres.len(), 2);
        assert_eq!(genres[0].name, "Action");
        assert_eq!(genres[0].slug, "action");
        assert_eq!(genres[1].name, "Slice of Life");
    }
}
