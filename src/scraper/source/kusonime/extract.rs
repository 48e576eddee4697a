//! Selector rules for kusonime.com pages.
//!
//! Extraction is pure: callers fetch the page body first, then hand the raw
//! HTML here. Cards missing a title or link are skipped.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::types::{
    AnimeCard, AnimeDetail, AnimeIndex, AnimeListItem, DownloadLink, DownloadSection, HomePage,
    Season,
};
use crate::scraper::{Genre, Pagination, source::html};

static CARD: Lazy<Selector> = Lazy::new(|| Selector::parse(".venz ul .kover .detpost").unwrap());
static CARD_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".episodeye a, h2.title a").unwrap());
static CARD_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static CARD_POSTER: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".thumbz img, .thumb img, img").unwrap());
static CARD_META: Lazy<Selector> = Lazy::new(|| Selector::parse(".content p").unwrap());
static TAG_ICON: Lazy<Selector> = Lazy::new(|| Selector::parse("i.fa-tag").unwrap());
static CLOCK_ICON: Lazy<Selector> = Lazy::new(|| Selector::parse("i.fa-clock-o").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

static RECOMMENDATION: Lazy<Selector> = Lazy::new(|| Selector::parse(".recomx ul li .zeeb").unwrap());
static RECOMMENDATION_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").unwrap());
static RECOMMENDATION_IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

static PAGINATION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".wp-pagenavi .pages, .pagination .pages").unwrap());
static PAGES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Page (\d+) of (\d+)").unwrap());

static DETAIL_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".post-thumb h1.jdlz, .jdlz").unwrap());
static DETAIL_POSTER: Lazy<Selector> = Lazy::new(|| Selector::parse(".post-thumb img").unwrap());
static INFO_LINE: Lazy<Selector> = Lazy::new(|| Selector::parse(".info p").unwrap());
static INFO_LABEL: Lazy<Selector> = Lazy::new(|| Selector::parse("b").unwrap());
static SYNOPSIS: Lazy<Selector> = Lazy::new(|| Selector::parse(".lexot > p").unwrap());
static DOWNLOAD_SECTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".smokeddlrh .smokeurlrh, .smokeddl .smokeurl").unwrap());
static RESOLUTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(360P|480P|720P|1080P)").unwrap());

static GENRE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".genres li a, .tagcloud a").unwrap());
static SEASON_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".section .tagcloud a[href*='/seasons/']").unwrap());

static INDEX_BLOCK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".bariskelom, .daftarkartun").unwrap());
static INDEX_LETTER: Lazy<Selector> = Lazy::new(|| Selector::parse(".barispenz a, .huruf").unwrap());
static INDEX_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".jdlbar ul li a, .penzbar li a").unwrap());

static SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"kusonime\.com/([^/]+)/?$").unwrap());
static GENRE_SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/genres/([^/]+)/?$").unwrap());
static SEASON_SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/seasons/([^/]+)/?$").unwrap());

/// Release slug from a post URL, with the fixed language suffix removed.
pub fn extract_slug(url: &str) -> String {
    SLUG_RE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim_end_matches("-subtitle-indonesia").to_string())
        .unwrap_or_default()
}

pub fn extract_genre_slug(url: &str) -> String {
    GENRE_SLUG_RE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

pub fn extract_season_slug(url: &str) -> String {
    SEASON_SLUG_RE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// "Page N of M" from the navigation widget; absent widget means one page.
pub fn parse_pagination(doc: &Html) -> Pagination {
    let pages_text = doc
        .select(&PAGINATION)
        .next()
        .map(html::text)
        .unwrap_or_default();

    match PAGES_RE.captures(&pages_text) {
        Some(caps) => {
            let current = caps[1].parse().unwrap_or(1);
            let total = caps[2].parse().unwrap_or(1);
            Pagination::from_pages(current, total)
        }
        None => Pagination::single(),
    }
}

fn parse_card(el: ElementRef<'_>) -> Option<AnimeCard> {
    let title_el = html::first(el, &CARD_TITLE);
    let title = title_el.map(html::text).unwrap_or_default();
    let link = title_el
        .and_then(|t| t.value().attr("href"))
        .or_else(|| {
            html::first(el, &CARD_LINK).and_then(|a| a.value().attr("href"))
        })
        .unwrap_or_default();

    if title.is_empty() || link.is_empty() {
        return None;
    }

    let poster = html::first_attr(el, &CARD_POSTER, "src").unwrap_or_default();

    let mut genres = Vec::new();
    let mut release_date = None;
    for meta in el.select(&CARD_META) {
        if meta.select(&TAG_ICON).next().is_some() {
            genres.extend(meta.select(&ANCHOR).map(html::text).filter(|t| !t.is_empty()));
        }
        if meta.select(&CLOCK_ICON).next().is_some() {
            let text = html::text(meta).replace("Released on", "").trim().to_string();
            if !text.is_empty() {
                release_date = Some(text);
            }
        }
    }

    Some(AnimeCard {
        title,
        slug: extract_slug(link),
        poster,
        genres: (!genres.is_empty()).then_some(genres),
        release_date,
    })
}

pub fn parse_cards(doc: &Html) -> Vec<AnimeCard> {
    doc.select(&CARD).filter_map(parse_card).collect()
}

pub fn parse_home(body: &str) -> HomePage {
    let doc = Html::parse_document(body);

    let latest = parse_cards(&doc);

    let recommendations = doc
        .select(&RECOMMENDATION)
        .filter_map(|el| {
            let link = html::first_attr(el, &ANCHOR, "href")?;
            let title = html::first_text(el, &RECOMMENDATION_TITLE)?;
            let poster = html::first_attr(el, &RECOMMENDATION_IMG, "src").unwrap_or_default();

            Some(AnimeCard {
                title,
                slug: extract_slug(&link),
                poster,
                genres: None,
                release_date: None,
            })
        })
        .collect();

    HomePage {
        latest,
        recommendations,
    }
}

pub fn parse_listing(body: &str) -> (Vec<AnimeCard>, Pagination) {
    let doc = Html::parse_document(body);
    (parse_cards(&doc), parse_pagination(&doc))
}

/// Detail page. `None` when the page carries no release title, which is how
/// the site renders unknown slugs.
pub fn parse_detail(body: &str) -> Option<AnimeDetail> {
    let doc = Html::parse_document(body);

    let title = doc.select(&DETAIL_TITLE).next().map(html::text)?;
    if title.is_empty() {
        return None;
    }

    let poster = doc
        .select(&DETAIL_POSTER)
        .next()
        .and_then(|img| img.value().attr("src"))
        .unwrap_or_default()
        .to_string();

    let mut info = std::collections::HashMap::new();
    let mut genres = Vec::new();
    let mut season = None;
    for line in doc.select(&INFO_LINE) {
        let text = html::text(line);
        if let Some((key, value)) = text.split_once(':') {
            info.insert(key.trim().to_lowercase(), value.trim().to_string());
        }

        let label = line
            .select(&INFO_LABEL)
            .next()
            .map(html::text)
            .unwrap_or_default();
        if label.contains("Genre") {
            genres = line
                .select(&ANCHOR)
                .map(html::text)
                .filter(|t| !t.is_empty())
                .collect();
        } else if label.contains("Seasons") {
            season = html::first_text(line, &ANCHOR);
        }
    }

    let synopsis = doc
        .select(&SYNOPSIS)
        .map(html::text)
        .filter(|t| !t.is_empty() && !t.contains("Download") && !t.contains("Credit"))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    let downloads = doc
        .select(&DOWNLOAD_SECTION)
        .filter_map(|section| {
            let text = html::text(section);
            let resolution = RESOLUTION_RE
                .captures(&text)
                .map(|c| c[1].to_string())
                .unwrap_or_else(|| "Unknown".to_string());

            let links: Vec<DownloadLink> = section
                .select(&ANCHOR)
                .filter_map(|a| {
                    let provider = html::text(a);
                    let url = a.value().attr("href").unwrap_or_default().to_string();
                    (!provider.is_empty() && !url.is_empty())
                        .then_some(DownloadLink { provider, url })
                })
                .collect();

            (!links.is_empty()).then_some(DownloadSection { resolution, links })
        })
        .collect();

    let field = |key: &str| info.get(key).filter(|v| !v.is_empty()).cloned();

    Some(AnimeDetail {
        title,
        japanese: field("japanese"),
        score: field("score"),
        producer: field("producers"),
        anime_type: field("type"),
        status: field("status"),
        total_episode: field("total episode"),
        duration: field("duration"),
        release_date: field("released on"),
        season,
        genres,
        synopsis,
        poster,
        downloads,
    })
}

pub fn parse_genres(body: &str) -> Vec<Genre> {
    let doc = Html::parse_document(body);

    doc.select(&GENRE_LINK)
        .filter_map(|el| {
            let name = html::text(el);
            let href = el.value().attr("href").unwrap_or_default();

            (!name.is_empty() && href.contains("/genres/")).then(|| Genre {
                name,
                slug: extract_genre_slug(href),
            })
        })
        .collect()
}

pub fn parse_seasons(body: &str) -> Vec<Season> {
    let doc = Html::parse_document(body);

    doc.select(&SEASON_LINK)
        .filter_map(|el| {
            let name = html::text(el);
            let href = el.value().attr("href").unwrap_or_default();

            (!name.is_empty() && !href.is_empty()).then(|| Season {
                name,
                slug: extract_season_slug(href),
            })
        })
        .collect()
}

pub fn parse_anime_index(body: &str) -> AnimeIndex {
    let doc = Html::parse_document(body);

    let mut index = AnimeIndex::new();
    for block in doc.select(&INDEX_BLOCK) {
        let letter = block
            .select(&INDEX_LETTER)
            .next()
            .map(|el| html::text(el).to_uppercase())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| "#".to_string());

        let entries = index.entry(letter).or_default();
        for link in block.select(&INDEX_LINK) {
            let title = html::text(link);
            let href = link.value().attr("href").unwrap_or_default();
            if !title.is_empty() && !href.is_empty() {
                entries.push(AnimeListItem {
                    title,
                    slug: extract_slug(href),
                });
            }
        }
    }

    index.retain(|_, entries| !entries.is_empty());
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r##"
    <div class="venz"><ul>
      <li class="kover"><div class="detpost">
        <div class="thumbz"><img src="https://kusonime.com/img/frieren.jpg"></div>
        <div class="episodeye"><a href="https://kusonime.com/sousou-no-frieren-batch-subtitle-indonesia/">Sousou no Frieren BD Batch</a></div>
        <div class="content">
          <p><i class="fa fa-tag"></i> <a href="#">Adventure</a> <a href="#">Fantasy</a></p>
          <p><i class="fa fa-clock-o"></i> Released on March 22, 2024</p>
        </div>
      </div></li>
      <li class="kover"><div class="detpost">
        <div class="thumbz"><img src="x.jpg"></div>
        <div class="episodeye"><a href=""></a></div>
      </div></li>
    </ul></div>
    <div class="wp-pagenavi"><span class="pages">Page 2 of 57</span></div>
    "##;

    #[test]
    fn listing_cards_and_pagination() {
        let (cards, pagination) = parse_listing(LISTING);

        assert_eq!(cards.len(), 1, "card without a title must be dropped");
        let card = &cards[0];
        assert_eq!(card.title, "Sousou no Frieren BD Batch");
        assert_eq!(card.slug, "sousou-no-frieren-batch");
        assert_eq!(card.poster, "https://kusonime.com/img/frieren.jpg");
        assert_eq!(
            card.genres.as_deref(),
            Some(&["Adventure".to_string(), "Fantasy".to_string()][..])
        );
        assert_eq!(card.release_date.as_deref(), Some("March 22, 2024"));

        assert_eq!(pagination.current_page, 2);
        assert_eq!(pagination.total_pages, 57);
        assert!(pagination.has_next_page);
        assert_eq!(pagination.prev_page, Some(1));
    }

    #[test]
    fn missing_pagination_defaults_to_single_page() {
        let (_, pagination) = parse_listing("<div class=\"venz\"><ul></ul></div>");
        assert_eq!(pagination, Pagination::single());
        assert!(!pagination.has_next_page);
        assert!(pagination.next_page.is_none());
    }

    #[test]
    fn slug_strips_language_suffix() {
        assert_eq!(
            extract_slug("https://kusonime.com/one-piece-subtitle-indonesia/"),
            "one-piece"
        );
        assert_eq!(extract_slug("https://kusonime.com/plain-slug"), "plain-slug");
        assert_eq!(extract_slug("https://example.com/other/"), "");
    }

    #[test]
    fn detail_page_parses_info_map_and_downloads() {
        let body = r##"
        <div class="post-thumb"><h1 class="jdlz">Mushoku Tensei S2</h1><img src="/poster.jpg"></div>
        <div class="lexot">
          <div class="info">
            <p><b>Japanese</b>: 無職転生</p>
            <p><b>Genre</b>: <a href="#">Drama</a>, <a href="#">Fantasy</a></p>
            <p><b>Seasons</b>: <a href="/seasons/summer-2023/">Summer 2023</a></p>
            <p><b>Type</b>: TV</p>
            <p><b>Status</b>: Completed</p>
            <p><b>Total Episode</b>: 12</p>
            <p><b>Released on</b>: Oct 5, 2023</p>
          </div>
          <p>Rudeus returns in the second season.</p>
          <p>Download Mushoku Tensei S2 Batch</p>
        </div>
        <div class="smokeddl">
          <div class="smokeurl"><strong>480P</strong> <a href="https://files.test/a">Mega</a> <a href="https://files.test/b">GDrive</a></div>
          <div class="smokeurl"><strong>1080P</strong> <a href="https://files.test/c">Mega</a></div>
          <div class="smokeurl"><strong>MKV</strong></div>
        </div>
        "##;

        let detail = parse_detail(body).expect("title present");
        assert_eq!(detail.title, "Mushoku Tensei S2");
        assert_eq!(detail.japanese.as_deref(), Some("無職転生"));
        assert_eq!(detail.anime_type.as_deref(), Some("TV"));
        assert_eq!(detail.status.as_deref(), Some("Completed"));
        assert_eq!(detail.total_episode.as_deref(), Some("12"));
        assert_eq!(detail.release_date.as_deref(), Some("Oct 5, 2023"));
        assert_eq!(detail.season.as_deref(), Some("Summer 2023"));
        assert_eq!(detail.genres, vec!["Drama", "Fantasy"]);
        assert_eq!(detail.synopsis, "Rudeus returns in the second season.");

        assert_eq!(detail.downloads.len(), 2, "section without links dropped");
        assert_eq!(detail.downloads[0].resolution, "480P");
        assert_eq!(detail.downloads[0].links.len(), 2);
        assert_eq!(detail.downloads[0].links[1].provider, "GDrive");
        assert_eq!(detail.downloads[1].resolution, "1080P");
    }

    #[test]
    fn detail_without_title_is_none() {
        assert!(parse_detail("<html><body><p>404</p></body></html>").is_none());
    }

    #[test]
    fn genres_and_seasons_from_tagcloud() {
        let body = r#"
        <div class="section"><div class="tagcloud">
          <a href="https://kusonime.com/genres/action/">Action</a>
          <a href="https://kusonime.com/genres/slice-of-life/">Slice of Life</a>
          <a href="https://kusonime.com/seasons/fall-2023/">Fall 2023</a>
        </div></div>
        "#;

        let genres = parse_genres(body);
        assert_eq!(genres.len(), 2);
        assert_eq!(genres[1].slug, "slice-of-life");

        let seasons = parse_seasons(body);
        assert_eq!(seasons.len(), 1);
        assert_eq!(seasons[0].name, "Fall 2023");
        assert_eq!(seasons[0].slug, "fall-2023");
    }

    #[test]
    fn anime_index_groups_by_letter() {
        let body = r#"
        <div class="bariskelom">
          <div class="barispenz"><a>A</a></div>
          <div class="jdlbar"><ul>
            <li><a href="https://kusonime.com/akira-subtitle-indonesia/">Akira</a></li>
            <li><a href="https://kusonime.com/angel-beats-subtitle-indonesia/">Angel Beats!</a></li>
          </ul></div>
        </div>
        <div class="bariskelom">
          <div class="barispenz"><a>B</a></div>
          <div class="jdlbar"><ul>
            <li><a href="https://kusonime.com/bakemonogatari-subtitle-indonesia/">Bakemonogatari</a></li>
          </ul></div>
        </div>
        "#;

        let index = parse_anime_index(body);
        assert_eq!(index.len(), 2);
        assert_eq!(index["A"].len(), 2);
        assert_eq!(index["A"][0].slug, "akira");
        assert_eq!(index["B"][0].title, "Bakemonogatari");
    }
}
