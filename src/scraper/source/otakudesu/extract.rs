//! Selector rules for otakudesu pages.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::types::{
    AnimeCard, AnimeDetail, AnimeIndex, AnimeListItem, DownloadLink, DownloadSection,
    EpisodeDetail, EpisodeRef, HomePage, ScheduleDay, StreamingServer,
};
use crate::scraper::{Genre, Pagination, source::html};

static HOME_SECTION: Lazy<Selector> = Lazy::new(|| Selector::parse(".rseries .rapi").unwrap());
static SECTION_HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());

static CARD: Lazy<Selector> = Lazy::new(|| Selector::parse(".venz ul li .detpost").unwrap());
static CARD_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h2.jdlflm").unwrap());
static CARD_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static CARD_POSTER: Lazy<Selector> = Lazy::new(|| Selector::parse(".thumbz img").unwrap());
static CARD_EPISODE: Lazy<Selector> = Lazy::new(|| Selector::parse(".epz").unwrap());
static CARD_DAY: Lazy<Selector> = Lazy::new(|| Selector::parse(".epztipe").unwrap());
static CARD_DATE: Lazy<Selector> = Lazy::new(|| Selector::parse(".newnime").unwrap());

static PAGE_NUMBERS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".pagination .page-numbers, .pagenavix .page-numbers").unwrap());

static DETAIL_POSTER: Lazy<Selector> = Lazy::new(|| Selector::parse(".fotoanime img").unwrap());
static DETAIL_INFO: Lazy<Selector> = Lazy::new(|| Selector::parse(".infozingle p").unwrap());
static DETAIL_FALLBACK_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".jdlrx h1, h1.posttl").unwrap());
static SYNOPSIS: Lazy<Selector> = Lazy::new(|| Selector::parse(".sinopc p, .sinop p").unwrap());
static EPISODE_BLOCK: Lazy<Selector> = Lazy::new(|| Selector::parse(".episodelist").unwrap());
static EPISODE_HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse(".monktit").unwrap());
static EPISODE_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("ul li").unwrap());
static EPISODE_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("span a, a").unwrap());
static EPISODE_DATE: Lazy<Selector> = Lazy::new(|| Selector::parse(".zeebr").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

static EPISODE_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1.posttl, .venutama h1").unwrap());
static EMBED_IFRAME: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#pembed iframe, .responsive-embed-stream iframe").unwrap());
static MIRROR_LIST: Lazy<Selector> = Lazy::new(|| Selector::parse(".mirrorstream ul").unwrap());
static MIRROR_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[data-content]").unwrap());
static NAV_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse(".flir a").unwrap());
static DOWNLOAD_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse(".download ul li").unwrap());
static DOWNLOAD_LABEL: Lazy<Selector> = Lazy::new(|| Selector::parse("strong").unwrap());

static GENRE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".genres li a[href*='/genres/'], ul.genres a[href*='/genres/']").unwrap());

static GENRE_CARD: Lazy<Selector> = Lazy::new(|| Selector::parse(".col-anime").unwrap());
static GENRE_CARD_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse(".col-anime-title a").unwrap());
static GENRE_CARD_COVER: Lazy<Selector> = Lazy::new(|| Selector::parse(".col-anime-cover img").unwrap());
static GENRE_CARD_EPS: Lazy<Selector> = Lazy::new(|| Selector::parse(".col-anime-eps").unwrap());
static GENRE_CARD_DATE: Lazy<Selector> = Lazy::new(|| Selector::parse(".col-anime-date").unwrap());

static SCHEDULE_BLOCK: Lazy<Selector> = Lazy::new(|| Selector::parse(".kglist321").unwrap());
static SCHEDULE_DAY: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").unwrap());
static SCHEDULE_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("ul li a").unwrap());

static SEARCH_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("ul.chivsrc li").unwrap());
static SEARCH_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h2 a").unwrap());
static SEARCH_IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

static INDEX_BLOCK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".bariskelom, .daftarkartun").unwrap());
static INDEX_LETTER: Lazy<Selector> = Lazy::new(|| Selector::parse(".barispenz a, .huruf").unwrap());
static INDEX_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse(".jdlbar ul li a, .penzbar li a").unwrap());

static GENRE_SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/genres/([^/]+)/?$").unwrap());

/// Last path segment of a URL; otakudesu keeps every slug there.
pub fn last_segment(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("")
        .to_string()
}

/// Page position from a WordPress `page-numbers` widget. The widget lists
/// numbered links plus a highlighted current marker; no widget means one
/// page.
pub fn parse_pagination(doc: &Html) -> Pagination {
    let mut current = None;
    let mut total = 1u32;
    let mut seen = false;

    for el in doc.select(&PAGE_NUMBERS) {
        seen = true;
        let text = html::text(el);
        let Ok(number) = text.parse::<u32>() else {
            continue;
        };

        total = total.max(number);
        if el.value().attr("class").is_some_and(|c| c.contains("current")) {
            current = Some(number);
        }
    }

    if !seen {
        return Pagination::single();
    }

    Pagination::from_pages(current.unwrap_or(1), total)
}

fn parse_card(el: ElementRef<'_>) -> Option<AnimeCard> {
    let title = html::first_text(el, &CARD_TITLE)?;
    let link = html::first_attr(el, &CARD_LINK, "href")?;

    Some(AnimeCard {
        title,
        slug: last_segment(&link),
        poster: html::first_attr(el, &CARD_POSTER, "src").unwrap_or_default(),
        episode: html::first_text(el, &CARD_EPISODE),
        release_day: html::first_text(el, &CARD_DAY),
        release_date: html::first_text(el, &CARD_DATE),
    })
}

pub fn parse_cards(doc: &Html) -> Vec<AnimeCard> {
    doc.select(&CARD).filter_map(parse_card).collect()
}

/// Front page: one strip of ongoing series, one of completed ones. The
/// strips are distinguished by their headings, with positional fallback.
pub fn parse_home(body: &str) -> HomePage {
    let doc = Html::parse_document(body);

    let mut ongoing = Vec::new();
    let mut complete = Vec::new();

    for (position, section) in doc.select(&HOME_SECTION).enumerate() {
        let heading = section
            .select(&SECTION_HEADING)
            .next()
            .map(|h| html::text(h).to_lowercase())
            .unwrap_or_default();

        let cards: Vec<AnimeCard> = section.select(&CARD).filter_map(parse_card).collect();

        if heading.contains("on-going") || heading.contains("ongoing") {
            ongoing.extend(cards);
        } else if heading.contains("complete") {
            complete.extend(cards);
        } else if position == 0 {
            ongoing.extend(cards);
        } else {
            complete.extend(cards);
        }
    }

    HomePage { ongoing, complete }
}

pub fn parse_listing(body: &str) -> (Vec<AnimeCard>, Pagination) {
    let doc = Html::parse_document(body);
    (parse_cards(&doc), parse_pagination(&doc))
}

/// Series detail. `None` when the page carries no title.
pub fn parse_detail(body: &str) -> Option<AnimeDetail> {
    let doc = Html::parse_document(body);

    let mut info = std::collections::HashMap::new();
    let mut genres = Vec::new();
    for line in doc.select(&DETAIL_INFO) {
        let text = html::text(line);
        if let Some((key, value)) = text.split_once(':') {
            info.insert(key.trim().to_lowercase(), value.trim().to_string());
        }

        if text.trim_start().starts_with("Genre") {
            genres = line
                .select(&ANCHOR)
                .filter_map(|a| {
                    let name = html::text(a);
                    let href = a.value().attr("href").unwrap_or_default();
                    (!name.is_empty()).then(|| Genre {
                        name,
                        slug: GENRE_SLUG_RE
                            .captures(href)
                            .and_then(|c| c.get(1))
                            .map(|m| m.as_str().to_string())
                            .unwrap_or_else(|| last_segment(href)),
                    })
                })
                .collect();
        }
    }

    let title = info
        .get("judul")
        .cloned()
        .filter(|t| !t.is_empty())
        .or_else(|| {
            doc.select(&DETAIL_FALLBACK_TITLE)
                .next()
                .map(html::text)
                .filter(|t| !t.is_empty())
        })?;

    let synopsis = doc
        .select(&SYNOPSIS)
        .map(html::text)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut batch = None;
    let mut episodes = Vec::new();
    for block in doc.select(&EPISODE_BLOCK) {
        let heading = block
            .select(&EPISODE_HEADING)
            .next()
            .map(html::text)
            .unwrap_or_default();
        let is_batch = heading.to_lowercase().contains("batch");

        for row in block.select(&EPISODE_ROW) {
            let Some(link) = html::first(row, &EPISODE_LINK) else {
                continue;
            };
            let title = html::text(link);
            let href = link.value().attr("href").unwrap_or_default();
            if title.is_empty() || href.is_empty() {
                continue;
            }

            let episode = EpisodeRef {
                title,
                slug: last_segment(href),
                date: html::first_text(row, &EPISODE_DATE),
            };

            if is_batch {
                batch.get_or_insert(episode);
            } else {
                episodes.push(episode);
            }
        }
    }

    let field = |key: &str| info.get(key).filter(|v| !v.is_empty()).cloned();

    Some(AnimeDetail {
        title,
        japanese: field("japanese"),
        score: field("skor"),
        producer: field("produser"),
        anime_type: field("tipe"),
        status: field("status"),
        total_episode: field("total episode"),
        duration: field("durasi"),
        release_date: field("tanggal rilis"),
        studio: field("studio"),
        genres,
        synopsis,
        poster: doc
            .select(&DETAIL_POSTER)
            .next()
            .and_then(|img| img.value().attr("src"))
            .unwrap_or_default()
            .to_string(),
        batch,
        episodes,
    })
}

/// Episode page: default embed plus mirror servers and download rows.
/// `None` when the page carries no episode title.
pub fn parse_episode(body: &str) -> Option<EpisodeDetail> {
    let doc = Html::parse_document(body);

    let title = doc
        .select(&EPISODE_TITLE)
        .next()
        .map(html::text)
        .filter(|t| !t.is_empty())?;

    let stream_url = doc
        .select(&EMBED_IFRAME)
        .next()
        .and_then(|iframe| iframe.value().attr("src"))
        .map(str::to_string);

    let mut servers = Vec::new();
    for list in doc.select(&MIRROR_LIST) {
        // Mirror lists are grouped per quality, carried on the ul class
        // (m360p, m480p, m720p).
        let quality = list
            .value()
            .attr("class")
            .and_then(|c| c.split_whitespace().find(|c| c.starts_with('m')))
            .map(|c| c.trim_start_matches('m').to_string());

        for link in list.select(&MIRROR_LINK) {
            let name = html::text(link);
            let Some(data_content) = link.value().attr("data-content") else {
                continue;
            };
            if name.is_empty() || data_content.is_empty() {
                continue;
            }

            servers.push(StreamingServer {
                name,
                quality: quality.clone(),
                data_content: data_content.to_string(),
            });
        }
    }

    let mut anime_slug = None;
    let mut prev_episode = None;
    let mut next_episode = None;
    for link in doc.select(&NAV_LINK) {
        let text = html::text(link).to_lowercase();
        let Some(href) = link.value().attr("href") else {
            continue;
        };

        if href.contains("/anime/") {
            anime_slug = Some(last_segment(href));
        } else if text.contains("sebelumnya") || text.contains("previous") {
            prev_episode = Some(last_segment(href));
        } else if text.contains("selanjutnya") || text.contains("next") {
            next_episode = Some(last_segment(href));
        }
    }

    let downloads = doc
        .select(&DOWNLOAD_ROW)
        .filter_map(|row| {
            let resolution = html::first_text(row, &DOWNLOAD_LABEL)?;

            let links: Vec<DownloadLink> = row
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

    Some(EpisodeDetail {
        title,
        stream_url,
        servers,
        downloads,
        anime_slug,
        prev_episode,
        next_episode,
    })
}

pub fn parse_genres(body: &str) -> Vec<Genre> {
    let doc = Html::parse_document(body);

    doc.select(&GENRE_LINK)
        .filter_map(|el| {
            let name = html::text(el);
            let href = el.value().attr("href").unwrap_or_default();

            (!name.is_empty() && !href.is_empty()).then(|| Genre {
                name,
                slug: GENRE_SLUG_RE
                    .captures(href)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_else(|| last_segment(href)),
            })
        })
        .collect()
}

/// Genre listings use a different card layout than the front page.
pub fn parse_genre_listing(body: &str) -> (Vec<AnimeCard>, Pagination) {
    let doc = Html::parse_document(body);

    let anime = doc
        .select(&GENRE_CARD)
        .filter_map(|el| {
            let title_el = html::first(el, &GENRE_CARD_TITLE)?;
            let title = html::text(title_el);
            let href = title_el.value().attr("href").unwrap_or_default();
            if title.is_empty() || href.is_empty() {
                return None;
            }

            Some(AnimeCard {
                title,
                slug: last_segment(href),
                poster: html::first_attr(el, &GENRE_CARD_COVER, "src").unwrap_or_default(),
                episode: html::first_text(el, &GENRE_CARD_EPS),
                release_day: None,
                release_date: html::first_text(el, &GENRE_CARD_DATE),
            })
        })
        .collect();

    (anime, parse_pagination(&doc))
}

pub fn parse_schedule(body: &str) -> Vec<ScheduleDay> {
    let doc = Html::parse_document(body);

    doc.select(&SCHEDULE_BLOCK)
        .filter_map(|block| {
            let day = block
                .select(&SCHEDULE_DAY)
                .next()
                .map(html::text)
                .filter(|d| !d.is_empty())?;

            let anime = block
                .select(&SCHEDULE_ROW)
                .filter_map(|a| {
                    let title = html::text(a);
                    let href = a.value().attr("href").unwrap_or_default();
                    (!title.is_empty() && !href.is_empty()).then(|| AnimeListItem {
                        title,
                        slug: last_segment(href),
                    })
                })
                .collect();

            Some(ScheduleDay { day, anime })
        })
        .collect()
}

pub fn parse_search(body: &str) -> Vec<AnimeCard> {
    let doc = Html::parse_document(body);

    doc.select(&SEARCH_ROW)
        .filter_map(|el| {
            let title_el = html::first(el, &SEARCH_TITLE)?;
            let title = html::text(title_el);
            let href = title_el.value().attr("href").unwrap_or_default();
            if title.is_empty() || href.is_empty() {
                return None;
            }

            Some(AnimeCard {
                title,
                slug: last_segment(href),
                poster: html::first_attr(el, &SEARCH_IMG, "src").unwrap_or_default(),
                episode: None,
                release_day: None,
                release_date: None,
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
                    slug: last_segment(href),
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

    const HOME: &str = r#"
    <div class="venutama"><div class="rseries">
      <div class="rapi">
        <h1>On-going Anime</h1>
        <div class="venz"><ul><li><div class="detpost">
          <div class="epz">Episode 8</div>
          <div class="epztipe">Sabtu</div>
          <div class="newnime">20 Jul</div>
          <div class="thumb"><a href="https://otakudesu.cloud/anime/frieren-sub-indo/">
            <div class="thumbz"><img src="/img/frieren.jpg"><h2 class="jdlflm">Sousou no Frieren</h2></div>
          </a></div>
        </div></li></ul></div>
      </div>
      <div class="rapi">
        <h1>Complete Anime</h1>
        <div class="venz"><ul><li><div class="detpost">
          <div class="epz">12 Episode</div>
          <div class="thumb"><a href="https://otakudesu.cloud/anime/bocchi-sub-indo/">
            <div class="thumbz"><img src="/img/bocchi.jpg"><h2 class="jdlflm">Bocchi the Rock!</h2></div>
          </a></div>
        </div></li></ul></div>
      </div>
    </div></div>
    "#;

    #[test]
    fn home_splits_sections_by_heading() {
        let home = parse_home(HOME);

        assert_eq!(home.ongoing.len(), 1);
        assert_eq!(home.complete.len(), 1);

        let ongoing = &home.ongoing[0];
        assert_eq!(ongoing.title, "Sousou no Frieren");
        assert_eq!(ongoing.slug, "frieren-sub-indo");
        assert_eq!(ongoing.episode.as_deref(), Some("Episode 8"));
        assert_eq!(ongoing.release_day.as_deref(), Some("Sabtu"));

        assert_eq!(home.complete[0].slug, "bocchi-sub-indo");
    }

    #[test]
    fn pagination_from_page_numbers_widget() {
        let body = r##"
        <div class="venz"><ul></ul></div>
        <div class="pagination">
          <a class="page-numbers" href="#">1</a>
          <span class="page-numbers current">2</span>
          <a class="page-numbers" href="#">3</a>
          <a class="page-numbers" href="#">58</a>
          <a class="next page-numbers" href="#">Next</a>
        </div>
        "##;

        let (_, pagination) = parse_listing(body);
        assert_eq!(pagination.current_page, 2);
        assert_eq!(pagination.total_pages, 58);
        assert_eq!(pagination.next_page, Some(3));
        assert_eq!(pagination.prev_page, Some(1));
    }

    #[test]
    fn detail_reads_info_lines_and_episode_blocks() {
        let body = r#"
        <div class="fotoanime"><img src="/poster/frieren.jpg"></div>
        <div class="infozingle">
          <p><b>Judul</b>: Sousou no Frieren</p>
          <p><b>Japanese</b>: 葬送のフリーレン</p>
          <p><b>Skor</b>: 9.10</p>
          <p><b>Tipe</b>: TV</p>
          <p><b>Status</b>: Completed</p>
          <p><b>Total Episode</b>: 28</p>
          <p><b>Durasi</b>: 24 Menit</p>
          <p><b>Tanggal Rilis</b>: Sep 29, 2023</p>
          <p><b>Studio</b>: Madhouse</p>
          <p><b>Genre</b>: <a href="https://otakudesu.cloud/genres/adventure/">Adventure</a>, <a href="https://otakudesu.cloud/genres/fantasy/">Fantasy</a></p>
        </div>
        <div class="sinopc"><p>The journey after the journey.</p></div>
        <div class="episodelist">
          <div class="monktit">Sousou no Frieren Batch</div>
          <ul><li><span><a href="https://otakudesu.cloud/batch/frieren-batch-sub-indo/">Frieren Batch Episode 1-28</a></span><span class="zeebr">22 Mar</span></li></ul>
        </div>
        <div class="episodelist">
          <div class="monktit">Episode List</div>
          <ul>
            <li><span><a href="https://otakudesu.cloud/episode/frieren-episode-2-sub-indo/">Frieren Episode 2</a></span><span class="zeebr">6 Okt</span></li>
            <li><span><a href="https://otakudesu.cloud/episode/frieren-episode-1-sub-indo/">Frieren Episode 1</a></span><span class="zeebr">29 Sep</span></li>
          </ul>
        </div>
        "#;

        let detail = parse_detail(body).expect("title present");
        assert_eq!(detail.title, "Sousou no Frieren");
        assert_eq!(detail.japanese.as_deref(), Some("葬送のフリーレン"));
        assert_eq!(detail.score.as_deref(), Some("9.10"));
        assert_eq!(detail.studio.as_deref(), Some("Madhouse"));
        assert_eq!(detail.genres.len(), 2);
        assert_eq!(detail.genres[1].slug, "fantasy");
        assert_eq!(detail.synopsis, "The journey after the journey.");
        assert_eq!(detail.poster, "/poster/frieren.jpg");

        let batch = detail.batch.expect("batch block");
        assert_eq!(batch.slug, "frieren-batch-sub-indo");

        assert_eq!(detail.episodes.len(), 2);
        assert_eq!(detail.episodes[0].slug, "frieren-episode-2-sub-indo");
        assert_eq!(detail.episodes[0].date.as_deref(), Some("6 Okt"));
    }

    #[test]
    fn detail_without_title_is_none() {
        assert!(parse_detail("<div class=\"infozingle\"></div>").is_none());
    }

    #[test]
    fn episode_page_collects_mirrors_and_downloads() {
        let body = r#"
        <h1 class="posttl">Frieren Episode 2 Subtitle Indonesia</h1>
        <div id="pembed"><iframe src="https://desustream.me/embed/frieren-2"></iframe></div>
        <div class="mirrorstream">
          <ul class="m360p">
            <li><a data-content="eyJpZCI6MX0=">Mirror A</a></li>
            <li><a data-content="eyJpZCI6Mn0=">Mirror B</a></li>
          </ul>
          <ul class="m720p">
            <li><a data-content="eyJpZCI6M30=">Mirror A</a></li>
          </ul>
        </div>
        <div class="flir">
          <a href="https://otakudesu.cloud/episode/frieren-episode-1-sub-indo/">&laquo; Episode Sebelumnya</a>
          <a href="https://otakudesu.cloud/anime/frieren-sub-indo/">See All Episodes</a>
          <a href="https://otakudesu.cloud/episode/frieren-episode-3-sub-indo/">Episode Selanjutnya &raquo;</a>
        </div>
        <div class="download"><ul>
          <li><strong>Mp4 360p</strong> <a href="https://dl.test/a">ZippyShare</a> <a href="https://dl.test/b">Mega</a> <i>60MB</i></li>
          <li><strong>Mp4 720p</strong> <a href="https://dl.test/c">Mega</a> <i>120MB</i></li>
        </ul></div>
        "#;

        let episode = parse_episode(body).expect("title present");
        assert_eq!(episode.title, "Frieren Episode 2 Subtitle Indonesia");
        assert_eq!(
            episode.stream_url.as_deref(),
            Some("https://desustream.me/embed/frieren-2")
        );

        assert_eq!(episode.servers.len(), 3);
        assert_eq!(episode.servers[0].quality.as_deref(), Some("360p"));
        assert_eq!(episode.servers[0].data_content, "eyJpZCI6MX0=");
        assert_eq!(episode.servers[2].quality.as_deref(), Some("720p"));

        assert_eq!(episode.anime_slug.as_deref(), Some("frieren-sub-indo"));
        assert_eq!(
            episode.prev_episode.as_deref(),
            Some("frieren-episode-1-sub-indo")
        );
        assert_eq!(
            episode.next_episode.as_deref(),
            Some("frieren-episode-3-sub-indo")
        );

        assert_eq!(episode.downloads.len(), 2);
        assert_eq!(episode.downloads[0].resolution, "Mp4 360p");
        assert_eq!(episode.downloads[0].links.len(), 2);
    }

    #[test]
    fn genre_listing_uses_column_cards() {
        let body = r#"
        <div class="col-anime-con">
          <div class="col-anime">
            <div class="col-anime-cover"><img src="/img/oshi.jpg"></div>
            <div class="col-anime-title"><a href="https://otakudesu.cloud/anime/oshi-no-ko-sub-indo/">Oshi no Ko</a></div>
            <div class="col-anime-eps">11 Eps</div>
            <div class="col-anime-date">Apr 12, 2023</div>
          </div>
        </div>
        <div class="pagination"><span class="page-numbers current">1</span><a class="page-numbers">4</a></div>
        "#;

        let (anime, pagination) = parse_genre_listing(body);
        assert_eq!(anime.len(), 1);
        assert_eq!(anime[0].slug, "oshi-no-ko-sub-indo");
        assert_eq!(anime[0].episode.as_deref(), Some("11 Eps"));
        assert_eq!(pagination.total_pages, 4);
        assert!(pagination.has_next_page);
    }

    #[test]
    fn schedule_groups_by_day() {
        let body = r#"
        <div class="kglist321"><h2>Senin</h2><ul>
          <li><a href="https://otakudesu.cloud/anime/a-sub-indo/">Anime A</a></li>
          <li><a href="https://otakudesu.cloud/anime/b-sub-indo/">Anime B</a></li>
        </ul></div>
        <div class="kglist321"><h2>Selasa</h2><ul>
          <li><a href="https://otakudesu.cloud/anime/c-sub-indo/">Anime C</a></li>
        </ul></div>
        "#;

        let schedule = parse_schedule(body);
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[0].day, "Senin");
        assert_eq!(schedule[0].anime.len(), 2);
        assert_eq!(schedule[1].anime[0].slug, "c-sub-indo");
    }

    #[test]
    fn search_rows_parse() {
        let body = r#"
        <ul class="chivsrc">
          <li><img src="/img/a.jpg"><h2><a href="https://otakudesu.cloud/anime/frieren-sub-indo/">Sousou no Frieren</a></h2></li>
          <li><h2><a href="">No link</a></h2></li>
        </ul>
        "#;

        let results = parse_search(body);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].slug, "frieren-sub-indo");
        assert_eq!(results[0].poster, "/img/a.jpg");
    }
}
