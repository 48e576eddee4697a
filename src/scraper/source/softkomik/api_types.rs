//! Raw wire shapes of the softkomik JSON API and the `__NEXT_DATA__`
//! payload embedded in its HTML pages. Fields the extractor does not read
//! are omitted; everything optional is defaulted because the two delivery
//! paths disagree about which fields they populate.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct V2ComicItem {
    pub title: String,
    pub title_slug: String,
    #[serde(default, rename = "type")]
    pub comic_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub gambar: Option<String>,
    #[serde(default)]
    pub latest_chapter: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub visitor: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V2Rating {
    pub value: f64,
    pub member: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V2ComicDetail {
    pub title: String,
    #[serde(default)]
    pub title_alt: Option<String>,
    #[serde(default, rename = "type")]
    pub comic_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tahun: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub sinopsis: Option<String>,
    #[serde(default, rename = "Genre")]
    pub genre: Option<Vec<String>>,
    #[serde(default)]
    pub gambar: Option<String>,
    #[serde(default)]
    pub latest_chapter: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub visitor: Option<i64>,
    #[serde(default)]
    pub rating: Option<V2Rating>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V2ListResponse {
    pub page: u32,
    #[serde(rename = "maxPage")]
    pub max_page: u32,
    pub data: Vec<V2ComicItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V2ChapterRef {
    pub chapter: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V2ChapterListResponse {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "startChapter")]
    pub start_chapter: Vec<V2ChapterRef>,
    #[serde(default, rename = "newChapter")]
    pub new_chapter: Vec<V2ChapterRef>,
    #[serde(default)]
    pub chapter: Vec<V2ChapterRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V2ChapterKomik {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V2ChapterData {
    #[serde(default, rename = "imageSrc")]
    pub image_src: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V2ChapterImagesResponse {
    #[serde(default)]
    pub komik: Option<V2ChapterKomik>,
    #[serde(default)]
    pub data: Option<V2ChapterData>,
    #[serde(default, rename = "prevChapter")]
    pub prev_chapter: Vec<V2ChapterRef>,
    #[serde(default, rename = "nextChapter")]
    pub next_chapter: Vec<V2ChapterRef>,
}

/// `<script id="__NEXT_DATA__">` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct NextData {
    pub props: NextProps,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NextProps {
    #[serde(rename = "pageProps")]
    pub page_props: serde_json::Value,
}

/// Chapter page props: the same shape the JSON API serves, one level down.
#[derive(Debug, Clone, Deserialize)]
pub struct NextChapterProps {
    #[serde(default)]
    pub data: Option<V2ChapterImagesResponse>,
}

/// Comic page props carry the chapter index inline.
#[derive(Debug, Clone, Deserialize)]
pub struct NextComicProps {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "startChapter")]
    pub start_chapter: Vec<V2ChapterRef>,
    #[serde(default, rename = "newChapter")]
    pub new_chapter: Vec<V2ChapterRef>,
    #[serde(default)]
    pub chapter: Vec<V2ChapterRef>,
    #[serde(default)]
    pub komik: Option<V2ComicDetail>,
}
