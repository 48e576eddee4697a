use serde::{Deserialize, Serialize};

use crate::scraper::Pagination;

/// List-item projection of a comic
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicListing {
    pub title: String,
    pub slug: String,
    pub url: String,
    pub thumbnail: Option<String>,
    #[serde(rename = "type")]
    pub comic_type: Option<String>,
    pub status: Option<String>,
    pub latest_chapter: Option<String>,
    pub updated_at: Option<String>,
    pub visitor: Option<i64>,
}

/// One page of a comic listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComicPage {
    pub comics: Vec<ComicListing>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub value: f64,
    pub member: i64,
}

/// Full detail record of a comic
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicDetail {
    pub title: String,
    pub alternative_title: Option<String>,
    #[serde(rename = "type")]
    pub comic_type: Option<String>,
    pub status: Option<String>,
    pub release_year: Option<String>,
    pub author: Option<String>,
    pub rating: Option<Rating>,
    pub description: Option<String>,
    pub genres: Vec<String>,
    pub thumbnail: Option<String>,
    pub visitor: Option<i64>,
    pub latest_chapter: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterInfo {
    pub number: String,
    pub url: String,
}

/// All chapters of a comic with first/latest markers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterListResult {
    pub title: String,
    pub first_chapter: Option<String>,
    pub latest_chapter: Option<String>,
    pub total_chapters: usize,
    pub chapters: Vec<ChapterInfo>,
}

/// Page images of one chapter with reading-order navigation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterImages {
    pub title: String,
    pub comic_slug: String,
    pub chapter_number: String,
    pub images: Vec<String>,
    pub prev_chapter: Option<String>,
    pub next_chapter: Option<String>,
}
