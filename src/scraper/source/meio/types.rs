use serde::{Deserialize, Serialize};

/// List-item projection of a novel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Novel {
    pub slug: String,
    pub title: String,
    pub cover: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_chapter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_chapter_url: Option<String>,
}

/// One page of the novel listing; the theme only exposes a next-page link,
/// not a total count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelPage {
    pub novels: Vec<Novel>,
    pub has_next: bool,
}

/// Full detail page of a novel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelDetail {
    pub slug: String,
    pub title: String,
    pub cover: String,
    pub description: String,
    pub author: String,
    pub artist: String,
    pub genres: Vec<String>,
    pub status: String,
    #[serde(rename = "type")]
    pub novel_type: String,
    pub rating: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub slug: String,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Chapter text with reading-order navigation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterContent {
    pub title: String,
    pub novel_title: String,
    pub novel_slug: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_chapter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_chapter: Option<String>,
}
