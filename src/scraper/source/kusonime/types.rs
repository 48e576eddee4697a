use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scraper::Pagination;

/// List-item projection of a batch release
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeCard {
    pub title: String,
    pub slug: String,
    pub poster: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

/// Front page: newest batches plus the recommendation strip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomePage {
    pub latest: Vec<AnimeCard>,
    pub recommendations: Vec<AnimeCard>,
}

/// One page of a card listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedAnime {
    pub anime: Vec<AnimeCard>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreAnime {
    pub genre: String,
    pub anime: Vec<AnimeCard>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonAnime {
    pub season: String,
    pub anime: Vec<AnimeCard>,
    pub pagination: Pagination,
}

/// A release season (e.g. "Fall 2023")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLink {
    pub provider: String,
    pub url: String,
}

/// Download links for one resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadSection {
    pub resolution: String,
    pub links: Vec<DownloadLink>,
}

/// Full detail page of a batch release
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeDetail {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub japanese: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub anime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_episode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    pub genres: Vec<String>,
    pub synopsis: String,
    pub poster: String,
    pub downloads: Vec<DownloadSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeListItem {
    pub title: String,
    pub slug: String,
}

/// A-to-Z index, keyed by first letter
pub type AnimeIndex = BTreeMap<String, Vec<AnimeListItem>>;
