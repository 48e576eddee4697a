use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scraper::{Genre, Pagination};

/// List-item projection of a series
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeCard {
    pub title: String,
    pub slug: String,
    pub poster: String,
    /// Episode marker, e.g. "Episode 8" on ongoing cards or a total count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<String>,
    /// Weekly release day on ongoing cards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

/// Front page: the ongoing and completed strips
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomePage {
    pub ongoing: Vec<AnimeCard>,
    pub complete: Vec<AnimeCard>,
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeListItem {
    pub title: String,
    pub slug: String,
}

/// A-to-Z index, keyed by first letter
pub type AnimeIndex = BTreeMap<String, Vec<AnimeListItem>>;

/// A link into the episode list of a series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRef {
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Full detail page of a series
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
    pub studio: Option<String>,
    pub genres: Vec<Genre>,
    pub synopsis: String,
    pub poster: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<EpisodeRef>,
    pub episodes: Vec<EpisodeRef>,
}

/// One streaming mirror on an episode page. `data_content` is the opaque
/// payload the resolve-streaming endpoint forwards upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingServer {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    pub data_content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLink {
    pub provider: String,
    pub url: String,
}

/// Download links for one format/resolution line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadSection {
    pub resolution: String,
    pub links: Vec<DownloadLink>,
}

/// Full episode page: default embed, mirrors and downloads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeDetail {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
    pub servers: Vec<StreamingServer>,
    pub downloads: Vec<DownloadSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anime_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_episode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_episode: Option<String>,
}

/// One weekday column of the release schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub day: String,
    pub anime: Vec<AnimeListItem>,
}

/// Resolved embed URL returned by the streaming pass-through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingSource {
    pub url: String,
}
