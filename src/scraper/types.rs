use serde::{Deserialize, Serialize};

/// Kind of media a source serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Anime,
    Manga,
    Novel,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anime => write!(f, "anime"),
            Self::Manga => write!(f, "manga"),
            Self::Novel => write!(f, "novel"),
        }
    }
}

/// Page position within a multi-page listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub next_page: Option<u32>,
    pub prev_page: Option<u32>,
}

impl Pagination {
    /// Derive the full record from the current and total page count.
    pub fn from_pages(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages,
            has_next_page: current_page < total_pages,
            has_prev_page: current_page > 1,
            next_page: (current_page < total_pages).then(|| current_page + 1),
            prev_page: (current_page > 1).then(|| current_page - 1),
        }
    }

    /// Single-page listing.
    pub fn single() -> Self {
        Self::from_pages(1, 1)
    }
}

/// A genre tag with its URL slug
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub name: String,
    pub slug: String,
}

/// Uniform list-item projection used by the cross-source search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaCard {
    pub title: String,
    pub slug: String,
    pub image: Option<String>,
    pub kind: MediaKind,
    /// Source id this card came from
    pub source: String,
}
