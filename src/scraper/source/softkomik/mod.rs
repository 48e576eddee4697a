mod api_types;
mod source;
mod types;

pub use source::SoftkomikSource;
pub use types::{
    ChapterImages, ChapterInfo, ChapterListResult, ComicDetail, ComicListing, ComicPage, Rating,
};
