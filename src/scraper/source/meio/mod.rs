mod extract;
mod source;
mod types;

pub use source::MeioSource;
pub use types::{Chapter, ChapterContent, Novel, NovelDetail, NovelPage};
