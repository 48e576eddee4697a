mod extract;
mod source;
mod types;

pub use source::KusonimeSource;
pub use types::{
    AnimeCard, AnimeDetail, AnimeIndex, AnimeListItem, DownloadLink, DownloadSection, GenreAnime,
    HomePage, PagedAnime, Season, SeasonAnime,
};
