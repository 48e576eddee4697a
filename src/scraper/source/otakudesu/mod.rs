mod extract;
mod source;
mod types;

pub use source::OtakudesuSource;
pub use types::{
    AnimeCard, AnimeDetail, AnimeIndex, AnimeListItem, DownloadLink, DownloadSection,
    EpisodeDetail, EpisodeRef, GenreAnime, HomePage, PagedAnime, ScheduleDay, StreamingServer,
    StreamingSource,
};
