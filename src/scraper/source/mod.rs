mod html;
mod http;
mod traits;

mod kusonime;
mod meio;
mod otakudesu;
mod softkomik;

pub use http::HttpClient;
pub use kusonime::KusonimeSource;
pub use meio::MeioSource;
pub use otakudesu::OtakudesuSource;
pub use softkomik::SoftkomikSource;
pub use traits::Source;
