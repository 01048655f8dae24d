pub mod newsapi;
pub mod scrapers;

pub use newsapi::NewsApiSource;
pub use scrapers::HtmlExtractor;

pub mod prelude {
    pub use super::newsapi::NewsApiSource;
    pub use super::scrapers::HtmlExtractor;
    pub use nl_core::{ArticleSource, ContentExtractor, Result, Error};
}
