pub mod bias;
pub mod error;
pub mod http;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod source;
pub mod timeline;
pub mod types;

pub use bias::{Bias, BiasBuckets, BiasTable, SourceBias};
pub use error::{Error, ErrorKind, Result};
pub use http::HttpConfig;
pub use models::InferenceModel;
pub use pipeline::Pipeline;
pub use source::{ArticleSource, ContentExtractor};
pub use timeline::{TimelineEvent, TimelineOutcome};
pub use types::{Article, Publisher, SearchResults};

pub mod prelude {
    pub use super::{
        Article, ArticleSource, Bias, BiasTable, ContentExtractor, Error, InferenceModel,
        Pipeline, Result, SearchResults,
    };
}
