pub mod aggregate;
pub mod classifier;
pub mod config;
pub mod crawl;
pub mod dom;
pub mod error;
pub mod extract;
pub mod lexicon;
pub mod links;
pub mod models;
pub mod report;
pub mod testutil;
pub mod throttle;
pub mod traits;

pub use classifier::{Classification, PageClassifier};
pub use crawl::{CrawlConfig, CrawlOrchestrator};
pub use error::AppError;
pub use extract::StructuredDataExtractor;
pub use lexicon::IndicatorLexicon;
pub use links::LinkPrioritizer;
pub use models::JobCandidate;
pub use traits::Fetcher;
