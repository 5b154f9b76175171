pub mod catalog;
pub mod comments;
pub mod insights;
pub mod shows;
pub mod tracking;

pub use catalog::{ShowCatalog, TvMazeCatalog};
pub use comments::CommentService;
pub use insights::{HuggingFaceGenerator, InsightService, TextGenerator};
pub use shows::ShowService;
pub use tracking::EpisodeTrackingService;
