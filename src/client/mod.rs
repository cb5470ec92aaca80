pub mod serpapi;
pub mod traits;

pub use serpapi::SerpApiClient;
pub use traits::SearchProvider;
