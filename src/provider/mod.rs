pub mod fetcher;
pub mod traits;

pub use fetcher::AlphaVantageProvider;
pub use traits::QuoteProvider;
