pub mod perplexity_client;
pub mod reddit_client;

pub use perplexity_client::*;
pub use reddit_client::*;
