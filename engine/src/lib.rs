pub mod catalog;
pub mod features;
pub mod persist;
pub mod recommend;
pub mod similarity;
pub mod tokenizer;

pub use catalog::{Catalog, Movie, MovieId};
pub use features::Vocabulary;
pub use recommend::{Engine, EngineError, Recommendation};
pub use similarity::SimilarityMatrix;
