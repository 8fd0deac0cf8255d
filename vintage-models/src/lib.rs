pub mod naive_bayes;

pub use naive_bayes::{Classification, LikelihoodTable, Model, NaiveBayes, DEFAULT_LABELS};
