pub mod bow;
pub mod corpus;
pub mod error;
pub mod smoothing;
pub mod types;
pub mod vocabulary;

pub use types::{Count, Float};

pub use error::{Result, VintageError};

pub use bow::{encode, Bow, Token};
pub use corpus::{read_document, Corpus, DirCorpus, MemoryCorpus};
pub use smoothing::laplace_log_prob;
pub use vocabulary::Vocabulary;
