pub mod config;
pub mod verdict;

pub use config::ClassifierConfig;
pub use verdict::{classify, classify_with, Verdict, VerdictStatus};
