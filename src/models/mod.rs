pub mod word;

pub use word::{CreateWord, Word};
