pub mod fuzzy;
pub mod ner;
pub mod orchestrator;
pub mod preprocess;
pub mod synonyms;

pub use ner::{
    EntityCategory, EntityExtractor, EntityMention, LexiconExtractor, NerError, SidecarExtractor,
};
pub use orchestrator::extract_symptoms;
