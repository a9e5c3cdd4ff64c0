pub mod lexicon;
pub mod morphology;
pub mod phrase;
pub mod realiser;
pub mod sentence;
pub mod spec;
pub mod text_spec;
pub mod verb_group;
