//! Resume parsing and job description matching

pub mod lexicon;
pub mod text_processor;
pub mod sections;
pub mod experience;
pub mod education;
pub mod certificates;
pub mod resume_parser;
pub mod ats_matcher;
pub mod analyzer;
