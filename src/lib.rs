//! Resume matcher library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{Result, ResumeMatcherError};
pub use processing::analyzer::AnalysisEngine;
pub use processing::ats_matcher::{match_resume, JobRequirements, MatchResult, MatchStatus};
pub use processing::resume_parser::{parse_resume, ResumeProfile};
