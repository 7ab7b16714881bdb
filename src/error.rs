use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DaystatError>;

#[derive(Error, Debug)]
pub enum DaystatError {
    #[error("Invalid {which} date '{input}': {source}")]
    InvalidDate {
        which: &'static str,
        input: String,
        source: chrono::ParseError,
    },
    #[error("Invalid {which} date '{input}': expected YYYY-MM-DD")]
    DateShape { which: &'static str, input: String },
    #[error("End date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("Cannot resolve repository path '{}': {source}", path.display())]
    RepoPath {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Git error: {0}")]
    Git(#[from] Box<gix::open::Error>),
    #[error("Git history error: {0}")]
    History(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Diff tree to tree error: {0}")]
    DiffTreeToTree(#[from] Box<gix::repository::diff_tree_to_tree::Error>),
    #[error("Signature time error: {0}")]
    SignatureTime(#[from] Box<gix::date::parse::Error>),
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::open::Error> for DaystatError {
    fn from(err: gix::open::Error) -> Self {
        DaystatError::Git(Box::new(err))
    }
}

impl From<gix::object::find::existing::Error> for DaystatError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        DaystatError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for DaystatError {
    fn from(err: gix::object::commit::Error) -> Self {
        DaystatError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for DaystatError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        DaystatError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for DaystatError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        DaystatError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for DaystatError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        DaystatError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for DaystatError {
    fn from(err: gix::objs::decode::Error) -> Self {
        DaystatError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for DaystatError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        DaystatError::DiffTreeToTree(Box::new(err))
    }
}

impl From<gix::date::parse::Error> for DaystatError {
    fn from(err: gix::date::parse::Error) -> Self {
        DaystatError::SignatureTime(Box::new(err))
    }
}
