use crate::error::{DaystatError, Result};
use crate::model::{CommitRecord, DayWindow, FileDelta};
use chrono::{DateTime, FixedOffset, TimeZone};
use gix::object::tree::diff::ChangeDetached;
use gix::{ObjectId, Repository};
use similar::{ChangeTag, TextDiff};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository rooted at `path`, resolved to an absolute path first.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let requested = path.as_ref();
        let resolved = std::fs::canonicalize(requested).map_err(|source| DaystatError::RepoPath {
            path: requested.to_path_buf(),
            source,
        })?;

        let repo = gix::open(&resolved)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lazily walk every commit reachable from HEAD, yielding those whose
    /// author time falls inside `window`.
    pub fn commits(&self, window: DayWindow) -> Result<CommitWalk<'_>> {
        let mut head = self.repo.head()?;
        let head_commit = head.peel_to_commit_in_place()?;

        Ok(CommitWalk {
            repo: self,
            window,
            seen: HashSet::new(),
            stack: VecDeque::from([head_commit.id]),
        })
    }

    fn file_deltas(&self, commit_id: ObjectId, parent_id: Option<ObjectId>) -> Result<Vec<FileDelta>> {
        let commit_tree = self.repo.find_commit(commit_id)?.tree()?;
        let changes: Vec<ChangeDetached> = match parent_id {
            Some(parent_id) => {
                let parent_tree = self.repo.find_commit(parent_id)?.tree()?;
                self.repo
                    .diff_tree_to_tree(Some(&parent_tree), Some(&commit_tree), None)?
            }
            None => self.repo.diff_tree_to_tree(None, Some(&commit_tree), None)?,
        };

        let mut files = Vec::new();
        for change in changes {
            self.handle_change(change, &mut files)?;
        }
        Ok(files)
    }

    fn handle_change(&self, change: ChangeDetached, files: &mut Vec<FileDelta>) -> Result<()> {
        match change {
            ChangeDetached::Addition {
                id,
                location,
                entry_mode,
                ..
            } => {
                if entry_mode.is_tree() || entry_mode.is_commit() {
                    return Ok(());
                }
                let new = self.repo.find_object(id)?;
                files.push(added_file(location.to_string(), &new.data));
            }
            ChangeDetached::Deletion {
                id,
                location,
                entry_mode,
                ..
            } => {
                if entry_mode.is_tree() || entry_mode.is_commit() {
                    return Ok(());
                }
                let old = self.repo.find_object(id)?;
                files.push(deleted_file(location.to_string(), &old.data));
            }
            ChangeDetached::Modification {
                previous_id,
                id,
                location,
                entry_mode,
                ..
            } => {
                if entry_mode.is_tree() || entry_mode.is_commit() {
                    return Ok(());
                }
                let old = self.repo.find_object(previous_id)?;
                let new = self.repo.find_object(id)?;
                let is_binary = is_binary_data(&old.data) || is_binary_data(&new.data);
                let (added, deleted) = if is_binary {
                    (0, 0)
                } else {
                    line_delta(&old.data, &new.data)
                };
                files.push(FileDelta {
                    path: location.to_string(),
                    added_lines: added,
                    deleted_lines: deleted,
                    is_binary,
                });
            }
            ChangeDetached::Rewrite {
                source_id,
                id,
                source_location,
                location,
                entry_mode,
                copy,
                ..
            } => {
                if entry_mode.is_tree() || entry_mode.is_commit() {
                    return Ok(());
                }
                // A rename counts as the old path going away and the new one
                // appearing in full; a copy only adds the new path.
                if !copy {
                    let old = self.repo.find_object(source_id)?;
                    files.push(deleted_file(source_location.to_string(), &old.data));
                }
                let new = self.repo.find_object(id)?;
                files.push(added_file(location.to_string(), &new.data));
            }
        }
        Ok(())
    }
}

pub struct CommitWalk<'a> {
    repo: &'a GitRepo,
    window: DayWindow,
    seen: HashSet<ObjectId>,
    stack: VecDeque<ObjectId>,
}

impl CommitWalk<'_> {
    fn visit(&mut self, commit_id: ObjectId) -> Result<Option<CommitRecord>> {
        let repo = self.repo;
        let commit = repo.repo.find_commit(commit_id)?;
        let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();
        self.stack.extend(parents.iter().copied());

        let time = commit.author()?.time()?;
        let timestamp = author_timestamp(time.seconds, time.offset)?;
        if !self.window.contains(&timestamp) {
            return Ok(None);
        }

        let files = repo.file_deltas(commit_id, parents.first().copied())?;
        Ok(Some(CommitRecord {
            id: commit_id.to_string(),
            timestamp,
            files,
        }))
    }
}

impl Iterator for CommitWalk<'_> {
    type Item = Result<CommitRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(commit_id) = self.stack.pop_back() {
            if !self.seen.insert(commit_id) {
                continue;
            }
            match self.visit(commit_id) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(err) => {
                    self.stack.clear();
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

fn author_timestamp(seconds: i64, offset: i32) -> Result<DateTime<FixedOffset>> {
    FixedOffset::east_opt(offset)
        .and_then(|tz| tz.timestamp_opt(seconds, 0).single())
        .ok_or_else(|| DaystatError::History(format!("Invalid author time: {seconds} {offset:+}")))
}

/// Upper bound for a single file's line diff before it falls back to an
/// approximate result.
const DIFF_TIMEOUT: Duration = Duration::from_secs(1);

/// Only this many leading bytes are inspected for a NUL when sniffing binaries.
const BINARY_SNIFF_LEN: usize = 8192;

fn is_binary_data(data: &[u8]) -> bool {
    data.iter().take(BINARY_SNIFF_LEN).any(|&b| b == 0)
}

fn added_file(path: String, data: &[u8]) -> FileDelta {
    let is_binary = is_binary_data(data);
    FileDelta {
        path,
        added_lines: if is_binary { 0 } else { count_lines(data) },
        deleted_lines: 0,
        is_binary,
    }
}

fn deleted_file(path: String, data: &[u8]) -> FileDelta {
    let is_binary = is_binary_data(data);
    FileDelta {
        path,
        added_lines: 0,
        deleted_lines: if is_binary { 0 } else { count_lines(data) },
        is_binary,
    }
}

fn count_lines(data: &[u8]) -> u32 {
    line_delta(&[], data).0
}

/// Lines added and deleted going from `old` to `new`.
fn line_delta(old: &[u8], new: &[u8]) -> (u32, u32) {
    line_delta_within(old, new, DIFF_TIMEOUT)
}

fn line_delta_within(old: &[u8], new: &[u8], timeout: Duration) -> (u32, u32) {
    let old_text = String::from_utf8_lossy(old);
    let new_text = String::from_utf8_lossy(new);
    let diff = TextDiff::configure()
        .timeout(timeout)
        .diff_lines(old_text.as_ref(), new_text.as_ref());

    diff.iter_all_changes()
        .fold((0, 0), |(added, deleted), change| match change.tag() {
            ChangeTag::Insert => (added + 1, deleted),
            ChangeTag::Delete => (added, deleted + 1),
            ChangeTag::Equal => (added, deleted),
        })
}
