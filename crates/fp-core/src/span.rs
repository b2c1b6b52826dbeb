//! Source positions for one compilation unit.
//!
//! Offsets are byte offsets into the file's source text. A [`FileSet`]
//! owns the path and line table of every file so positions can be turned
//! into `path:line:column` form by the driver.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Dense index of a file within a [`FileSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FileId(pub u32);

/// A single point in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Pos {
    pub file: FileId,
    pub offset: u32,
}

/// A half-open byte range in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Span {
    pub file: FileId,
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[must_use]
    pub const fn new(file: FileId, start: u32, end: u32) -> Self {
        Self { file, start, end }
    }

    #[must_use]
    pub const fn start_pos(self) -> Pos {
        Pos {
            file: self.file,
            offset: self.start,
        }
    }

    #[must_use]
    pub const fn end_pos(self) -> Pos {
        Pos {
            file: self.file,
            offset: self.end,
        }
    }
}

/// A resolved, human-facing location. Line and column are 1-based;
/// the column counts bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    pub path: PathBuf,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone)]
struct SourceFile {
    path: PathBuf,
    line_starts: Vec<u32>,
}

/// Paths and line tables for every file of a compilation unit.
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    files: Vec<SourceFile>,
}

impl FileSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file and return its id.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, source: &str) -> FileId {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| u32::try_from(i + 1).unwrap_or(u32::MAX)),
        );
        let id = FileId(u32::try_from(self.files.len()).unwrap_or(u32::MAX));
        self.files.push(SourceFile {
            path: path.into(),
            line_starts,
        });
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[must_use]
    pub fn path(&self, file: FileId) -> Option<&Path> {
        self.files.get(file.0 as usize).map(|f| f.path.as_path())
    }

    /// Map a position to its path, line and column.
    #[must_use]
    pub fn position(&self, pos: Pos) -> Option<Position> {
        let file = self.files.get(pos.file.0 as usize)?;
        let line_idx = match file.line_starts.binary_search(&pos.offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let line_start = file.line_starts.get(line_idx).copied().unwrap_or(0);
        Some(Position {
            path: file.path.clone(),
            line: u32::try_from(line_idx + 1).unwrap_or(u32::MAX),
            column: pos.offset - line_start + 1,
        })
    }

    /// Whether two positions originate from the same source file.
    #[must_use]
    pub fn same_file(&self, a: Pos, b: Pos) -> bool {
        if a.file == b.file {
            return true;
        }
        // Two registrations of one path still count as the same file.
        matches!((self.path(a.file), self.path(b.file)), (Some(pa), Some(pb)) if pa == pb)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn position_maps_offsets_to_lines_and_columns() {
        let mut set = FileSet::new();
        let id = set.add_file("a.go", "package a\n\ntype t struct{}\n");

        let pos = set
            .position(Pos {
                file: id,
                offset: 16,
            })
            .expect("file registered");
        assert_eq!(pos.path, PathBuf::from("a.go"));
        assert_eq!(pos.line, 3);
        assert_eq!(pos.column, 6);

        let first = set.position(Pos { file: id, offset: 0 }).expect("file");
        assert_eq!((first.line, first.column), (1, 1));
    }

    #[test]
    fn position_at_line_start() {
        let mut set = FileSet::new();
        let id = set.add_file("a.go", "ab\ncd\n");
        let pos = set.position(Pos { file: id, offset: 3 }).expect("file");
        assert_eq!((pos.line, pos.column), (2, 1));
    }

    #[test]
    fn unknown_file_has_no_position() {
        let set = FileSet::new();
        assert!(
            set.position(Pos {
                file: FileId(4),
                offset: 0
            })
            .is_none()
        );
    }

    #[test]
    fn same_file_compares_ids_and_paths() {
        let mut set = FileSet::new();
        let a = set.add_file("a.go", "");
        let b = set.add_file("b.go", "");
        let a_again = set.add_file("a.go", "");
        let at = |file| Pos { file, offset: 0 };

        assert!(set.same_file(at(a), at(a)));
        assert!(!set.same_file(at(a), at(b)));
        assert!(set.same_file(at(a), at(a_again)));
    }
}
