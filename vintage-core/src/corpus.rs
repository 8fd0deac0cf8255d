use std::fs;
use std::path::{Path, PathBuf};

use crate::{Result, VintageError};

/// A source of labeled training documents.
///
/// A corpus is a set of named collections (one per label), each holding zero
/// or more documents. A document is a **raw word stream**: one entry per
/// line of the underlying text, with whitespace and empty lines left intact.
/// Trimming and empty-line filtering happen downstream in the bag-of-words
/// encoder, so providers stay dumb about tokenization rules.
///
/// Implementations decide where documents live: [`DirCorpus`] reads a
/// directory tree, [`MemoryCorpus`] serves documents from memory for tests
/// and benchmarks.
pub trait Corpus {
    /// Returns the labels for which this corpus holds collections.
    ///
    /// The order is the provider's traversal order and is deterministic
    /// within a single run.
    fn labels(&self) -> Result<Vec<String>>;

    /// Returns every document stored under `label`, one raw word stream per
    /// document.
    ///
    /// A label with no collection yields an empty vector rather than an
    /// error; only an unreadable backing store fails.
    fn documents(&self, label: &str) -> Result<Vec<Vec<String>>>;
}

/// Reads one document file into its raw word stream (one entry per line).
///
/// The file must be valid UTF-8; anything else is a
/// [`VintageError::Decode`]. An unreadable path is a [`VintageError::Io`].
pub fn read_document(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).map_err(|e| VintageError::Io(format!("{}: {}", path.display(), e)))?;
    let text = String::from_utf8(bytes).map_err(|e| VintageError::Decode {
        path: path.display().to_string(),
        detail: e.to_string(),
    })?;
    Ok(text.lines().map(str::to_owned).collect())
}

/// A corpus backed by a directory tree.
///
/// Layout: the root directory contains one subdirectory per label, and each
/// subdirectory contains plain-text document files, one token per line,
/// UTF-8 encoded.
///
/// Directory entries are sorted by name so that traversal order is stable
/// within a run. A missing label subdirectory is treated as an empty
/// collection; a missing or unreadable *root* is an error.
#[derive(Debug, Clone)]
pub struct DirCorpus {
    root: PathBuf,
}

impl DirCorpus {
    /// Creates a corpus rooted at `root`. The directory is not touched
    /// until [`labels`](Corpus::labels) or [`documents`](Corpus::documents)
    /// is called.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the corpus root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>> {
        let entries =
            fs::read_dir(dir).map_err(|e| VintageError::Io(format!("{}: {}", dir.display(), e)))?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| VintageError::Io(format!("{}: {}", dir.display(), e)))?;
            paths.push(entry.path());
        }
        paths.sort();
        Ok(paths)
    }
}

impl Corpus for DirCorpus {
    fn labels(&self) -> Result<Vec<String>> {
        let mut labels = Vec::new();
        for path in Self::read_dir_sorted(&self.root)? {
            if !path.is_dir() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                labels.push(name.to_owned());
            }
        }
        Ok(labels)
    }

    fn documents(&self, label: &str) -> Result<Vec<Vec<String>>> {
        let dir = self.root.join(label);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut documents = Vec::new();
        for path in Self::read_dir_sorted(&dir)? {
            if path.is_file() {
                documents.push(read_document(&path)?);
            }
        }
        Ok(documents)
    }
}

/// An in-memory corpus.
///
/// Collections keep insertion order, so traversal order is fully
/// deterministic. Intended for tests, examples and benchmarks.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    collections: Vec<(String, Vec<Vec<String>>)>,
}

impl MemoryCorpus {
    /// Creates an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one document (given as its raw lines) to `label`'s
    /// collection, creating the collection on first use.
    pub fn add_document(&mut self, label: &str, lines: &[&str]) {
        let document: Vec<String> = lines.iter().map(|s| (*s).to_owned()).collect();
        match self.collections.iter_mut().find(|(l, _)| l == label) {
            Some((_, documents)) => documents.push(document),
            None => self.collections.push((label.to_owned(), vec![document])),
        }
    }

    /// Total number of documents across all labels.
    pub fn len(&self) -> usize {
        self.collections.iter().map(|(_, docs)| docs.len()).sum()
    }

    /// Returns `true` if the corpus holds no documents.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Corpus for MemoryCorpus {
    fn labels(&self) -> Result<Vec<String>> {
        Ok(self.collections.iter().map(|(l, _)| l.clone()).collect())
    }

    fn documents(&self, label: &str) -> Result<Vec<Vec<String>>> {
        Ok(self
            .collections
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, docs)| docs.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_memory_corpus_labels_keep_insertion_order() {
        let mut corpus = MemoryCorpus::new();
        corpus.add_document("2020", &["a"]);
        corpus.add_document("2016", &["b"]);
        corpus.add_document("2020", &["c"]);

        assert_eq!(corpus.labels().unwrap(), vec!["2020", "2016"]);
        assert_eq!(corpus.len(), 3);
    }

    #[test]
    fn test_memory_corpus_unknown_label_is_empty() {
        let mut corpus = MemoryCorpus::new();
        corpus.add_document("2016", &["a"]);

        assert!(corpus.documents("1999").unwrap().is_empty());
    }

    #[test]
    fn test_memory_corpus_preserves_raw_lines() {
        let mut corpus = MemoryCorpus::new();
        corpus.add_document("2016", &["  padded  ", "", "word"]);

        let docs = corpus.documents("2016").unwrap();
        assert_eq!(docs, vec![vec!["  padded  ", "", "word"]]);
    }

    #[test]
    fn test_dir_corpus_missing_root() {
        let corpus = DirCorpus::new("/definitely/not/a/real/corpus/root");
        let result = corpus.labels();
        assert!(matches!(result, Err(VintageError::Io(_))));
    }

    #[test]
    fn test_dir_corpus_reads_labels_and_documents() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir(root.join("2016")).unwrap();
        fs::create_dir(root.join("2020")).unwrap();
        fs::write(root.join("2016/a.txt"), "alpha\nbeta\n").unwrap();
        fs::write(root.join("2016/b.txt"), "gamma\n").unwrap();
        fs::write(root.join("2020/a.txt"), "delta\n").unwrap();
        // Stray file at the root must not show up as a label.
        fs::write(root.join("README"), "not a label").unwrap();

        let corpus = DirCorpus::new(root);
        assert_eq!(corpus.labels().unwrap(), vec!["2016", "2020"]);

        let docs = corpus.documents("2016").unwrap();
        assert_eq!(docs, vec![vec!["alpha", "beta"], vec!["gamma"]]);
    }

    #[test]
    fn test_dir_corpus_missing_label_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("2016")).unwrap();

        let corpus = DirCorpus::new(tmp.path());
        assert!(corpus.documents("2020").unwrap().is_empty());
    }

    #[test]
    fn test_read_document_rejects_invalid_utf8() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("doc.txt");
        fs::write(&path, [0xC3, 0x28, 0xA0]).unwrap();

        let result = read_document(&path);
        assert!(matches!(result, Err(VintageError::Decode { .. })));
    }

    #[test]
    fn test_read_document_missing_file() {
        let result = read_document("/no/such/file.txt");
        assert!(matches!(result, Err(VintageError::Io(_))));
    }
}
