//! Where prompts come from: inline lists or index-suffixed text files
//! (`prompt1.txt`, `prompt2.txt`, ...).

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::{BenchError, Prompt};

#[derive(Debug, Clone)]
pub enum PromptSource {
    Inline(Vec<String>),
    /// Exactly `count` files `<dir>/<stem><n>.txt`, n starting at 1.
    IndexedFiles {
        dir: PathBuf,
        stem: String,
        count: usize,
    },
    /// `<dir>/<stem>1.txt`, `<stem>2.txt`, ... up to the first missing index.
    Discover { dir: PathBuf, stem: String },
}

/// Path of the `n`-th (1-based) prompt file.
pub fn indexed_path(dir: &Path, stem: &str, n: usize) -> PathBuf {
    dir.join(format!("{stem}{n}.txt"))
}

fn read_prompt(path: &Path) -> Result<String, BenchError> {
    std::fs::read_to_string(path).map_err(|e| BenchError::filesystem(path, e))
}

impl PromptSource {
    /// Load the prompts in order. An empty result is a configuration error.
    pub fn load(&self) -> Result<Vec<Prompt>, BenchError> {
        let texts = match self {
            PromptSource::Inline(texts) => texts.clone(),
            PromptSource::IndexedFiles { dir, stem, count } => (1..=*count)
                .map(|n| read_prompt(&indexed_path(dir, stem, n)))
                .collect::<Result<Vec<_>, _>>()?,
            PromptSource::Discover { dir, stem } => {
                let mut texts = Vec::new();
                loop {
                    let path = indexed_path(dir, stem, texts.len() + 1);
                    if !path.is_file() {
                        break;
                    }
                    texts.push(read_prompt(&path)?);
                }
                texts
            }
        };

        if texts.is_empty() {
            return Err(BenchError::Configuration(format!(
                "No prompts found in {}",
                self.describe()
            )));
        }

        debug!(count = texts.len(), source = %self.describe(), "Loaded prompts");
        Ok(Prompt::sequence(texts))
    }

    fn describe(&self) -> String {
        match self {
            PromptSource::Inline(_) => "inline list".to_string(),
            PromptSource::IndexedFiles { dir, stem, .. } | PromptSource::Discover { dir, stem } => {
                format!("{}/{stem}<n>.txt", dir.display())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_prompts(dir: &Path, texts: &[&str]) {
        for (i, text) in texts.iter().enumerate() {
            std::fs::write(indexed_path(dir, "prompt", i + 1), text).unwrap();
        }
    }

    #[test]
    fn indexed_files_load_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write_prompts(dir.path(), &["first", "second", "third"]);

        let prompts = PromptSource::IndexedFiles {
            dir: dir.path().to_path_buf(),
            stem: "prompt".to_string(),
            count: 3,
        }
        .load()
        .unwrap();

        let texts: Vec<&str> = prompts.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(prompts[2].index, 2);
    }

    #[test]
    fn indexed_files_fail_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        write_prompts(dir.path(), &["only one"]);

        let err = PromptSource::IndexedFiles {
            dir: dir.path().to_path_buf(),
            stem: "prompt".to_string(),
            count: 2,
        }
        .load()
        .unwrap_err();

        match err {
            BenchError::Filesystem { path, .. } => assert!(path.ends_with("prompt2.txt")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn discovery_stops_at_first_gap() {
        let dir = tempfile::tempdir().unwrap();
        write_prompts(dir.path(), &["a", "b"]);
        std::fs::write(indexed_path(dir.path(), "prompt", 4), "d").unwrap();

        let prompts = PromptSource::Discover {
            dir: dir.path().to_path_buf(),
            stem: "prompt".to_string(),
        }
        .load()
        .unwrap();

        assert_eq!(prompts.len(), 2);
    }

    #[test]
    fn empty_source_is_configuration_error() {
        let err = PromptSource::Inline(Vec::new()).load().unwrap_err();
        assert!(matches!(err, BenchError::Configuration(_)));
    }
}
