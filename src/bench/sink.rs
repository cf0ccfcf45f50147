//! Destinations for response records.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::{BenchError, ResponseRecord};

use super::runner::BatchReport;

/// Create `folder` if needed and write `content` as the whole file body.
pub fn write_file(
    folder: impl AsRef<Path>,
    filename: &str,
    content: &str,
) -> Result<PathBuf, BenchError> {
    let folder = folder.as_ref();
    std::fs::create_dir_all(folder).map_err(|e| BenchError::filesystem(folder, e))?;

    let path = folder.join(filename);
    std::fs::write(&path, content).map_err(|e| BenchError::filesystem(&path, e))?;

    debug!(path = %path.display(), bytes = content.len(), "Wrote artifact");
    Ok(path)
}

pub trait RecordSink {
    /// Persist one record of the experiment category `category`.
    fn accept(&mut self, category: &str, record: &ResponseRecord) -> Result<(), BenchError>;

    /// Called once after the batch loop with the full report.
    fn finish(&mut self, _category: &str, _report: &BatchReport) -> Result<(), BenchError> {
        Ok(())
    }
}

/// File extension of response artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ArtifactExtension {
    #[default]
    Txt,
    Md,
}

impl ArtifactExtension {
    pub const ALL: [ArtifactExtension; 2] = [ArtifactExtension::Txt, ArtifactExtension::Md];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactExtension::Txt => "txt",
            ArtifactExtension::Md => "md",
        }
    }
}

/// Writes one text artifact per record under `<root>/<category>/`.
///
/// Each prompt owns exactly one artifact: writing a record removes whatever
/// the previous run left for the same prompt under another name.
#[derive(Debug, Clone)]
pub struct FileSink {
    root: PathBuf,
    extension: ArtifactExtension,
    write_summary: bool,
}

impl FileSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: ArtifactExtension::Txt,
            write_summary: true,
        }
    }

    pub fn with_extension(mut self, extension: ArtifactExtension) -> Self {
        self.extension = extension;
        self
    }

    pub fn with_summary(mut self, enabled: bool) -> Self {
        self.write_summary = enabled;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `response_<provider>_<n>.<ext>` for successes, `error_<provider>_<n>.txt`
    /// for failures.
    pub fn filename(&self, record: &ResponseRecord) -> String {
        let provider = record.provider.artifact_name();
        let n = record.prompt_index + 1;
        if record.is_success() {
            format!("response_{provider}_{n}.{}", self.extension.as_str())
        } else {
            format!("error_{provider}_{n}.txt")
        }
    }

    /// Every name an artifact for this record's prompt may have.
    fn artifact_names(record: &ResponseRecord) -> Vec<String> {
        let provider = record.provider.artifact_name();
        let n = record.prompt_index + 1;
        let mut names: Vec<String> = ArtifactExtension::ALL
            .iter()
            .map(|ext| format!("response_{provider}_{n}.{}", ext.as_str()))
            .collect();
        names.push(format!("error_{provider}_{n}.txt"));
        names
    }
}

fn remove_if_present(path: &Path) -> Result<(), BenchError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Removed stale artifact");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(BenchError::filesystem(path, e)),
    }
}

/// Artifact body: the answer followed by timing and token footer.
pub fn render(record: &ResponseRecord) -> String {
    let tokens = record
        .token_count
        .map(|t| t.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let body = match (&record.response_text, &record.error) {
        (_, Some(error)) => format!("Error: {error}"),
        (Some(text), None) => text.clone(),
        (None, None) => String::new(),
    };

    format!(
        "{body}\n\nTime taken: {} seconds\nTokens used: {tokens}",
        record.elapsed_seconds
    )
}

impl RecordSink for FileSink {
    fn accept(&mut self, category: &str, record: &ResponseRecord) -> Result<(), BenchError> {
        let folder = self.root.join(category);
        let filename = self.filename(record);
        write_file(&folder, &filename, &render(record))?;

        for stale in Self::artifact_names(record)
            .into_iter()
            .filter(|name| *name != filename)
        {
            remove_if_present(&folder.join(stale))?;
        }
        Ok(())
    }

    fn finish(&mut self, category: &str, report: &BatchReport) -> Result<(), BenchError> {
        if !self.write_summary {
            return Ok(());
        }

        let summary = serde_json::to_string_pretty(report).map_err(|e| BenchError::Parse {
            message: "Failed to serialize batch summary".to_string(),
            source: Some(Box::new(e)),
        })?;
        write_file(
            self.root.join(category),
            &format!("summary_{}.json", report.provider.artifact_name()),
            &summary,
        )?;
        Ok(())
    }
}

/// Keeps every record in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<(String, ResponseRecord)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn accept(&mut self, category: &str, record: &ResponseRecord) -> Result<(), BenchError> {
        self.records.push((category.to_string(), record.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Provider;

    fn record(index: usize, text: Option<&str>, error: Option<&str>) -> ResponseRecord {
        ResponseRecord {
            prompt_index: index,
            provider: Provider::OpenAI,
            response_text: text.map(str::to_string),
            token_count: text.map(|_| 42),
            elapsed_seconds: 1.5,
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn write_file_creates_folder_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let folder = tmp.path().join("out/demo");

        let path = write_file(&folder, "result.txt", "hello").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");

        write_file(&folder, "result.txt", "bye").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "bye");
    }

    #[test]
    fn write_file_reports_path_on_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not_a_dir");
        std::fs::write(&blocker, "file").unwrap();

        let err = write_file(blocker.join("nested"), "x.txt", "x").unwrap_err();
        assert!(matches!(err, BenchError::Filesystem { .. }));
    }

    #[test]
    fn render_appends_timing_footer() {
        let rendered = render(&record(0, Some("fn main() {}"), None));
        assert_eq!(
            rendered,
            "fn main() {}\n\nTime taken: 1.5 seconds\nTokens used: 42"
        );
    }

    #[test]
    fn render_error_record() {
        let rendered = render(&record(0, None, Some("Provider error (status 401): nope")));
        assert!(rendered.starts_with("Error: Provider error (status 401): nope"));
        assert!(rendered.ends_with("Tokens used: unknown"));
    }

    #[test]
    fn filenames_are_index_suffixed() {
        let sink = FileSink::new("results").with_extension(ArtifactExtension::Md);
        assert_eq!(sink.filename(&record(0, Some("x"), None)), "response_chatgpt_1.md");
        assert_eq!(sink.filename(&record(5, None, Some("e"))), "error_chatgpt_6.txt");
    }

    #[test]
    fn file_sink_writes_under_category() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(tmp.path());

        sink.accept("code_generation", &record(1, Some("answer"), None))
            .unwrap();

        let written = tmp.path().join("code_generation/response_chatgpt_2.txt");
        assert!(std::fs::read_to_string(written).unwrap().starts_with("answer"));
    }

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn success_after_failure_replaces_error_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(tmp.path());

        sink.accept("demo", &record(0, None, Some("Provider error (status 500): boom")))
            .unwrap();
        sink.accept("demo", &record(0, Some("answer"), None)).unwrap();

        assert_eq!(listing(&tmp.path().join("demo")), vec!["response_chatgpt_1.txt"]);
    }

    #[test]
    fn failure_after_success_leaves_single_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(tmp.path());

        sink.accept("demo", &record(2, Some("answer"), None)).unwrap();
        sink.accept("demo", &record(2, None, Some("timeout"))).unwrap();

        assert_eq!(listing(&tmp.path().join("demo")), vec!["error_chatgpt_3.txt"]);
    }

    #[test]
    fn switching_extension_replaces_previous_response() {
        let tmp = tempfile::tempdir().unwrap();

        FileSink::new(tmp.path())
            .accept("demo", &record(0, Some("first"), None))
            .unwrap();
        FileSink::new(tmp.path())
            .with_extension(ArtifactExtension::Md)
            .accept("demo", &record(0, Some("second"), None))
            .unwrap();

        assert_eq!(listing(&tmp.path().join("demo")), vec!["response_chatgpt_1.md"]);
    }

    #[test]
    fn summary_can_be_disabled() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(tmp.path()).with_summary(false);
        let report = BatchReport {
            experiment: "demo".to_string(),
            provider: Provider::OpenAI,
            model: "gpt-4.1-mini".to_string(),
            records: vec![record(0, Some("x"), None)],
            sink_failures: Vec::new(),
            total_elapsed_seconds: 1.5,
        };

        sink.finish("demo", &report).unwrap();
        assert!(!tmp.path().join("demo").exists());

        FileSink::new(tmp.path()).finish("demo", &report).unwrap();
        assert!(tmp.path().join("demo/summary_chatgpt.json").is_file());
    }

    #[test]
    fn extension_values_are_closed() {
        use clap::ValueEnum;

        assert_eq!(
            ArtifactExtension::from_str("md", true).unwrap(),
            ArtifactExtension::Md
        );
        assert!(ArtifactExtension::from_str("../../escape", true).is_err());
    }
}
