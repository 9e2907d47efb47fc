//! Local file dataset source.

use crate::DatasetSource;
use lookup_core::LoadError;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for FileSource {
    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        tracing::debug!(path = %self.path.display(), "read dataset");
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| LoadError::Io(format!("{}: {e}", self.path.display())))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load;
    use lookup_core::RosterEntry;
    use std::io::Write;

    #[tokio::test]
    async fn loads_records_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"姓名":"张三","值日时间":"星期一"}}]"#).unwrap();

        let records: Vec<RosterEntry> = load(&FileSource::new(file.path())).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "张三");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = FileSource::new("/nonexistent/students.json").fetch().await.unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[tokio::test]
    async fn object_payload_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"students":[]}}"#).unwrap();

        let err = load::<RosterEntry, _>(&FileSource::new(file.path())).await.unwrap_err();
        assert_eq!(err, LoadError::NotArray);
    }
}
