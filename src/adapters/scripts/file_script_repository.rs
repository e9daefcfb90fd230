//! File Script Repository - Implementation of ScriptRepository.
//!
//! Scripts live in one directory, one file per script, named after the
//! script id:
//!
//! ```text
//! {base_path}/
//! ├── microsoft_support.json
//! └── bank_fraud.yaml
//! ```
//!
//! JSON is tried first, then `.yaml`, then `.yml`.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;

use crate::domain::scenario::Script;
use crate::ports::{ScriptError, ScriptRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

const EXTENSIONS: &[(&str, Format)] = &[
    ("json", Format::Json),
    ("yaml", Format::Yaml),
    ("yml", Format::Yaml),
];

#[derive(Debug, Clone)]
pub struct FileScriptRepository {
    base_path: PathBuf,
}

impl FileScriptRepository {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Ids are plain file stems; anything that could leave the directory is refused.
    fn is_valid_id(script_id: &str) -> bool {
        !script_id.is_empty()
            && script_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }

    fn parse(script_id: &str, content: &str, format: Format) -> Result<Script, ScriptError> {
        let script: Script = match format {
            Format::Json => {
                serde_json::from_str(content).map_err(|e| ScriptError::malformed(script_id, e))?
            }
            Format::Yaml => {
                serde_yaml::from_str(content).map_err(|e| ScriptError::malformed(script_id, e))?
            }
        };

        if script.script_id().as_str() != script_id {
            tracing::warn!(
                file = script_id,
                declared = %script.script_id(),
                "Script id does not match its file name"
            );
        }
        Ok(script)
    }
}

#[async_trait]
impl ScriptRepository for FileScriptRepository {
    async fn load(&self, script_id: &str) -> Result<Script, ScriptError> {
        if !Self::is_valid_id(script_id) {
            return Err(ScriptError::NotFound(script_id.to_string()));
        }

        for (extension, format) in EXTENSIONS {
            let path = self.base_path.join(format!("{}.{}", script_id, extension));
            match fs::read_to_string(&path).await {
                Ok(content) => {
                    let script = Self::parse(script_id, &content, *format)?;
                    tracing::info!(
                        script_id,
                        path = %path.display(),
                        stages = script.stages().len(),
                        "script loaded"
                    );
                    return Ok(script);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(source) => {
                    return Err(ScriptError::Io {
                        script_id: script_id.to_string(),
                        source,
                    })
                }
            }
        }

        Err(ScriptError::NotFound(script_id.to_string()))
    }

    async fn list(&self) -> Result<Vec<String>, ScriptError> {
        let mut entries = fs::read_dir(&self.base_path)
            .await
            .map_err(|source| ScriptError::Io {
                script_id: self.base_path.display().to_string(),
                source,
            })?;

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|source| ScriptError::Io {
            script_id: self.base_path.display().to_string(),
            source,
        })? {
            let path = entry.path();
            let known = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| EXTENSIONS.iter().any(|(ext, _)| *ext == e));
            if let (true, Some(stem)) = (known, path.file_stem().and_then(|s| s.to_str())) {
                ids.push(stem.to_string());
            }
        }

        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}
