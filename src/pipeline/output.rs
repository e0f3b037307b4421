// src/pipeline/output.rs

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::fs::FileSystem;
use crate::pipeline::compile::CssArtifact;

/// What happened to the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Written,
    /// The file already held these exact bytes.
    Unchanged,
}

/// Write `artifact` to `path` unless it already holds identical content.
pub fn write_artifact(artifact: &CssArtifact, path: &Path, fs: &dyn FileSystem) -> Result<WriteStatus> {
    if fs.is_file(path) {
        if let Ok(existing) = fs.read(path) {
            if blake3::hash(&existing).to_hex().as_str() == artifact.digest {
                debug!(?path, "output already up to date");
                return Ok(WriteStatus::Unchanged);
            }
        }
    }

    fs.write(path, artifact.code.as_bytes())?;
    Ok(WriteStatus::Written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn second_identical_write_is_skipped() {
        let fs = MockFileSystem::new();
        let path = Path::new("public/css/bundle.css");
        let artifact = CssArtifact::new(".a{color:red}".to_string());

        assert_eq!(write_artifact(&artifact, path, &fs).unwrap(), WriteStatus::Written);
        assert_eq!(write_artifact(&artifact, path, &fs).unwrap(), WriteStatus::Unchanged);
        assert_eq!(fs.writes(), 1);

        let changed = CssArtifact::new(".a{color:blue}".to_string());
        assert_eq!(write_artifact(&changed, path, &fs).unwrap(), WriteStatus::Written);
        assert_eq!(fs.read_to_string(path).unwrap(), ".a{color:blue}");
    }
}
