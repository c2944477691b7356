//! Output locations for diagrams written during one run.

use crate::config::OutputConfig;
use std::path::{Path, PathBuf};

/// Directory that diagrams of the current run are written to.
#[derive(Debug, Clone)]
pub struct Session {
    dir: PathBuf,
}

impl Session {
    /// Starts a session under the configured output directory.
    ///
    /// The directory itself is created by the renderer on first use.
    pub fn start(config: &OutputConfig) -> Self {
        let dir = if config.sessions {
            let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            config.dir.join(format!("session_{}", stamp))
        } else {
            config.dir.clone()
        };

        tracing::debug!("session directory: {}", dir.display());
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stem for the full structure diagram.
    pub fn structure_stem(&self) -> PathBuf {
        self.dir.join("dfa_diagram")
    }

    /// Stem for the diagram of one input's trace.
    pub fn trace_stem(&self, input: &str) -> PathBuf {
        self.dir.join(format!("trace_{}", safe_name(input)))
    }
}

/// Replaces every non-alphanumeric character so the input can name a file.
pub fn safe_name(input: &str) -> String {
    if input.is_empty() {
        return "empty".to_string();
    }
    input
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_name() {
        assert_eq!(safe_name("0110"), "0110");
        assert_eq!(safe_name("a.b/c d"), "a_b_c_d");
        assert_eq!(safe_name(""), "empty");
    }

    #[test]
    fn test_session_paths() {
        let config = OutputConfig {
            dir: PathBuf::from("out"),
            sessions: false,
            ..OutputConfig::default()
        };
        let session = Session::start(&config);
        assert_eq!(session.dir(), Path::new("out"));
        assert_eq!(session.structure_stem(), PathBuf::from("out/dfa_diagram"));
        assert_eq!(session.trace_stem("1+1"), PathBuf::from("out/trace_1_1"));
    }

    #[test]
    fn test_session_subdirectory() {
        let config = OutputConfig {
            dir: PathBuf::from("out"),
            sessions: true,
            ..OutputConfig::default()
        };
        let session = Session::start(&config);
        let name = session.dir().file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("session_"));
        assert_eq!(name.len(), "session_".len() + 15);
    }
}
