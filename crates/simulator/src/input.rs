//! Scenario path resolution and loading.

use crate::{InputSource, SimulatorError};
use alertsim_scenario::Scenario;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve the scenario path, reading one line from `prompt` if needed.
///
/// Fails with [`SimulatorError::FileNotFound`] unless the path names an
/// existing file.
pub fn resolve_path(
    source: &InputSource,
    prompt: &mut impl BufRead,
) -> Result<PathBuf, SimulatorError> {
    let path = match source {
        InputSource::Path(path) => path.clone(),
        InputSource::Prompt => {
            let mut line = String::new();
            prompt.read_line(&mut line)?;
            PathBuf::from(line.trim())
        }
    };

    if !path.is_file() {
        return Err(SimulatorError::FileNotFound(path));
    }
    debug!(path = %path.display(), "Resolved scenario path");
    Ok(path)
}

/// Load and parse the scenario at `path`.
pub fn load_scenario(path: &Path) -> Result<Scenario, SimulatorError> {
    Ok(Scenario::from_path(path)?)
}
