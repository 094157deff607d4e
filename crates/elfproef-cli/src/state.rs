use std::fs::{OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use elfproef_generate::SessionSnapshot;

use crate::{CliError, CliResult};

/// Reads saved numbers; a missing file is an empty session.
pub fn load_state(path: &Path) -> CliResult<SessionSnapshot> {
    if !path.exists() {
        return Ok(SessionSnapshot::default());
    }
    let content = std::fs::read(path)?;
    let snapshot = serde_json::from_slice(&content)?;
    Ok(snapshot)
}

/// Replaces the state file with `snapshot`.
///
/// The JSON is written to a hidden sibling file, synced, then renamed over
/// the state file, so a crash leaves either the old or the new session.
pub fn save_state(path: &Path, snapshot: &SessionSnapshot) -> CliResult<()> {
    let staging = staging_path(path)?;
    let data = serde_json::to_vec_pretty(snapshot)?;

    let parent = path.parent().filter(|dir| !dir.as_os_str().is_empty());
    if let Some(dir) = parent {
        create_dir_all(dir)?;
    }

    if let Err(err) = stage(&staging, &data) {
        let _ = std::fs::remove_file(&staging);
        return Err(err.into());
    }
    std::fs::rename(&staging, path)?;
    if let Some(dir) = parent {
        sync_dir(dir)?;
    }

    tracing::debug!(
        path = %path.display(),
        generated = snapshot.generated.len(),
        excluded = snapshot.excluded.len(),
        "session state saved"
    );
    Ok(())
}

fn stage(staging: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(staging)?;
    file.write_all(data)?;
    file.sync_all()
}

/// `dir/.state.json.<pid>.tmp` for `dir/state.json`.
fn staging_path(path: &Path) -> CliResult<PathBuf> {
    let Some(name) = path.file_name() else {
        return Err(CliError::InvalidStatePath(path.to_path_buf()));
    };
    let staging = format!(".{}.{}.tmp", name.to_string_lossy(), std::process::id());
    Ok(path.with_file_name(staging))
}
