// crates/pledge-registry-store-sqlite/src/paths.rs
// ============================================================================
// Module: Store Path Helpers
// Description: Path limits and parent directory creation for on-disk stores.
// Purpose: Share fail-closed path handling between the database and ledger.
// Dependencies: std
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use crate::store::SqliteStoreError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the directory containing `path`, using `.` for bare file names.
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Ensures the parent directory for a store file exists.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    std::fs::create_dir_all(parent_dir(path)).map_err(|err| SqliteStoreError::Io(err.to_string()))
}

/// Validates store paths for safety limits.
pub(crate) fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    if path.as_os_str().is_empty() {
        return Err(SqliteStoreError::Invalid("store path must not be empty".to_string()));
    }
    let path_string = path.display().to_string();
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteStoreError::Invalid(
                "store path contains an overlong component".to_string(),
            ));
        }
    }
    if path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::parent_dir;
    use super::validate_store_path;

    #[test]
    fn bare_file_name_lives_in_current_dir() {
        assert_eq!(parent_dir(Path::new("pledges.db")), Path::new("."));
        assert_eq!(parent_dir(Path::new("database/pledges.db")), Path::new("database"));
    }

    #[test]
    fn rejects_empty_and_overlong_paths() {
        assert!(validate_store_path(Path::new("")).is_err());
        let long = "a".repeat(300);
        assert!(validate_store_path(Path::new(&long)).is_err());
        assert!(validate_store_path(Path::new("database/pledges.db")).is_ok());
    }
}
