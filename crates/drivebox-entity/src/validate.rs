//! Display-name validation shared by folders and files.
//!
//! Names are trimmed before validation; the trimmed form is what gets
//! persisted.

use drivebox_core::{AppError, AppResult};

/// Characters that may not appear in folder or file names.
pub const FORBIDDEN_NAME_CHARS: &str = "<>:\"/\\|?*";

/// Maximum folder name length in characters.
pub const MAX_FOLDER_NAME_CHARS: usize = 100;

/// Maximum file name length in characters.
pub const MAX_FILE_NAME_CHARS: usize = 255;

/// Validate a folder name and return its trimmed form.
pub fn validate_folder_name(name: &str) -> AppResult<String> {
    validate_name(name, MAX_FOLDER_NAME_CHARS, "Folder")
}

/// Validate a file name and return its trimmed form.
pub fn validate_file_name(name: &str) -> AppResult<String> {
    validate_name(name, MAX_FILE_NAME_CHARS, "File")
}

fn validate_name(name: &str, max_chars: usize, what: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{what} name cannot be empty")));
    }
    if trimmed.chars().count() > max_chars {
        return Err(AppError::validation(format!(
            "{what} name exceeds {max_chars} characters"
        )));
    }
    if trimmed.chars().any(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        return Err(AppError::validation(format!(
            "{what} name contains forbidden characters: {FORBIDDEN_NAME_CHARS}"
        )));
    }
    Ok(trimmed.to_string())
}
