use std::{fs, path::PathBuf};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

/// Reuses the key persisted in `.secret_key`, or generates and stores a new
/// one, so tokens survive restarts in development without `SECRET_KEY`.
pub(super) fn load_or_create_secret_key() -> String {
    let path = secret_file_path();

    if let Some(existing) = read_secret(&path) {
        return existing;
    }

    let new_key = generate_secret_key();

    if let Some(parent) = path.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            tracing::warn!(
                error = %err,
                path = %parent.display(),
                "Failed to create secret key directory"
            );
        }
    }

    match fs::OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(mut file) => {
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;

                if let Err(err) = file.set_permissions(fs::Permissions::from_mode(0o600)) {
                    tracing::warn!(
                        error = %err,
                        path = %path.display(),
                        "Failed to set secret key file permissions"
                    );
                }
            }

            if let Err(err) = std::io::Write::write_all(&mut file, new_key.as_bytes()) {
                tracing::warn!(
                    error = %err,
                    path = %path.display(),
                    "Failed to write secret key file"
                );
            }
            return new_key;
        }
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            // Lost a race with another process; use whatever it wrote.
            if let Some(existing) = read_secret(&path) {
                return existing;
            }
        }
        Err(err) => {
            tracing::warn!(
                error = %err,
                path = %path.display(),
                "Failed to create secret key file"
            );
        }
    }

    new_key
}

fn read_secret(path: &PathBuf) -> Option<String> {
    let value = fs::read_to_string(path).ok()?;
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn generate_secret_key() -> String {
    let mut bytes = [0u8; 64];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn secret_file_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(".secret_key")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_are_url_safe_and_distinct() {
        let first = generate_secret_key();
        let second = generate_secret_key();
        assert_ne!(first, second);
        assert_eq!(first.len(), 86);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
