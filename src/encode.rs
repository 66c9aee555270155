//! Snapshot file naming.
//!
//! Every branch directory is flat: a tracked file `config/db.json` is stored
//! as `db.json-<base58("config")>` so arbitrarily nested paths never need a
//! mirrored directory tree. Files at the repository root keep their name.
//!
//! The name is never decoded back into a path.

/// Maps a tracked logical path to its snapshot file name.
pub trait PathEncoder {
    /// Encode `logical` (a `/`-separated path relative to the repository root).
    ///
    /// Must be pure and deterministic.
    fn encode(&self, logical: &str) -> String;
}

/// The default encoder: `<base>-<base58(dir)>` for nested paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Base58Encoder;

impl PathEncoder for Base58Encoder {
    fn encode(&self, logical: &str) -> String {
        match logical.rsplit_once('/') {
            None => logical.to_owned(),
            Some((dir, base)) => {
                // A leading separator means the directory part is the root itself.
                let dir = if dir.is_empty() { "/" } else { dir };
                format!("{base}-{}", bs58::encode(dir.as_bytes()).into_string())
            }
        }
    }
}

/// Encode with the default [`Base58Encoder`].
#[must_use]
pub fn encode(logical: &str) -> String {
    Base58Encoder.encode(logical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_path_is_unchanged() {
        assert_eq!(encode(".env"), ".env");
        assert_eq!(encode("settings.local.json"), "settings.local.json");
    }

    #[test]
    fn nested_path_appends_base58_of_dir() {
        assert_eq!(encode("config/db.json"), "db.json-rWvNLsFC");
        assert_eq!(encode("src/app/.env"), ".env-5NkDs1hnTy");
    }

    #[test]
    fn only_the_last_separator_splits() {
        // dir is "a/b", encoded as a whole.
        assert_eq!(encode("a/b/c.txt"), "c.txt-ZeKT");
    }

    #[test]
    fn distinct_dirs_give_distinct_names() {
        assert_ne!(encode("a/.env"), encode("b/.env"));
        assert_ne!(encode("a/.env"), encode(".env"));
    }

    #[test]
    fn relative_dot_dir() {
        assert_eq!(encode("./x"), "x-o");
    }

    #[test]
    fn encoder_is_usable_as_trait_object() {
        let enc: &dyn PathEncoder = &Base58Encoder;
        assert_eq!(enc.encode("config/db.json"), encode("config/db.json"));
    }
}
