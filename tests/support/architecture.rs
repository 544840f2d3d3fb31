use std::fs;
use std::path::{Path, PathBuf};

/// A source line that broke a layering rule.
#[derive(Debug)]
pub struct Offence {
    pub file: String,
    pub line_no: usize,
    pub text: String,
}

/// Every `.rs` file below a directory of the crate, read into memory once.
pub struct SourceTree {
    files: Vec<(String, String)>,
}

impl SourceTree {
    /// Load `dir`, given relative to the crate root.
    pub fn load(dir: &str) -> Self {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let mut pending = vec![root.join(dir)];
        let mut paths: Vec<PathBuf> = Vec::new();

        while let Some(next) = pending.pop() {
            let listing = fs::read_dir(&next)
                .unwrap_or_else(|e| panic!("cannot list {}: {e}", next.display()));
            for entry in listing.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                    paths.push(path);
                }
            }
        }
        paths.sort();

        let files = paths
            .into_iter()
            .map(|path| {
                let source = fs::read_to_string(&path)
                    .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
                let name = path
                    .strip_prefix(root)
                    .unwrap_or(&path)
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                (name, source)
            })
            .collect();

        Self { files }
    }

    /// Lines mentioning any of `needles`.
    pub fn mentions(&self, needles: &[&str]) -> Vec<Offence> {
        self.scan(|line| needles.iter().any(|n| line.contains(n)))
    }

    /// Lines in `mod.rs` files other than module declarations, `pub use`
    /// re-exports, `cfg` attributes, comments and blanks.
    pub fn mod_file_bodies(&self) -> Vec<Offence> {
        let mut offences = Vec::new();
        for (file, source) in self.files.iter().filter(|(f, _)| f.ends_with("/mod.rs")) {
            let mut open_use = false;
            for (idx, raw) in source.lines().enumerate() {
                let line = raw.trim();
                if open_use {
                    open_use = !line.ends_with("};");
                    continue;
                }
                if line.starts_with("pub use ") {
                    open_use = line.ends_with('{');
                    continue;
                }
                let allowed = ["//", "pub mod ", "mod ", "#[cfg"];
                if line.is_empty() || allowed.iter().any(|p| line.starts_with(p)) {
                    continue;
                }
                offences.push(Offence {
                    file: file.clone(),
                    line_no: idx + 1,
                    text: raw.to_string(),
                });
            }
        }
        offences
    }

    fn scan(&self, matches: impl Fn(&str) -> bool) -> Vec<Offence> {
        self.files
            .iter()
            .flat_map(|(file, source)| {
                source
                    .lines()
                    .enumerate()
                    .filter(|(_, line)| matches(*line))
                    .map(|(idx, line)| Offence {
                        file: file.clone(),
                        line_no: idx + 1,
                        text: line.to_string(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
