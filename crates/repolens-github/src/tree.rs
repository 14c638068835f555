//! File-tree filtering.
//!
//! Reduces a recursive git tree to the entries worth showing a model:
//! directories for structure, source files and well-known project files.
//! Dependency, build output and editor directories, lock files and binary
//! or media files are dropped.

use serde::Deserialize;

use repolens_core::defaults::TREE_MAX_ENTRIES;

/// Directories excluded at the repository root.
const IGNORED_ROOT_DIRS: &[&str] = &[
    "node_modules/",
    ".git/",
    "dist/",
    "build/",
    "out/",
    ".next/",
    ".nuxt/",
    "vendor/",
    "__pycache__/",
    ".cache/",
    "coverage/",
    ".vscode/",
    ".idea/",
];

/// Directories excluded at any depth.
const IGNORED_NESTED_DIRS: &[&str] = &["/node_modules/", "/dist/", "/.git/"];

const IGNORED_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "composer.lock",
    "Gemfile.lock",
    "Cargo.lock",
    ".DS_Store",
    "Thumbs.db",
];

const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "ico", "webp", "bmp", "mp3", "mp4", "wav", "avi", "mov",
    "zip", "tar", "gz", "rar", "7z", "pdf", "ttf", "woff", "woff2", "eot", "otf",
];

const CODE_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "mjs", "cjs", "py", "pyw", "java", "kt", "kts", "go", "rs", "rb",
    "php", "c", "h", "cpp", "hpp", "cc", "cs", "swift", "dart", "vue", "svelte", "astro", "html",
    "css", "scss", "sass", "less", "sql", "sh", "bash", "zsh", "lua", "r", "jl", "ex", "exs",
    "erl", "json", "yaml", "yml", "toml", "graphql", "gql", "proto",
];

/// Files kept even without a code extension.
const IMPORTANT_FILES: &[&str] = &[
    "Dockerfile",
    "docker-compose.yml",
    "docker-compose.yaml",
    "Makefile",
    "CMakeLists.txt",
    "Cargo.toml",
    "go.mod",
    "package.json",
    "tsconfig.json",
    "vite.config.js",
    "vite.config.ts",
    "next.config.js",
    "next.config.mjs",
    "tailwind.config.js",
    ".eslintrc.js",
    ".eslintrc.json",
    "eslint.config.js",
    ".prettierrc",
    ".gitignore",
    "requirements.txt",
    "setup.py",
    "pyproject.toml",
    "Gemfile",
    "build.gradle",
    "pom.xml",
];

/// One entry of a recursive git tree listing.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl TreeEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == "tree"
    }

    fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    fn extension(&self) -> Option<String> {
        let name = self.file_name();
        name.rfind('.')
            .map(|idx| name[idx + 1..].to_ascii_lowercase())
    }
}

/// Whether an entry belongs in the tree excerpt.
pub fn keep(entry: &TreeEntry) -> bool {
    let path = entry.path.as_str();
    if IGNORED_ROOT_DIRS.iter().any(|d| path.starts_with(d))
        || IGNORED_NESTED_DIRS.iter().any(|d| path.contains(d))
    {
        return false;
    }

    let name = entry.file_name();
    if IGNORED_FILES.contains(&name) {
        return false;
    }

    let extension = entry.extension();
    if let Some(ext) = extension.as_deref() {
        if BINARY_EXTENSIONS.contains(&ext) {
            return false;
        }
    }

    if entry.is_dir() {
        return true;
    }

    extension
        .as_deref()
        .map_or(false, |ext| CODE_EXTENSIONS.contains(&ext))
        || IMPORTANT_FILES.contains(&name)
}

/// Render kept entries as `📁 path` / `📄 path` lines, bounded.
pub fn render(entries: &[TreeEntry]) -> String {
    entries
        .iter()
        .filter(|e| keep(e))
        .take(TREE_MAX_ENTRIES)
        .map(|e| format!("{} {}", if e.is_dir() { "📁" } else { "📄" }, e.path))
        .collect::<Vec<_>>()
        .join("\n")
}
