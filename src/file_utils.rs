use anyhow::{Result, Context, anyhow};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent().filter(|p| !p.as_os_str().is_empty()) {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Read everything from a reader, typically stdin
    pub fn read_all<R: Read>(mut reader: R) -> Result<String> {
        let mut content = String::new();
        reader.read_to_string(&mut content)
            .context("Failed to read input")?;
        Ok(content)
    }
}

/// Where the text to process comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Text given on the command line
    Inline(String),
    /// UTF-8 text file
    File(PathBuf),
    /// Standard input
    Stdin,
}

impl InputSource {
    /// Pick the source: a file wins over inline text, stdin is the fallback
    pub fn from_args(text: Option<String>, file: Option<PathBuf>) -> Self {
        match (file, text) {
            (Some(path), _) => Self::File(path),
            (None, Some(text)) => Self::Inline(text),
            (None, None) => Self::Stdin,
        }
    }

    /// Load the text; empty or whitespace-only input is an error
    pub fn load(&self) -> Result<String> {
        let text = match self {
            Self::Inline(text) => text.clone(),
            Self::File(path) => {
                if !FileManager::file_exists(path) {
                    return Err(anyhow!("Input file does not exist: {:?}", path));
                }
                FileManager::read_to_string(path)?
            }
            Self::Stdin => FileManager::read_all(std::io::stdin().lock())?,
        };

        if text.trim().is_empty() {
            return Err(anyhow!("No input text provided"));
        }

        Ok(text)
    }
}
