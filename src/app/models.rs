use anyhow::{bail, Result};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub base: PathBuf,
    pub targets: Vec<String>,
    pub output: PathBuf,
    pub encoding: TextEncoding,
}

/// Encoding used both to decode source files and to write the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum TextEncoding {
    #[default]
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    #[serde(rename = "latin-1", alias = "latin1", alias = "iso-8859-1")]
    Latin1,
}

impl TextEncoding {
    pub fn decode(self, bytes: Vec<u8>) -> Result<String> {
        match self {
            TextEncoding::Utf8 => Ok(String::from_utf8(bytes)?),
            TextEncoding::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }

    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c)).map_err(|_| {
                        anyhow::anyhow!("character {:?} cannot be encoded as latin-1", c)
                    })
                })
                .collect(),
        }
    }
}

impl FromStr for TextEncoding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(TextEncoding::Latin1),
            other => bail!("unsupported encoding: {}", other),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => f.write_str("utf-8"),
            TextEncoding::Latin1 => f.write_str("latin-1"),
        }
    }
}

/// One line of the structure report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureLine {
    pub name: String,
    pub depth: usize,
    pub is_dir: bool,
}

/// A file's header path plus either its text or the reason it could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub relative_path: String,
    pub body: Result<String, String>,
}

/// Everything collected during a single scan.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub structure: Vec<StructureLine>,
    pub content: Vec<ContentBlock>,
    /// Targets that were not existing directories, in configured order.
    pub skipped: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_encoding_names() {
        assert_eq!("UTF-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert_eq!("latin1".parse::<TextEncoding>().unwrap(), TextEncoding::Latin1);
        assert!("utf-16".parse::<TextEncoding>().is_err());
    }

    #[test]
    fn strict_utf8_rejects_invalid_bytes() {
        assert!(TextEncoding::Utf8.decode(vec![0xff, 0xfe]).is_err());
        assert_eq!(TextEncoding::Latin1.decode(vec![0x63, 0xe9]).unwrap(), "cé");
    }

    #[test]
    fn latin1_refuses_wide_characters() {
        assert_eq!(TextEncoding::Latin1.encode("cé").unwrap(), vec![0x63, 0xe9]);
        assert!(TextEncoding::Latin1.encode("日本").is_err());
    }
}
