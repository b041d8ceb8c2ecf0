//! The JSON line printed on stdout after a successful run

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// `{"targetDirectory": "..."}`, read by shell wrappers to `cd` into the
/// clone.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneReport<'a> {
    pub target_directory: &'a Path,
}

impl<'a> CloneReport<'a> {
    pub fn new(target_directory: &'a Path) -> Self {
        Self { target_directory }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_uses_camel_case_key() {
        let json = CloneReport::new(Path::new("/home/me/code/github.com/a/b")).to_json().unwrap();
        assert_eq!(json, r#"{"targetDirectory":"/home/me/code/github.com/a/b"}"#);
    }

    #[test]
    fn test_report_escapes_path() {
        let json = CloneReport::new(Path::new("dir with \"quotes\"")).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["targetDirectory"], "dir with \"quotes\"");
    }
}
