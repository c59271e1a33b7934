//! `meta` subcommand.

use std::path::Path;

use pagesnap_core::{ElementMeta, MetaAggregator};
use serde_json::Value;

use crate::cmd_render::to_json;

/// Print the palette of a saved document or element map.
pub(crate) fn handle_meta(file: &Path, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let meta = aggregate_file(file)?;
    println!("{}", to_json(&meta, pretty)?);
    Ok(())
}

fn aggregate_file(file: &Path) -> Result<ElementMeta, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
    let value: Value = serde_json::from_str(&content)?;
    Ok(MetaAggregator::aggregate_json(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_aggregate_nested_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"links": [[{{"styles": {{"color": "red", "background": "blue none repeat", "font-family": "Arial"}}}}]],
                "buttons": [{{"styles": {{"color": "red"}}}}]}}"#
        )
        .unwrap();

        let meta = aggregate_file(file.path()).unwrap();
        assert_eq!(meta.colors.fg.len(), 1);
        assert!(meta.colors.bg.contains("blue"));
        assert!(meta.fonts.contains("Arial"));
    }

    #[test]
    fn test_missing_file() {
        let err = aggregate_file(Path::new("/nonexistent/doc.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/doc.json"));
    }

    #[test]
    fn test_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(aggregate_file(file.path()).is_err());
    }
}
