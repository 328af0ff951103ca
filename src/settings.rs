//! Settings documents.
//!
//! XML documents (any file without a TOML, JSON, YAML, INI or RON
//! extension) are walked element by element: any `height` or `width`
//! element outside a `column` sets the page size, and every `column`
//! element contributes its `title` and `width` children. Section names
//! around them do not matter. Other formats go through the `config` crate
//! and use the same names: `height`, `width` and a `column` list.

use crate::config::{ConfigError, FioWidthPolicy, RawSettings};
use crate::model::Column;
use config::{Config as ConfigCrate, File};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct FileSettings {
    width: Option<usize>,
    height: Option<usize>,
    column: Vec<ColumnSetting>,
    fio_width_policy: Option<FioWidthPolicy>,
}

#[derive(Deserialize, Debug, Clone)]
struct ColumnSetting {
    title: String,
    width: usize,
}

#[derive(Debug, Default)]
struct PendingColumn {
    title: Option<String>,
    width: Option<usize>,
}

// Extensions handed to the `config` crate, everything else is read as XML.
const STRUCTURED_EXTENSIONS: &[&str] = &["toml", "json", "json5", "yaml", "yml", "ini", "ron"];

/// Reads a settings document. Files with a `config` crate extension go
/// through that crate, any other path is parsed as XML.
pub fn load_settings(path: &Path) -> Result<RawSettings, ConfigError> {
    let is_structured = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            STRUCTURED_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        });

    let raw = if is_structured {
        load_structured_settings(path)?
    } else {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_xml_settings(&content)?
    };

    debug!(path = %path.display(), "settings loaded");
    Ok(raw)
}

fn load_structured_settings(path: &Path) -> Result<RawSettings, ConfigError> {
    let file: FileSettings = ConfigCrate::builder()
        .add_source(File::from(path.to_path_buf()).required(true))
        .build()?
        .try_deserialize()?;

    let mut raw = RawSettings {
        page_width: file.width,
        page_height: file.height,
        fio_width_policy: file.fio_width_policy.unwrap_or_default(),
        ..RawSettings::default()
    };
    for column in file.column {
        apply_column(&mut raw, &column.title, column.width);
    }
    Ok(raw)
}

/// Parses an XML settings document.
pub fn parse_xml_settings(content: &str) -> Result<RawSettings, ConfigError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut raw = RawSettings::default();
    let mut path: Vec<String> = Vec::new();
    let mut column = PendingColumn::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) => {
                let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
                if name == "column" {
                    column = PendingColumn::default();
                }
                path.push(name);
            }
            Ok(Event::End(_)) => {
                if path.pop().as_deref() == Some("column") {
                    finish_column(&mut raw, std::mem::take(&mut column))?;
                }
            }
            Ok(Event::Text(text)) => {
                let value = text.unescape().map_err(|err| {
                    ConfigError::Malformed(format!(
                        "at byte {}: {err}",
                        reader.buffer_position()
                    ))
                })?;
                apply_text(&path, &value, &mut raw, &mut column)?;
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(ConfigError::Malformed(format!(
                    "at byte {}: {err}",
                    reader.buffer_position()
                )))
            }
            Ok(_) => {}
        }
    }

    if !path.is_empty() {
        return Err(ConfigError::Malformed(format!(
            "unclosed element <{}>",
            path.join("><")
        )));
    }
    Ok(raw)
}

fn apply_text(
    path: &[String],
    value: &str,
    raw: &mut RawSettings,
    column: &mut PendingColumn,
) -> Result<(), ConfigError> {
    let names: Vec<&str> = path.iter().map(String::as_str).collect();
    match names.as_slice() {
        [.., "column", "title"] => column.title = Some(value.trim().to_string()),
        [.., "column", "width"] => column.width = Some(parse_number("column width", value)?),
        [.., "height"] => raw.page_height = Some(parse_number("height", value)?),
        [.., "width"] => raw.page_width = Some(parse_number("width", value)?),
        _ => {}
    }
    Ok(())
}

fn finish_column(raw: &mut RawSettings, column: PendingColumn) -> Result<(), ConfigError> {
    match column {
        PendingColumn {
            title: Some(title),
            width: Some(width),
        } => {
            apply_column(raw, &title, width);
            Ok(())
        }
        PendingColumn { title: None, .. } => Err(ConfigError::Malformed(
            "column without a title".to_string(),
        )),
        PendingColumn { width: None, .. } => Err(ConfigError::Malformed(
            "column without a width".to_string(),
        )),
    }
}

fn apply_column(raw: &mut RawSettings, title: &str, width: usize) {
    match Column::from_title(title) {
        Some(column) => raw.set_column_width(column, width),
        None => warn!(title, "ignoring column with unknown title"),
    }
}

fn parse_number(name: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|_| {
        ConfigError::Malformed(format!(
            "{name} must be a non-negative integer, got {value:?}"
        ))
    })
}
