//! Loading configurations from XML documents.
//!
//! The document root must be `<rds>`. Inside it, `<group type="0A"/>`
//! activates a group slot and `<field name="PS">RUSTY FM</field>` sets a
//! field. Field text is used verbatim, so leading and trailing spaces are
//! significant.
//!
//! ```xml
//! <rds>
//!   <group type="0A"/>
//!   <group type="2A"/>
//!   <field name="PI">54A8</field>
//!   <field name="PS">RUSTY FM</field>
//!   <field name="RadioText">Hello from the encoder</field>
//! </rds>
//! ```

use super::LoadedConfig;
use super::builder::ConfigurationBuilder;
use super::error::{ConfigError, ParseError};
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Error as XmlError, Reader};
use std::path::Path;
use tracing::{debug, warn};

/// Reads and parses the configuration document at `path`.
pub fn load_config(path: impl AsRef<Path>) -> Result<LoadedConfig, ParseError> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let xml = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config_str(&xml)
}

/// Field element whose text is being collected.
struct FieldCapture {
    name: String,
    value: String,
    depth: usize,
}

/// Accumulates the configuration and diagnostics while walking the document.
struct Loader {
    builder: ConfigurationBuilder,
    diagnostics: Vec<ConfigError>,
}

impl Loader {
    fn report(&mut self, err: ConfigError) {
        warn!("{err}");
        self.diagnostics.push(err);
    }

    fn finish_field(&mut self, field: FieldCapture) {
        if let Err(err) = self.builder.apply_field(&field.name, &field.value) {
            self.report(err);
        }
    }

    fn group(&mut self, element: &BytesStart) -> Result<(), ParseError> {
        match attribute(element, "type")? {
            Some(token) => {
                if let Err(err) = self.builder.activate(&token) {
                    self.report(err);
                }
            }
            None => self.report(ConfigError::MissingAttribute {
                element: "group",
                attribute: "type",
            }),
        }
        Ok(())
    }
}

/// Parses a configuration document held in memory.
///
/// # Errors
///
/// Fails only for documents that cannot be used at all: malformed XML, a
/// missing root, or a root other than `rds`. Rejected values are returned
/// in [`LoadedConfig::diagnostics`].
pub fn parse_config_str(xml: &str) -> Result<LoadedConfig, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut loader = Loader {
        builder: ConfigurationBuilder::new(),
        diagnostics: Vec::new(),
    };

    let mut root_seen = false;
    let mut depth = 0usize;
    let mut capture: Option<FieldCapture> = None;
    // Depth of an element whose children are not configuration nodes.
    let mut skip_until: Option<usize> = None;

    loop {
        let event = reader.read_event()?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

                if !root_seen {
                    if name != "rds" {
                        return Err(ParseError::InvalidRoot(name));
                    }
                    root_seen = true;
                    if is_empty {
                        break;
                    }
                    depth += 1;
                    continue;
                }

                if !is_empty {
                    depth += 1;
                }
                if capture.is_some() || skip_until.is_some() {
                    continue;
                }

                match name.as_str() {
                    "rds" => {}
                    "group" => {
                        loader.group(e)?;
                        if !is_empty {
                            skip_until = Some(depth);
                        }
                    }
                    "field" => match attribute(e, "name")? {
                        Some(field_name) => {
                            let field = FieldCapture {
                                name: field_name,
                                value: String::new(),
                                depth,
                            };
                            if is_empty {
                                loader.finish_field(field);
                            } else {
                                capture = Some(field);
                            }
                        }
                        None => {
                            loader.report(ConfigError::MissingAttribute {
                                element: "field",
                                attribute: "name",
                            });
                            if !is_empty {
                                skip_until = Some(depth);
                            }
                        }
                    },
                    _ => {
                        loader.report(ConfigError::UnknownElement(name));
                        if !is_empty {
                            skip_until = Some(depth);
                        }
                    }
                }
            }
            Event::Text(e) => {
                if let Some(field) = capture.as_mut() {
                    let text = e.decode().map_err(XmlError::Encoding)?;
                    field.value.push_str(&text);
                }
            }
            Event::CData(e) => {
                if let Some(field) = capture.as_mut() {
                    let text = e.decode().map_err(XmlError::Encoding)?;
                    field.value.push_str(&text);
                }
            }
            Event::GeneralRef(e) => {
                if let Some(field) = capture.as_mut() {
                    if let Some(ch) = e.resolve_char_ref()? {
                        field.value.push(ch);
                    } else {
                        let entity = e.decode().map_err(XmlError::Encoding)?;
                        match resolve_predefined_entity(&entity) {
                            Some(text) => field.value.push_str(text),
                            None => {
                                field.value.push('&');
                                field.value.push_str(&entity);
                                field.value.push(';');
                            }
                        }
                    }
                }
            }
            Event::End(_) => {
                if let Some(field) = capture.take_if(|field| field.depth == depth) {
                    loader.finish_field(field);
                }
                if skip_until == Some(depth) {
                    skip_until = None;
                }
                depth = depth.saturating_sub(1);
                if root_seen && depth == 0 {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !root_seen {
        return Err(ParseError::MissingRoot);
    }

    debug!(
        "Configuration loaded with {} diagnostic(s)",
        loader.diagnostics.len()
    );
    Ok(LoadedConfig {
        configuration: loader.builder.build(),
        diagnostics: loader.diagnostics,
    })
}

fn attribute(element: &BytesStart, key: &str) -> Result<Option<String>, ParseError> {
    let attr = element
        .try_get_attribute(key)
        .map_err(XmlError::InvalidAttr)?;
    Ok(attr.map(|a| String::from_utf8_lossy(&a.value).into_owned()))
}
