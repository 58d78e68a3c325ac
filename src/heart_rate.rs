/// Heart-rate extraction.
///
/// The `gpx` crate skips `<extensions>`, so heart rate is read in a second
/// pass over the raw document: every Garmin `TrackPointExtension/v1` `hr`
/// element, in document order.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use xml::reader::{EventReader, XmlEvent};

use crate::constants::{HEART_RATE_ELEMENT, TRACKPOINT_EXTENSION_NS};
use crate::error::Result;

pub fn read_heart_rates(path: &Path) -> Result<Vec<Option<String>>> {
    let file = File::open(path)?;
    extract_heart_rates(BufReader::new(file))
}

/// Text of each heart-rate element, `None` for empty elements.
pub fn extract_heart_rates<R: Read>(reader: R) -> Result<Vec<Option<String>>> {
    let mut values = Vec::new();
    // Text collected for the innermost open `hr` element, until its first child.
    let mut current: Option<String> = None;
    let mut depth_in_hr = 0usize;

    for event in EventReader::new(reader) {
        match event? {
            XmlEvent::StartElement { name, .. } => {
                if depth_in_hr > 0 {
                    depth_in_hr += 1;
                } else if name.local_name == HEART_RATE_ELEMENT
                    && name.namespace.as_deref() == Some(TRACKPOINT_EXTENSION_NS)
                {
                    depth_in_hr = 1;
                    current = Some(String::new());
                }
            }
            XmlEvent::Characters(text) | XmlEvent::CData(text) | XmlEvent::Whitespace(text) => {
                if depth_in_hr == 1 {
                    if let Some(buffer) = current.as_mut() {
                        buffer.push_str(&text);
                    }
                }
            }
            XmlEvent::EndElement { .. } if depth_in_hr > 0 => {
                if depth_in_hr == 1 {
                    let text = current.take().filter(|t| !t.is_empty());
                    values.push(text);
                }
                depth_in_hr -= 1;
            }
            _ => {}
        }
    }

    Ok(values)
}
