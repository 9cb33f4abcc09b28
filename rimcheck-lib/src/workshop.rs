use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::CheckError;

/// Result of scanning a Workshop content directory.
#[derive(Debug, Clone, Default)]
pub struct WorkshopScan {
    /// packageId (lower-cased) → workshop id (the subdirectory name).
    pub mapping: BTreeMap<String, String>,
    /// Directories that did not contribute a mapping, with the reason why.
    pub skipped: Vec<SkippedDir>,
}

/// A workshop subdirectory that was skipped during the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDir {
    pub dir_name: String,
    pub reason: String,
}

/// Scan a Steam Workshop content directory and build the packageId →
/// workshop-id mapping.
///
/// Each immediate subdirectory name is a candidate workshop id; its
/// `About/About.xml` is parsed for the `<packageId>` element. Directories
/// without a readable manifest are skipped and reported in
/// [`WorkshopScan::skipped`] rather than failing the scan. An unreadable
/// root directory is fatal.
///
/// Subdirectories are visited in sorted order, so when two directories
/// declare the same packageId the lexicographically-smallest workshop id
/// wins and the scan result is independent of filesystem enumeration order.
pub fn scan_workshop_dir(dir: &Path) -> Result<WorkshopScan, CheckError> {
    let mut dir_names: Vec<String> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            dir_names.push(name.to_string());
        }
    }
    dir_names.sort();

    let mut scan = WorkshopScan::default();

    for dir_name in dir_names {
        let about_path = dir.join(&dir_name).join("About").join("About.xml");

        let file = match std::fs::File::open(&about_path) {
            Ok(f) => f,
            Err(e) => {
                skip(&mut scan, dir_name, format!("no readable About/About.xml: {e}"));
                continue;
            }
        };

        let package_id = match parse_about(std::io::BufReader::new(file)) {
            Ok(Some(id)) => id,
            Ok(None) => {
                skip(&mut scan, dir_name, "About.xml has no packageId".to_string());
                continue;
            }
            Err(e) => {
                skip(&mut scan, dir_name, format!("invalid About.xml: {e}"));
                continue;
            }
        };

        if let Some(kept) = scan.mapping.get(&package_id) {
            let reason = format!("duplicate packageId '{package_id}' (kept workshop id {kept})");
            log::warn!("{dir_name}: {reason}");
            scan.skipped.push(SkippedDir { dir_name, reason });
            continue;
        }
        scan.mapping.insert(package_id, dir_name);
    }

    Ok(scan)
}

fn skip(scan: &mut WorkshopScan, dir_name: String, reason: String) {
    log::debug!("skipping {dir_name}: {reason}");
    scan.skipped.push(SkippedDir { dir_name, reason });
}

/// Parse an `About/About.xml` manifest and extract the (lower-cased)
/// packageId, if the document declares one as a direct child of the root.
pub fn parse_about<R: BufRead>(reader: R) -> Result<Option<String>, CheckError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut in_package_id = false;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                // packageId must sit directly under the root element
                if depth == 1 && e.name().as_ref() == b"packageId" {
                    in_package_id = true;
                }
                depth += 1;
            }
            Event::Text(ref e) => {
                if in_package_id {
                    let text = e.unescape()?.trim().to_lowercase();
                    if !text.is_empty() {
                        return Ok(Some(text));
                    }
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                in_package_id = false;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(None)
}
