use std::io::BufRead;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::CheckError;

/// Package ids belonging to the base game and official expansions. These are
/// never hosted on the Workshop, so they are excluded from comparison.
pub const VANILLA_PACKAGE_IDS: &[&str] = &[
    "ludeon.rimworld",
    "ludeon.rimworld.royalty",
    "ludeon.rimworld.ideology",
    "ludeon.rimworld.biotech",
    "ludeon.rimworld.anomaly",
    "ludeon.rimworld.odyssey",
];

/// Returns true if the (lower-cased) package id belongs to the base game or a DLC.
pub fn is_vanilla(package_id: &str) -> bool {
    VANILLA_PACKAGE_IDS.contains(&package_id)
}

/// Read the active mod list from a `ModsConfig.xml` file.
///
/// Returns the package ids listed under `activeMods/li`, in document order,
/// lower-cased, with vanilla ids removed. A missing or malformed file is a
/// fatal error; a document without an `activeMods` element yields an empty
/// list (matching the game's own behavior for a fresh config).
pub fn read_active_mods(path: &Path) -> Result<Vec<String>, CheckError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    parse_mods_config(reader)
}

/// Parse a `ModsConfig.xml` document from a reader.
pub fn parse_mods_config<R: BufRead>(reader: R) -> Result<Vec<String>, CheckError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut active = Vec::new();

    let mut in_active_mods = false;
    let mut in_li = false;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.name().as_ref() {
                b"activeMods" => in_active_mods = true,
                b"li" if in_active_mods => in_li = true,
                _ => {}
            },
            Event::Text(ref e) => {
                if in_li {
                    let text = e.unescape()?.trim().to_lowercase();
                    if !text.is_empty() {
                        active.push(text);
                    }
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"activeMods" => in_active_mods = false,
                b"li" => in_li = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    active.retain(|id| !is_vanilla(id));
    Ok(active)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_MODS_CONFIG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ModsConfigData>
    <version>1.5.4104 rev435</version>
    <activeMods>
        <li>ludeon.rimworld</li>
        <li>ludeon.rimworld.royalty</li>
        <li>brrainz.harmony</li>
        <li>UnlimitedHugs.HugsLib</li>
        <li>fluffy.modmanager</li>
    </activeMods>
    <knownExpansions>
        <li>ludeon.rimworld.royalty</li>
    </knownExpansions>
</ModsConfigData>"#;

    #[test]
    fn test_parse_active_mods() {
        let mods = parse_mods_config(SAMPLE_MODS_CONFIG.as_bytes()).unwrap();
        assert_eq!(
            mods,
            vec!["brrainz.harmony", "unlimitedhugs.hugslib", "fluffy.modmanager"]
        );
    }

    #[test]
    fn test_vanilla_ids_filtered() {
        let mods = parse_mods_config(SAMPLE_MODS_CONFIG.as_bytes()).unwrap();
        assert!(!mods.iter().any(|m| m == "ludeon.rimworld"));
        assert!(!mods.iter().any(|m| m == "ludeon.rimworld.royalty"));
    }

    #[test]
    fn test_known_expansions_ignored() {
        // knownExpansions also uses <li>, but only activeMods entries count
        let xml = r#"<ModsConfigData>
            <knownExpansions><li>some.mod</li></knownExpansions>
        </ModsConfigData>"#;
        let mods = parse_mods_config(xml.as_bytes()).unwrap();
        assert!(mods.is_empty());
    }

    #[test]
    fn test_missing_active_mods_element() {
        let xml = r#"<ModsConfigData><version>1.5</version></ModsConfigData>"#;
        let mods = parse_mods_config(xml.as_bytes()).unwrap();
        assert!(mods.is_empty());
    }

    #[test]
    fn test_malformed_xml_is_fatal() {
        let xml = "<ModsConfigData><activeMods></ModsConfigData></activeMods>";
        let result = parse_mods_config(xml.as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = read_active_mods(Path::new("/nonexistent/ModsConfig.xml"));
        assert!(matches!(result, Err(CheckError::Io(_))));
    }

    #[test]
    fn test_ids_lowercased_in_order() {
        let xml = r#"<ModsConfigData><activeMods>
            <li>Zeta.Mod</li>
            <li>Alpha.Mod</li>
        </activeMods></ModsConfigData>"#;
        let mods = parse_mods_config(xml.as_bytes()).unwrap();
        assert_eq!(mods, vec!["zeta.mod", "alpha.mod"]);
    }
}
