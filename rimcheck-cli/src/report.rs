//! Report rendering for the reconciliation result.

use std::collections::HashMap;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rimcheck_lib::{Reconciliation, SkippedDir};

/// Placeholder title for workshop ids the details endpoint did not resolve.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Note shown for active mods with no local workshop mapping.
pub const NO_MAPPING_NOTE: &str = "no workshop ID found (maybe a local mod?)";

/// Label for collection members whose packageId is unknown locally.
pub const UNKNOWN_PACKAGE_ID: &str = "unknown packageId";

/// True for ids that can be sent to the file-details endpoint.
fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_digit())
}

/// Collect the workshop ids whose titles should be resolved: every numeric
/// id across matched, missing, and extra, deduplicated, in report order.
pub fn eligible_name_ids(result: &Reconciliation) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut ids = Vec::new();

    let matched_and_missing = result.matched.iter().chain(result.missing.iter());
    for entry in matched_and_missing {
        if let Some(ref wid) = entry.workshop_id {
            if is_numeric_id(wid) && seen.insert(wid.clone()) {
                ids.push(wid.clone());
            }
        }
    }
    for extra in &result.extra {
        if is_numeric_id(&extra.workshop_id) && seen.insert(extra.workshop_id.clone()) {
            ids.push(extra.workshop_id.clone());
        }
    }

    ids
}

/// Format one report line: `Title (packageId / workshopId)`.
pub fn mod_line(
    names: &HashMap<String, String>,
    package_id: &str,
    workshop_id: &str,
) -> String {
    let title = names
        .get(workshop_id)
        .map(String::as_str)
        .unwrap_or(UNKNOWN_TITLE);
    format!("{title} ({package_id} / {workshop_id})")
}

/// Print the three report sections and the final sync verdict.
pub fn print_report(
    result: &Reconciliation,
    names: &HashMap<String, String>,
    show_matched: bool,
) {
    if show_matched && !result.matched.is_empty() {
        println!(
            "{}",
            "Present in BOTH ModsConfig and the collection:"
                .if_supports_color(Stdout, |t| t.bold()),
        );
        for entry in &result.matched {
            let wid = entry.workshop_id.as_deref().unwrap_or("?");
            println!(
                "  {} {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                mod_line(names, &entry.package_id, wid),
            );
        }
        println!();
    }

    if !result.missing.is_empty() {
        println!(
            "{}",
            "In ModsConfig but MISSING from the collection:"
                .if_supports_color(Stdout, |t| t.bold()),
        );
        for entry in &result.missing {
            match entry.workshop_id {
                Some(ref wid) => println!(
                    "  {} {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    mod_line(names, &entry.package_id, wid),
                ),
                None => println!(
                    "  {} {} {}",
                    "?".if_supports_color(Stdout, |t| t.yellow()),
                    entry.package_id,
                    format!("({NO_MAPPING_NOTE})").if_supports_color(Stdout, |t| t.dimmed()),
                ),
            }
        }
        println!();
    }

    if !result.extra.is_empty() {
        println!(
            "{}",
            "EXTRA in the collection but not in ModsConfig:"
                .if_supports_color(Stdout, |t| t.bold()),
        );
        for extra in &result.extra {
            let package_id = extra.package_id.as_deref().unwrap_or(UNKNOWN_PACKAGE_ID);
            println!(
                "  {} {}",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                mod_line(names, package_id, &extra.workshop_id),
            );
        }
        println!();
    }

    if result.in_sync() {
        println!(
            "{} ModsConfig and the collection are in sync",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        );
    }
}

/// Print the directories the scanner skipped, with reasons.
pub fn print_skipped(skipped: &[SkippedDir]) {
    if skipped.is_empty() {
        return;
    }
    println!(
        "{}",
        "Workshop directories skipped during scan:".if_supports_color(Stdout, |t| t.bold()),
    );
    for s in skipped {
        println!(
            "  {} {} {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            s.dir_name,
            format!("({})", s.reason).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rimcheck_lib::reconcile::{ActiveMod, ExtraMod};

    fn names(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_mod_line_with_title() {
        let names = names(&[("100", "Harmony")]);
        assert_eq!(
            mod_line(&names, "brrainz.harmony", "100"),
            "Harmony (brrainz.harmony / 100)"
        );
    }

    #[test]
    fn test_mod_line_unknown_title() {
        let names = HashMap::new();
        assert_eq!(mod_line(&names, "a.b", "7"), "Unknown Title (a.b / 7)");
    }

    #[test]
    fn test_eligible_name_ids_numeric_deduped() {
        let result = Reconciliation {
            matched: vec![ActiveMod {
                package_id: "a.a".to_string(),
                workshop_id: Some("100".to_string()),
            }],
            missing: vec![
                ActiveMod {
                    package_id: "b.b".to_string(),
                    workshop_id: Some("200".to_string()),
                },
                // no local mapping: nothing to resolve
                ActiveMod {
                    package_id: "c.c".to_string(),
                    workshop_id: None,
                },
            ],
            extra: vec![
                ExtraMod {
                    package_id: None,
                    workshop_id: "200".to_string(),
                },
                ExtraMod {
                    package_id: None,
                    workshop_id: "300".to_string(),
                },
            ],
        };

        assert_eq!(eligible_name_ids(&result), vec!["100", "200", "300"]);
    }

    #[test]
    fn test_eligible_name_ids_skips_non_numeric() {
        let result = Reconciliation {
            matched: vec![],
            missing: vec![ActiveMod {
                package_id: "a.a".to_string(),
                workshop_id: Some("local-copy".to_string()),
            }],
            extra: vec![],
        };
        assert!(eligible_name_ids(&result).is_empty());
    }

    #[test]
    fn test_eligible_name_ids_empty_result() {
        assert!(eligible_name_ids(&Reconciliation::default()).is_empty());
    }
}
