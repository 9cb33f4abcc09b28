use std::collections::{BTreeMap, HashMap, HashSet};

/// An active mod from `ModsConfig.xml`, paired with its local workshop id
/// when the scanner found one. `None` marks "no local mapping found"
/// (typically a local, non-Workshop mod).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveMod {
    pub package_id: String,
    pub workshop_id: Option<String>,
}

/// A collection member that is not in the active mod list. The packageId is
/// `None` when no local directory maps back to this workshop id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraMod {
    pub package_id: Option<String>,
    pub workshop_id: String,
}

/// The three disjoint outcomes of comparing the active list against the
/// collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Active and a member of the collection.
    pub matched: Vec<ActiveMod>,
    /// Active but absent from the collection (or unmapped locally).
    pub missing: Vec<ActiveMod>,
    /// In the collection but not active.
    pub extra: Vec<ExtraMod>,
}

impl Reconciliation {
    /// True when the config and the collection agree exactly.
    pub fn in_sync(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Compare the active mod list against the collection members.
///
/// Pure function over its inputs; output order follows input order (active
/// list order for matched/missing, collection order for extra), so identical
/// inputs always produce identical output.
///
/// The reverse workshop-id → packageId lookup is built once from the ordered
/// mapping: when several packageIds claim the same workshop id, the
/// lexicographically-first packageId wins.
pub fn reconcile(
    active: &[String],
    mapping: &BTreeMap<String, String>,
    collection: &[String],
) -> Reconciliation {
    let collection_set: HashSet<&str> = collection.iter().map(String::as_str).collect();
    let active_set: HashSet<&str> = active.iter().map(String::as_str).collect();

    // mapping iterates packageIds in sorted order, so first insert wins
    let mut reverse: HashMap<&str, &str> = HashMap::new();
    for (package_id, workshop_id) in mapping {
        reverse.entry(workshop_id.as_str()).or_insert(package_id.as_str());
    }

    let mut result = Reconciliation::default();

    for package_id in active {
        match mapping.get(package_id) {
            Some(workshop_id) if collection_set.contains(workshop_id.as_str()) => {
                result.matched.push(ActiveMod {
                    package_id: package_id.clone(),
                    workshop_id: Some(workshop_id.clone()),
                });
            }
            Some(workshop_id) => {
                result.missing.push(ActiveMod {
                    package_id: package_id.clone(),
                    workshop_id: Some(workshop_id.clone()),
                });
            }
            None => {
                result.missing.push(ActiveMod {
                    package_id: package_id.clone(),
                    workshop_id: None,
                });
            }
        }
    }

    for workshop_id in collection {
        let package_id = reverse.get(workshop_id.as_str()).copied();
        let is_active = package_id.is_some_and(|p| active_set.contains(p));
        if !is_active {
            result.extra.push(ExtraMod {
                package_id: package_id.map(str::to_string),
                workshop_id: workshop_id.clone(),
            });
        }
    }

    result
}
