use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::module::Import;
use crate::shape::PageShape;

/// Imports the synthesized declarations require. The entry point always
/// references Shared, Request, and Params, so those are required for every
/// shape regardless of the parameter policy.
fn required(target: PageShape, module_name: &str) -> Vec<Import> {
    let params = format!("Gen.Params.{}", module_name.trim_start_matches("Pages."));
    let page = if target == PageShape::Static {
        // The static annotation names the unqualified `Page` type.
        Import::exposing("Page", &["Page"])
    } else {
        Import::plain("Page")
    };

    let mut imports = vec![
        Import::exposing(&params, &["Params"]),
        page,
        Import::plain("Request"),
        Import::plain("Shared"),
        Import::exposing("View", &["View"]),
    ];
    if target == PageShape::Advanced {
        imports.push(Import::exposing("Effect", &["Effect"]));
    }
    imports
}

/// Union of the required imports and the file's existing ones, deduplicated
/// by module name (exposing lists are unioned) and sorted alphabetically.
/// Two imports exposing the same unqualified identifier from different
/// modules are a conflict.
pub fn reconcile(
    original: &[Import],
    target: PageShape,
    module_name: &str,
) -> Result<Vec<Import>, CoreError> {
    let mut merged: BTreeMap<String, Import> = BTreeMap::new();
    for import in required(target, module_name)
        .into_iter()
        .chain(original.iter().cloned())
    {
        match merged.entry(import.module.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(import);
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                if existing.alias.is_none() {
                    existing.alias = import.alias;
                }
                for name in import.exposing {
                    if !existing.exposing.contains(&name) {
                        existing.exposing.push(name);
                    }
                }
            }
        }
    }

    let mut owners: BTreeMap<&str, &str> = BTreeMap::new();
    for import in merged.values() {
        for name in &import.exposing {
            let ident = name.trim_end_matches("(..)").trim();
            if ident == ".." {
                continue;
            }
            match owners.get(ident) {
                Some(first) if *first != import.module => {
                    return Err(CoreError::ImportConflict {
                        name: ident.to_string(),
                        first: (*first).to_string(),
                        second: import.module.clone(),
                    });
                }
                _ => {
                    owners.insert(ident, &import.module);
                }
            }
        }
    }

    Ok(merged.into_values().collect())
}
