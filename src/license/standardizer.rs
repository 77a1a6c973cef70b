use serde::Serialize;

use crate::license::aliases::LICENSES;

/// Standardize a free-text license string.
///
/// One trailing `/` is dropped before the lookup. Known spellings map to their
/// canonical label, which is `None` for the "no license" aliases; anything else
/// is returned as given (minus that slash). `None` in gives `None` out.
pub fn standardize_license(raw: Option<&str>) -> Option<&str> {
    let raw = raw?;
    let key = lookup_key(raw);
    match LICENSES.get(key) {
        Some(label) => *label,
        None => Some(key),
    }
}

/// Whether `raw` has an entry in the lookup table, as opposed to being passed
/// through.
pub fn is_known_license(raw: &str) -> bool {
    LICENSES.contains_key(lookup_key(raw))
}

fn lookup_key(raw: &str) -> &str {
    raw.strip_suffix('/').unwrap_or(raw)
}

/// One raw license string and what it standardized to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LicenseLookup<'a> {
    pub raw: &'a str,
    pub standardized: Option<&'a str>,
    pub known: bool,
}

impl<'a> LicenseLookup<'a> {
    pub fn new(raw: &'a str) -> Self {
        LicenseLookup {
            raw,
            standardized: standardize_license(Some(raw)),
            known: is_known_license(raw),
        }
    }
}
