use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::warn;

/// Canonical label, or `None` for "no license specified".
pub type CanonicalLabel = Option<&'static str>;

/// <https://creativecommons.org/licenses/by/4.0/>
pub const CC_BY_4: &str = "CC BY 4.0";
/// <https://creativecommons.org/licenses/by-sa/4.0/>
pub const CC_BY_SA_4: &str = "CC BY-SA 4.0";
/// <https://creativecommons.org/licenses/by-nd/4.0/>
pub const CC_BY_ND_4: &str = "CC BY-ND 4.0";
/// <https://creativecommons.org/licenses/by-nc-sa/4.0/>
pub const CC_BY_NC_SA_4: &str = "CC BY-NC-SA 4.0";

pub const CC_BY_UNSPECIFIED: &str = "CC-BY";
pub const CC_BY_SA_UNSPECIFIED: &str = "CC BY-SA";

// Public domain

/// <https://creativecommons.org/publicdomain/zero/1.0/>
pub const CC_0: &str = "CC-0";

// Legacy

/// <https://creativecommons.org/licenses/by/3.0/>
pub const CC_BY_3: &str = "CC BY 3.0";
/// <https://creativecommons.org/licenses/by/2.0/>
pub const CC_BY_2: &str = "CC BY 2.0";
/// <https://creativecommons.org/licenses/by-nc-sa/2.0/>
pub const CC_BY_NC_SA_2: &str = "CC BY-NC-SA 2.0";
/// <https://creativecommons.org/licenses/by/1.0/>
pub const CC_BY_1: &str = "CC BY 1.0";

/// Every canonical label in declaration order, including those with no
/// aliases yet.
pub static CANONICAL_LABELS: &[&str] = &[
    CC_BY_4,
    CC_BY_SA_4,
    CC_BY_ND_4,
    CC_BY_NC_SA_4,
    CC_BY_UNSPECIFIED,
    CC_BY_SA_UNSPECIFIED,
    CC_0,
    CC_BY_3,
    CC_BY_2,
    CC_BY_NC_SA_2,
    CC_BY_1,
];

/// Label for licenses that are recognised but not categorised further.
pub const OTHER: &str = "Other";

/// Known spellings of each canonical label, in declaration order.
pub static REVERSE_LICENSES: &[(CanonicalLabel, &[&str])] = &[
    (None, &["None", "license", "unspecified"]),
    (
        Some(CC_BY_4),
        &[
            "CC-BY-4.0",
            "CC-BY 4.0",
            "CC BY 4.0",
            "https://creativecommons.org/licenses/by/4.0",
            "http://creativecommons.org/licenses/by/4.0",
            "https://creativecommons.org/licenses/by/4.0/",
            "http://creativecommons.org/licenses/by/4.0/",
            "url: http://creativecommons.org/licenses/by/4.0",
            "SWO is provided under a Creative Commons Attribution 4.0 International \
             (CC BY 4.0) license (https://creativecommons.org/licenses/by/4.0/).",
        ],
    ),
    (
        Some(CC_BY_3),
        &[
            "CC-BY-3.0",
            "CC-BY 3.0",
            "CC BY 3.0",
            "http://creativecommons.org/licenses/by/3.0",
            "https://creativecommons.org/licenses/by/3.0",
            "http://creativecommons.org/licenses/by/3.0/",
            "https://creativecommons.org/licenses/by/3.0/",
            "CC-BY 3.0 https://creativecommons.org/licenses/by/3.0",
            "CC-BY version 3.0",
        ],
    ),
    (
        Some(CC_BY_2),
        &[
            "CC-BY-2.0",
            "CC-BY 2.0",
            "CC BY 2.0",
            "http://creativecommons.org/licenses/by/2.0",
            "https://creativecommons.org/licenses/by/2.0",
            "http://creativecommons.org/licenses/by/2.0/",
            "https://creativecommons.org/licenses/by/2.0/",
        ],
    ),
    (
        Some(CC_BY_UNSPECIFIED),
        &["CC-BY", "creative-commons-attribution-license"],
    ),
    (
        Some(CC_0),
        &[
            "CC-0",
            "CC 0",
            "CC0",
            "CC-0 1.0 Universal",
            "CC0 1.0 Universal",
            "CC0 1.0",
            "CC-0 1.0",
            "http://creativecommons.org/publicdomain/zero/1.0",
            "https://creativecommons.org/publicdomain/zero/1.0",
            "http://creativecommons.org/publicdomain/zero/1.0/",
            "https://creativecommons.org/publicdomain/zero/1.0/",
        ],
    ),
    (
        Some(CC_BY_SA_4),
        &[
            "http://creativecommons.org/licenses/by-sa/4.0",
            "https://creativecommons.org/licenses/by-sa/4.0",
        ],
    ),
    (
        Some(CC_BY_SA_UNSPECIFIED),
        &["CC-BY-SA", "CC BY-SA", "CC-BY SA", "CC BY SA"],
    ),
    (
        Some(CC_BY_NC_SA_2),
        &[
            "CC-BY-NC-SA 2.0",
            "CC BY-NC-SA 2.0",
            "CC BY NC SA 2.0",
            "https://creativecommons.org/licenses/by-nc-sa/2.0",
            "http://creativecommons.org/licenses/by-nc-sa/2.0",
        ],
    ),
];

/// Raw strings mapped straight to [`OTHER`].
pub static OTHER_LICENSES: &[&str] = &[
    // Apache 2.0
    "Apache 2.0 License",
    "LICENSE-2.0",
    "www.apache.org/licenses/LICENSE-2.0",
    // GPL
    "GNU GPL 3.0",
    "GPL-3.0",
    // BSD
    "New BSD license",
    // Other
    "hpo",
    "Artistic License 2.0",
];

/// Raw license string → canonical label, flattened from [`OTHER_LICENSES`] and
/// [`REVERSE_LICENSES`].
pub static LICENSES: Lazy<HashMap<&'static str, CanonicalLabel>> = Lazy::new(|| {
    build_forward_table(OTHER_LICENSES, REVERSE_LICENSES)
});

/// Flatten the tables into one lookup. Later entries replace earlier ones, so
/// an alias listed under two labels resolves to the one declared last.
pub fn build_forward_table(
    others: &[&'static str],
    reverse: &[(CanonicalLabel, &[&'static str])],
) -> HashMap<&'static str, CanonicalLabel> {
    let mut table: HashMap<&'static str, CanonicalLabel> = HashMap::new();

    for raw in others {
        table.insert(*raw, Some(OTHER));
    }

    for (label, aliases) in reverse {
        for alias in *aliases {
            if let Some(previous) = table.insert(*alias, *label) {
                if previous != *label {
                    warn!(
                        alias = *alias,
                        previous = previous.unwrap_or("<none>"),
                        label = label.unwrap_or("<none>"),
                        "license alias declared under two labels"
                    );
                }
            }
        }
    }

    table
}

/// Aliases that appear under more than one label, with every label they map to.
pub fn alias_collisions(
    others: &[&'static str],
    reverse: &[(CanonicalLabel, &[&'static str])],
) -> Vec<(&'static str, Vec<CanonicalLabel>)> {
    let mut labels: Vec<(&'static str, Vec<CanonicalLabel>)> = Vec::new();

    let declared = others
        .iter()
        .map(|raw| (*raw, Some(OTHER)))
        .chain(
            reverse
                .iter()
                .flat_map(|(label, aliases)| aliases.iter().map(move |alias| (*alias, *label))),
        );

    for (alias, label) in declared {
        match labels.iter_mut().find(|(a, _)| *a == alias) {
            Some((_, seen)) => {
                if !seen.contains(&label) {
                    seen.push(label);
                }
            }
            None => labels.push((alias, vec![label])),
        }
    }

    labels.retain(|(_, seen)| seen.len() > 1);
    labels
}
