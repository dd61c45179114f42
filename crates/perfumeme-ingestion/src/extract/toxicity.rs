//! Skin-toxicity evidence in the section tree.

use crate::models::Section;
use crate::search::{find_sections, heading_contains_any};

pub const TOXICITY_KEYWORDS: &[&str] = &["toxicity", "safety", "hazards"];
pub const SKIN_KEYWORDS: &[&str] = &["skin", "dermal"];

/// True when some toxicity/safety/hazards section, at any depth, has a skin
/// or dermal subsection directly below it.
///
/// Deeper evidence only counts through another toxicity heading: "Safety and
/// Hazards > First Aid Measures > Skin First Aid" is first-aid advice, not a
/// skin assessment.
pub fn has_skin_toxicity_data(sections: &[Section]) -> bool {
    let is_skin = heading_contains_any(SKIN_KEYWORDS);

    find_sections(sections, heading_contains_any(TOXICITY_KEYWORDS))
        .into_iter()
        .any(|tox| tox.children.iter().any(&is_skin))
}
