//! The amenity and home-type indicators, as one declarative table evaluated
//! by a single matcher. Each rule names the captured column it reads, the
//! marker substring that sets it, and (where one marker is a substring of
//! another rule's marker) the marker that must be absent.

/// Which captured text column a rule is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceField {
    Attributes,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCase {
    Sensitive,
    Insensitive,
}

pub struct IndicatorRule {
    pub name: &'static str,
    pub source: SourceField,
    pub include: &'static str,
    /// Compound rule: the indicator is only set when this marker is absent.
    /// Needed where `include` is a substring of a sibling rule's marker
    /// (`house` vs `townhouse`).
    pub exclude: Option<&'static str>,
    pub case: MatchCase,
}

const fn attr(name: &'static str, include: &'static str) -> IndicatorRule {
    IndicatorRule {
        name,
        source: SourceField::Attributes,
        include,
        exclude: None,
        case: MatchCase::Sensitive,
    }
}

const fn descrip(name: &'static str, include: &'static str) -> IndicatorRule {
    IndicatorRule {
        name,
        source: SourceField::Description,
        include,
        exclude: None,
        case: MatchCase::Insensitive,
    }
}

pub const INDICATOR_RULES: &[IndicatorRule] = &[
    // pet policy
    attr("cats_ok", "cats are OK"),
    attr("dogs_ok", "dogs are OK"),
    attr("wheelchair_accessible", "wheelchair accessible"),
    // laundry
    attr("laundry_in_bldg", "laundry in bldg"),
    attr("no_laundry", "no laundry on site"),
    attr("washer_and_dryer", "w/d in unit"),
    attr("washer_and_dryer_hookup", "w/d hookups"),
    attr("laundry_on_site", "laundry on site"),
    // kitchen and appliances, listed in the free-text description
    descrip("full_kitchen", "full kitchen"),
    descrip("dishwasher", "dishwasher"),
    descrip("refrigerator", "refrigerator"),
    descrip("oven", "oven"),
    // flooring
    attr("flooring_carpet", "flooring: carpet"),
    attr("flooring_wood", "flooring: wood"),
    attr("flooring_tile", "flooring: tile"),
    attr("flooring_hardwood", "flooring: hardwood"),
    attr("flooring_other", "flooring: other"),
    // home type
    attr("apt", "apartment"),
    attr("in_law_apt", "in-law"),
    attr("condo", "condo"),
    attr("townhouse", "townhouse"),
    attr("cottage_or_cabin", "cottage/cabin"),
    IndicatorRule {
        name: "single_fam",
        source: SourceField::Attributes,
        include: "house",
        exclude: Some("townhouse"),
        case: MatchCase::Sensitive,
    },
    attr("duplex", "duplex"),
    attr("flat", "flat"),
    attr("land", "land"),
    attr("is_furnished", "furnished"),
    // parking
    attr("attached_garage", "attached garage"),
    attr("detached_garage", "detached garage"),
    attr("carport", "carport"),
    attr("off_street_parking", "off-street parking"),
    attr("no_parking", "no parking"),
    attr("ev_charging", "EV charging"),
    // misc amenities
    attr("air_condition", "air conditioning"),
    attr("no_smoking", "no smoking"),
];

fn matches(text: &str, marker: &str, case: MatchCase) -> bool {
    match case {
        MatchCase::Sensitive => text.contains(marker),
        MatchCase::Insensitive => text.to_lowercase().contains(&marker.to_lowercase()),
    }
}

fn evaluate(rule: &IndicatorRule, attributes: Option<&str>, description: Option<&str>) -> bool {
    let text = match rule.source {
        SourceField::Attributes => attributes,
        SourceField::Description => description,
    };
    let Some(text) = text else {
        return false;
    };
    matches(text, rule.include, rule.case)
        && !rule
            .exclude
            .map_or(false, |marker| matches(text, marker, rule.case))
}

/// Evaluate the whole table against one listing's captured text. The result
/// is positionally parallel to `INDICATOR_RULES`; a missing source column
/// leaves every rule reading it at false.
pub fn expand(attributes: Option<&str>, description: Option<&str>) -> Vec<bool> {
    INDICATOR_RULES
        .iter()
        .map(|rule| evaluate(rule, attributes, description))
        .collect()
}

/// Position of a rule in the table, for name-based lookups.
pub fn rule_index(name: &str) -> Option<usize> {
    INDICATOR_RULES.iter().position(|r| r.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(flags: &[bool], name: &str) -> bool {
        flags[rule_index(name).unwrap()]
    }

    #[test]
    fn townhouse_is_not_a_single_family_house() {
        let flags = expand(Some("townhouse - w/d in unit"), None);
        assert!(flag(&flags, "townhouse"));
        assert!(!flag(&flags, "single_fam"));
    }

    #[test]
    fn plain_house_is_single_family() {
        let flags = expand(Some("house - cats are OK - purrr"), None);
        assert!(flag(&flags, "single_fam"));
        assert!(!flag(&flags, "townhouse"));
        assert!(flag(&flags, "cats_ok"));
    }

    #[test]
    fn description_rules_match_case_insensitively() {
        let flags = expand(None, Some("Comes with a Dishwasher and Full Kitchen."));
        assert!(flag(&flags, "dishwasher"));
        assert!(flag(&flags, "full_kitchen"));
    }

    #[test]
    fn missing_source_text_leaves_all_flags_unset() {
        assert!(expand(None, None).iter().all(|f| !f));
    }

    #[test]
    fn attribute_rules_are_case_sensitive() {
        // the site renders this tag with OK capitalized; lowercased text is
        // some other phrase and must not match
        let flags = expand(Some("cats are ok"), None);
        assert!(!flag(&flags, "cats_ok"));
    }
}
