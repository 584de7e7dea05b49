//! Rule name canonicalization.
//!
//! Registered names and names derived from declarative attributes share one
//! key space: camel case with a lowercase first letter. `"Required"`,
//! `"max-length"`, `"MaxLength"` and the attribute `data-max-length` all land
//! on the same registry key.

/// Prefix shared by every declarative rule attribute.
pub const ATTRIBUTE_PREFIX: &str = "data-";

/// Aggregate shorthand attribute holding a comma-separated list of rules.
pub const AGGREGATE_ATTRIBUTE: &str = "data-validate";

/// Canonicalize a rule name into its registry key.
///
/// Dash, underscore and whitespace act as word separators. The first word
/// gets a lowercase first letter, every following word an uppercase one; the
/// remaining characters are kept as written so `maxLength` is a fixed point.
///
/// # Example
///
/// ```rust
/// use rulebook::core::canonical_name;
///
/// assert_eq!(canonical_name("Required"), "required");
/// assert_eq!(canonical_name("max-length"), "maxLength");
/// assert_eq!(canonical_name(" maxLength "), "maxLength");
/// ```
pub fn canonical_name(name: &str) -> String {
    let mut key = String::with_capacity(name.len());

    let words = name
        .trim()
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty());

    for (index, word) in words.enumerate() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if index == 0 {
                key.extend(first.to_lowercase());
            } else {
                key.extend(first.to_uppercase());
            }
            key.push_str(chars.as_str());
        }
    }

    key
}

/// Derive the registry key for a declarative attribute name.
///
/// Returns `None` when the attribute does not carry the rule prefix, or
/// when it is the aggregate shorthand attribute itself.
pub fn rule_name_from_attribute(attribute: &str) -> Option<String> {
    if attribute.eq_ignore_ascii_case(AGGREGATE_ATTRIBUTE) {
        return None;
    }

    let prefix = attribute.get(..ATTRIBUTE_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(ATTRIBUTE_PREFIX) {
        return None;
    }

    let key = canonical_name(&attribute[ATTRIBUTE_PREFIX.len()..]);
    (!key.is_empty()).then_some(key)
}

/// Convert a camel-case rule name into its dash-separated form.
///
/// ```rust
/// use rulebook::core::dash_case;
///
/// assert_eq!(dash_case("maxLength"), "max-length");
/// assert_eq!(dash_case("required"), "required");
/// ```
pub fn dash_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);

    for (index, c) in name.trim().chars().enumerate() {
        if c.is_uppercase() {
            if index > 0 && !out.ends_with('-') {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else if c == '_' || c.is_whitespace() {
            if !out.ends_with('-') {
                out.push('-');
            }
        } else {
            out.push(c);
        }
    }

    out
}

/// Attribute name a value-less rule is materialized under.
pub fn rule_attribute(rule: &str) -> String {
    format!("{ATTRIBUTE_PREFIX}{}", dash_case(rule))
}
