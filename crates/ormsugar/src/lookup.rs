//! Lookup suffixes.
//!
//! A lookup selects the comparison semantics of a filter keyword. The keyword
//! is the field path followed by the separator and the lookup suffix, e.g.
//! `user__age__gt`.

use crate::q::Q;
use crate::value::Value;
use std::fmt;

/// Separator between path segments and before the lookup suffix.
pub const SEPARATOR: &str = "__";

/// Lookup applied to a field path.
///
/// # Example
/// ```ignore
/// use ormsugar::Lookup;
///
/// assert_eq!(Lookup::Gte.key("user__age"), "user__age__gte");
/// assert_eq!(Lookup::from_suffix("isnull"), Some(Lookup::IsNull));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup {
    /// field = value
    Exact,
    /// Case-insensitive equality
    IExact,
    /// Substring match
    Contains,
    /// Case-insensitive substring match
    IContains,
    /// field > value
    Gt,
    /// field >= value
    Gte,
    /// field < value
    Lt,
    /// field <= value
    Lte,
    /// Membership in a list
    In,
    /// Null state equals the boolean value
    IsNull,
}

impl Lookup {
    /// Every lookup, in declaration order.
    pub const ALL: [Lookup; 10] = [
        Lookup::Exact,
        Lookup::IExact,
        Lookup::Contains,
        Lookup::IContains,
        Lookup::Gt,
        Lookup::Gte,
        Lookup::Lt,
        Lookup::Lte,
        Lookup::In,
        Lookup::IsNull,
    ];

    /// Keyword suffix for this lookup.
    pub const fn suffix(self) -> &'static str {
        match self {
            Lookup::Exact => "exact",
            Lookup::IExact => "iexact",
            Lookup::Contains => "contains",
            Lookup::IContains => "icontains",
            Lookup::Gt => "gt",
            Lookup::Gte => "gte",
            Lookup::Lt => "lt",
            Lookup::Lte => "lte",
            Lookup::In => "in",
            Lookup::IsNull => "isnull",
        }
    }

    /// Parse a keyword suffix.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.suffix() == suffix)
    }

    /// Build the filter keyword `"{path}__{suffix}"`.
    pub fn key(self, path: &str) -> String {
        let suffix = self.suffix();
        let mut key = String::with_capacity(path.len() + SEPARATOR.len() + suffix.len());
        key.push_str(path);
        key.push_str(SEPARATOR);
        key.push_str(suffix);
        key
    }

    /// Build the single-leaf predicate `{"{path}__{suffix}": value}`.
    pub fn build(self, path: &str, value: impl Into<Value>) -> Q {
        Q::leaf(self.key(path), value)
    }
}

/// `path <= min AND path >= max`.
///
/// `min` is compared with `lte` and `max` with `gte`. Keep that order.
pub(crate) fn range_q(path: &str, min: impl Into<Value>, max: impl Into<Value>) -> Q {
    Lookup::Lte.build(path, min) & Lookup::Gte.build(path, max)
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_round_trip() {
        for lookup in Lookup::ALL {
            assert_eq!(Lookup::from_suffix(lookup.suffix()), Some(lookup));
        }
        assert_eq!(Lookup::from_suffix("startswith"), None);
    }

    #[test]
    fn test_key() {
        assert_eq!(Lookup::Exact.key("user__age"), "user__age__exact");
        assert_eq!(Lookup::IsNull.key("favorite"), "favorite__isnull");
        // An unaddressed path still gets the separator.
        assert_eq!(Lookup::Gt.key(""), "__gt");
    }

    #[test]
    fn test_range_q_bound_order() {
        let q = range_q("age", 1, 9);
        assert_eq!(q.to_string(), "(AND: ('age__lte', 1), ('age__gte', 9))");
    }
}
