//! Call arguments for [`Path::call`](crate::Path::call).

use crate::value::Value;

/// Positional and named arguments of a path invocation.
///
/// # Example
/// ```ignore
/// use ormsugar::Args;
///
/// let args = Args::new().arg(10).arg(20);
/// let kwargs = Args::new().kwarg("user__age__gt", 7);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    positional: Vec<Value>,
    named: Vec<(String, Value)>,
}

impl Args {
    /// Create an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from positional arguments only.
    pub fn positional<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            named: Vec::new(),
        }
    }

    /// Build from named arguments only.
    pub fn named<K: Into<String>, V: Into<Value>>(
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self {
            positional: Vec::new(),
            named: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Append a named argument. A repeated name replaces the earlier value.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.named.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.named.push((name, value)),
        }
        self
    }

    /// Positional arguments.
    pub fn positional_args(&self) -> &[Value] {
        &self.positional
    }

    /// Named arguments, in insertion order.
    pub fn named_args(&self) -> &[(String, Value)] {
        &self.named
    }

    /// Positional argument at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Named argument by name.
    pub fn get_named(&self, name: &str) -> Option<&Value> {
        self.named.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Positional argument at `index`, falling back to the named argument `name`.
    pub fn get_either(&self, index: usize, name: &str) -> Option<&Value> {
        self.get(index).or_else(|| self.get_named(name))
    }

    /// Whether there are any positional arguments.
    pub fn has_positional(&self) -> bool {
        !self.positional.is_empty()
    }

    /// Whether there are any named arguments.
    pub fn has_named(&self) -> bool {
        !self.named.is_empty()
    }

    /// Whether there are no arguments at all.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    /// Value used when a call falls back to `path = value`: the single
    /// positional argument, or a list of all of them otherwise.
    pub(crate) fn into_fallback_value(self) -> Value {
        let mut positional = self.positional;
        if positional.len() == 1 {
            positional.pop().unwrap_or(Value::Null)
        } else {
            Value::List(positional)
        }
    }

    pub(crate) fn into_named(self) -> Vec<(String, Value)> {
        self.named
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kwarg_replaces() {
        let args = Args::new().kwarg("a", 1).kwarg("b", 2).kwarg("a", 3);
        assert_eq!(args.get_named("a"), Some(&Value::Int(3)));
        assert_eq!(args.named_args().len(), 2);
    }

    #[test]
    fn test_get_either() {
        let args = Args::new().arg(1).kwarg("max", 9);
        assert_eq!(args.get_either(0, "min"), Some(&Value::Int(1)));
        assert_eq!(args.get_either(1, "max"), Some(&Value::Int(9)));
        assert_eq!(args.get_either(2, "other"), None);
    }

    #[test]
    fn test_fallback_value() {
        assert_eq!(Args::new().arg(5).into_fallback_value(), Value::Int(5));
        assert_eq!(
            Args::positional([1, 2]).into_fallback_value(),
            Value::List(vec![Value::Int(1), Value::Int(2)])
        );
        assert_eq!(Args::new().into_fallback_value(), Value::List(vec![]));
    }
}
