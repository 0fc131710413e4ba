//! Declarative sugar over [`Path`](crate::Path) and [`Q`](crate::Q).

/// Build a [`Path`](crate::Path) with dot-and-index syntax.
///
/// ```ignore
/// use ormsugar::path;
///
/// assert_eq!(path!(user.age).get_path(), "user__age");
/// assert_eq!(path!(user.tags[0].name).get_path(), "user__tags__0__name");
/// assert_eq!(path!(user.tags[0..1]).get_path(), "user__tags__0_1");
///
/// // Bound to a specific factory:
/// let sugar = ormsugar::QFactory::default();
/// let p = path!(in sugar => user.age);
/// ```
#[macro_export]
macro_rules! path {
    (in $factory:expr => $($rest:tt)*) => {
        $crate::__path_munch!(($factory).root(); $($rest)*)
    };
    ($($rest:tt)*) => {
        $crate::__path_munch!($crate::Path::root(); $($rest)*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __path_munch {
    ($acc:expr;) => {
        $acc
    };
    ($acc:expr; . $($rest:tt)*) => {
        $crate::__path_munch!($acc; $($rest)*)
    };
    ($acc:expr; [$start:literal .. $end:literal] $($rest:tt)*) => {
        $crate::__path_munch!($acc.index($start..$end); $($rest)*)
    };
    ($acc:expr; [$index:literal] $($rest:tt)*) => {
        $crate::__path_munch!($acc.index($index); $($rest)*)
    };
    ($acc:expr; $name:ident $($rest:tt)*) => {
        $crate::__path_munch!($acc.child(stringify!($name)); $($rest)*)
    };
}

/// Build a [`Q`](crate::Q) directly from keyword arguments.
///
/// ```ignore
/// use ormsugar::q;
///
/// let filter = q!(user__age__gt = 7, user__name__exact = "bob");
/// ```
#[macro_export]
macro_rules! q {
    () => {
        $crate::Q::empty()
    };
    ($($key:ident = $value:expr),+ $(,)?) => {
        $crate::Q::new([$((stringify!($key), $crate::Value::from($value))),+])
    };
}

#[cfg(test)]
mod tests {
    use crate::{FactoryConfig, Q, QFactory, Value};

    #[test]
    fn test_path_macro() {
        assert_eq!(path!(user.age).get_path(), "user__age");
        assert_eq!(path!(user.tags[0].name).get_path(), "user__tags__0__name");
        assert_eq!(path!(user.tags[0..1].name).get_path(), "user__tags__0_1__name");
        assert!(path!().is_root());
    }

    #[test]
    fn test_path_macro_with_factory() {
        let sugar = QFactory::with_config(FactoryConfig::new().without_builtin_lookups());
        let p = path!(in sugar => user.age);
        assert_eq!(p.get_path(), "user__age");
        assert!(p.factory().registry().is_empty());
    }

    #[test]
    fn test_q_macro() {
        let q = q!(b = 2, a = "x",);
        assert_eq!(q, Q::new([("a", Value::from("x")), ("b", Value::from(2))]));
        assert!(q!().is_empty());
    }
}
