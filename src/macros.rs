/// Lazily compiled static regex; the pattern is a literal and must be valid.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// A [`ClassSet`](crate::ClassSet) literal, usable in `const` items.
///
/// `classes![A, B]` is the set `{A, B}`, `classes![*]` every class and
/// `classes![^A, B]` every class except `A` and `B`.
#[macro_export]
macro_rules! classes {
    (*) => {
        $crate::segment::ClassSet::all()
    };
    (^ $($class:expr),+ $(,)?) => {
        $crate::segment::ClassSet::all().difference($crate::classes![$($class),+])
    };
    ($($class:expr),* $(,)?) => {
        $crate::segment::ClassSet::empty() $(.union($crate::segment::ClassSet::of($class)))*
    };
}

/// An adjacency rule: `rule!("NAME": [prev] x [next])` keeps the text together,
/// `rule!("NAME": [prev] / [next])` breaks it. Either form may end with
/// `if |w| ...`, a guard over the [`Window`](crate::Window).
#[macro_export]
macro_rules! rule {
    (@guard) => {
        None
    };
    (@guard $guard:expr) => {{
        let guard: $crate::segment::Guard = $guard;
        Some(guard)
    }};
    ($name:literal : $prev:tt x $next:tt $(if $guard:expr)?) => {
        $crate::segment::Rule::new(
            $name,
            $crate::classes!$prev,
            $crate::classes!$next,
            $crate::segment::Action::Keep,
            $crate::rule!(@guard $($guard)?),
        )
    };
    ($name:literal : $prev:tt / $next:tt $(if $guard:expr)?) => {
        $crate::segment::Rule::new(
            $name,
            $crate::classes!$prev,
            $crate::classes!$next,
            $crate::segment::Action::Break,
            $crate::rule!(@guard $($guard)?),
        )
    };
}
