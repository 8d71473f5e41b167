use std::any::type_name;

/// Dotted qualified name of `T` without the crate root, e.g.
/// `tests.Foo.instance_method` for the method item `my_crate::tests::Foo::instance_method`.
///
/// Closures resolve to the function or method that encloses them and generic
/// arguments are dropped. The input is `std::any::type_name`, so the result is
/// best effort and may change between compiler releases.
pub fn qualified_name<T: ?Sized>() -> String {
    normalize(type_name::<T>(), false)
}

pub fn qualified_name_of<T: ?Sized>(_value: &T) -> String {
    qualified_name::<T>()
}

/// Like [`qualified_name`] but keeps the crate root, e.g. `my_crate.tests.Foo`.
pub fn type_path<T: ?Sized>() -> String {
    normalize(type_name::<T>(), true)
}

/// Last segment of the type path of `T`, e.g. `ParseIntError`.
pub fn short_type_name<T: ?Sized>() -> String {
    short_name(&type_path::<T>()).to_owned()
}

/// Last segment of a dotted qualified name.
pub fn short_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Converts a `type_name` path to a dotted name.
pub fn normalize(path: &str, keep_root: bool) -> String {
    let segments = clean_segments(path, keep_root);
    if segments.is_empty() {
        return path.to_owned();
    }
    segments.join(".")
}

fn clean_segments(path: &str, keep_root: bool) -> Vec<String> {
    let raw = split_top_level(strip_type_prefix(path));
    let mut segments = Vec::with_capacity(raw.len());
    for (index, segment) in raw.iter().enumerate() {
        let segment = segment.trim();
        if segment.is_empty() || segment.starts_with('{') {
            continue;
        }
        if let Some(inner) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
            // `<Self as Trait>` names the impl's self type
            let self_ty = inner.split(" as ").next().unwrap_or(inner);
            segments.extend(clean_segments(self_ty, keep_root));
            continue;
        }
        if index == 0 && !keep_root && raw.len() > 1 {
            continue;
        }
        let name = segment.split('<').next().unwrap_or(segment);
        if !name.is_empty() {
            segments.push(name.to_owned());
        }
    }
    segments
}

fn strip_type_prefix(mut path: &str) -> &str {
    const PREFIXES: [&str; 5] = ["*mut ", "*const ", "mut ", "const ", "dyn "];
    loop {
        let trimmed = path.trim_start_matches('&').trim_start();
        let trimmed = PREFIXES
            .iter()
            .fold(trimmed, |p, prefix| p.strip_prefix(prefix).unwrap_or(p));
        if trimmed == path {
            return path;
        }
        path = trimmed;
    }
}

/// Splits on `::` outside of angle brackets.
fn split_top_level(path: &str) -> Vec<&str> {
    let bytes = path.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            // `->` in fn pointer types
            b'>' if i > 0 && bytes[i - 1] == b'-' => {}
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&path[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&path[start..]);
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Receiver;

    impl Receiver {
        fn method(&self) {}
    }

    #[test]
    fn drops_crate_root() {
        assert_eq!(normalize("funclog::foo", false), "foo");
        assert_eq!(normalize("funclog::foo", true), "funclog.foo");
        assert_eq!(normalize("main", false), "main");
    }

    #[test]
    fn closures_resolve_to_enclosing_scope() {
        assert_eq!(
            normalize("my_crate::scope::Foo::run::{{closure}}::{{closure}}", false),
            "scope.Foo.run"
        );
    }

    #[test]
    fn strips_generic_arguments() {
        assert_eq!(
            normalize("my_crate::wrap<i32, alloc::vec::Vec<u8>>", false),
            "wrap"
        );
        assert_eq!(
            normalize("my_crate::apply<fn(i32) -> i32>::run", false),
            "apply.run"
        );
    }

    #[test]
    fn qualified_self_uses_the_self_type() {
        assert_eq!(
            normalize("<my_crate::Foo as core::fmt::Display>::fmt", false),
            "Foo.fmt"
        );
        assert_eq!(normalize("&my_crate::Foo", true), "my_crate.Foo");
    }

    #[test]
    fn resolves_items() {
        fn nested() {}
        assert!(qualified_name_of(&nested).ends_with("resolves_items.nested"));
        assert!(qualified_name_of(&Receiver::method).ends_with("Receiver.method"));
        assert_eq!(short_type_name::<std::num::ParseIntError>(), "ParseIntError");
        assert_eq!(short_name("tests.Receiver.method"), "method");
    }
}
