//! Derivation of property names from accessor method names.
//!
//! Only the net effect is relied upon: the result is always capitalized, and
//! `setFoo`, `getFoo`, `foo`, `set_foo` and `get_foo` all name `Foo`.

const GETTER_PREFIX: &str = "get";
const SETTER_PREFIX: &str = "set";

/// Returns the capitalized property name addressed by `method`.
pub fn property_name(method: &str) -> String {
    let stem = strip_prefix(method, GETTER_PREFIX)
        .or_else(|| strip_prefix(method, SETTER_PREFIX))
        .unwrap_or(method);
    pascal_case(stem)
}

/// Whether `method` is shaped like a getter, i.e. carries a `get` prefix.
pub fn is_getter(method: &str) -> bool {
    strip_prefix(method, GETTER_PREFIX).is_some()
}

/// Any leading prefix is stripped, along with one `_` after it. A name that
/// is nothing but the prefix keeps it.
fn strip_prefix<'a>(method: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = method.strip_prefix(prefix)?;
    let rest = rest.strip_prefix('_').unwrap_or(rest);
    (!rest.is_empty()).then_some(rest)
}

fn pascal_case(name: &str) -> String {
    if name.contains('_') {
        name.split('_').filter(|s| !s.is_empty()).map(capitalize).collect()
    } else {
        capitalize(name)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
