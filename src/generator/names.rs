// Go identifier and path naming, compatible with protoc-gen-gogo.

use crate::descriptor::FileDescriptor;

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

/// Convert a proto identifier to an exported Go identifier.
///
/// `_` followed by a lower case letter is dropped and the letter upper-cased;
/// a leading `_` becomes `X`. Digits and other underscores are kept, so
/// `foo_bar` becomes `FooBar` and `Outer_Inner` stays `Outer_Inner`.
pub fn camel_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;

    if chars.first() == Some(&'_') {
        out.push('X');
        i += 1;
    }

    while i < chars.len() {
        let c = chars[i];
        let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
        if c == '_' && next_is_lower {
            i += 1;
            continue;
        }
        if c.is_ascii_digit() {
            out.push(c);
            i += 1;
            continue;
        }
        out.push(c.to_ascii_uppercase());
        i += 1;
        // Lower case run following an upper-cased letter is kept as is
        while chars.get(i).is_some_and(|n| n.is_ascii_lowercase()) {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Go type name of a (possibly nested) message: path elements joined by `_`.
pub fn camel_case_slice(parts: &[String]) -> String {
    camel_case(&parts.join("_"))
}

/// Last element of a slash separated path.
pub fn base(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.is_empty() { "." } else { "/" };
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Drop the extension of the last path element, if any.
pub fn strip_ext(path: &str) -> &str {
    let last = path.rfind('/').map_or(0, |i| i + 1);
    match path[last..].rfind('.') {
        Some(dot) => &path[..last + dot],
        None => path,
    }
}

/// Join two slash separated paths and clean the result, like Go's `path.Join`.
pub fn join(dir: &str, name: &str) -> String {
    match (dir.is_empty(), name.is_empty()) {
        (true, true) => String::new(),
        (true, _) => clean(name),
        (_, true) => clean(dir),
        _ => clean(&format!("{dir}/{name}")),
    }
}

/// Lexically simplify a slash separated path, like Go's `path.Clean`.
///
/// Repeated `/` collapse, `.` elements drop, and `..` cancels the element
/// before it. Leading `..` survive on relative paths and vanish at the root.
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut elems: Vec<&str> = Vec::new();
    for elem in path.split('/') {
        match elem {
            "" | "." => {}
            ".." => match elems.last() {
                Some(&last) if last != ".." => {
                    elems.pop();
                }
                _ if rooted => {}
                _ => elems.push(".."),
            },
            _ => elems.push(elem),
        }
    }

    let joined = elems.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Identifier derived from the file's base name, e.g. `my-api.v1.proto` -> `MyApiV1`.
pub fn file_base_identifier(file: &FileDescriptor<'_>) -> String {
    let name = base(file.name())
        .replace(".proto", "")
        .replace(['-', '.'], "_");
    camel_case(&name)
}

/// Go package clause name for the file.
pub fn go_package_name(file: &FileDescriptor<'_>) -> String {
    let opt = file.go_package();
    let raw = if let Some((_, name)) = opt.split_once(';') {
        name.to_string()
    } else if !opt.is_empty() {
        base(opt).to_string()
    } else if !file.package().is_empty() {
        file.package().to_string()
    } else {
        base(strip_ext(file.name())).to_string()
    };
    sanitize_package_name(&raw)
}

fn sanitize_package_name(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.is_empty()
        || out.starts_with(|c: char| c.is_ascii_digit())
        || GO_KEYWORDS.contains(&out.as_str())
    {
        out.insert(0, '_');
    }
    out
}
