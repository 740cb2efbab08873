// Identifiers and output artifact names derived from a file's name and go_package.

use crate::descriptor::FileDescriptor;
use crate::generator::names::{base, file_base_identifier, join, strip_ext};

/// Suffix of every file produced by this plugin.
///
/// Build tooling enumerates generated files by it; do not change.
pub const FILE_NAME_SUFFIX: &str = "_json_generated.go";

/// Name of the file's shared `jsonpb.Marshaler` variable.
pub fn marshaler_name(file: &FileDescriptor<'_>) -> String {
    format!("{}Marshaler", file_base_identifier(file))
}

/// Name of the file's shared `jsonpb.Unmarshaler` variable.
pub fn unmarshaler_name(file: &FileDescriptor<'_>) -> String {
    format!("{}Unmarshaler", file_base_identifier(file))
}

/// Import path carried by a `go_package` option, or `""` when it only names a package.
pub fn import_path(go_package: &str) -> &str {
    if let Some((path, _)) = go_package.split_once(';') {
        path
    } else if go_package.rfind('/').is_some_and(|i| i > 0) {
        go_package
    } else {
        ""
    }
}

/// Logical name of the output artifact generated for the proto file at `path`.
///
/// With an import path the artifact lands in that Go package directory;
/// otherwise it sits next to the proto file.
pub fn artifact_name(go_package: &str, path: &str) -> String {
    let stem = strip_ext(path);
    let import_path = import_path(go_package);
    let name = if import_path.is_empty() {
        stem.to_string()
    } else {
        join(import_path, base(stem))
    };
    format!("{name}{FILE_NAME_SUFFIX}")
}
