//! The `jsonshim` plugin.
//!
//! A naive field-by-field JSON encoding of a gogo-protobuf struct writes every
//! backing field of a `oneof`. This plugin gives each generated message
//! `MarshalJSON`/`UnmarshalJSON` methods that hand the whole message to
//! `jsonpb`, which encodes only the selected member and dispatches on the
//! member's key when decoding. The generated methods hold no per-message
//! logic; they share one marshaler and one unmarshaler per proto file.

use std::collections::BTreeSet;

use tracing::info;

use crate::descriptor::FileDescriptor;
use crate::error::GenerateError;
use crate::generator::{Context, Plugin, Printer};

mod emit;
pub mod filter;
pub mod paths;

pub use paths::FILE_NAME_SUFFIX;

pub const PLUGIN_NAME: &str = "jsonshim";

pub const DEFAULT_JSONPB_IMPORT: &str = "github.com/gogo/protobuf/jsonpb";

const PARAMETERS: &[&str] = &[
    "jsonpb_import",
    "emit_defaults",
    "orig_name",
    "enums_as_ints",
    "allow_unknown_fields",
];

/// Settings for the generated marshaler pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub jsonpb_import: String,
    pub emit_defaults: bool,
    pub orig_name: bool,
    pub enums_as_ints: bool,
    pub allow_unknown_fields: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            jsonpb_import: DEFAULT_JSONPB_IMPORT.to_string(),
            emit_defaults: false,
            orig_name: false,
            enums_as_ints: false,
            allow_unknown_fields: false,
        }
    }
}

impl Options {
    pub fn from_context(ctx: &Context) -> Result<Self, GenerateError> {
        let params = &ctx.parameters;
        Ok(Options {
            jsonpb_import: params
                .string("jsonpb_import")
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_JSONPB_IMPORT)
                .to_string(),
            emit_defaults: params.bool("emit_defaults")?,
            orig_name: params.bool("orig_name")?,
            enums_as_ints: params.bool("enums_as_ints")?,
            allow_unknown_fields: params.bool("allow_unknown_fields")?,
        })
    }

    /// Go composite literal fields for `jsonpb.Marshaler`.
    fn marshaler_fields(&self) -> String {
        let fields = [
            (self.enums_as_ints, "EnumsAsInts"),
            (self.emit_defaults, "EmitDefaults"),
            (self.orig_name, "OrigName"),
        ];
        fields
            .iter()
            .filter(|(set, _)| *set)
            .map(|(_, name)| format!("{name}: true"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Go composite literal fields for `jsonpb.Unmarshaler`.
    fn unmarshaler_fields(&self) -> String {
        if self.allow_unknown_fields {
            "AllowUnknownFields: true".to_string()
        } else {
            String::new()
        }
    }
}

#[derive(Debug, Default)]
pub struct JsonShim {
    options: Options,
    files_written: BTreeSet<String>,
}

impl JsonShim {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the artifacts generated so far.
    pub fn files_written(&self) -> BTreeSet<String> {
        self.files_written.clone()
    }
}

impl Plugin for JsonShim {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn parameters(&self) -> &'static [&'static str] {
        PARAMETERS
    }

    fn init(&mut self, ctx: &Context) -> Result<(), GenerateError> {
        self.options = Options::from_context(ctx)?;
        Ok(())
    }

    fn generate(&mut self, file: &FileDescriptor<'_>, out: &mut Printer) {
        if !emit::generate(file, &self.options, out) {
            return;
        }

        let artifact = paths::artifact_name(file.go_package(), file.name());
        info!(file = file.name(), artifact = artifact.as_str(), "generated JSON shim");
        self.files_written.insert(artifact);
    }

    fn artifacts(&self) -> BTreeSet<String> {
        self.files_written()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::test_util::{file, map_entry, message, without_typedecl};
    use crate::generator::Parameters;

    fn run(plugin: &mut JsonShim, protos: &[crate::descriptor::FileDescriptorProto]) -> Vec<String> {
        protos
            .iter()
            .map(|proto| {
                let mut out = Printer::default();
                plugin.generate(&FileDescriptor::new(proto), &mut out);
                out.body().to_string()
            })
            .collect()
    }

    #[test]
    fn test_files_written_only_for_qualifying_files() {
        let protos = vec![
            file("a/b/foo.proto", "github.com/x/y;y", vec![message("Foo")]),
            file("a/b/bar.proto", "", vec![message("Bar")]),
            file("a/b/maps.proto", "", vec![map_entry("OnlyEntry")]),
            file("a/b/ext.proto", "", vec![without_typedecl("Ext")]),
        ];
        let mut plugin = JsonShim::new();
        assert!(plugin.files_written().is_empty());

        let bodies = run(&mut plugin, &protos);
        assert!(bodies[2].is_empty());
        assert!(bodies[3].is_empty());
        assert_eq!(
            plugin.files_written(),
            BTreeSet::from([
                "a/b/bar_json_generated.go".to_string(),
                "github.com/x/y/foo_json_generated.go".to_string(),
            ])
        );
        assert_eq!(plugin.artifacts(), plugin.files_written());
    }

    #[test]
    fn test_generation_is_idempotent() {
        let protos = vec![
            file("a/b/foo.proto", "github.com/x/y;y", vec![message("Foo")]),
            file("c/bar.proto", "", vec![message("Bar"), message("Baz")]),
        ];

        let mut first = JsonShim::new();
        let first_bodies = run(&mut first, &protos);
        let mut second = JsonShim::new();
        let second_bodies = run(&mut second, &protos);
        assert_eq!(first_bodies, second_bodies);
        assert_eq!(first.files_written(), second.files_written());

        // Re-running on the same instance leaves the artifact set unchanged
        let again = run(&mut first, &protos);
        assert_eq!(again, first_bodies);
        assert_eq!(first.files_written(), second.files_written());
    }

    #[test]
    fn test_options_from_parameters() {
        let ctx = Context {
            parameters: Parameters::parse(
                "jsonpb_import=github.com/golang/protobuf/jsonpb,emit_defaults,enums_as_ints=true",
            ),
        };
        let options = Options::from_context(&ctx).unwrap();
        assert_eq!(options.jsonpb_import, "github.com/golang/protobuf/jsonpb");
        assert_eq!(options.marshaler_fields(), "EnumsAsInts: true, EmitDefaults: true");
        assert_eq!(options.unmarshaler_fields(), "");

        let ctx = Context {
            parameters: Parameters::parse("jsonpb_import="),
        };
        assert_eq!(Options::from_context(&ctx).unwrap(), Options::default());
    }

    #[test]
    fn test_init_rejects_malformed_option() {
        let ctx = Context {
            parameters: Parameters::parse("orig_name=maybe"),
        };
        let mut plugin = JsonShim::new();
        assert!(matches!(
            plugin.init(&ctx),
            Err(GenerateError::InvalidBool { key, .. }) if key == "orig_name"
        ));
    }
}
