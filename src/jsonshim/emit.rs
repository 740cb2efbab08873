// Emits the MarshalJSON/UnmarshalJSON delegation methods and the per-file
// jsonpb singletons they delegate to.

use tracing::debug;

use super::Options;
use super::filter::needs_json_methods;
use super::paths::{marshaler_name, unmarshaler_name};
use crate::descriptor::FileDescriptor;
use crate::generator::Printer;
use crate::generator::names::camel_case_slice;

/// Write methods for every qualifying message in `file`, followed by the
/// shared marshaler pair. Returns false, having written nothing, when no
/// message qualifies.
pub(crate) fn generate(file: &FileDescriptor<'_>, options: &Options, out: &mut Printer) -> bool {
    let bytes_pkg = out.new_import("bytes");
    let marshaler = marshaler_name(file);
    let unmarshaler = unmarshaler_name(file);

    let mut wrote_methods = false;
    for message in file.messages() {
        if !needs_json_methods(file, message) {
            debug!(
                file = file.name(),
                message = message.name(),
                map_entry = message.is_map_entry(),
                type_decl = message.has_type_decl(),
                "skipping message"
            );
            continue;
        }

        let type_name = camel_case_slice(message.type_name());
        debug!(
            file = file.name(),
            type_name = type_name.as_str(),
            fields = message.fields().len(),
            oneofs = message.oneofs().len(),
            "generating JSON methods"
        );

        out.p(format!("// MarshalJSON is a custom marshaler supporting oneof fields for {type_name}"));
        out.p(format!("func (this *{type_name}) MarshalJSON() ([]byte, error) {{"));
        out.indent();
        out.p(format!("str, err := {marshaler}.MarshalToString(this)"));
        out.p("return []byte(str), err");
        out.outdent();
        out.p("}");
        out.p("");

        let bytes = out.use_import(bytes_pkg);
        out.p(format!("// UnmarshalJSON is a custom unmarshaler supporting oneof fields for {type_name}"));
        out.p(format!("func (this *{type_name}) UnmarshalJSON(b []byte) error {{"));
        out.indent();
        out.p(format!("return {unmarshaler}.Unmarshal({bytes}.NewReader(b), this)"));
        out.outdent();
        out.p("}");
        out.p("");

        wrote_methods = true;
    }

    if !wrote_methods {
        return false;
    }

    let jsonpb_pkg = out.new_import(&options.jsonpb_import);
    let jsonpb = out.use_import(jsonpb_pkg);
    out.p("var (");
    out.indent();
    out.p(format!(
        "{marshaler} = &{jsonpb}.Marshaler{{{}}}",
        options.marshaler_fields()
    ));
    out.p(format!(
        "{unmarshaler} = &{jsonpb}.Unmarshaler{{{}}}",
        options.unmarshaler_fields()
    ));
    out.outdent();
    out.p(")");
    true
}
