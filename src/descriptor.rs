// Descriptor model handed to plugins.
//
// The prost messages below mirror the subset of descriptor.proto and
// plugin.proto this generator reads. Field tags match the upstream schema so
// a full request decodes cleanly; everything not declared here is skipped.

/// `google.protobuf.compiler.CodeGeneratorRequest`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CodeGeneratorRequest {
    #[prost(string, repeated, tag = "1")]
    pub file_to_generate: Vec<String>,
    #[prost(string, optional, tag = "2")]
    pub parameter: Option<String>,
    #[prost(message, repeated, tag = "15")]
    pub proto_file: Vec<FileDescriptorProto>,
}

/// `google.protobuf.FileDescriptorSet`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileDescriptorSet {
    #[prost(message, repeated, tag = "1")]
    pub file: Vec<FileDescriptorProto>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileDescriptorProto {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub package: Option<String>,
    #[prost(message, repeated, tag = "4")]
    pub message_type: Vec<DescriptorProto>,
    #[prost(message, optional, tag = "8")]
    pub options: Option<FileOptions>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DescriptorProto {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    #[prost(message, repeated, tag = "2")]
    pub field: Vec<FieldDescriptorProto>,
    #[prost(message, repeated, tag = "3")]
    pub nested_type: Vec<DescriptorProto>,
    #[prost(message, optional, tag = "7")]
    pub options: Option<MessageOptions>,
    #[prost(message, repeated, tag = "8")]
    pub oneof_decl: Vec<OneofDescriptorProto>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FieldDescriptorProto {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
    #[prost(int32, optional, tag = "3")]
    pub number: Option<i32>,
    #[prost(string, optional, tag = "6")]
    pub type_name: Option<String>,
    #[prost(int32, optional, tag = "9")]
    pub oneof_index: Option<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OneofDescriptorProto {
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileOptions {
    #[prost(string, optional, tag = "11")]
    pub go_package: Option<String>,
    /// `gogoproto.typedecl_all`
    #[prost(bool, optional, tag = "63030")]
    pub typedecl_all: Option<bool>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MessageOptions {
    #[prost(bool, optional, tag = "7")]
    pub map_entry: Option<bool>,
    /// `gogoproto.typedecl`
    #[prost(bool, optional, tag = "64030")]
    pub typedecl: Option<bool>,
}

/// Read-only view of one input schema file.
#[derive(Debug)]
pub struct FileDescriptor<'a> {
    proto: &'a FileDescriptorProto,
    messages: Vec<MessageDescriptor<'a>>,
}

impl<'a> FileDescriptor<'a> {
    pub fn new(proto: &'a FileDescriptorProto) -> Self {
        let typedecl_all = proto
            .options
            .as_ref()
            .and_then(|o| o.typedecl_all)
            .unwrap_or(true);

        let mut messages = Vec::new();
        for message in &proto.message_type {
            flatten(message, &[], typedecl_all, &mut messages);
        }

        FileDescriptor { proto, messages }
    }

    /// Path of the schema file as given to the compiler, e.g. `a/b/foo.proto`.
    pub fn name(&self) -> &'a str {
        self.proto.name.as_deref().unwrap_or_default()
    }

    pub fn package(&self) -> &'a str {
        self.proto.package.as_deref().unwrap_or_default()
    }

    /// The `go_package` option, empty when unset.
    pub fn go_package(&self) -> &'a str {
        self.proto
            .options
            .as_ref()
            .and_then(|o| o.go_package.as_deref())
            .unwrap_or_default()
    }

    /// Every message declared in the file, nested ones included, parents first.
    pub fn messages(&self) -> &[MessageDescriptor<'a>] {
        &self.messages
    }
}

fn flatten<'a>(
    message: &'a DescriptorProto,
    parent: &[String],
    typedecl_all: bool,
    out: &mut Vec<MessageDescriptor<'a>>,
) {
    let mut type_name = parent.to_vec();
    type_name.push(message.name.clone().unwrap_or_default());

    let options = message.options.as_ref();
    out.push(MessageDescriptor {
        proto: message,
        type_name: type_name.clone(),
        map_entry: options.and_then(|o| o.map_entry).unwrap_or(false),
        has_type_decl: options.and_then(|o| o.typedecl).unwrap_or(typedecl_all),
    });

    for nested in &message.nested_type {
        flatten(nested, &type_name, typedecl_all, out);
    }
}

/// Read-only view of one message type within a file.
#[derive(Debug)]
pub struct MessageDescriptor<'a> {
    proto: &'a DescriptorProto,
    type_name: Vec<String>,
    map_entry: bool,
    has_type_decl: bool,
}

impl<'a> MessageDescriptor<'a> {
    pub fn name(&self) -> &'a str {
        self.proto.name.as_deref().unwrap_or_default()
    }

    /// Name path from the outermost enclosing message, e.g. `["Outer", "Inner"]`.
    pub fn type_name(&self) -> &[String] {
        &self.type_name
    }

    pub fn fields(&self) -> &'a [FieldDescriptorProto] {
        &self.proto.field
    }

    pub fn oneofs(&self) -> &'a [OneofDescriptorProto] {
        &self.proto.oneof_decl
    }

    /// Synthetic key/value wrapper backing a map field.
    pub fn is_map_entry(&self) -> bool {
        self.map_entry
    }

    /// Whether the host emits a Go struct for this message (gogoproto `typedecl`).
    pub fn has_type_decl(&self) -> bool {
        self.has_type_decl
    }
}
