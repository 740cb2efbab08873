use prost::Message;
use prost_types::compiler::CodeGeneratorResponse;
use protoc_gen_jsonshim::descriptor::{
    CodeGeneratorRequest, DescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    FileDescriptorSet, FileOptions, MessageOptions, OneofDescriptorProto,
};
use protoc_gen_jsonshim::{run_descriptor_set, run_request};

fn message(name: &str) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

/// `message Rule { oneof match { string exact = 1; string prefix = 2; } map<string,string> labels = 3; }`
fn rule() -> DescriptorProto {
    let field = |name: &str, number: i32, oneof_index: Option<i32>| FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        oneof_index,
        ..Default::default()
    };
    DescriptorProto {
        field: vec![
            field("exact", 1, Some(0)),
            field("prefix", 2, Some(0)),
            FieldDescriptorProto {
                type_name: Some(".test.Rule.LabelsEntry".to_string()),
                ..field("labels", 3, None)
            },
        ],
        nested_type: vec![DescriptorProto {
            options: Some(MessageOptions {
                map_entry: Some(true),
                ..Default::default()
            }),
            ..message("LabelsEntry")
        }],
        oneof_decl: vec![OneofDescriptorProto {
            name: Some("match".to_string()),
        }],
        ..message("Rule")
    }
}

fn file(name: &str, go_package: Option<&str>, messages: Vec<DescriptorProto>) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_string()),
        package: Some("test".to_string()),
        message_type: messages,
        options: go_package.map(|p| FileOptions {
            go_package: Some(p.to_string()),
            ..Default::default()
        }),
    }
}

fn request(parameter: Option<&str>) -> CodeGeneratorRequest {
    CodeGeneratorRequest {
        file_to_generate: vec!["a/b/foo.proto".to_string(), "a/b/maps.proto".to_string()],
        parameter: parameter.map(str::to_string),
        proto_file: vec![
            file("google/protobuf/empty.proto", None, vec![message("Empty")]),
            file("a/b/foo.proto", Some("github.com/x/y;y"), vec![rule()]),
            file(
                "a/b/maps.proto",
                None,
                vec![DescriptorProto {
                    options: Some(MessageOptions {
                        typedecl: Some(false),
                        ..Default::default()
                    }),
                    ..message("Hidden")
                }],
            ),
        ],
    }
}

fn respond(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    let bytes = run_request(&request.encode_to_vec()).unwrap();
    CodeGeneratorResponse::decode(bytes.as_slice()).unwrap()
}

#[test]
fn test_request_produces_one_file_per_qualifying_input() {
    let response = respond(&request(None));

    assert_eq!(response.error, None);
    assert_eq!(response.file.len(), 1);

    let file = &response.file[0];
    assert_eq!(file.name(), "github.com/x/y/foo_json_generated.go");
    let content = file.content();
    assert!(content.starts_with("// Code generated by protoc-gen-jsonshim. DO NOT EDIT.\n"));
    assert!(content.contains("// source: a/b/foo.proto\n"));
    assert!(content.contains("\npackage y\n"));
    assert!(content.contains("\tbytes \"bytes\"\n"));
    assert!(content.contains("\tjsonpb \"github.com/gogo/protobuf/jsonpb\"\n"));
    assert!(content.contains("func (this *Rule) MarshalJSON() ([]byte, error) {"));
    assert!(content.contains("func (this *Rule) UnmarshalJSON(b []byte) error {"));
    assert!(!content.contains("LabelsEntry"));
    assert!(content.contains("\tFooMarshaler = &jsonpb.Marshaler{}\n"));
    assert!(content.contains("\tFooUnmarshaler = &jsonpb.Unmarshaler{}\n"));
    // Imported dependency files are not generated
    assert!(!content.contains("Empty"));
}

#[test]
fn test_request_is_idempotent() {
    let req = request(Some("emit_defaults"));
    assert_eq!(respond(&req), respond(&req));
}

#[test]
fn test_parameters_reach_the_plugin() {
    let response = respond(&request(Some(
        "plugins=jsonshim,orig_name,allow_unknown_fields,jsonpb_import=github.com/golang/protobuf/jsonpb",
    )));
    let content = response.file[0].content();
    assert!(content.contains("\tjsonpb \"github.com/golang/protobuf/jsonpb\"\n"));
    assert!(content.contains("FooMarshaler = &jsonpb.Marshaler{OrigName: true}"));
    assert!(content.contains("FooUnmarshaler = &jsonpb.Unmarshaler{AllowUnknownFields: true}"));
}

#[test]
fn test_errors_are_reported_in_response() {
    let response = respond(&request(Some("plugins=gogo")));
    assert!(response.file.is_empty());
    assert_eq!(
        response.error(),
        "plugins=gogo: no plugin with that name is registered"
    );

    let response = respond(&request(Some("emit_defaults=sometimes")));
    assert!(response.error().contains("emit_defaults"));

    let mut req = request(None);
    req.file_to_generate.push("missing.proto".to_string());
    let response = respond(&req);
    assert!(response.error().contains("missing.proto"));
}

#[test]
fn test_plugins_selection_without_jsonshim_generates_nothing() {
    let response = respond(&request(Some("plugins=")));
    assert_eq!(response.error, None);
    assert!(response.file.is_empty());
}

#[test]
fn test_garbage_request_is_an_error() {
    assert!(run_request(&[0xff, 0xff, 0xff]).is_err());
}

#[test]
fn test_descriptor_set_generates_every_file() {
    let set = FileDescriptorSet {
        file: vec![
            file("a/b/foo.proto", None, vec![rule()]),
            file("c/bar.proto", Some("example.com/bar"), vec![message("Bar")]),
        ],
    };
    let files = run_descriptor_set(&set.encode_to_vec(), "").unwrap();
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        ["a/b/foo_json_generated.go", "example.com/bar/bar_json_generated.go"]
    );
    assert!(files[0].content.contains("\npackage test\n"));
    assert!(files[1].content.contains("\npackage bar\n"));
    assert!(files[1].content.contains("BarMarshaler.MarshalToString(this)"));
}
