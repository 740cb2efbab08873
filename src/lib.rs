//! `protoc-gen-jsonshim`: a protoc plugin generating oneof-aware
//! `MarshalJSON`/`UnmarshalJSON` methods for gogo-protobuf Go types.
//!
//! [`run_request`] implements the protoc plugin protocol end to end;
//! [`run_descriptor_set`] runs the same pipeline over a `FileDescriptorSet`.

use std::fs;
use std::path::{Component, Path};

use anyhow::{Context as _, Result, bail};
use prost::Message;
use prost_types::compiler::CodeGeneratorResponse;
use prost_types::compiler::code_generator_response::{Feature, File};
use tracing::{error, info};

pub mod descriptor;
pub mod error;
pub mod generator;
pub mod jsonshim;

use descriptor::{CodeGeneratorRequest, FileDescriptorProto, FileDescriptorSet};
use error::GenerateError;
use generator::{Generator, Parameters, PluginRegistry};
use jsonshim::{JsonShim, PLUGIN_NAME, paths::artifact_name};

/// A file to be written by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub name: String,
    pub content: String,
}

/// Plugins available to the driver.
pub fn registry() -> Result<PluginRegistry, GenerateError> {
    let mut registry = PluginRegistry::default();
    registry.register(Box::new(JsonShim::new()))?;
    Ok(registry)
}

/// Run generation and keep only the files the plugin recorded as written.
pub fn generate(
    proto_files: &[FileDescriptorProto],
    file_to_generate: &[String],
    parameter: &str,
) -> Result<Vec<OutputFile>, GenerateError> {
    let mut generator = Generator::new(registry()?, Parameters::parse(parameter));
    let generated = generator.generate_files(proto_files, file_to_generate)?;

    let written = generator
        .registry()
        .find(PLUGIN_NAME)
        .map(|plugin| plugin.artifacts())
        .unwrap_or_default();

    Ok(generated
        .into_iter()
        .filter_map(|file| {
            let name = artifact_name(&file.go_package, &file.source);
            written.contains(&name).then_some(OutputFile {
                name,
                content: file.content,
            })
        })
        .collect())
}

/// Decode a `CodeGeneratorRequest` and return the encoded `CodeGeneratorResponse`.
///
/// Generation failures are reported in the response's `error` field, as protoc
/// expects; only an undecodable request is an `Err`.
pub fn run_request(request_bytes: &[u8]) -> Result<Vec<u8>> {
    let request = CodeGeneratorRequest::decode(request_bytes)
        .context("failed to decode CodeGeneratorRequest")?;

    let parameter = request.parameter.as_deref().unwrap_or_default();
    let response = match generate(&request.proto_file, &request.file_to_generate, parameter) {
        Ok(files) => CodeGeneratorResponse {
            supported_features: Some(Feature::Proto3Optional as u64),
            file: files
                .into_iter()
                .map(|f| File {
                    name: Some(f.name),
                    content: Some(f.content),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        },
        Err(err) => {
            error!(%err, "generation failed");
            CodeGeneratorResponse {
                error: Some(err.to_string()),
                ..Default::default()
            }
        }
    };

    Ok(response.encode_to_vec())
}

/// Generate for every file in a binary `FileDescriptorSet`.
pub fn run_descriptor_set(descriptor_bytes: &[u8], parameter: &str) -> Result<Vec<OutputFile>> {
    let set = FileDescriptorSet::decode(descriptor_bytes)
        .context("failed to decode FileDescriptorSet")?;
    let names: Vec<String> = set.file.iter().filter_map(|f| f.name.clone()).collect();
    Ok(generate(&set.file, &names, parameter)?)
}

/// Write `files` under `out_dir`, creating directories as needed.
///
/// Names are relative to `out_dir`; an absolute name or one with `..`
/// elements is rejected before anything is written.
pub fn write_files(out_dir: &Path, files: &[OutputFile]) -> Result<()> {
    for file in files {
        let escapes = Path::new(&file.name)
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            bail!("refusing to write {}: outside of {}", file.name, out_dir.display());
        }
    }

    for file in files {
        let path = out_dir.join(&file.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&path, &file.content).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "generated");
    }
    Ok(())
}
