// Plugin host: owns the registered plugins and drives them file by file.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::descriptor::{FileDescriptor, FileDescriptorProto};
use crate::error::GenerateError;

pub mod names;
mod params;
mod printer;

pub use params::Parameters;
pub use printer::{ImportHandle, Printer};

/// Host keys consumed by the generator itself rather than by a plugin.
const HOST_PARAMETERS: &[&str] = &["plugins"];

/// Shared code-generation context handed to every plugin at init time.
#[derive(Debug, Default)]
pub struct Context {
    pub parameters: Parameters,
}

/// A code generator plugin.
///
/// The host calls [`Plugin::init`] once, then [`Plugin::generate`] once per
/// input file, always on the same thread and in request order.
pub trait Plugin {
    /// Name used by the `plugins=` parameter to select this plugin.
    fn name(&self) -> &'static str;

    /// Parameter keys this plugin understands.
    fn parameters(&self) -> &'static [&'static str] {
        &[]
    }

    fn init(&mut self, _ctx: &Context) -> Result<(), GenerateError> {
        Ok(())
    }

    /// Contribute code for `file` into the file's output buffer.
    fn generate(&mut self, file: &FileDescriptor<'_>, out: &mut Printer);

    /// Output artifacts recorded so far, as an owned snapshot.
    fn artifacts(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }
}

/// Plugin lookup table owned by the driver.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginRegistry {
    pub fn register(&mut self, plugin: Box<dyn Plugin>) -> Result<(), GenerateError> {
        if self.find(plugin.name()).is_some() {
            return Err(GenerateError::DuplicatePlugin(plugin.name()));
        }
        self.plugins.push(plugin);
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&dyn Plugin> {
        self.plugins
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.plugins.iter().map(|p| p.name())
    }
}

/// Assembled output for one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Proto path of the input file.
    pub source: String,
    /// The input file's `go_package` option.
    pub go_package: String,
    pub content: String,
}

pub struct Generator {
    registry: PluginRegistry,
    context: Context,
    active: Option<Vec<usize>>,
}

impl Generator {
    pub fn new(registry: PluginRegistry, parameters: Parameters) -> Self {
        Generator {
            registry,
            context: Context { parameters },
            active: None,
        }
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Run the selected plugins over each file named in `file_to_generate`.
    ///
    /// Files no plugin wrote anything for are left out of the result.
    pub fn generate_files(
        &mut self,
        proto_files: &[FileDescriptorProto],
        file_to_generate: &[String],
    ) -> Result<Vec<GeneratedFile>, GenerateError> {
        let active = self.init_plugins()?;

        let mut generated = Vec::new();
        for name in file_to_generate {
            let proto = proto_files
                .iter()
                .find(|f| f.name.as_deref() == Some(name.as_str()))
                .ok_or_else(|| GenerateError::UnknownFile(name.clone()))?;
            let file = FileDescriptor::new(proto);

            let mut out = Printer::default();
            for &idx in &active {
                self.registry.plugins[idx].generate(&file, &mut out);
            }

            if out.is_empty() {
                debug!(file = name.as_str(), "no plugin output");
                continue;
            }
            generated.push(GeneratedFile {
                source: name.clone(),
                go_package: file.go_package().to_string(),
                content: assemble(&file, &out),
            });
        }
        Ok(generated)
    }

    /// Resolve the `plugins=` selection and init each selected plugin, once.
    fn init_plugins(&mut self) -> Result<Vec<usize>, GenerateError> {
        if let Some(active) = &self.active {
            return Ok(active.clone());
        }

        let params = &self.context.parameters;
        let active: Vec<usize> = match params.string("plugins") {
            Some(selection) => selection
                .split('+')
                .filter(|s| !s.is_empty())
                .map(|name| {
                    self.registry
                        .plugins
                        .iter()
                        .position(|p| p.name() == name)
                        .ok_or_else(|| GenerateError::UnknownPlugin(name.to_string()))
                })
                .collect::<Result<_, _>>()?,
            None => (0..self.registry.plugins.len()).collect(),
        };

        for key in params.keys() {
            let known = HOST_PARAMETERS.contains(&key)
                || active
                    .iter()
                    .any(|&idx| self.registry.plugins[idx].parameters().contains(&key));
            if !known {
                warn!(parameter = key, "ignoring unrecognized parameter");
            }
        }

        for &idx in &active {
            self.registry.plugins[idx].init(&self.context)?;
        }
        self.active = Some(active.clone());
        Ok(active)
    }
}

fn assemble(file: &FileDescriptor<'_>, out: &Printer) -> String {
    let mut src = String::new();
    src.push_str("// Code generated by protoc-gen-jsonshim. DO NOT EDIT.\n");
    src.push_str(&format!("// source: {}\n\n", file.name()));
    src.push_str(&format!("package {}\n\n", names::go_package_name(file)));

    let imports = out.used_imports();
    if !imports.is_empty() {
        src.push_str("import (\n");
        for (name, path) in imports {
            src.push_str(&format!("\t{name} {path:?}\n"));
        }
        src.push_str(")\n\n");
    }

    src.push_str(out.body());
    src
}
