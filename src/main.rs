use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_logging();

    let args: Vec<_> = std::env::args().collect();

    // Invoked by protoc: request on stdin, response on stdout
    if args.len() < 2 {
        let mut request = Vec::new();
        io::stdin().read_to_end(&mut request)?;
        let response = protoc_gen_jsonshim::run_request(&request)?;
        io::stdout().write_all(&response)?;
        return Ok(());
    }

    if args[1] == "-h" || args[1] == "--help" {
        print_usage(&args[0]);
        return Ok(());
    }

    let descriptor_bytes = if args[1] == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(&args[1]).with_context(|| format!("reading {}", args[1]))?
    };
    info!(bytes = descriptor_bytes.len(), "read descriptor set");

    let parameter = args.get(3).map(String::as_str).unwrap_or_default();
    let files = protoc_gen_jsonshim::run_descriptor_set(&descriptor_bytes, parameter)?;

    match args.get(2) {
        Some(out_dir) => protoc_gen_jsonshim::write_files(Path::new(out_dir), &files)?,
        None => {
            let mut stdout = io::stdout().lock();
            for file in &files {
                writeln!(stdout, "// >>> {}", file.name)?;
                stdout.write_all(file.content.as_bytes())?;
            }
        }
    }

    Ok(())
}

/// Log to stderr; stdout carries the plugin response.
fn init_logging() {
    let filter = EnvFilter::try_from_env("JSONSHIM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_usage(program: &str) {
    eprintln!("protoc-gen-jsonshim: oneof-aware MarshalJSON/UnmarshalJSON for gogo-protobuf");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  protoc --jsonshim_out=<params>:<dir> ...   (plugin mode, no arguments)");
    eprintln!("  {program} <descriptor.pb> [out_dir] [params]");
    eprintln!("  {program} - < descriptor.pb");
    eprintln!();
    eprintln!("ARGUMENTS:");
    eprintln!("  descriptor.pb   FileDescriptorSet from protoc");
    eprintln!("  out_dir         Directory to write generated files to (default: stdout)");
    eprintln!("  params          Generator parameters, e.g. emit_defaults,orig_name");
    eprintln!();
    eprintln!("PARAMETERS:");
    eprintln!("  plugins=a+b            Plugins to run (default: all)");
    eprintln!("  jsonpb_import=<path>   Go import path of jsonpb");
    eprintln!("  emit_defaults          Marshaler.EmitDefaults");
    eprintln!("  orig_name              Marshaler.OrigName");
    eprintln!("  enums_as_ints          Marshaler.EnumsAsInts");
    eprintln!("  allow_unknown_fields   Unmarshaler.AllowUnknownFields");
    eprintln!();
    eprintln!("ENVIRONMENT:");
    eprintln!("  JSONSHIM_LOG    Log filter (default: warn)");
    eprintln!();
    eprintln!("EXAMPLE:");
    eprintln!("  protoc --descriptor_set_out=desc.pb --include_imports my.proto");
    eprintln!("  {program} desc.pb gen/");
}
