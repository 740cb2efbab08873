// Generator parameters: the `--<plugin>_opt` / `--<plugin>_out=<params>:<dir>`
// string protoc forwards in `CodeGeneratorRequest.parameter`.

use std::collections::BTreeMap;

use crate::error::GenerateError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: BTreeMap<String, String>,
}

impl Parameters {
    /// Parse `k=v,k2=v2`. A bare `k` is stored with an empty value.
    pub fn parse(raw: &str) -> Self {
        let entries = raw
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| match part.split_once('=') {
                Some((k, v)) => (k.trim().to_string(), v.trim().to_string()),
                None => (part.to_string(), String::new()),
            })
            .collect();
        Parameters { entries }
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Absent keys are `false`; a bare key is `true`.
    pub fn bool(&self, key: &str) -> Result<bool, GenerateError> {
        match self.string(key) {
            None => Ok(false),
            Some("" | "true" | "1") => Ok(true),
            Some("false" | "0") => Ok(false),
            Some(other) => Err(GenerateError::InvalidBool {
                key: key.to_string(),
                value: other.to_string(),
            }),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
