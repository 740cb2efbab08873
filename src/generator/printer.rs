// Per-file output buffer shared by all plugins generating into the same file.

use super::names::base;

/// Handle returned by [`Printer::new_import`]. The import only reaches the
/// file header once [`Printer::use_import`] has been called with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportHandle(usize);

#[derive(Debug)]
struct Import {
    path: String,
    name: String,
    used: bool,
}

#[derive(Debug, Default)]
pub struct Printer {
    body: String,
    depth: usize,
    imports: Vec<Import>,
}

impl Printer {
    /// Write one line at the current indentation. An empty line is written bare.
    pub fn p(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        if !line.is_empty() {
            for _ in 0..self.depth {
                self.body.push('\t');
            }
            self.body.push_str(line);
        }
        self.body.push('\n');
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn outdent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Declare a Go package import. Declaring the same path twice yields the same handle.
    pub fn new_import(&mut self, path: &str) -> ImportHandle {
        if let Some(idx) = self.imports.iter().position(|i| i.path == path) {
            return ImportHandle(idx);
        }

        let stem: String = base(path)
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        let mut name = stem.clone();
        let mut n = 1;
        while self.imports.iter().any(|i| i.name == name) {
            name = format!("{stem}{n}");
            n += 1;
        }

        self.imports.push(Import {
            path: path.to_string(),
            name,
            used: false,
        });
        ImportHandle(self.imports.len() - 1)
    }

    /// Mark the import as used and return the local name to qualify identifiers with.
    pub fn use_import(&mut self, handle: ImportHandle) -> String {
        let import = &mut self.imports[handle.0];
        import.used = true;
        import.name.clone()
    }

    /// True while nothing has been written to the body.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// `(local name, path)` of every used import, sorted by path.
    pub fn used_imports(&self) -> Vec<(&str, &str)> {
        let mut used: Vec<_> = self
            .imports
            .iter()
            .filter(|i| i.used)
            .map(|i| (i.name.as_str(), i.path.as_str()))
            .collect();
        used.sort_by_key(|&(_, path)| path);
        used
    }
}
