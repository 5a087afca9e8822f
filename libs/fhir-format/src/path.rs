//! Element paths for error messages, e.g. `Patient.name[0].given[1]`.

use std::fmt;

#[derive(Debug, Default)]
pub(crate) struct ElementPath {
    segments: Vec<String>,
}

impl ElementPath {
    pub fn push_field(&mut self, name: &str) {
        if self.segments.is_empty() {
            self.segments.push(name.to_string());
        } else {
            self.segments.push(format!(".{name}"));
        }
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(format!("[{index}]"));
    }

    pub fn pop(&mut self) {
        self.segments.pop();
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            f.write_str(segment)?;
        }
        Ok(())
    }
}
