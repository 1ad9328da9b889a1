//! Data-driven key/value parameter file templates.
//!
//! A template is an ordered list of lines. Entry lines are written as
//! `key`, a fixed separator, then a value that is either literal text or
//! computed from a context.

use std::path::Path;

use ascii_table::atomic_write;
use tracing::info;

use crate::error::CouplingResult;

/// Value of an entry line.
pub enum Value<C> {
    Literal(&'static str),
    Computed(fn(&C) -> String),
}

/// One line of a parameter file.
pub enum Line<C> {
    Blank,
    /// `[name]`
    Section(&'static str),
    Entry {
        key: &'static str,
        sep: &'static str,
        value: Value<C>,
    },
}

impl<C> Line<C> {
    pub fn literal(key: &'static str, sep: &'static str, value: &'static str) -> Self {
        Line::Entry {
            key,
            sep,
            value: Value::Literal(value),
        }
    }

    pub fn computed(key: &'static str, sep: &'static str, value: fn(&C) -> String) -> Self {
        Line::Entry {
            key,
            sep,
            value: Value::Computed(value),
        }
    }

    fn render(&self, ctx: &C, out: &mut String) {
        match self {
            Line::Blank => {}
            Line::Section(name) => {
                out.push('[');
                out.push_str(name);
                out.push(']');
            }
            Line::Entry { key, sep, value } => {
                out.push_str(key);
                out.push_str(sep);
                match value {
                    Value::Literal(text) => out.push_str(text),
                    Value::Computed(f) => out.push_str(&f(ctx)),
                }
            }
        }
        out.push('\n');
    }
}

/// Ordered list of lines rendered against a context of type `C`.
pub struct Template<C> {
    lines: Vec<Line<C>>,
}

impl<C> Template<C> {
    pub fn new(lines: Vec<Line<C>>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[Line<C>] {
        &self.lines
    }

    /// Render the whole file.
    pub fn render(&self, ctx: &C) -> String {
        let mut out = String::new();
        for line in &self.lines {
            line.render(ctx, &mut out);
        }
        out
    }

    /// Values of every entry with `key`, in file order.
    pub fn values(&self, key: &str, ctx: &C) -> Vec<String> {
        self.lines
            .iter()
            .filter_map(|line| match line {
                Line::Entry { key: k, value, .. } if *k == key => Some(match value {
                    Value::Literal(text) => text.to_string(),
                    Value::Computed(f) => f(ctx),
                }),
                _ => None,
            })
            .collect()
    }

    /// Value of the first entry with `key`.
    pub fn value(&self, key: &str, ctx: &C) -> Option<String> {
        self.values(key, ctx).into_iter().next()
    }

    /// Render and write atomically to `path`.
    pub fn write<P: AsRef<Path>>(&self, path: P, ctx: &C) -> CouplingResult<()> {
        let path = path.as_ref();
        let text = self.render(ctx);
        atomic_write(path, text.as_bytes())?;
        info!(path = %path.display(), lines = self.lines.len(), "Wrote parameter file");
        Ok(())
    }
}
