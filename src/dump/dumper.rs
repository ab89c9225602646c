//! Bounded capture of values into [`Node`] trees.

use super::error::DumpError;
use super::limits::DumpLimits;
use super::node::Node;

/// Opt-in inspection interface for messages and handler results.
///
/// Implementations describe their shape through the [`Dumper`] builders,
/// which enforce the configured limits and guard against cycles.
///
/// ```
/// use log_to_panel::dump::{Dump, DumpError, Dumper, Node};
///
/// struct CreateOrder {
///     id: u64,
///     sku: String,
/// }
///
/// impl Dump for CreateOrder {
///     fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError> {
///         d.object("CreateOrder", |o| {
///             o.field("id", &self.id)?;
///             o.field("sku", &self.sku)
///         })
///     }
/// }
/// ```
pub trait Dump {
    fn dump(&self, d: &mut Dumper) -> Result<Node, DumpError>;
}

/// Capture state for a single dump.
#[derive(Debug)]
pub struct Dumper {
    limits: DumpLimits,
    depth: usize,
    active: Vec<usize>,
}

impl Dumper {
    /// Out-of-range limits are clamped, see [`DumpLimits::clamped`].
    pub fn new(limits: DumpLimits) -> Self {
        Self {
            limits: limits.clamped(),
            depth: 0,
            active: Vec::new(),
        }
    }

    pub fn limits(&self) -> &DumpLimits {
        &self.limits
    }

    /// Current container nesting level.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn value<T: Dump + ?Sized>(&mut self, value: &T) -> Result<Node, DumpError> {
        value.dump(self)
    }

    /// Capture a string, cut to `max_length` characters.
    pub fn text(&self, value: &str) -> Node {
        let length = value.chars().count();
        let value = if length > self.limits.max_length {
            value.chars().take(self.limits.max_length).collect()
        } else {
            value.to_string()
        };
        Node::Str { value, length }
    }

    /// Capture an ordered collection.
    pub fn seq<'v, I, T>(&mut self, label: &str, items: I) -> Result<Node, DumpError>
    where
        I: IntoIterator<Item = &'v T>,
        I::IntoIter: ExactSizeIterator,
        T: Dump + ?Sized + 'v,
    {
        let iter = items.into_iter();
        let len = iter.len();
        if self.collapses() {
            return Ok(Node::Seq {
                label: label.to_string(),
                len,
                items: Vec::new(),
                collapsed: true,
            });
        }

        let max_items = self.limits.max_items;
        let items = self.nested(|d| {
            iter.take(max_items)
                .map(|item| item.dump(d))
                .collect::<Result<Vec<_>, _>>()
        })?;

        Ok(Node::Seq {
            label: label.to_string(),
            len,
            items,
            collapsed: false,
        })
    }

    /// Capture a keyed collection.
    pub fn map<'v, I, K, V>(&mut self, label: &str, entries: I) -> Result<Node, DumpError>
    where
        I: IntoIterator<Item = (&'v K, &'v V)>,
        I::IntoIter: ExactSizeIterator,
        K: Dump + ?Sized + 'v,
        V: Dump + ?Sized + 'v,
    {
        let iter = entries.into_iter();
        let len = iter.len();
        if self.collapses() {
            return Ok(Node::Map {
                label: label.to_string(),
                len,
                entries: Vec::new(),
                collapsed: true,
            });
        }

        let max_items = self.limits.max_items;
        let entries = self.nested(|d| {
            iter.take(max_items)
                .map(|(key, value)| -> Result<(Node, Node), DumpError> {
                    Ok((key.dump(d)?, value.dump(d)?))
                })
                .collect::<Result<Vec<_>, _>>()
        })?;

        Ok(Node::Map {
            label: label.to_string(),
            len,
            entries,
            collapsed: false,
        })
    }

    /// Capture a struct-like value field by field.
    pub fn object<F>(&mut self, class: &str, describe: F) -> Result<Node, DumpError>
    where
        F: FnOnce(&mut Fields<'_>) -> Result<(), DumpError>,
    {
        if self.collapses() {
            return Ok(Node::Object {
                class: class.to_string(),
                fields: Vec::new(),
                omitted: 0,
                collapsed: true,
            });
        }

        let (fields, omitted) = self.nested(|d| {
            let mut fields = Fields {
                dumper: d,
                entries: Vec::new(),
                omitted: 0,
            };
            describe(&mut fields)?;
            Ok((fields.entries, fields.omitted))
        })?;

        Ok(Node::Object {
            class: class.to_string(),
            fields,
            omitted,
            collapsed: false,
        })
    }

    /// Dump a shared allocation, emitting [`Node::Recursion`] when the same
    /// address is already on the current dump path.
    pub fn shared<F>(&mut self, address: usize, inner: F) -> Result<Node, DumpError>
    where
        F: FnOnce(&mut Self) -> Result<Node, DumpError>,
    {
        if self.active.contains(&address) {
            return Ok(Node::Recursion);
        }
        self.active.push(address);
        let node = inner(self);
        self.active.pop();
        node
    }

    fn collapses(&self) -> bool {
        self.depth >= self.limits.max_depth
    }

    fn nested<R, F>(&mut self, inner: F) -> Result<R, DumpError>
    where
        F: FnOnce(&mut Self) -> Result<R, DumpError>,
    {
        self.depth += 1;
        let result = inner(self);
        self.depth -= 1;
        result
    }
}

/// Field collector handed to [`Dumper::object`].
pub struct Fields<'d> {
    dumper: &'d mut Dumper,
    entries: Vec<(String, Node)>,
    omitted: usize,
}

impl Fields<'_> {
    pub fn field<T: Dump + ?Sized>(&mut self, name: &str, value: &T) -> Result<(), DumpError> {
        if self.entries.len() >= self.dumper.limits.max_items {
            self.omitted += 1;
            return Ok(());
        }
        let node = value.dump(self.dumper)?;
        self.entries.push((name.to_string(), node));
        Ok(())
    }
}
