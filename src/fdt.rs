//! Device-tree property lookup.
//!
//! Blob parsing lives outside this crate; drivers only ever ask for a named integer or
//! cell array under a node path, so that is all [`ConfigSource`] exposes. A missing
//! property comes back as `None`, which callers treat as "leave the register alone".

/// Read-only view of board configuration.
pub trait ConfigSource {
    /// First cell of `prop` under `node`, or `None` if either is missing.
    fn get_int(&self, node: &str, prop: &str) -> Option<i32>;

    /// Copy up to `out.len()` cells of `prop` into `out` and return how many were copied.
    fn get_u32_array(&self, node: &str, prop: &str, out: &mut [u32]) -> Option<usize>;

    fn has_node(&self, node: &str) -> bool;
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PropValue<'a> {
    Int(i32),
    Cells(&'a [u32]),
}

#[derive(Copy, Clone, Debug)]
pub struct Property<'a> {
    pub name: &'a str,
    pub value: PropValue<'a>,
}

impl<'a> Property<'a> {
    pub const fn int(name: &'a str, v: i32) -> Self {
        Self { name, value: PropValue::Int(v) }
    }

    pub const fn cells(name: &'a str, v: &'a [u32]) -> Self {
        Self { name, value: PropValue::Cells(v) }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Node<'a> {
    /// Slash-separated path relative to the root, e.g. `voltage-regulators/dcdc1`.
    pub path: &'a str,
    pub props: &'a [Property<'a>],
}

/// Static, compiled-in property set.
#[derive(Copy, Clone, Debug)]
pub struct PropertyTable<'a> {
    nodes: &'a [Node<'a>],
}

impl<'a> PropertyTable<'a> {
    pub const fn new(nodes: &'a [Node<'a>]) -> Self {
        Self { nodes }
    }

    fn find(&self, node: &str, prop: &str) -> Option<&PropValue<'a>> {
        self.nodes
            .iter()
            .find(|n| n.path == node)?
            .props
            .iter()
            .find(|p| p.name == prop)
            .map(|p| &p.value)
    }
}

impl ConfigSource for PropertyTable<'_> {
    fn get_int(&self, node: &str, prop: &str) -> Option<i32> {
        match self.find(node, prop)? {
            PropValue::Int(v) => Some(*v),
            // fdt cells are big-endian u32; reinterpret like fdtdec does
            PropValue::Cells(c) => c.first().map(|v| *v as i32),
        }
    }

    fn get_u32_array(&self, node: &str, prop: &str, out: &mut [u32]) -> Option<usize> {
        match self.find(node, prop)? {
            PropValue::Int(v) => {
                let slot = out.first_mut()?;
                *slot = *v as u32;
                Some(1)
            }
            PropValue::Cells(c) => {
                let n = c.len().min(out.len());
                out[..n].copy_from_slice(&c[..n]);
                Some(n)
            }
        }
    }

    fn has_node(&self, node: &str) -> bool {
        self.nodes.iter().any(|n| n.path == node)
    }
}
