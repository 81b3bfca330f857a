//! Stack frame layout for function bodies
//!
//! Parameters sit above the frame pointer, past the saved `%rbp` and the
//! return address; locals sit below it. Only `let`s in the function body's
//! immediate statement list get a frame slot.

use stackc_ast::{FunctionDecl, StatementKind};

/// Size in bytes of every value slot
pub const SLOT_SIZE: i64 = 8;

/// Offset of the first parameter from `%rbp` (saved `%rbp` + return address)
pub const PARAM_BASE_OFFSET: i64 = 2 * SLOT_SIZE;

/// A named slot at a fixed offset from the frame pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub name: String,
    pub offset: i64,
}

/// Offsets of a function's parameters and locals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameLayout {
    params: Vec<Slot>,
    locals: Vec<Slot>,
}

impl FrameLayout {
    /// Compute the layout of a function. Pure: the same declaration always
    /// yields the same layout.
    pub fn collect(func: &FunctionDecl) -> Self {
        let params = func
            .params
            .iter()
            .enumerate()
            .map(|(i, name)| Slot {
                name: name.clone(),
                offset: PARAM_BASE_OFFSET + i as i64 * SLOT_SIZE,
            })
            .collect();

        let locals = func
            .body
            .statements
            .iter()
            .filter_map(|stmt| match &stmt.kind {
                StatementKind::VarDecl(decl) => Some(decl.name.clone()),
                _ => None,
            })
            .enumerate()
            .map(|(i, name)| Slot {
                name,
                offset: -(i as i64 + 1) * SLOT_SIZE,
            })
            .collect();

        Self { params, locals }
    }

    pub fn params(&self) -> &[Slot] {
        &self.params
    }

    pub fn locals(&self) -> &[Slot] {
        &self.locals
    }

    /// Bytes reserved below the frame pointer
    pub fn stack_size(&self) -> i64 {
        self.locals.len() as i64 * SLOT_SIZE
    }

    // A repeated name resolves to its last slot.
    pub fn param_offset(&self, name: &str) -> Option<i64> {
        self.params.iter().rev().find(|s| s.name == name).map(|s| s.offset)
    }

    pub fn local_offset(&self, name: &str) -> Option<i64> {
        self.locals.iter().rev().find(|s| s.name == name).map(|s| s.offset)
    }

    /// Parameters shadow locals of the same name
    pub fn offset_of(&self, name: &str) -> Option<i64> {
        self.param_offset(name).or_else(|| self.local_offset(name))
    }
}
