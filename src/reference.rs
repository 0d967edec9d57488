//! Symbol references and call references (spec §3, "Symbol Reference").

use serde::{Deserialize, Serialize};

use crate::types::{Location, ScopeId, SymbolId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceKind {
    Call,
    Read,
    Write,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallType {
    Function,
    Method,
    Constructor,
    Super,
}

/// `{receiver_location, property_chain[]}` for method/associated calls
/// (spec §3, §4.8 phase 2 "Method call").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    pub receiver_location: Location,
    pub property_chain: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolReference {
    pub kind: ReferenceKind,
    pub name: String,
    pub location: Location,
    pub scope_id: ScopeId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallReference {
    pub reference: SymbolReference,
    pub call_type: CallType,
    pub context: Option<CallContext>,
    /// Populated once phase 2 resolves the callee (spec §4.8).
    pub symbol_id: Option<SymbolId>,
    /// The innermost function/method/constructor scope containing the call
    /// site, populated alongside `symbol_id` during phase 2.
    pub caller_scope_id: Option<ScopeId>,
}

impl CallReference {
    pub fn new(
        name: impl Into<String>,
        location: Location,
        scope_id: ScopeId,
        call_type: CallType,
    ) -> Self {
        Self {
            reference: SymbolReference {
                kind: ReferenceKind::Call,
                name: name.into(),
                location,
                scope_id,
            },
            call_type,
            context: None,
            symbol_id: None,
            caller_scope_id: None,
        }
    }

    pub fn with_context(mut self, context: CallContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn is_resolved(&self) -> bool {
        self.symbol_id.is_some()
    }

    /// Rewrite `call_type` from `Function` to `Constructor` — the Python
    /// reference-preprocessing rule in spec §4.8 ("this turns `Foo()` into
    /// a constructor call where Python's grammar alone cannot distinguish
    /// it").
    pub fn promote_to_constructor(&mut self) {
        if self.call_type == CallType::Function {
            self.call_type = CallType::Constructor;
        }
    }
}
