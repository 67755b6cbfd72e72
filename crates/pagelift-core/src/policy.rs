use tracing::warn;

use crate::shape::PageShape;

/// Capability flags from the caller: which cross-cutting values the generated
/// functions should receive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextAccess {
    pub shared: bool,
    pub request: bool,
}

/// A leading context parameter threaded through every generated function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextParam {
    Shared,
    Request,
}

impl ContextParam {
    pub fn annotation(self) -> &'static str {
        match self {
            Self::Shared => "Shared.Model",
            Self::Request => "Request.With Params",
        }
    }

    pub fn binding(self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Request => "req",
        }
    }
}

/// The ordered context-parameter prefix derived from the target shape and the
/// enabled flags. Both signature rendering and the entry point's call sites
/// come from here, which is what keeps declaration arities and the entry
/// point's invocations in sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterPolicy {
    context: Vec<ContextParam>,
}

impl ParameterPolicy {
    /// Flags that have no meaning for the target shape are dropped, not
    /// rejected: the static template takes no context at all, and advanced
    /// pages keep `req` as an unused entry-point binding.
    pub fn resolve(target: PageShape, access: ContextAccess) -> Self {
        let mut context = Vec::new();
        match target {
            PageShape::Static => {
                if access.shared || access.request {
                    warn!("--shared and --request have no effect on static pages");
                }
            }
            PageShape::Element => {
                if access.shared {
                    context.push(ContextParam::Shared);
                }
                if access.request {
                    context.push(ContextParam::Request);
                }
            }
            PageShape::Advanced => {
                if access.shared {
                    context.push(ContextParam::Shared);
                }
                if access.request {
                    warn!("--request has no effect on advanced pages");
                }
            }
        }
        Self { context }
    }

    pub fn context(&self) -> &[ContextParam] {
        &self.context
    }

    pub fn is_empty(&self) -> bool {
        self.context.is_empty()
    }

    /// `"Shared.Model -> Request.With Params -> "`, or empty.
    pub fn annotation_prefix(&self) -> String {
        self.context
            .iter()
            .map(|p| format!("{} -> ", p.annotation()))
            .collect()
    }

    /// `"shared req "`, or empty.
    pub fn binding_prefix(&self) -> String {
        self.context
            .iter()
            .map(|p| format!("{} ", p.binding()))
            .collect()
    }

    /// `" shared req"`, or empty. Appended after a function name in the entry
    /// point's record fields.
    pub fn forward_suffix(&self) -> String {
        self.context
            .iter()
            .map(|p| format!(" {}", p.binding()))
            .collect()
    }
}
