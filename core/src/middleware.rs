//! Before-send and after-receive middleware chains.
//!
//! # Design
//! Both chains are ordered lists of shared closures; insertion order is
//! application order. They differ only in how they fold:
//!
//! - before-send middleware are gates. They run in order and the first one
//!   returning `false` stops the chain and vetoes the call.
//! - after-receive middleware are transforms. Each receives the outcome the
//!   previous one returned, and the last value is the call's result.
//!
//! A middleware is identified by its `Arc` allocation. Removing needs a
//! clone of the `Arc` that was added and drops every registration of it.

use std::sync::Arc;

use crate::context::{Outcome, RequestContext};

/// Decides whether a call may be dispatched.
pub type BeforeSend = Arc<dyn Fn(&RequestContext) -> bool + Send + Sync>;

/// Rewrites the outcome of a call.
pub type AfterReceive = Arc<dyn Fn(Outcome, &RequestContext) -> Outcome + Send + Sync>;

/// An ordered list of middleware.
pub struct MiddlewareChain<M> {
    middlewares: Vec<M>,
}

pub type BeforeSendChain = MiddlewareChain<BeforeSend>;
pub type AfterReceiveChain = MiddlewareChain<AfterReceive>;

impl<M> Default for MiddlewareChain<M> {
    fn default() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }
}

impl<M: Clone> Clone for MiddlewareChain<M> {
    fn clone(&self) -> Self {
        Self {
            middlewares: self.middlewares.clone(),
        }
    }
}

impl<M> std::fmt::Debug for MiddlewareChain<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewareChain")
            .field("len", &self.middlewares.len())
            .finish()
    }
}

impl<M> MiddlewareChain<M> {
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }
}

impl<T: ?Sized> MiddlewareChain<Arc<T>> {
    pub fn add(&mut self, middleware: Arc<T>) {
        self.middlewares.push(middleware);
    }

    /// Removes every registration of `middleware`. Unknown middleware are
    /// ignored.
    pub fn remove(&mut self, middleware: &Arc<T>) {
        self.middlewares.retain(|m| !same_allocation(m, middleware));
    }

    pub fn contains(&self, middleware: &Arc<T>) -> bool {
        self.middlewares.iter().any(|m| same_allocation(m, middleware))
    }
}

// Compares data pointers only; vtable pointers of the same closure may differ
// across codegen units.
fn same_allocation<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

impl BeforeSendChain {
    /// `true` if every gate allowed the call or there are no gates.
    pub fn apply(&self, context: &RequestContext) -> bool {
        self.middlewares.iter().all(|gate| gate(context))
    }
}

impl AfterReceiveChain {
    pub fn apply(&self, outcome: Outcome, context: &RequestContext) -> Outcome {
        self.middlewares
            .iter()
            .fold(outcome, |accumulated, transform| transform(accumulated, context))
    }
}
