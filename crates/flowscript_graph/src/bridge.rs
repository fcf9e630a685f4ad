// SPDX-License-Identifier: MIT OR Apache-2.0
//! The value bridge: out-of-band delivery of materialized runtime values.
//!
//! A node that needs a value *after* the host interpreter has executed its IR
//! (for a side effect not expressible as IR) compiles in a call to
//! [`BRIDGE_SEND_FUNCTION`]. When the interpreter evaluates that call it
//! invokes [`ValueBridge::dispatch`] with the node's key and the materialized
//! argument value, and the bridge routes it to the callback registered for
//! that node instance.
//!
//! The bridge is an explicitly constructed object owned by the host session,
//! not process-global state. Registration happens on the graph thread while
//! dispatch arrives on whatever thread the interpreter evaluates on, so the
//! callback map sits behind a mutex.

use flowscript_ir::{FunctionRef, IrNode, TypeTag};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Well-known function name the host interpreter binds to the bridge.
///
/// Evaluating `__bridge_send(key, payload)` must materialize `payload` and
/// call [`ValueBridge::dispatch`] with `(key, payload)`.
pub const BRIDGE_SEND_FUNCTION: &str = "__bridge_send";

/// A runtime value materialized by the host interpreter.
///
/// This is the shape crossing the bridge; an evaluated expression list arrives
/// as [`RuntimeValue::List`].
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeValue {
    /// Null value
    Null,
    /// Integer value
    Int(i64),
    /// Double-precision number
    Double(f64),
    /// String value
    Str(String),
    /// Ordered collection of values
    List(Vec<RuntimeValue>),
}

type BridgeCallback = Arc<dyn Fn(RuntimeValue) + Send + Sync>;

/// Keyed registry of per-node-instance value callbacks
#[derive(Default)]
pub struct ValueBridge {
    callbacks: Mutex<HashMap<String, BridgeCallback>>,
    dropped: AtomicU64,
}

impl ValueBridge {
    /// Create a new empty bridge
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a callback under a key, replacing any previous registration.
    ///
    /// Last writer wins: a node that rebuilds its compiled form re-registers
    /// under the same key without a guaranteed unregister in between.
    pub fn register(
        &self,
        key: impl Into<String>,
        callback: impl Fn(RuntimeValue) + Send + Sync + 'static,
    ) {
        let key = key.into();
        let previous = self.callbacks.lock().insert(key.clone(), Arc::new(callback));
        if previous.is_some() {
            tracing::debug!("bridge callback for {key} overwritten");
        }
    }

    /// Remove the callback for a key. Removing an absent key is a no-op, so
    /// double disposal is tolerated.
    pub fn unregister(&self, key: &str) {
        self.callbacks.lock().remove(key);
    }

    /// Deliver a materialized value to the callback registered under a key.
    ///
    /// Invoked by the host interpreter when it executes a bridge-send call.
    /// The callback runs synchronously on the calling thread. A missing key
    /// means the owning node was disposed (or never registered) before the
    /// scheduled execution arrived; the value is dropped and counted, never an
    /// error.
    pub fn dispatch(&self, key: &str, value: RuntimeValue) {
        let callback = self.callbacks.lock().get(key).cloned();
        match callback {
            Some(callback) => callback(value),
            None => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("bridge dispatch for {key} dropped (no registration)");
            }
        }
    }

    /// Number of dispatches dropped because no callback was registered
    pub fn dropped_dispatches(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Number of registered callbacks
    pub fn len(&self) -> usize {
        self.callbacks.lock().len()
    }

    /// Whether no callbacks are registered
    pub fn is_empty(&self) -> bool {
        self.callbacks.lock().is_empty()
    }
}

/// Build the IR call that routes a value through the bridge at execution time
pub fn bridge_send_call(key: impl Into<String>, payload: IrNode) -> IrNode {
    IrNode::function_call(
        FunctionRef::new(
            BRIDGE_SEND_FUNCTION,
            vec![TypeTag::Str, TypeTag::Any],
            TypeTag::Any,
        ),
        vec![IrNode::string(key), payload],
    )
}
