//! Method dispatch: an explicit registry mapping `(namespace, method)` to
//! typed callables that expose their arity.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::{HandlerError, ProtocolError};

/// Callable shape of a registered method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSpec {
    /// Minimum number of positional arguments the method requires. Fewer
    /// bound arguments than this is an `Invalid params` failure.
    pub min_params: usize,
}

/// A group of callable methods registered under one namespace.
#[async_trait]
pub trait RpcService: Send + Sync {
    /// Look up a method by its bare (namespace-stripped) name. `None` means
    /// the method does not exist in this group.
    fn describe(&self, method: &str) -> Option<MethodSpec>;

    /// Invoke a method with bound positional arguments.
    async fn call(&self, method: &str, args: Vec<Value>) -> Result<Value, HandlerError>;

    /// List callable methods (optional - used for introspection)
    fn method_names(&self) -> Vec<String> {
        vec![]
    }
}

/// Split a dotted method name into `(namespace, bare_method)`.
///
/// The split is on the *last* dot, so `a.b.c` resolves namespace `a.b`. A
/// name with no dot has the empty namespace.
pub fn split_method(name: &str) -> (&str, &str) {
    match name.rsplit_once('.') {
        Some((namespace, bare)) => (namespace, bare),
        None => ("", name),
    }
}

type BoxMethod =
    Box<dyn Fn(Vec<Value>) -> BoxFuture<'static, Result<Value, HandlerError>> + Send + Sync>;

struct MethodEntry {
    spec: MethodSpec,
    invoke: BoxMethod,
}

/// A function-backed [`RpcService`]: each method is a boxed closure with an
/// explicit arity, registered at build time.
#[derive(Default)]
pub struct ServiceMap {
    methods: HashMap<String, MethodEntry>,
}

impl ServiceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method with its minimum argument count.
    pub fn method<F>(mut self, name: impl Into<String>, min_params: usize, invoke: F) -> Self
    where
        F: Fn(Vec<Value>) -> BoxFuture<'static, Result<Value, HandlerError>>
            + Send
            + Sync
            + 'static,
    {
        self.methods.insert(
            name.into(),
            MethodEntry {
                spec: MethodSpec { min_params },
                invoke: Box::new(invoke),
            },
        );
        self
    }
}

#[async_trait]
impl RpcService for ServiceMap {
    fn describe(&self, method: &str) -> Option<MethodSpec> {
        self.methods.get(method).map(|entry| entry.spec)
    }

    async fn call(&self, method: &str, args: Vec<Value>) -> Result<Value, HandlerError> {
        match self.methods.get(method) {
            Some(entry) => (entry.invoke)(args).await,
            None => Err(ProtocolError::method_not_found(method).into()),
        }
    }

    fn method_names(&self) -> Vec<String> {
        self.methods.keys().cloned().collect()
    }
}

/// Namespace -> handler group mapping.
///
/// Configured once before serving and read-only thereafter; groups are
/// shared behind `Arc` so dispatch never clones or rebuilds them.
#[derive(Default)]
pub struct MethodRegistry {
    groups: HashMap<String, Arc<dyn RpcService>>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler group under a namespace. The empty namespace holds
    /// methods with no dotted prefix.
    pub fn register<S>(&mut self, namespace: impl Into<String>, service: S)
    where
        S: RpcService + 'static,
    {
        self.groups.insert(namespace.into(), Arc::new(service));
    }

    /// Register an already-shared handler group.
    pub fn register_arc(&mut self, namespace: impl Into<String>, service: Arc<dyn RpcService>) {
        self.groups.insert(namespace.into(), service);
    }

    /// Check whether a fully-qualified method name resolves to a callable.
    pub fn contains_method(&self, name: &str) -> bool {
        let (namespace, bare) = split_method(name);
        self.groups
            .get(namespace)
            .and_then(|group| group.describe(bare))
            .is_some()
    }

    /// Resolve and invoke a fully-qualified method.
    pub async fn dispatch(&self, method: &str, args: Vec<Value>) -> Result<Value, HandlerError> {
        let (namespace, bare) = split_method(method);

        let group = self
            .groups
            .get(namespace)
            .ok_or_else(|| ProtocolError::method_not_found(method))?;

        let spec = group
            .describe(bare)
            .ok_or_else(|| ProtocolError::method_not_found(method))?;

        if spec.min_params > args.len() {
            return Err(ProtocolError::invalid_params(format!(
                "Method '{}' requires at least {} parameter(s), got {}",
                method,
                spec.min_params,
                args.len()
            ))
            .into());
        }

        group.call(bare, args).await
    }
}
