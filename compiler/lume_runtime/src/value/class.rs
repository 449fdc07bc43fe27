//! Classes and instances.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;
use lume_ir::code::{ClassCode, FunctionCode};
use lume_ir::Name;

use super::{Closure, Value};
use crate::{Scope, Shared};

/// A class created by executing a class declaration.
pub struct ClassValue {
    pub code: Arc<ClassCode>,
    pub parent: Option<Rc<ClassValue>>,
    /// Scope the declaration ran in. Methods and field initializers close
    /// over it.
    pub env: Shared<Scope>,
}

impl ClassValue {
    pub fn new(code: Arc<ClassCode>, parent: Option<Rc<ClassValue>>, env: Shared<Scope>) -> Self {
        ClassValue { code, parent, env }
    }

    pub fn name(&self) -> &Name {
        &self.code.name
    }

    /// This class and its ancestors, root first.
    pub fn lineage(self: &Rc<Self>) -> Vec<Rc<ClassValue>> {
        let mut chain = vec![Rc::clone(self)];
        let mut current = self.parent.clone();
        while let Some(class) = current {
            current = class.parent.clone();
            chain.push(class);
        }
        chain.reverse();
        chain
    }

    /// Find `name` on this class or the nearest ancestor that defines it.
    /// Returns the defining class with the method.
    pub fn find_method(self: &Rc<Self>, name: &str) -> Option<(Rc<ClassValue>, Arc<FunctionCode>)> {
        let mut current = Some(Rc::clone(self));
        while let Some(class) = current {
            if let Some(method) = class.code.method(name) {
                let method = Arc::clone(method);
                return Some((class, method));
            }
            current = class.parent.clone();
        }
        None
    }

    /// Look up `name` and bind it to `receiver`.
    pub fn bind_method(self: &Rc<Self>, name: &str, receiver: Value) -> Option<Closure> {
        let (owner, code) = self.find_method(name)?;
        Some(Closure {
            code,
            env: owner.env.clone(),
            receiver: Some(receiver),
            super_class: owner.parent.clone(),
        })
    }
}

/// An object: its class plus field bindings in initialization order.
pub struct Instance {
    class: Rc<ClassValue>,
    fields: RefCell<IndexMap<Name, Value>>,
}

impl Instance {
    pub fn new(class: Rc<ClassValue>) -> Rc<Self> {
        Rc::new(Instance {
            class,
            fields: RefCell::new(IndexMap::new()),
        })
    }

    pub fn class(&self) -> &Rc<ClassValue> {
        &self.class
    }

    pub fn get_field(&self, name: &str) -> Option<Value> {
        self.fields.borrow().get(name).cloned()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.borrow().contains_key(name)
    }

    pub fn set_field(&self, name: Name, value: Value) {
        self.fields.borrow_mut().insert(name, value);
    }

    /// Snapshot of the fields in initialization order.
    pub fn fields(&self) -> Vec<(Name, Value)> {
        self.fields
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
