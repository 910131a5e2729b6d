use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::error::FormError;
use crate::state::flow::{Flow, StepStatus};
use crate::state::step_fields::{StepFieldMap, StepKey};

type SubmitCallback = Rc<dyn Fn()>;

struct FormState {
    flow: Flow,
    on_submit: Option<SubmitCallback>,
    validating: bool,
}

/// Shared handle to the navigation state of one form.
///
/// Every display unit and trigger of a form holds a clone of the same handle.
/// Cloning is cheap; the state lives until the last clone is dropped.
#[derive(Clone)]
pub struct FormHandle {
    inner: Rc<RefCell<FormState>>,
}

/// Copy of the navigation position taken at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationSnapshot {
    pub current_index: usize,
    pub total_steps: usize,
    pub current_key: Option<StepKey>,
}

impl NavigationSnapshot {
    pub fn is_first(&self) -> bool {
        self.total_steps > 0 && self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.total_steps > 0 && self.current_index + 1 == self.total_steps
    }
}

impl FormHandle {
    pub fn new(step_fields: StepFieldMap) -> Self {
        Self {
            inner: Rc::new(RefCell::new(FormState {
                flow: Flow::new(step_fields),
                on_submit: None,
                validating: false,
            })),
        }
    }

    pub fn with_on_submit(self, on_submit: impl Fn() + 'static) -> Self {
        self.set_on_submit(on_submit);
        self
    }

    pub fn set_on_submit(&self, on_submit: impl Fn() + 'static) {
        self.inner.borrow_mut().on_submit = Some(Rc::new(on_submit));
    }

    pub fn has_submit(&self) -> bool {
        self.inner.borrow().on_submit.is_some()
    }

    pub fn current_index(&self) -> usize {
        self.inner.borrow().flow.current_index()
    }

    pub fn current_key(&self) -> Option<StepKey> {
        self.inner.borrow().flow.current_key().cloned()
    }

    pub fn steps(&self) -> Vec<StepKey> {
        self.inner.borrow().flow.steps()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().flow.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().flow.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.inner.borrow().flow.is_first()
    }

    pub fn is_last(&self) -> bool {
        self.inner.borrow().flow.is_last()
    }

    pub fn status_at(&self, index: usize) -> StepStatus {
        self.inner.borrow().flow.status_at(index)
    }

    pub fn step_fields(&self) -> StepFieldMap {
        self.inner.borrow().flow.step_fields().clone()
    }

    pub fn current_fields(&self) -> Option<Vec<String>> {
        self.inner.borrow().flow.current_fields().map(<[String]>::to_vec)
    }

    pub fn all_fields(&self) -> Vec<String> {
        self.inner.borrow().flow.step_fields().all_fields()
    }

    pub fn next_step(&self) -> bool {
        self.inner.borrow_mut().flow.next_step()
    }

    pub fn prev_step(&self) -> bool {
        self.inner.borrow_mut().flow.prev_step()
    }

    pub fn set_step_fields(&self, step_fields: StepFieldMap) {
        self.inner.borrow_mut().flow.set_step_fields(step_fields);
    }

    /// Mutates the field map in place. `update` must not call back into this
    /// handle.
    pub fn update_step_fields(&self, update: impl FnOnce(&mut StepFieldMap)) {
        self.inner.borrow_mut().flow.update_step_fields(update);
    }

    /// Runs the submit callback, if any. Returns whether it ran.
    ///
    /// Position is not checked here; only the submit trigger hides itself
    /// off the last step.
    pub fn submit(&self) -> bool {
        let callback = self.inner.borrow().on_submit.clone();
        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => {
                debug!("submit requested but no submit callback is registered");
                false
            }
        }
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        let state = self.inner.borrow();
        NavigationSnapshot {
            current_index: state.flow.current_index(),
            total_steps: state.flow.len(),
            current_key: state.flow.current_key().cloned(),
        }
    }

    pub fn is_validating(&self) -> bool {
        self.inner.borrow().validating
    }

    /// Marks a validation as in flight. Returns `None` if one already is.
    ///
    /// The mark is released when the returned guard drops.
    pub fn begin_validation(&self) -> Option<ValidationGuard> {
        let mut state = self.inner.borrow_mut();
        if state.validating {
            return None;
        }
        state.validating = true;
        Some(ValidationGuard {
            form: self.clone(),
        })
    }

    pub fn same_form(&self, other: &FormHandle) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for FormHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("FormHandle")
            .field("flow", &state.flow)
            .field("has_submit", &state.on_submit.is_some())
            .field("validating", &state.validating)
            .finish()
    }
}

#[must_use]
pub struct ValidationGuard {
    form: FormHandle,
}

impl Drop for ValidationGuard {
    fn drop(&mut self) {
        self.form.inner.borrow_mut().validating = false;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormId(String);

impl FormId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for FormId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Owns the state of every active form, keyed by form identity.
#[derive(Debug, Default)]
pub struct FormRegistry {
    forms: HashMap<FormId, FormHandle>,
}

impl FormRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(
        &mut self,
        id: impl Into<FormId>,
        step_fields: StepFieldMap,
    ) -> Result<FormHandle, FormError> {
        let handle = FormHandle::new(step_fields);
        self.insert(id, handle.clone())?;
        Ok(handle)
    }

    pub fn insert(&mut self, id: impl Into<FormId>, handle: FormHandle) -> Result<(), FormError> {
        let id = id.into();
        if self.forms.contains_key(&id) {
            return Err(FormError::AlreadyRegistered(id));
        }
        self.forms.insert(id, handle);
        Ok(())
    }

    pub fn handle(&self, id: &FormId) -> Result<FormHandle, FormError> {
        self.forms
            .get(id)
            .cloned()
            .ok_or_else(|| FormError::NoActiveForm(id.clone()))
    }

    /// Drops the registry's reference; the form state goes away once every
    /// widget holding a handle is gone too.
    pub fn close(&mut self, id: &FormId) -> Option<FormHandle> {
        self.forms.remove(id)
    }

    pub fn contains(&self, id: &FormId) -> bool {
        self.forms.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}
