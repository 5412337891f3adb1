//! Variable environment.
//!
//! Bindings are organized in frames: frame zero holds the top-level shell
//! bindings, and each active operation call pushes a frame of its own
//! (`self` plus parameters). Lookup and assignment see only the current
//! frame; an operation body never reads the caller's locals.

use soil_core::Value;
use std::collections::HashMap;

/// Name-to-value bindings for statement evaluation.
#[derive(Debug, Clone)]
pub struct VarEnv {
    frames: Vec<HashMap<String, Value>>,
}

impl VarEnv {
    /// Create an environment with an empty top-level frame.
    pub fn new() -> Self {
        Self {
            frames: vec![HashMap::new()],
        }
    }

    /// Look up a binding in the current frame.
    pub fn look_up(&self, name: &str) -> Option<&Value> {
        self.current().get(name)
    }

    /// Bind a name in the current frame.
    pub fn assign(&mut self, name: impl Into<String>, value: Value) {
        self.current_mut().insert(name.into(), value);
    }

    /// Remove a binding from the current frame.
    pub fn undefine(&mut self, name: &str) -> Option<Value> {
        self.current_mut().remove(name)
    }

    /// Push a fresh frame (operation entry).
    pub fn push_frame(&mut self) {
        self.frames.push(HashMap::new());
    }

    /// Pop the current frame (operation exit). The top-level frame is
    /// never popped.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Current frame depth, top-level frame included.
    pub fn frame_depth(&self) -> usize {
        self.frames.len()
    }

    /// Names bound to the given object in the top-level frame.
    pub fn top_level_references_to(&self, object: &str) -> Vec<String> {
        let mut names: Vec<String> = self.frames[0]
            .iter()
            .filter(|(_, v)| v.as_object() == Some(object))
            .map(|(n, _)| n.clone())
            .collect();
        names.sort();
        names
    }

    /// Remove every binding to the given object, in all frames.
    pub fn undefine_references_to(&mut self, object: &str) {
        for frame in &mut self.frames {
            frame.retain(|_, v| v.as_object() != Some(object));
        }
    }

    /// Names bound in the current frame.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.current().keys().map(|s| s.as_str())
    }

    fn current(&self) -> &HashMap<String, Value> {
        self.frames.last().expect("at least the top-level frame")
    }

    fn current_mut(&mut self) -> &mut HashMap<String, Value> {
        self.frames.last_mut().expect("at least the top-level frame")
    }
}

impl Default for VarEnv {
    fn default() -> Self {
        Self::new()
    }
}
