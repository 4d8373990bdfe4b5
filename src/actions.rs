use std::collections::HashMap;

use serde::Deserialize;

use super::calltree::ActionCode;

/// The catalog resolving action codes to display names.
pub trait ActionSet: Send + Sync {
    fn action_name(&self, code: ActionCode) -> Option<&str>;
}

/// A registry of action names with dense codes assigned in definition order.
///
/// ```
/// use react_histogram::{Actions, ActionSet};
///
/// let mut actions = Actions::new();
/// let read = actions.define("read");
/// assert_eq!(actions.action_name(read), Some("read"));
/// assert_eq!(actions.define("read"), read);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct Actions {
    names: Vec<String>,
    codes: HashMap<String, ActionCode>,
}

impl Actions {
    pub fn new() -> Actions {
        Actions { names: Vec::new(), codes: HashMap::new() }
    }
    /// This function defines a new action and returns its code.
    ///
    /// Defining an already known name returns the existing code.
    pub fn define(&mut self, name: &str) -> ActionCode {
        if let Some(code) = self.codes.get(name) {
            return *code;
        }
        let code = self.names.len() as ActionCode;
        self.names.push(name.to_string());
        self.codes.insert(name.to_string(), code);
        code
    }
    pub fn code_of(&self, name: &str) -> Option<ActionCode> {
        self.codes.get(name).copied()
    }
    pub fn len(&self) -> usize {
        self.names.len()
    }
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<Vec<String>> for Actions {
    fn from(names: Vec<String>) -> Self {
        let mut actions = Actions::new();
        names.iter().for_each(|name| { actions.define(name); });
        actions
    }
}

impl ActionSet for Actions {
    fn action_name(&self, code: ActionCode) -> Option<&str> {
        usize::try_from(code).ok()
            .and_then(|index| self.names.get(index))
            .map(String::as_str)
    }
}
