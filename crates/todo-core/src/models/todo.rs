use serde::{Deserialize, Serialize};

use crate::constants::LOCAL_OWNER_ID;

/// A single todo as served by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "userId")]
    pub owner_id: u64,
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

impl Todo {
    /// A todo created on this device; never sent to the server.
    pub fn local(id: u64, title: impl Into<String>) -> Self {
        Self {
            owner_id: LOCAL_OWNER_ID,
            id,
            title: title.into(),
            completed: false,
        }
    }

    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_api_payload() {
        let json = r#"[
            {"userId": 1, "id": 1, "title": "delectus aut autem", "completed": false},
            {"userId": 1, "id": 4, "title": "et porro tempora", "completed": true}
        ]"#;
        let todos: Vec<Todo> = serde_json::from_str(json).unwrap();
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].owner_id, 1);
        assert_eq!(todos[0].title, "delectus aut autem");
        assert!(todos[1].completed);
    }

    #[test]
    fn test_local_todo_defaults() {
        let todo = Todo::local(42, "Buy milk");
        assert_eq!(todo.owner_id, 0);
        assert!(!todo.completed);
        assert!(todo.toggled().completed);
    }
}
