use serde::{Deserialize, Serialize};

/// Free-floating screen position in the host's own units (pixels, cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

fn default_pet_name() -> String {
    "Gogi".to_string()
}

/// The decorative office pet.
///
/// It never touches seat assignments. Until its first drop it has no
/// position and renders inside the waiting panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    #[serde(default = "default_pet_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Default for Pet {
    fn default() -> Self {
        Pet {
            name: default_pet_name(),
            position: None,
        }
    }
}

impl Pet {
    pub fn is_placed(&self) -> bool {
        self.position.is_some()
    }

    pub fn place(&mut self, at: Position) {
        self.position = Some(at);
    }
}
