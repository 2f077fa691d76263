//! Fixed catalogue of trivia categories, keyed by the question provider's ids.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: u32,
    pub name: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category { id: 9, name: "Conocimiento General" },
    Category { id: 17, name: "Ciencias" },
    Category { id: 23, name: "Historia" },
    Category { id: 22, name: "Geografía" },
    Category { id: 21, name: "Deportes" },
    Category { id: 11, name: "Películas" },
    Category { id: 12, name: "Música" },
    Category { id: 14, name: "Televisión" },
    Category { id: 15, name: "Videojuegos" },
    Category { id: 18, name: "Informática" },
];

pub fn find(id: u32) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Display label stored with each result. Unknown ids are accepted and get a
/// generic label.
pub fn label_for(id: u32) -> String {
    match find(id) {
        Some(c) => c.name.to_string(),
        None => format!("Categoría {id}"),
    }
}
