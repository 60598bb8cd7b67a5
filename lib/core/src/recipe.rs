use serde::{Deserialize, Serialize};

pub type RecipeId = u64;

/// A recipe record from the corpus. Read-only once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    /// Normalized ingredient tokens, in recipe order
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Cooking method label
    #[serde(default)]
    pub method: Option<String>,
    /// Dish category label
    #[serde(default)]
    pub category: Option<String>,
}

impl Recipe {
    #[inline]
    #[must_use]
    pub fn new(id: RecipeId, name: impl Into<String>, ingredients: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ingredients,
            method: None,
            category: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.ingredients.iter().any(|i| i == token)
    }
}
