//! Recipe context resolution
//!
//! Turns a recipe id or an explicit ingredient list into the context that
//! candidates are scored against.

use ahash::AHashSet;
use subx_core::{Error, RecipeCatalog, RecipeId, Result};

/// Where a request's context comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ContextSource {
    /// An existing recipe in the catalog
    Recipe(RecipeId),
    /// Caller-supplied ingredients with no method/category labels
    Custom(Vec<String>),
}

/// The ingredients (and optional labels) a substitution is scored against
#[derive(Debug, Clone, PartialEq)]
pub struct ContextDescriptor {
    pub recipe_id: Option<RecipeId>,
    /// Distinct ingredients, first occurrence order
    ingredients: Vec<String>,
    members: AHashSet<String>,
    pub method: Option<String>,
    pub category: Option<String>,
}

impl ContextDescriptor {
    pub fn custom<I, S>(ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(None, ingredients, None, None)
    }

    fn build<I, S>(
        recipe_id: Option<RecipeId>,
        ingredients: I,
        method: Option<String>,
        category: Option<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut members = AHashSet::new();
        let mut ordered = Vec::new();
        for token in ingredients {
            let token = token.into();
            if members.insert(token.clone()) {
                ordered.push(token);
            }
        }
        Self {
            recipe_id,
            ingredients: ordered,
            members,
            method,
            category,
        }
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn contains(&self, token: &str) -> bool {
        self.members.contains(token)
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    /// Tokens of the unmodified context
    pub fn tokens(&self) -> Vec<&str> {
        self.ingredients.iter().map(String::as_str).collect()
    }

    /// Context tokens with `candidate` in place of `target`.
    /// When `target` is not part of the context the candidate is appended.
    pub fn substituted<'a>(&'a self, target: &str, candidate: &'a str) -> Vec<&'a str> {
        let mut replaced = false;
        let mut tokens: Vec<&str> = self
            .ingredients
            .iter()
            .map(|token| {
                if token == target {
                    replaced = true;
                    candidate
                } else {
                    token.as_str()
                }
            })
            .collect();
        if !replaced {
            tokens.push(candidate);
        }
        tokens
    }
}

/// Resolve a context source against the catalog.
/// Fails with `RecipeNotFound` when a referenced recipe does not exist.
pub fn resolve(catalog: &RecipeCatalog, source: ContextSource) -> Result<ContextDescriptor> {
    match source {
        ContextSource::Recipe(id) => {
            let recipe = catalog.get(id).ok_or(Error::RecipeNotFound(id))?;
            Ok(ContextDescriptor::build(
                Some(id),
                recipe.ingredients.iter().cloned(),
                recipe.method.clone(),
                recipe.category.clone(),
            ))
        }
        ContextSource::Custom(ingredients) => Ok(ContextDescriptor::custom(ingredients)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subx_core::Recipe;

    fn catalog() -> RecipeCatalog {
        RecipeCatalog::from_recipes(vec![Recipe::new(
            10,
            "불고기",
            vec!["소고기".into(), "간장".into(), "소고기".into()],
        )
        .with_method("굽기")
        .with_category("메인반찬")])
        .unwrap()
    }

    #[test]
    fn test_resolve_recipe() {
        let ctx = resolve(&catalog(), ContextSource::Recipe(10)).unwrap();
        assert_eq!(ctx.recipe_id, Some(10));
        assert_eq!(ctx.ingredients(), &["소고기".to_string(), "간장".to_string()]);
        assert_eq!(ctx.method.as_deref(), Some("굽기"));
        assert_eq!(ctx.category.as_deref(), Some("메인반찬"));
    }

    #[test]
    fn test_resolve_missing_recipe() {
        let err = resolve(&catalog(), ContextSource::Recipe(11)).unwrap_err();
        assert!(matches!(err, Error::RecipeNotFound(11)));
    }

    #[test]
    fn test_resolve_custom_has_no_labels() {
        let ctx = resolve(&catalog(), ContextSource::Custom(vec!["밀가루".into()])).unwrap();
        assert!(ctx.recipe_id.is_none());
        assert!(ctx.method.is_none());
        assert!(ctx.category.is_none());
        assert!(ctx.contains("밀가루"));
    }

    #[test]
    fn test_substituted() {
        let ctx = ContextDescriptor::custom(["a", "b", "c"]);
        assert_eq!(ctx.substituted("b", "x"), vec!["a", "x", "c"]);
        assert_eq!(ctx.substituted("z", "x"), vec!["a", "b", "c", "x"]);

        let empty = ContextDescriptor::custom(Vec::<String>::new());
        assert_eq!(empty.substituted("z", "x"), vec!["x"]);
    }
}
