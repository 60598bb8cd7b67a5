use crate::text_index::NameIndex;
use crate::{Error, Recipe, RecipeId, Result};
use ahash::{AHashMap, AHashSet};
use serde::Serialize;

/// Corpus-wide statistics for one ingredient token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngredientProfile {
    /// Number of recipes that use the ingredient
    pub frequency: usize,
    /// Most frequent cooking method among those recipes
    pub top_method: Option<String>,
    /// Most frequent category among those recipes
    pub top_category: Option<String>,
}

/// Indexed, read-only recipe collection
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
    by_id: AHashMap<RecipeId, usize>,
    names: NameIndex,
    profiles: AHashMap<String, IngredientProfile>,
}

impl RecipeCatalog {
    /// Build the catalog and its ingredient profiles.
    /// Recipe order is preserved for pagination.
    pub fn from_recipes(recipes: Vec<Recipe>) -> Result<Self> {
        let mut by_id = AHashMap::with_capacity(recipes.len());
        let mut names = NameIndex::new();

        for (position, recipe) in recipes.iter().enumerate() {
            if by_id.insert(recipe.id, position).is_some() {
                return Err(Error::DuplicateRecipe(recipe.id));
            }
            names.push(&recipe.name);
        }

        let profiles = build_profiles(&recipes);
        tracing::debug!(
            recipes = recipes.len(),
            ingredients = profiles.len(),
            "Recipe catalog built"
        );

        Ok(Self {
            recipes,
            by_id,
            names,
            profiles,
        })
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.by_id.get(&id).map(|&pos| &self.recipes[pos])
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// A page of recipes in catalog order
    pub fn page(&self, offset: usize, limit: usize) -> &[Recipe] {
        let start = offset.min(self.recipes.len());
        let end = start.saturating_add(limit).min(self.recipes.len());
        &self.recipes[start..end]
    }

    /// Recipes whose name contains `query`, case-insensitive, in catalog order
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Recipe> {
        self.names
            .search(query, limit)
            .into_iter()
            .map(|pos| &self.recipes[pos])
            .collect()
    }

    pub fn profile(&self, token: &str) -> Option<&IngredientProfile> {
        self.profiles.get(token)
    }

    /// Whether any recipe uses the token
    pub fn knows(&self, token: &str) -> bool {
        self.profiles.contains_key(token)
    }
}

fn build_profiles(recipes: &[Recipe]) -> AHashMap<String, IngredientProfile> {
    #[derive(Default)]
    struct Tally<'a> {
        frequency: usize,
        methods: AHashMap<&'a str, usize>,
        categories: AHashMap<&'a str, usize>,
    }

    let mut tallies: AHashMap<&str, Tally> = AHashMap::new();
    for recipe in recipes {
        let mut seen = AHashSet::new();
        for token in &recipe.ingredients {
            if !seen.insert(token.as_str()) {
                continue;
            }
            let tally = tallies.entry(token.as_str()).or_default();
            tally.frequency += 1;
            if let Some(method) = recipe.method.as_deref() {
                *tally.methods.entry(method).or_insert(0) += 1;
            }
            if let Some(category) = recipe.category.as_deref() {
                *tally.categories.entry(category).or_insert(0) += 1;
            }
        }
    }

    tallies
        .into_iter()
        .map(|(token, tally)| {
            let profile = IngredientProfile {
                frequency: tally.frequency,
                top_method: most_frequent(&tally.methods),
                top_category: most_frequent(&tally.categories),
            };
            (token.to_string(), profile)
        })
        .collect()
}

/// Label with the highest count; ties go to the smallest label
fn most_frequent(counts: &AHashMap<&str, usize>) -> Option<String> {
    counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(label, _)| label.to_string())
}
