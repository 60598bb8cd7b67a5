//! Substitution engine entry points
//!
//! An engine is only ever constructed from fully loaded [`Resources`], so
//! holding one is proof of readiness. Every call resolves its context and
//! candidate universe completely before any scoring starts.

use crate::combine::{combine, Combination};
use crate::config::EngineConfig;
use crate::context::{resolve, ContextSource};
use crate::explain::SubstitutionStats;
use crate::resources::Resources;
use crate::saving::saving_score;
use crate::scorer::{RankedCandidate, WeightedScorer};
use crate::universe::{candidates, Exclusions};
use crate::weights::Weights;
use ahash::AHashSet;
use std::sync::Arc;
use subx_core::{Error, RecipeId, Result};

#[derive(Debug, Clone)]
pub struct SubstitutionEngine {
    resources: Arc<Resources>,
    config: EngineConfig,
}

impl SubstitutionEngine {
    pub fn new(resources: Arc<Resources>, config: EngineConfig) -> Self {
        Self { resources, config }
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Global stopwords plus request stopwords plus explicit exclusions
    fn exclusions(&self, stopwords: &[String], excluded: &[String]) -> Exclusions {
        Exclusions::new()
            .with(&self.resources.stopwords)
            .with(stopwords)
            .with(excluded)
    }

    /// Rank substitutes for `target` within an existing recipe
    pub fn substitute_single(
        &self,
        recipe_id: RecipeId,
        target: &str,
        stopwords: &[String],
        weights: Weights,
    ) -> Result<Vec<RankedCandidate>> {
        self.select_single(ContextSource::Recipe(recipe_id), target, stopwords, weights, &[])
    }

    /// Rank substitutes for `target` within a caller-supplied ingredient list.
    /// Method and category weights are implicitly 0.
    pub fn substitute_single_custom(
        &self,
        target: &str,
        context_ings: &[String],
        stopwords: &[String],
        w_w2v: f32,
        w_d2v: f32,
        excluded: &[String],
    ) -> Result<Vec<RankedCandidate>> {
        self.select_single(
            ContextSource::Custom(context_ings.to_vec()),
            target,
            stopwords,
            Weights::embeddings_only(w_w2v, w_d2v),
            excluded,
        )
    }

    /// Single-target selection over any context source
    pub fn select_single(
        &self,
        source: ContextSource,
        target: &str,
        stopwords: &[String],
        weights: Weights,
        excluded: &[String],
    ) -> Result<Vec<RankedCandidate>> {
        if target.trim().is_empty() {
            return Err(Error::InvalidTarget("target ingredient is required".to_string()));
        }

        let context = resolve(&self.resources.catalog, source)?;
        let exclusions = self.exclusions(stopwords, excluded);
        let universe = candidates(self.resources.vocabulary(), &context, &[target], &exclusions);
        if universe.is_empty() {
            tracing::debug!(ingredient = target, "Candidate universe is empty after filtering");
            return Ok(Vec::new());
        }

        let scorer = WeightedScorer::new(&self.resources, &context, weights);
        let mut ranked = scorer.rank(target, &universe);
        ranked.truncate(self.config.single_top_n);

        let stats = SubstitutionStats::compute(&ranked, universe.len(), scorer.weights());
        tracing::debug!(
            ingredient = target,
            recipe_id = context.recipe_id,
            candidates = stats.candidates_count,
            results = stats.results_count,
            best_score = stats.best_score,
            avg_score = stats.avg_score,
            top_signal = stats.top_signal,
            "Single substitution ranked"
        );
        Ok(ranked)
    }

    /// Jointly substitute several ingredients of one recipe
    pub fn substitute_multi(
        &self,
        recipe_id: RecipeId,
        targets: &[String],
        stopwords: &[String],
        weights: Weights,
    ) -> Result<Vec<Combination>> {
        self.validate_targets(targets)?;

        let context = resolve(&self.resources.catalog, ContextSource::Recipe(recipe_id))?;
        let target_refs: Vec<&str> = targets.iter().map(String::as_str).collect();
        let exclusions = self.exclusions(stopwords, &[]);
        let universe = candidates(self.resources.vocabulary(), &context, &target_refs, &exclusions);

        let scorer = WeightedScorer::new(&self.resources, &context, weights);
        let shortlists: Vec<Vec<RankedCandidate>> = target_refs
            .iter()
            .map(|target| {
                let mut ranked = scorer.rank(target, &universe);
                ranked.truncate(self.config.shortlist_k);
                ranked
            })
            .collect();

        let results = combine(&shortlists, self.config.multi_top_n, |subs| {
            saving_score(&self.resources, &target_refs, subs)
        });

        tracing::debug!(
            recipe_id,
            targets = targets.len(),
            candidates = universe.len(),
            combinations = results.len(),
            "Multi substitution ranked"
        );
        Ok(results)
    }

    fn validate_targets(&self, targets: &[String]) -> Result<()> {
        if targets.is_empty() {
            return Err(Error::InvalidTarget("at least one target is required".to_string()));
        }
        if targets.len() > self.config.max_targets {
            return Err(Error::InvalidTarget(format!(
                "at most {} targets can be replaced at once, got {}",
                self.config.max_targets,
                targets.len()
            )));
        }
        let mut seen = AHashSet::new();
        for target in targets {
            if target.trim().is_empty() {
                return Err(Error::InvalidTarget("target ingredient is blank".to_string()));
            }
            if !seen.insert(target.as_str()) {
                return Err(Error::InvalidTarget(format!("duplicate target: {target}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture;

    fn engine() -> SubstitutionEngine {
        SubstitutionEngine::new(Arc::new(fixture()), EngineConfig::default())
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_excludes_context() {
        let engine = engine();
        let results = engine
            .substitute_single(1, "돼지고기", &[], Weights::new(0.5, 0.5, 0.0, 0.0))
            .unwrap();
        assert!(!results.is_empty());
        for r in &results {
            assert!(!["돼지고기", "양파", "간장"].contains(&r.ingredient.as_str()));
        }
        assert_eq!(results[0].ingredient, "소고기");
    }

    #[test]
    fn test_single_blank_target() {
        let engine = engine();
        let err = engine.substitute_single(1, "  ", &[], Weights::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidTarget(_)));
    }

    #[test]
    fn test_single_unknown_recipe() {
        let engine = engine();
        let err = engine.substitute_single(999, "돼지고기", &[], Weights::default()).unwrap_err();
        assert!(matches!(err, Error::RecipeNotFound(999)));
    }

    #[test]
    fn test_single_respects_stopwords_and_global_stopwords() {
        let engine = engine();
        let results = engine
            .substitute_single(1, "돼지고기", &strings(&["소고기"]), Weights::default())
            .unwrap();
        assert!(results.iter().all(|r| r.ingredient != "소고기"));
        // 소금 is a global stopword in the fixture
        assert!(results.iter().all(|r| r.ingredient != "소금"));
    }

    #[test]
    fn test_single_top_n_cap() {
        let engine = SubstitutionEngine::new(
            Arc::new(fixture()),
            EngineConfig { single_top_n: 2, ..Default::default() },
        );
        let results = engine.substitute_single(1, "돼지고기", &[], Weights::default()).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_custom_excluded_and_empty_universe() {
        let engine = engine();
        let all: Vec<String> = engine.resources().vocabulary().to_vec();
        let results = engine
            .substitute_single_custom("설탕", &[], &[], 0.5, 0.5, &all)
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_multi_validation() {
        let engine = engine();
        let w = Weights::default();
        assert!(matches!(engine.substitute_multi(1, &[], &[], w), Err(Error::InvalidTarget(_))));
        assert!(matches!(
            engine.substitute_multi(1, &strings(&["양파", "양파"]), &[], w),
            Err(Error::InvalidTarget(_))
        ));
        let many = strings(&["a", "b", "c", "d", "e", "f", "g"]);
        assert!(matches!(engine.substitute_multi(1, &many, &[], w), Err(Error::InvalidTarget(_))));
        assert!(matches!(
            engine.substitute_multi(42, &strings(&["양파"]), &[], w),
            Err(Error::RecipeNotFound(42))
        ));
    }

    #[test]
    fn test_multi_combinations() {
        let engine = engine();
        let combos = engine
            .substitute_multi(1, &strings(&["돼지고기", "양파"]), &[], Weights::default())
            .unwrap();
        assert!(!combos.is_empty());
        assert!(combos.len() <= engine.config().multi_top_n);
        for combo in &combos {
            assert_eq!(combo.substitutes.len(), 2);
            assert_ne!(combo.substitutes[0], combo.substitutes[1]);
            for sub in &combo.substitutes {
                assert!(!["돼지고기", "양파", "간장"].contains(&sub.as_str()));
            }
        }
        for pair in combos.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(combos[0].substitutes, strings(&["소고기", "대파"]));
        assert_eq!(combos[0].saving_score, 1);
    }
}
