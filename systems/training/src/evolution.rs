//! Elitist evolutionary search over networks.

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::evaluate::{EvaluationError, Evaluator};
use crate::network::Network;

/// Knobs of the search.
#[derive(Clone, Debug, PartialEq)]
pub struct EvolutionSettings {
    /// Networks per generation.
    pub population: usize,
    /// Best networks carried over unchanged.
    pub elite: usize,
    /// Hidden layer width of fresh networks.
    pub hidden: usize,
    /// Probability that a parameter is perturbed.
    pub mutation_rate: f64,
    /// Standard deviation of a perturbation.
    pub mutation_scale: f64,
    /// Seed for initial weights and breeding.
    pub seed: u64,
}

impl Default for EvolutionSettings {
    fn default() -> Self {
        Self {
            population: 48,
            elite: 6,
            hidden: 16,
            mutation_rate: 0.15,
            mutation_scale: 0.4,
            seed: 7,
        }
    }
}

/// Fitness summary of one evaluated generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationReport {
    /// Zero-based generation index.
    pub generation: u32,
    /// Highest score.
    pub best: u32,
    /// Mean score.
    pub mean: f64,
    /// Lowest score.
    pub worst: u32,
}

/// Best network seen so far and the score it earned.
#[derive(Clone, Debug, PartialEq)]
pub struct Champion {
    /// The network.
    pub network: Network,
    /// Score it earned.
    pub fitness: u32,
    /// Generation it was evaluated in.
    pub generation: u32,
}

/// Current generation of networks.
#[derive(Clone, Debug)]
pub struct Population {
    members: Vec<Network>,
    settings: EvolutionSettings,
    rng: ChaCha8Rng,
    generation: u32,
    champion: Option<Champion>,
}

impl Population {
    /// Random first generation.
    #[must_use]
    pub fn new(settings: EvolutionSettings) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);
        let members = (0..settings.population.max(1))
            .map(|_| Network::random(settings.hidden, &mut rng))
            .collect();
        Self {
            members,
            settings,
            rng,
            generation: 0,
            champion: None,
        }
    }

    /// Networks awaiting evaluation.
    #[must_use]
    pub fn members(&self) -> &[Network] {
        &self.members
    }

    /// Index of the generation awaiting evaluation.
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Best network seen so far.
    #[must_use]
    pub const fn champion(&self) -> Option<&Champion> {
        self.champion.as_ref()
    }

    /// Consumes the scores of the current members, in member order, and breeds
    /// the next generation. Missing scores count as zero.
    pub fn advance(&mut self, fitnesses: &[u32]) -> GenerationReport {
        let mut ranked: Vec<(u32, Network)> = std::mem::take(&mut self.members)
            .into_iter()
            .enumerate()
            .map(|(index, network)| (fitnesses.get(index).copied().unwrap_or(0), network))
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0));

        let best = ranked.first().map_or(0, |(fitness, _)| *fitness);
        let worst = ranked.last().map_or(0, |(fitness, _)| *fitness);
        let mean = ranked.iter().map(|(fitness, _)| f64::from(*fitness)).sum::<f64>()
            / ranked.len().max(1) as f64;
        let report = GenerationReport {
            generation: self.generation,
            best,
            mean,
            worst,
        };

        let improved = self
            .champion
            .as_ref()
            .map_or(true, |champion| best > champion.fitness);
        if improved {
            if let Some((fitness, network)) = ranked.first() {
                self.champion = Some(Champion {
                    network: network.clone(),
                    fitness: *fitness,
                    generation: self.generation,
                });
            }
        }

        let size = self.settings.population.max(1);
        let elite = self.settings.elite.clamp(1, ranked.len().max(1));
        let parents: Vec<Network> = ranked.into_iter().take(elite).map(|(_, n)| n).collect();
        let mut next = parents.clone();
        while next.len() < size {
            let Some(parent) = parents.choose(&mut self.rng) else {
                break;
            };
            let mut child = parent.clone();
            child.mutate(
                self.settings.mutation_rate,
                self.settings.mutation_scale,
                &mut self.rng,
            );
            next.push(child);
        }
        self.members = next;
        self.generation += 1;

        tracing::info!(
            generation = report.generation,
            best = report.best,
            mean = report.mean,
            worst = report.worst,
            "generation evaluated"
        );
        report
    }
}

/// Runs evaluation and breeding for a fixed number of generations.
#[derive(Debug)]
pub struct Trainer<E> {
    population: Population,
    evaluator: E,
}

impl<E: Evaluator> Trainer<E> {
    /// Pairs a population with the evaluator that scores it.
    pub fn new(population: Population, evaluator: E) -> Self {
        Self {
            population,
            evaluator,
        }
    }

    /// Current population.
    #[must_use]
    pub const fn population(&self) -> &Population {
        &self.population
    }

    /// Scores and breeds one generation.
    pub fn generation(&mut self) -> Result<GenerationReport, EvaluationError> {
        let fitnesses = self.evaluator.evaluate_all(self.population.members())?;
        Ok(self.population.advance(&fitnesses))
    }

    /// Runs `generations` rounds, reporting each, and returns the champion.
    pub fn run<F>(
        &mut self,
        generations: u32,
        mut on_generation: F,
    ) -> Result<Option<Champion>, EvaluationError>
    where
        F: FnMut(&GenerationReport),
    {
        for _ in 0..generations {
            let report = self.generation()?;
            on_generation(&report);
        }
        Ok(self.population.champion().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> EvolutionSettings {
        EvolutionSettings {
            population: 6,
            elite: 2,
            hidden: 3,
            ..EvolutionSettings::default()
        }
    }

    #[test]
    fn elites_survive_unchanged_and_population_size_holds() {
        let mut population = Population::new(settings());
        let members = population.members().to_vec();

        let report = population.advance(&[10, 50, 20, 0, 40, 30]);

        assert_eq!(report.best, 50);
        assert_eq!(report.worst, 0);
        assert!((report.mean - 25.0).abs() < 1e-9);
        assert_eq!(population.members().len(), 6);
        assert_eq!(population.members()[0], members[1]);
        assert_eq!(population.members()[1], members[4]);
        assert_eq!(population.generation(), 1);
    }

    #[test]
    fn champion_only_changes_on_strict_improvement() {
        let mut population = Population::new(settings());
        let _ = population.advance(&[5, 9, 1, 1, 1, 1]);
        let first = population.champion().cloned().expect("champion recorded");
        assert_eq!(first.fitness, 9);
        assert_eq!(first.generation, 0);

        let _ = population.advance(&[9, 0, 0, 0, 0, 0]);
        assert_eq!(population.champion(), Some(&first));

        let _ = population.advance(&[0, 12, 0, 0, 0, 0]);
        let champion = population.champion().expect("champion recorded");
        assert_eq!(champion.fitness, 12);
        assert_eq!(champion.generation, 2);
    }

    #[test]
    fn breeding_is_reproducible_from_the_seed() {
        let mut a = Population::new(settings());
        let mut b = Population::new(settings());
        let _ = a.advance(&[1, 2, 3, 4, 5, 6]);
        let _ = b.advance(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(a.members(), b.members());
    }

    #[test]
    fn missing_scores_count_as_zero() {
        let mut population = Population::new(settings());
        let report = population.advance(&[7]);
        assert_eq!(report.best, 7);
        assert_eq!(report.worst, 0);
    }
}
