//! Feed-forward network that maps observations to headings.

use maze_chase_core::{Direction, GhostMode, Observation, MAZE_COLUMNS, TILE_WIDTH};
use maze_chase_system_control::DirectionPolicy;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Number of features produced by [`encode`].
pub const INPUTS: usize = 13;

/// One output per cardinal direction.
pub const OUTPUTS: usize = 4;

/// Encodes an observation as network inputs.
///
/// Layout: open exits (4), heading one-hot (4), offset to the nearest pellet
/// (2), offset to the nearest dangerous or frightened ghost (2) and whether
/// that ghost is frightened (1). Offsets are scaled by the maze width.
#[must_use]
pub fn encode(observation: &Observation) -> [f64; INPUTS] {
    let scale = TILE_WIDTH * f64::from(MAZE_COLUMNS);
    let mut features = [0.0; INPUTS];

    for (slot, open) in features.iter_mut().zip(observation.open) {
        *slot = if open { 1.0 } else { 0.0 };
    }
    if let Some(index) = observation.heading.cardinal_index() {
        features[4 + index] = 1.0;
    }
    if let Some(pellet) = observation.nearest_pellet {
        let offset = (pellet - observation.position) / scale;
        features[8] = offset.x;
        features[9] = offset.y;
    }

    let nearest_ghost = observation
        .ghosts
        .iter()
        .filter(|sighting| sighting.mode != GhostMode::Spawn)
        .min_by(|a, b| {
            let da = a.position.distance_squared(observation.position);
            let db = b.position.distance_squared(observation.position);
            da.total_cmp(&db)
        });
    if let Some(ghost) = nearest_ghost {
        let offset = (ghost.position - observation.position) / scale;
        features[10] = offset.x;
        features[11] = offset.y;
        features[12] = if ghost.mode == GhostMode::Freight { 1.0 } else { 0.0 };
    }

    features
}

/// Single hidden layer perceptron with `tanh` activation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Network {
    hidden: usize,
    hidden_weights: Vec<f64>,
    hidden_bias: Vec<f64>,
    output_weights: Vec<f64>,
    output_bias: Vec<f64>,
}

impl Network {
    /// Network with every parameter drawn uniformly from `-1..1`.
    pub fn random<R: Rng + ?Sized>(hidden: usize, rng: &mut R) -> Self {
        let hidden = hidden.max(1);
        let mut draw = |count: usize| -> Vec<f64> {
            (0..count).map(|_| rng.gen_range(-1.0..1.0)).collect()
        };
        Self {
            hidden,
            hidden_weights: draw(hidden * INPUTS),
            hidden_bias: draw(hidden),
            output_weights: draw(OUTPUTS * hidden),
            output_bias: draw(OUTPUTS),
        }
    }

    /// Network whose parameters are all zero.
    #[must_use]
    pub fn zeroed(hidden: usize) -> Self {
        let hidden = hidden.max(1);
        Self {
            hidden,
            hidden_weights: vec![0.0; hidden * INPUTS],
            hidden_bias: vec![0.0; hidden],
            output_weights: vec![0.0; OUTPUTS * hidden],
            output_bias: vec![0.0; OUTPUTS],
        }
    }

    /// Width of the hidden layer.
    #[must_use]
    pub const fn hidden(&self) -> usize {
        self.hidden
    }

    /// Total number of weights and biases.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.hidden_weights.len()
            + self.hidden_bias.len()
            + self.output_weights.len()
            + self.output_bias.len()
    }

    /// Whether every parameter vector matches the hidden width. Deserialized
    /// networks are checked with this before use.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.hidden > 0
            && self.hidden_weights.len() == self.hidden * INPUTS
            && self.hidden_bias.len() == self.hidden
            && self.output_weights.len() == OUTPUTS * self.hidden
            && self.output_bias.len() == OUTPUTS
    }

    /// Raw outputs for the provided features.
    #[must_use]
    pub fn forward(&self, inputs: &[f64; INPUTS]) -> [f64; OUTPUTS] {
        let activations: Vec<f64> = self
            .hidden_weights
            .chunks(INPUTS)
            .zip(&self.hidden_bias)
            .map(|(weights, bias)| {
                let sum: f64 = weights.iter().zip(inputs).map(|(w, x)| w * x).sum();
                (sum + bias).tanh()
            })
            .collect();

        let mut outputs = [0.0; OUTPUTS];
        for ((output, weights), bias) in outputs
            .iter_mut()
            .zip(self.output_weights.chunks(self.hidden))
            .zip(&self.output_bias)
        {
            *output = weights.iter().zip(&activations).map(|(w, a)| w * a).sum::<f64>() + bias;
        }
        outputs
    }

    /// Heading with the strongest output; the first one wins ties.
    #[must_use]
    pub fn decide(&self, observation: &Observation) -> Direction {
        let outputs = self.forward(&encode(observation));
        let mut best = 0;
        for (index, value) in outputs.iter().enumerate().skip(1) {
            if *value > outputs[best] {
                best = index;
            }
        }
        Direction::CARDINAL[best]
    }

    /// Adds gaussian noise of deviation `scale` to each parameter with
    /// probability `rate`.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f64, scale: f64, rng: &mut R) {
        let Ok(noise) = Normal::new(0.0, scale) else {
            tracing::warn!(scale, "invalid mutation scale; network left unchanged");
            return;
        };
        for parameter in self
            .hidden_weights
            .iter_mut()
            .chain(&mut self.hidden_bias)
            .chain(&mut self.output_weights)
            .chain(&mut self.output_bias)
        {
            if rng.gen::<f64>() < rate {
                *parameter += noise.sample(rng);
            }
        }
    }
}

/// Steers Pac-Man with a borrowed network.
#[derive(Clone, Copy, Debug)]
pub struct NetworkPolicy<'a> {
    network: &'a Network,
}

impl<'a> NetworkPolicy<'a> {
    /// Wraps a network.
    #[must_use]
    pub const fn new(network: &'a Network) -> Self {
        Self { network }
    }
}

impl DirectionPolicy for NetworkPolicy<'_> {
    fn decide(&mut self, observation: &Observation) -> Direction {
        self.network.decide(observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::{DVec2, GhostSighting, Actor};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn observation() -> Observation {
        let mut observation = Observation::at(DVec2::new(100.0, 100.0), Direction::Right);
        observation.open = [true, false, false, true];
        observation.nearest_pellet = Some(DVec2::new(116.0, 100.0));
        observation.ghosts = vec![
            GhostSighting {
                ghost: Actor::Blinky,
                position: DVec2::new(100.0, 10.0),
                mode: GhostMode::Spawn,
            },
            GhostSighting {
                ghost: Actor::Pinky,
                position: DVec2::new(100.0, 144.8),
                mode: GhostMode::Freight,
            },
        ];
        observation
    }

    #[test]
    fn encoding_skips_returning_ghosts() {
        let features = encode(&observation());
        assert_eq!(&features[..8], &[1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        assert!((features[8] - 16.0 / 448.0).abs() < 1e-12);
        assert_eq!(features[9], 0.0);
        assert_eq!(features[10], 0.0);
        assert!((features[11] - 0.1).abs() < 1e-12);
        assert_eq!(features[12], 1.0);
    }

    #[test]
    fn zeroed_network_breaks_ties_toward_up() {
        let network = Network::zeroed(4);
        assert_eq!(network.decide(&observation()), Direction::Up);
        assert!(network.is_well_formed());
        assert_eq!(network.parameter_count(), 4 * INPUTS + 4 + OUTPUTS * 4 + OUTPUTS);
    }

    #[test]
    fn output_bias_selects_the_heading() {
        let mut network = Network::zeroed(2);
        network.output_bias = vec![0.0, 0.0, 0.5, 0.1];
        let mut policy = NetworkPolicy::new(&network);
        assert_eq!(policy.decide(&observation()), Direction::Left);
    }

    #[test]
    fn mutation_respects_its_rate() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let original = Network::random(6, &mut rng);

        let mut untouched = original.clone();
        untouched.mutate(0.0, 1.0, &mut rng);
        assert_eq!(untouched, original);

        let mut shaken = original.clone();
        shaken.mutate(1.0, 1.0, &mut rng);
        let changed = shaken
            .hidden_weights
            .iter()
            .zip(&original.hidden_weights)
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(changed, original.hidden_weights.len());
        assert!(shaken.is_well_formed());
    }

    #[test]
    fn truncated_parameters_are_malformed() {
        let mut network = Network::zeroed(3);
        let _ = network.output_bias.pop();
        assert!(!network.is_well_formed());
    }
}
