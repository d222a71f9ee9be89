//! SARSA temporal difference learning
//!
//! SARSA is on-policy TD control: the update bootstraps from the action the
//! agent actually picks in the next state, so it learns the value of the
//! ε-greedy policy it follows rather than of the greedy one.
//!
//! Q(s,a) ← Q(s,a) + α[r + γ Q(s',a') − Q(s,a)]
//!
//! ## Usage Example
//!
//! ```
//! use exam_balancer::{
//!     discretizer::discretize,
//!     environment::{Difficulty, StudentEnvironment, TRAINABLE_ACTIONS},
//!     sarsa::{Hyperparameters, SarsaAgent},
//! };
//!
//! let mut env = StudentEnvironment::new(5, Difficulty::Medium);
//! let mut agent =
//!     SarsaAgent::new(TRAINABLE_ACTIONS.to_vec(), Hyperparameters::default()).with_seed(1);
//!
//! let mut state = discretize(&env.reset());
//! let mut action = agent.choose_action(&state);
//! loop {
//!     let step = env.step(action);
//!     let next_state = discretize(&step.state);
//!     let next_action = agent.choose_action(&next_state);
//!     agent.update(&state, action, step.reward, &next_state, next_action);
//!     (state, action) = (next_state, next_action);
//!     if step.done {
//!         break;
//!     }
//! }
//! agent.decay_epsilon();
//! assert!(agent.table().len() > 0);
//! ```

pub mod agent;
pub mod frozen;
pub mod serialization;
pub mod value_table;

// Public re-exports
pub use agent::{Hyperparameters, SarsaAgent};
pub use frozen::FrozenPolicy;
pub use serialization::{SavedPolicy, TrainingMetadata};
pub use value_table::{ActionValues, ValueRow, ValueTable};
