//! gridflow
//! ========
//!
//! A 2D grid pathfinding engine: A* graph search over a cost-weighted grid,
//! multi-goal Dijkstra-map distance fields with several specialized path
//! extractors (greedy descent, attack positioning, flee routing, technique
//! placement), zone-of-influence partitioning, and randomized-DFS maze
//! carving for a single meandering line between two cells.
//!
//! [`Graph`] and [`DistanceField`] are the two engines everything else is
//! built from: a plain weighted graph for one-shot A*/Dijkstra queries, and
//! a reusable wave-scan field for anything that needs repeated cheap path
//! lookups against the same goal set.

mod cell;
mod costmap;
mod direction;
mod error;
mod field;
mod graph;
mod los;
mod measurement;
mod rng;
mod technique;
mod twisted_line;
mod zone;

pub use cell::Cell;
pub use costmap::{is_wall_char, CostMap, DEFAULT_COST, WALL_COST};
pub use direction::{Direction, CARDINALS, OUTWARDS};
pub use error::{GridFlowError, GridFlowResult};
pub use field::{is_finite_distance, AttackPath, DistanceField, FleePath, TechniquePlacement, DARK, FLOOR, GOAL, WALL};
pub use graph::{Edge, Graph};
pub use los::LineOfSight;
pub use measurement::Measurement;
pub use rng::Rng;
pub use technique::Technique;
pub use twisted_line::TwistedLine;
pub use zone::ZoneOfInfluence;
