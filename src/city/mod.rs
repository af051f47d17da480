//! City layer - growth, production and the policies that drive them

pub mod assignment;
pub mod growth;
pub mod production;
pub mod queue;

pub use assignment::{NearestTileAssigner, TileAssigner};
pub use growth::{CityGrowth, CityRules, StandardCityRules, TurnProduction};
pub use production::{resolve_cities, resolve_city, CityPolicies, ProductionResult};
pub use queue::{ProductionPlanner, RepeatingPlanner};
