//! City growth and production resolution - runs once per city per turn
//!
//! For each city, in arena order:
//! 1. Apply the growth computation (one new resident on growth, `d`
//!    residents removed on shrinkage unless that would empty the city)
//! 2. Apply the production computation
//! 3. On a completed unit, place it at the city facing the configured
//!    direction and pay its population cost one resident at a time
//! 4. Ask the planner what to build next
//!
//! Guard conditions (emptying a city) are logged and skipped; they never
//! abort the turn.

use crate::city::assignment::TileAssigner;
use crate::city::growth::CityRules;
use crate::city::queue::ProductionPlanner;
use crate::core::error::Result;
use crate::core::types::{CityId, UnitId};
use crate::turn::events::TurnEvent;
use crate::world::city::{CityResident, Producible};
use crate::world::game::GameData;

/// Collaborators the resolver consults
#[derive(Clone, Copy)]
pub struct CityPolicies<'a> {
    pub rules: &'a dyn CityRules,
    pub assigner: &'a dyn TileAssigner,
    pub planner: &'a dyn ProductionPlanner,
}

/// What one city did this turn
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionResult {
    pub city: CityId,
    pub size_before: i32,
    pub size_after: i32,
    pub produced: Option<Producible>,
    pub unit: Option<UnitId>,
}

/// Resolve every city. A city whose resolution fails (a dangling owner, a
/// prototype missing from the rules) is logged and skipped.
pub fn resolve_cities(game: &mut GameData, policies: CityPolicies<'_>) -> Vec<ProductionResult> {
    let mut results = Vec::new();
    for city in game.cities.ids() {
        match resolve_city(game, city, policies) {
            Ok(result) => results.push(result),
            Err(e) => tracing::error!("Skipping production for {:?}: {}", city, e),
        }
    }
    results
}

pub fn resolve_city(game: &mut GameData, city_id: CityId, policies: CityPolicies<'_>) -> Result<ProductionResult> {
    let turn = game.turn;

    // === GROWTH ===
    let city = game.city(city_id)?;
    let size_before = city.size();
    let owner = city.owner;
    let location = city.location;
    let civilization = game.player(owner)?.civilization;
    let growth = policies.rules.compute_city_growth(city, game);
    game.city_mut(city_id)?.food_stored = growth.food_stored;

    if growth.new_size > size_before {
        let mut resident = CityResident::new(civilization);
        policies.assigner.assign_new_citizen(game, city_id, &mut resident);
        if resident.tile_worked.is_none() {
            tracing::debug!("No free tile for new resident of {:?}", city_id);
            game.log.record(turn, TurnEvent::CitizenUnassigned { city: city_id });
        }
        let city = game.city_mut(city_id)?;
        city.add_resident(resident);
        let size = city.size();
        game.log.record(turn, TurnEvent::CityGrew { city: city_id, size });
    } else if growth.new_size < size_before {
        let diff = size_before - growth.new_size;
        if growth.new_size <= 0 {
            let name = &game.city(city_id)?.name;
            tracing::error!("Attempting to remove the last resident from {}", name);
            game.log.record(turn, TurnEvent::ResidentRemovalBlocked { city: city_id, requested: diff });
        } else {
            let city = game.city_mut(city_id)?;
            for _ in 0..diff {
                city.remove_resident();
            }
            let size = city.size();
            game.log.record(turn, TurnEvent::CityShrank { city: city_id, size });
        }
    }

    // === PRODUCTION ===
    let city = game.city(city_id)?;
    let production = policies.rules.compute_turn_production(city, game);

    let mut unit = None;
    if let Some(item) = &production.completed {
        let city_name = game.city(city_id)?.name.clone();
        tracing::info!("Produced {:?} in {}", item, city_name);

        match item {
            Producible::Unit(unit_type) => {
                let mut new_unit = game.new_unit(*unit_type, owner, location)?;
                new_unit.facing = game.config.produced_unit_facing;
                let unit_id = game.insert_unit(new_unit)?;
                game.log.record(
                    turn,
                    TurnEvent::UnitProduced { city: city_id, unit: unit_id, unit_type: *unit_type },
                );
                unit = Some(unit_id);

                let population_cost = game
                    .rules
                    .unit_type(*unit_type)
                    .map(|p| p.population_cost)
                    .unwrap_or(0);
                pay_population_cost(game, city_id, unit_id, population_cost)?;
            }
            Producible::Building(name) => {
                game.city_mut(city_id)?.buildings.push(name.clone());
                game.log.record(
                    turn,
                    TurnEvent::BuildingCompleted { city: city_id, building: name.clone() },
                );
            }
        }

        let next = policies.planner.next_item_to_produce(game, city_id, item);
        let city = game.city_mut(city_id)?;
        city.shields_stored = production.shields_stored;
        if city.producing != next {
            city.producing = next.clone();
            game.log.record(turn, TurnEvent::ProductionChanged { city: city_id, item: next });
        }
    } else {
        game.city_mut(city_id)?.shields_stored = production.shields_stored;
    }

    Ok(ProductionResult {
        city: city_id,
        size_before,
        size_after: game.city(city_id)?.size(),
        produced: production.completed,
        unit,
    })
}

/// Remove `cost` residents one at a time. The last resident is never
/// removed, so a unit may end up only partly paid for; the unit is kept.
fn pay_population_cost(game: &mut GameData, city_id: CityId, unit: UnitId, cost: i32) -> Result<()> {
    let turn = game.turn;
    let city = game.city_mut(city_id)?;
    let mut unpaid = 0;
    for paid in 0..cost.max(0) {
        if city.remove_resident().is_none() {
            unpaid = cost - paid;
            break;
        }
    }

    if unpaid > 0 {
        tracing::error!(
            "Attempting to remove the last resident from {} ({} population unpaid)",
            city.name,
            unpaid
        );
        game.log.record(turn, TurnEvent::PopulationCostUnpaid { city: city_id, unit, unpaid });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::assignment::NearestTileAssigner;
    use crate::city::growth::{CityGrowth, StandardCityRules, TurnProduction};
    use crate::city::queue::RepeatingPlanner;
    use crate::core::config::EngineConfig;
    use crate::core::error::EngineError;
    use crate::core::rng::GameRng;
    use crate::core::types::{CivilizationId, PlayerId, TileCoord, TileDirection, UnitTypeId};
    use crate::world::city::City;
    use crate::world::map::{GameMap, Terrain};
    use crate::world::player::Player;
    use crate::world::rules::Rules;

    /// Rules returning fixed answers regardless of state
    struct FixedRules {
        size_delta: i32,
        completes: Option<Producible>,
    }

    impl CityRules for FixedRules {
        fn compute_city_growth(&self, city: &City, _game: &GameData) -> CityGrowth {
            CityGrowth {
                new_size: city.size() + self.size_delta,
                food_stored: city.food_stored,
            }
        }

        fn compute_turn_production(&self, city: &City, _game: &GameData) -> TurnProduction {
            TurnProduction {
                shields_stored: city.shields_stored,
                completed: self.completes.clone(),
            }
        }
    }

    fn game_with_city(size: i32) -> (GameData, CityId) {
        let mut game = GameData::new(
            GameMap::new(7, 7, false, Terrain::Grassland),
            Rules::with_defaults(),
            EngineConfig::default(),
            GameRng::seeded(1),
        );
        game.add_player(Player::ai(PlayerId(1), "Rome", CivilizationId(6)));
        let location = game.map.tile_id_at(TileCoord::new(3, 3)).unwrap();
        let mut city = City::new("Roma", PlayerId(1), location, CivilizationId(6), Producible::Unit(UnitTypeId(0)));
        for _ in 1..size {
            city.add_resident(CityResident::new(CivilizationId(6)));
        }
        let id = game.add_city(city).unwrap();
        (game, id)
    }

    fn policies(rules: &dyn CityRules) -> CityPolicies<'_> {
        CityPolicies {
            rules,
            assigner: &NearestTileAssigner,
            planner: &RepeatingPlanner,
        }
    }

    #[test]
    fn test_growth_adds_one_resident_of_owner_nationality() {
        let (mut game, city) = game_with_city(2);
        let rules = FixedRules { size_delta: 1, completes: None };
        let result = resolve_city(&mut game, city, policies(&rules)).unwrap();

        assert_eq!(result.size_before, 2);
        assert_eq!(result.size_after, 3);
        let city = game.city(city).unwrap();
        let newest = city.residents().last().unwrap();
        assert_eq!(newest.nationality, CivilizationId(6));
        assert!(newest.tile_worked.is_some());
    }

    #[test]
    fn test_shrink_removes_exact_difference() {
        let (mut game, city) = game_with_city(5);
        let rules = FixedRules { size_delta: -3, completes: None };
        resolve_city(&mut game, city, policies(&rules)).unwrap();
        assert_eq!(game.city(city).unwrap().size(), 2);
    }

    #[test]
    fn test_shrink_to_zero_is_blocked_and_logged() {
        let (mut game, city) = game_with_city(1);
        let rules = FixedRules { size_delta: -1, completes: None };
        resolve_city(&mut game, city, policies(&rules)).unwrap();

        assert_eq!(game.city(city).unwrap().size(), 1);
        assert_eq!(
            game.log.errors().map(|e| e.event.clone()).collect::<Vec<_>>(),
            vec![TurnEvent::ResidentRemovalBlocked { city, requested: 1 }]
        );
    }

    #[test]
    fn test_shrink_below_zero_removes_nothing() {
        let (mut game, city) = game_with_city(3);
        let rules = FixedRules { size_delta: -5, completes: None };
        resolve_city(&mut game, city, policies(&rules)).unwrap();
        assert_eq!(game.city(city).unwrap().size(), 3);
    }

    #[test]
    fn test_produced_unit_placed_at_city() {
        let (mut game, city) = game_with_city(2);
        let archer = game.rules.unit_type_id("Archer").unwrap();
        let rules = FixedRules { size_delta: 0, completes: Some(Producible::Unit(archer)) };
        let result = resolve_city(&mut game, city, policies(&rules)).unwrap();

        let unit_id = result.unit.unwrap();
        let unit = game.unit(unit_id).unwrap();
        let location = game.city(city).unwrap().location;
        assert_eq!(unit.owner, PlayerId(1));
        assert_eq!(unit.location, location);
        assert_eq!(unit.facing, TileDirection::SouthWest);
        assert_eq!(unit.experience_level, "regular");
        assert_eq!(game.units_of(PlayerId(1)), vec![unit_id]);
        assert_eq!(game.units_on_tile(location), vec![unit_id]);
        assert_eq!(game.city(city).unwrap().size(), 2);
    }

    #[test]
    fn test_settler_costs_population() {
        let (mut game, city) = game_with_city(4);
        let settler = game.rules.unit_type_id("Settler").unwrap();
        let rules = FixedRules { size_delta: 0, completes: Some(Producible::Unit(settler)) };
        resolve_city(&mut game, city, policies(&rules)).unwrap();
        assert_eq!(game.city(city).unwrap().size(), 2);
        assert_eq!(game.log.errors().count(), 0);
    }

    #[test]
    fn test_settler_from_small_city_is_partly_paid() {
        let (mut game, city) = game_with_city(2);
        let settler = game.rules.unit_type_id("Settler").unwrap();
        let rules = FixedRules { size_delta: 0, completes: Some(Producible::Unit(settler)) };
        let result = resolve_city(&mut game, city, policies(&rules)).unwrap();

        // Unit is kept, city stops at size 1 with one population unpaid
        let unit = result.unit.unwrap();
        assert!(game.units.contains(unit));
        assert_eq!(game.city(city).unwrap().size(), 1);
        assert_eq!(
            game.log.errors().map(|e| e.event.clone()).collect::<Vec<_>>(),
            vec![TurnEvent::PopulationCostUnpaid { city, unit, unpaid: 1 }]
        );
    }

    #[test]
    fn test_building_completion_and_next_item() {
        let (mut game, city) = game_with_city(1);
        let rules = FixedRules { size_delta: 0, completes: Some(Producible::Building("Temple".into())) };
        let result = resolve_city(&mut game, city, policies(&rules)).unwrap();

        assert_eq!(result.unit, None);
        assert!(game.units.is_empty());
        let city = game.city(city).unwrap();
        assert!(city.has_building("Temple"));
        assert_eq!(city.producing, Producible::Building("Barracks".into()));
    }

    #[test]
    fn test_standard_rules_accumulate_shields() {
        let (mut game, city) = game_with_city(1);
        let policies = policies(&StandardCityRules);
        // Unassigned founder: 1 shield a turn from the center, warrior costs 10
        for _ in 0..9 {
            assert_eq!(resolve_city(&mut game, city, policies).unwrap().produced, None);
        }
        let result = resolve_city(&mut game, city, policies).unwrap();
        assert_eq!(result.produced, Some(Producible::Unit(UnitTypeId(0))));
        assert_eq!(game.units_of(PlayerId(1)).len(), 1);
    }

    /// Completes an item and spends every stored shield on it
    struct SpendAllRules(Producible);

    impl CityRules for SpendAllRules {
        fn compute_city_growth(&self, city: &City, _game: &GameData) -> CityGrowth {
            CityGrowth {
                new_size: city.size(),
                food_stored: city.food_stored,
            }
        }

        fn compute_turn_production(&self, _city: &City, _game: &GameData) -> TurnProduction {
            TurnProduction {
                shields_stored: 0,
                completed: Some(self.0.clone()),
            }
        }
    }

    #[test]
    fn test_failed_unit_creation_keeps_shields() {
        let (mut game, city) = game_with_city(2);
        game.city_mut(city).unwrap().shields_stored = 25;
        let rules = SpendAllRules(Producible::Unit(UnitTypeId(99)));

        let result = resolve_city(&mut game, city, policies(&rules));
        assert!(matches!(result, Err(EngineError::UnknownUnitType(_))));
        let city = game.city(city).unwrap();
        assert_eq!(city.shields_stored, 25);
        assert_eq!(city.producing, Producible::Unit(UnitTypeId(0)));
        assert!(game.units.is_empty());
    }

    #[test]
    fn test_completed_item_spends_shields() {
        let (mut game, city) = game_with_city(2);
        game.city_mut(city).unwrap().shields_stored = 25;
        let warrior = game.rules.unit_type_id("Warrior").unwrap();
        let rules = SpendAllRules(Producible::Unit(warrior));

        resolve_city(&mut game, city, policies(&rules)).unwrap();
        assert_eq!(game.city(city).unwrap().shields_stored, 0);
        assert_eq!(game.units.len(), 1);
    }

    #[test]
    fn test_resolve_cities_skips_broken_city() {
        let (mut game, good) = game_with_city(1);
        let location = game.map.tile_id_at(TileCoord::new(0, 0)).unwrap();
        let broken = game
            .add_city(City::new("Lost", PlayerId(1), location, CivilizationId(6), Producible::Unit(UnitTypeId(0))))
            .unwrap();
        game.players.clear();

        let rules = FixedRules { size_delta: 1, completes: None };
        let results = resolve_cities(&mut game, policies(&rules));
        assert!(results.is_empty());
        assert_eq!(game.city(good).unwrap().size(), 1);
        assert_eq!(game.city(broken).unwrap().size(), 1);
    }
}
