//! Shortest road route on an undirected weighted map.
//!
//! Each city carries a straight-line distance to one reference city. That
//! distance is the heuristic when the reference city is the goal; for any
//! other goal the heuristic is 0, which keeps A* optimal.

use std::fmt;

use waypoint_kernel::state::CanonicalState;
use waypoint_search::{Cost, DomainAdapter, Successor};

use crate::contract::{DomainError, PuzzleWorld};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CityId(usize);

impl CityId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl CanonicalState for CityId {
    fn encode_canonical(&self, out: &mut Vec<u8>) {
        self.0.encode_canonical(out);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct City {
    name: String,
    straight_line: Cost,
}

/// Drive along one road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Road {
    pub to: CityId,
    pub distance: Cost,
}

/// Cities, roads and straight-line distances to a reference city.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteMap {
    cities: Vec<City>,
    /// Outgoing roads per city, in insertion order.
    roads: Vec<Vec<Road>>,
    reference: Option<CityId>,
}

impl RouteMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a city with its straight-line distance to the reference city.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidParameter`] for a duplicate name or a
    /// negative distance.
    pub fn add_city(&mut self, name: &str, straight_line: Cost) -> Result<CityId, DomainError> {
        if straight_line < 0 {
            return Err(DomainError::invalid(
                "city",
                format!("{name}: straight-line distance {straight_line} is negative"),
            ));
        }
        if self.cities.iter().any(|c| c.name.eq_ignore_ascii_case(name)) {
            return Err(DomainError::invalid("city", format!("{name} is listed twice")));
        }
        let id = CityId(self.cities.len());
        if straight_line == 0 && self.reference.is_none() {
            self.reference = Some(id);
        }
        self.cities.push(City {
            name: name.to_string(),
            straight_line,
        });
        self.roads.push(Vec::new());
        Ok(id)
    }

    /// Add a two-way road.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidParameter`] for unknown cities or a
    /// negative distance.
    pub fn add_road(&mut self, a: CityId, b: CityId, distance: Cost) -> Result<(), DomainError> {
        if distance < 0 {
            return Err(DomainError::invalid(
                "road",
                format!("distance {distance} is negative"),
            ));
        }
        if a.0 >= self.cities.len() || b.0 >= self.cities.len() {
            return Err(DomainError::invalid("road", "endpoint is not on the map"));
        }
        self.roads[a.0].push(Road { to: b, distance });
        self.roads[b.0].push(Road { to: a, distance });
        Ok(())
    }

    /// Look a city up by full name or by unambiguous initial, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidParameter`] when nothing matches.
    pub fn city(&self, query: &str) -> Result<CityId, DomainError> {
        let query = query.trim();
        if let Some(index) = self
            .cities
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(query))
        {
            return Ok(CityId(index));
        }
        let mut by_initial = self.cities.iter().enumerate().filter(|(_, c)| {
            query.len() == 1 && c.name.get(..1).is_some_and(|i| i.eq_ignore_ascii_case(query))
        });
        match (by_initial.next(), by_initial.next()) {
            (Some((index, _)), None) => Ok(CityId(index)),
            _ => Err(DomainError::invalid(
                "city",
                format!("`{query}` is not a city on this map"),
            )),
        }
    }

    #[must_use]
    pub fn name(&self, id: CityId) -> &str {
        self.cities.get(id.0).map_or("?", |c| c.name.as_str())
    }

    #[must_use]
    pub fn roads(&self, id: CityId) -> &[Road] {
        self.roads.get(id.0).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    #[must_use]
    pub fn road_count(&self) -> usize {
        self.roads.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// The city straight-line distances are measured to.
    #[must_use]
    pub fn reference(&self) -> Option<CityId> {
        self.reference
    }

    /// The Romania road map with straight-line distances to Bucharest.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in table.
    pub fn romania() -> Result<Self, DomainError> {
        const CITIES: [(&str, Cost); 20] = [
            ("Arad", 366),
            ("Bucharest", 0),
            ("Craiova", 160),
            ("Drobeta", 242),
            ("Eforie", 161),
            ("Fagaras", 176),
            ("Giurgiu", 77),
            ("Hirsova", 151),
            ("Iasi", 226),
            ("Lugoj", 244),
            ("Mehadia", 241),
            ("Neamt", 234),
            ("Oradea", 380),
            ("Pitesti", 100),
            ("Rimnicu Vilcea", 193),
            ("Sibiu", 253),
            ("Timisoara", 329),
            ("Urziceni", 80),
            ("Vaslui", 199),
            ("Zerind", 374),
        ];
        const ROADS: [(&str, &str, Cost); 23] = [
            ("Arad", "Zerind", 75),
            ("Arad", "Sibiu", 140),
            ("Arad", "Timisoara", 118),
            ("Zerind", "Oradea", 71),
            ("Oradea", "Sibiu", 151),
            ("Timisoara", "Lugoj", 111),
            ("Lugoj", "Mehadia", 70),
            ("Mehadia", "Drobeta", 75),
            ("Drobeta", "Craiova", 120),
            ("Craiova", "Rimnicu Vilcea", 146),
            ("Craiova", "Pitesti", 138),
            ("Rimnicu Vilcea", "Sibiu", 80),
            ("Rimnicu Vilcea", "Pitesti", 97),
            ("Sibiu", "Fagaras", 99),
            ("Fagaras", "Bucharest", 211),
            ("Pitesti", "Bucharest", 101),
            ("Bucharest", "Giurgiu", 90),
            ("Bucharest", "Urziceni", 85),
            ("Urziceni", "Hirsova", 98),
            ("Hirsova", "Eforie", 86),
            ("Urziceni", "Vaslui", 142),
            ("Vaslui", "Iasi", 92),
            ("Iasi", "Neamt", 87),
        ];

        let mut map = Self::new();
        for (name, straight_line) in CITIES {
            map.add_city(name, straight_line)?;
        }
        for (a, b, distance) in ROADS {
            let (a, b) = (map.city(a)?, map.city(b)?);
            map.add_road(a, b, distance)?;
        }
        Ok(map)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFinding {
    map: RouteMap,
    start: CityId,
    goal: CityId,
}

impl RouteFinding {
    #[must_use]
    pub fn new(map: RouteMap, start: CityId, goal: CityId) -> Self {
        Self { map, start, goal }
    }

    /// Resolve both endpoints by name.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidParameter`] for an unknown city.
    pub fn between(map: RouteMap, start: &str, goal: &str) -> Result<Self, DomainError> {
        let (start, goal) = (map.city(start)?, map.city(goal)?);
        Ok(Self::new(map, start, goal))
    }

    #[must_use]
    pub fn map(&self) -> &RouteMap {
        &self.map
    }

    fn uses_straight_line(&self) -> bool {
        self.map.reference == Some(self.goal)
    }
}

impl DomainAdapter for RouteFinding {
    type State = CityId;
    type Action = Road;

    fn domain_id(&self) -> &str {
        "route"
    }

    fn initial_state(&self) -> CityId {
        self.start
    }

    fn is_goal(&self, state: &CityId) -> bool {
        *state == self.goal
    }

    fn successors(&self, state: &CityId) -> Vec<Successor<CityId, Road>> {
        self.map
            .roads(*state)
            .iter()
            .map(|&road| Successor::new(road, road.to, road.distance))
            .collect()
    }

    fn heuristic(&self, state: &CityId) -> Option<Cost> {
        if !self.uses_straight_line() {
            return Some(0);
        }
        self.map.cities.get(state.0).map(|c| c.straight_line)
    }
}

impl PuzzleWorld for RouteFinding {
    fn render_state(&self, state: &CityId) -> String {
        self.map.name(*state).to_string()
    }

    fn render_action(&self, action: &Road) -> String {
        format!("drive to {} ({})", self.map.name(action.to), action.distance)
    }

    fn heuristic_name(&self) -> Option<&'static str> {
        Some(if self.uses_straight_line() {
            "straight-line"
        } else {
            "zero"
        })
    }
}

impl fmt::Display for RouteFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.map.name(self.start),
            self.map.name(self.goal)
        )
    }
}
