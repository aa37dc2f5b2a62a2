//! Brigade dispatch: choosing a target for every brigade each tick and
//! resolving the resulting move.

use serde::Serialize;
use tracing::debug;

use crate::brigade::{Brigade, BrigadeId, BrigadeTable};
use crate::error::Result;
use crate::fire::{suppress, FireState};
use crate::graph::{LocationGraph, LocationId};
use crate::path::{distances_from, interior};

/// What a brigade did during one dispatch pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BrigadeAction {
    /// Tank was too low to fight; moved to the nearest water point and refilled.
    Refueled {
        brigade: BrigadeId,
        location: LocationId,
    },
    /// Passed a water point on the way to `target`, stopped there and refilled.
    Intercepted {
        brigade: BrigadeId,
        location: LocationId,
        target: LocationId,
    },
    /// Reached a burning location and put it out.
    Suppressed {
        brigade: BrigadeId,
        location: LocationId,
    },
    /// Reached a location that was no longer burning.
    Arrived {
        brigade: BrigadeId,
        location: LocationId,
    },
    /// Nothing reachable to do this tick.
    Idle { brigade: BrigadeId },
}

impl BrigadeAction {
    pub fn brigade(&self) -> BrigadeId {
        match *self {
            BrigadeAction::Refueled { brigade, .. }
            | BrigadeAction::Intercepted { brigade, .. }
            | BrigadeAction::Suppressed { brigade, .. }
            | BrigadeAction::Arrived { brigade, .. }
            | BrigadeAction::Idle { brigade } => brigade,
        }
    }
}

/// How a walk along a path ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKind {
    /// Tank was empty; went to the nearest refill point instead.
    Refilled,
    /// Stopped at a water point inside the path.
    Intercepted,
    Suppressed,
    Arrived,
    /// No path, or an empty tank with no reachable refill point.
    Stayed,
}

/// Brigade state after walking a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    pub position: LocationId,
    pub water_level: u32,
    pub kind: MovementKind,
}

/// Walk `brigade` along `path` (origin first, target last) and resolve what
/// happens on the way.
///
/// An empty tank ignores the path and heads for the nearest water point or
/// station. Otherwise the first water point strictly inside the path stops
/// the walk with a refill. A brigade that reaches a burning target puts it out
/// and spends `consumption_per_fire`; a target that is no longer burning is
/// simply reached.
pub fn advance_along(
    graph: &mut LocationGraph,
    fires: &mut FireState,
    brigade: &Brigade,
    path: &[LocationId],
) -> Movement {
    let (Some(&origin), Some(&target)) = (path.first(), path.last()) else {
        return stay(brigade.position, brigade.water_level);
    };

    if brigade.is_empty() {
        let tree = distances_from(graph, origin);
        let refill_points = graph
            .locations()
            .filter(|&id| graph.flags(id).is_some_and(|flags| flags.is_refill_point()));
        return match tree.nearest(refill_points) {
            Some((location, _)) => Movement {
                position: location,
                water_level: brigade.capacity,
                kind: MovementKind::Refilled,
            },
            None => stay(origin, brigade.water_level),
        };
    }

    if let Some(&water) = interior(path).iter().find(|&&id| graph.has_water(id)) {
        return Movement {
            position: water,
            water_level: brigade.capacity,
            kind: MovementKind::Intercepted,
        };
    }

    if suppress(graph, fires, target) {
        return Movement {
            position: target,
            water_level: brigade
                .water_level
                .saturating_sub(brigade.consumption_per_fire),
            kind: MovementKind::Suppressed,
        };
    }

    Movement {
        position: target,
        water_level: brigade.water_level,
        kind: MovementKind::Arrived,
    }
}

fn stay(position: LocationId, water_level: u32) -> Movement {
    Movement {
        position,
        water_level,
        kind: MovementKind::Stayed,
    }
}

/// Give every brigade, in id order, one decision for this tick.
///
/// Each brigade's move is resolved completely before the next brigade looks
/// at the graph, so later brigades see fires already put out this tick. Does
/// nothing when no fire is burning.
pub fn dispatch_all(
    graph: &mut LocationGraph,
    brigades: &mut BrigadeTable,
    fires: &mut FireState,
) -> Result<Vec<BrigadeAction>> {
    if !fires.has_active() {
        return Ok(Vec::new());
    }

    let ids: Vec<BrigadeId> = brigades.ids().collect();
    let mut actions = Vec::with_capacity(ids.len());
    for id in ids {
        let Some(brigade) = brigades.get(id).copied() else {
            continue;
        };
        let action = dispatch_one(graph, brigades, fires, &brigade)?;
        debug!(
            ?action,
            water = ?brigades.get(id).map(|b| b.water_level),
            "brigade dispatched"
        );
        actions.push(action);
    }
    Ok(actions)
}

fn dispatch_one(
    graph: &mut LocationGraph,
    brigades: &mut BrigadeTable,
    fires: &mut FireState,
    brigade: &Brigade,
) -> Result<BrigadeAction> {
    let id = brigade.id;
    let tree = distances_from(graph, brigade.position);

    if !brigade.can_suppress() {
        let water_points = graph.locations().filter(|&loc| graph.has_water(loc));
        return match tree.nearest(water_points) {
            Some((location, _)) => {
                brigades.refill_at(id, location)?;
                Ok(BrigadeAction::Refueled {
                    brigade: id,
                    location,
                })
            }
            None => Ok(BrigadeAction::Idle { brigade: id }),
        };
    }

    let candidates = fires
        .active()
        .iter()
        .copied()
        .filter(|&fire| fire != brigade.position);
    let Some((target, _)) = tree.nearest(candidates) else {
        return Ok(BrigadeAction::Idle { brigade: id });
    };
    let Some(route) = tree.route_to(target) else {
        return Ok(BrigadeAction::Idle { brigade: id });
    };

    let movement = advance_along(graph, fires, brigade, &route.steps);
    brigades.relocate(id, movement.position, movement.water_level)?;

    let location = movement.position;
    Ok(match movement.kind {
        MovementKind::Intercepted => BrigadeAction::Intercepted {
            brigade: id,
            location,
            target,
        },
        MovementKind::Refilled => BrigadeAction::Refueled {
            brigade: id,
            location,
        },
        MovementKind::Suppressed => BrigadeAction::Suppressed {
            brigade: id,
            location,
        },
        MovementKind::Arrived => BrigadeAction::Arrived {
            brigade: id,
            location,
        },
        MovementKind::Stayed => BrigadeAction::Idle { brigade: id },
    })
}
