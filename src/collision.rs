//! Player movement against wall geometry and goal detection.

use crate::geometry::{Aabb, Vec2};

/// Resolves a move of a box of `size` from `current` by `delta` against `walls`.
///
/// The whole displacement is tested at once: if the box at the destination overlaps any wall the
/// move is refused and `current` is returned, otherwise the destination is returned. There is no
/// sliding along walls and no partial movement.
#[must_use]
pub fn try_move(current: Vec2, delta: Vec2, size: Vec2, walls: &[Aabb]) -> Vec2 {
    let candidate = current + delta;
    let bounds = Aabb::at(candidate, size);

    if walls.iter().any(|wall| wall.intersects(&bounds)) {
        current
    } else {
        candidate
    }
}

/// Checks whether the player box has entered the exit zone.
///
/// This function uses the same strict overlap as wall collisions: a player merely touching the
/// exit zone has not reached it yet.
#[must_use]
pub fn reached_goal(player: &Aabb, exit: &Aabb) -> bool {
    player.intersects(exit)
}
