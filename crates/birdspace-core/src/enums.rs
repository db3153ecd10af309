//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Faction tag. Never changes after an entity is constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    #[default]
    Alliance,
    Enemy,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Alliance => Team::Enemy,
            Team::Enemy => Team::Alliance,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Team::Alliance => "Alliance",
            Team::Enemy => "Enemy",
        }
    }

    pub fn from_name(name: &str) -> Option<Team> {
        match name {
            "Alliance" => Some(Team::Alliance),
            "Enemy" => Some(Team::Enemy),
            _ => None,
        }
    }
}

/// Closed set of simulated entity kinds. Update and draw dispatch match on this
/// exhaustively, so a kind without behavior cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Modular alliance ship built from tiles.
    Ship,
    /// Small autonomous enemy fighter.
    EnemyCraft,
    /// Gun mount slaved to a turret station.
    Turret,
    /// Control console that aims a linked turret.
    TurretStation,
    /// Controller avatar (player or NPC).
    Bird,
    /// Laser projectile.
    Laser,
    /// Elliptical regenerating shield.
    Shield,
    /// Cosmetic explosion effect.
    Explosion,
    AllianceMothership,
    EnemyMothership,
    /// Axis-aligned collision wall for birds.
    Wall,
    Decoration,
    Room,
}

/// Tile function. Weapon tiles come in left/right-facing art but fire identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    AllPurpose,
    Engine,
    WeaponLeft,
    WeaponRight,
    Control,
}

impl TileKind {
    pub fn is_weapon(self) -> bool {
        matches!(self, TileKind::WeaponLeft | TileKind::WeaponRight)
    }
}

/// Which edge of a 2×1 tile a door sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorSide {
    TopLeft,
    TopRight,
    Right,
    BottomRight,
    BottomLeft,
    Left,
}

impl DoorSide {
    pub const ALL: [DoorSide; 6] = [
        DoorSide::TopLeft,
        DoorSide::TopRight,
        DoorSide::Right,
        DoorSide::BottomRight,
        DoorSide::BottomLeft,
        DoorSide::Left,
    ];

    /// Map a content-authoring index (0..6) to a side.
    pub fn from_index(index: usize) -> Option<DoorSide> {
        Self::ALL.get(index).copied()
    }
}

/// Per-controller targeting state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    /// No target held; heading is kept.
    #[default]
    Idle,
    /// A target was picked this frame.
    Acquiring,
    /// Target held, turning toward it.
    Tracking,
    /// Weapon discharged this frame.
    Firing,
}

/// Engine run state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    /// No scene loaded yet.
    #[default]
    Idle,
    Running,
    Paused,
}

/// Built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneId {
    /// Full battle: spawners, shields and AI active.
    Battle,
    /// Static layout for level authoring: spawners and shield flare inactive.
    Editor,
}

/// Autonomous controller archetype; selects an AI profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiArchetype {
    /// Unoccupied turret station aiming its linked turret.
    TurretStation,
    /// Enemy fighter pursuing alliance vehicles.
    EnemyCraft,
}
