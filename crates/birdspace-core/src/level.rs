//! Level descriptions: ordered entity-construction records.
//!
//! A level is replayed top to bottom to populate the registry. The text form
//! is one `TypeName(arg, ...)` record per line, with `#` comment lines and
//! blank lines ignored. Every record type has a typed config struct and a
//! fixed list of named arguments, which is what the editor binds against.

use serde::{Deserialize, Serialize};

use crate::enums::{SceneId, Team};
use crate::error::LevelError;

fn num(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn flag(value: &str) -> Option<bool> {
    match value {
        "true" | "True" | "1" => Some(true),
        "false" | "False" | "0" => Some(false),
        _ => None,
    }
}

fn team(value: &str) -> Option<Team> {
    Team::from_name(value.trim_matches(|c| c == '"' || c == '\''))
}

fn assign<T>(slot: &mut T, parsed: Option<T>) -> bool {
    match parsed {
        Some(v) => {
            *slot = v;
            true
        }
        None => false,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BirdConfig {
    pub x: f64,
    pub y: f64,
    /// Sprite variant.
    pub variant: u8,
    pub flipped: bool,
}

impl BirdConfig {
    fn set(&mut self, index: usize, value: &str) -> bool {
        match index {
            0 => assign(&mut self.x, num(value)),
            1 => assign(&mut self.y, num(value)),
            2 => assign(&mut self.variant, value.parse().ok()),
            3 => assign(&mut self.flipped, flag(value)),
            _ => false,
        }
    }
    fn values(&self) -> Vec<String> {
        vec![
            self.x.to_string(),
            self.y.to_string(),
            self.variant.to_string(),
            self.flipped.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllianceMothershipConfig {
    pub x: f64,
    pub y: f64,
    /// Half-length of the hull.
    pub size: f64,
    /// Half-width of the hull.
    pub width: f64,
}

impl Default for AllianceMothershipConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            size: 1.0,
            width: 1.0,
        }
    }
}

impl AllianceMothershipConfig {
    fn set(&mut self, index: usize, value: &str) -> bool {
        match index {
            0 => assign(&mut self.x, num(value)),
            1 => assign(&mut self.y, num(value)),
            2 => assign(&mut self.size, num(value)),
            3 => assign(&mut self.width, num(value)),
            _ => false,
        }
    }
    fn values(&self) -> Vec<String> {
        vec![
            self.x.to_string(),
            self.y.to_string(),
            self.size.to_string(),
            self.width.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyMothershipConfig {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    /// Craft released on the first eligible frame.
    pub burst: u32,
}

impl Default for EnemyMothershipConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            size: 1.0,
            burst: 0,
        }
    }
}

impl EnemyMothershipConfig {
    fn set(&mut self, index: usize, value: &str) -> bool {
        match index {
            0 => assign(&mut self.x, num(value)),
            1 => assign(&mut self.y, num(value)),
            2 => assign(&mut self.size, num(value)),
            3 => assign(&mut self.burst, value.parse().ok()),
            _ => false,
        }
    }
    fn values(&self) -> Vec<String> {
        vec![
            self.x.to_string(),
            self.y.to_string(),
            self.size.to_string(),
            self.burst.to_string(),
        ]
    }
}

/// Position-only record shared by ships, enemy craft and turrets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointConfig {
    pub x: f64,
    pub y: f64,
}

impl PointConfig {
    fn set_xy(&mut self, index: usize, value: &str) -> bool {
        match index {
            0 => assign(&mut self.x, num(value)),
            1 => assign(&mut self.y, num(value)),
            _ => false,
        }
    }
}

/// Axis-aligned span from `(x, y)` to `(x2, y2)`, used by walls and rooms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanConfig {
    pub x: f64,
    pub y: f64,
    pub x2: f64,
    pub y2: f64,
}

impl SpanConfig {
    fn set_span(&mut self, index: usize, value: &str) -> bool {
        match index {
            0 => assign(&mut self.x, num(value)),
            1 => assign(&mut self.y, num(value)),
            2 => assign(&mut self.x2, num(value)),
            3 => assign(&mut self.y2, num(value)),
            _ => false,
        }
    }

    fn span_values(&self) -> Vec<String> {
        vec![
            self.x.to_string(),
            self.y.to_string(),
            self.x2.to_string(),
            self.y2.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecorationConfig {
    pub x: f64,
    pub y: f64,
    /// Decoration art index, clamped to 0..=3 at spawn.
    pub index: u8,
}

impl DecorationConfig {
    fn set(&mut self, index: usize, value: &str) -> bool {
        match index {
            0 => assign(&mut self.x, num(value)),
            1 => assign(&mut self.y, num(value)),
            2 => assign(&mut self.index, value.parse().ok()),
            _ => false,
        }
    }
    fn values(&self) -> Vec<String> {
        vec![self.x.to_string(), self.y.to_string(), self.index.to_string()]
    }
}

/// Turret station; it targets the opponents of `team`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationConfig {
    pub x: f64,
    pub y: f64,
    pub team: Team,
}

impl StationConfig {
    fn set(&mut self, index: usize, value: &str) -> bool {
        match index {
            0 => assign(&mut self.x, num(value)),
            1 => assign(&mut self.y, num(value)),
            2 => assign(&mut self.team, team(value)),
            _ => false,
        }
    }
    fn values(&self) -> Vec<String> {
        vec![
            self.x.to_string(),
            self.y.to_string(),
            self.team.name().to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShieldConfig {
    pub x: f64,
    pub y: f64,
    /// Horizontal half-extent.
    pub w: f64,
    /// Vertical half-extent.
    pub h: f64,
    pub team: Team,
}

impl Default for ShieldConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w: 1.0,
            h: 1.0,
            team: Team::Alliance,
        }
    }
}

impl ShieldConfig {
    fn set(&mut self, index: usize, value: &str) -> bool {
        match index {
            0 => assign(&mut self.x, num(value)),
            1 => assign(&mut self.y, num(value)),
            2 => assign(&mut self.w, num(value)),
            3 => assign(&mut self.h, num(value)),
            4 => assign(&mut self.team, team(value)),
            _ => false,
        }
    }
    fn values(&self) -> Vec<String> {
        vec![
            self.x.to_string(),
            self.y.to_string(),
            self.w.to_string(),
            self.h.to_string(),
            self.team.name().to_string(),
        ]
    }
}

/// One entity-construction record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LevelRecord {
    Bird(BirdConfig),
    AllianceMothership(AllianceMothershipConfig),
    EnemyMothership(EnemyMothershipConfig),
    AllianceShip(PointConfig),
    EnemyCraft(PointConfig),
    Wall(SpanConfig),
    Decoration(DecorationConfig),
    Room(SpanConfig),
    TurretStation(StationConfig),
    Turret(PointConfig),
    Shield(ShieldConfig),
}

/// Every record takes at least a position.
const REQUIRED_ARGS: usize = 2;

/// Every type name accepted by the text format.
pub const TYPE_NAMES: [&str; 11] = [
    "Bird",
    "AllianceMotherShip",
    "EnemyMotherShip",
    "AllianceShip",
    "SmallEnemyShip",
    "CollisionWall",
    "Decoration",
    "RectRoom",
    "TurretStation",
    "Turret",
    "Shields",
];

impl LevelRecord {
    /// Record with default arguments for a text-format type name.
    pub fn blank(type_name: &str) -> Option<LevelRecord> {
        let record = match type_name {
            "Bird" => LevelRecord::Bird(BirdConfig::default()),
            "AllianceMotherShip" => LevelRecord::AllianceMothership(Default::default()),
            "EnemyMotherShip" => LevelRecord::EnemyMothership(Default::default()),
            "AllianceShip" => LevelRecord::AllianceShip(PointConfig::default()),
            "SmallEnemyShip" => LevelRecord::EnemyCraft(PointConfig::default()),
            "CollisionWall" => LevelRecord::Wall(SpanConfig::default()),
            "Decoration" => LevelRecord::Decoration(DecorationConfig::default()),
            "RectRoom" => LevelRecord::Room(SpanConfig::default()),
            "TurretStation" => LevelRecord::TurretStation(StationConfig::default()),
            "Turret" => LevelRecord::Turret(PointConfig::default()),
            "Shields" => LevelRecord::Shield(ShieldConfig::default()),
            _ => return None,
        };
        Some(record)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            LevelRecord::Bird(_) => "Bird",
            LevelRecord::AllianceMothership(_) => "AllianceMotherShip",
            LevelRecord::EnemyMothership(_) => "EnemyMotherShip",
            LevelRecord::AllianceShip(_) => "AllianceShip",
            LevelRecord::EnemyCraft(_) => "SmallEnemyShip",
            LevelRecord::Wall(_) => "CollisionWall",
            LevelRecord::Decoration(_) => "Decoration",
            LevelRecord::Room(_) => "RectRoom",
            LevelRecord::TurretStation(_) => "TurretStation",
            LevelRecord::Turret(_) => "Turret",
            LevelRecord::Shield(_) => "Shields",
        }
    }

    /// Argument names in positional order.
    pub fn arg_names(&self) -> &'static [&'static str] {
        match self {
            LevelRecord::Bird(_) => &["x", "y", "variant", "flipped"],
            LevelRecord::AllianceMothership(_) => &["x", "y", "size", "width"],
            LevelRecord::EnemyMothership(_) => &["x", "y", "size", "burst"],
            LevelRecord::AllianceShip(_) | LevelRecord::EnemyCraft(_) | LevelRecord::Turret(_) => {
                &["x", "y"]
            }
            LevelRecord::Wall(_) | LevelRecord::Room(_) => &["x", "y", "x2", "y2"],
            LevelRecord::Decoration(_) => &["x", "y", "index"],
            LevelRecord::TurretStation(_) => &["x", "y", "team"],
            LevelRecord::Shield(_) => &["x", "y", "w", "h", "team"],
        }
    }

    fn set_index(&mut self, index: usize, value: &str) -> bool {
        match self {
            LevelRecord::Bird(c) => c.set(index, value),
            LevelRecord::AllianceMothership(c) => c.set(index, value),
            LevelRecord::EnemyMothership(c) => c.set(index, value),
            LevelRecord::AllianceShip(c) | LevelRecord::EnemyCraft(c) | LevelRecord::Turret(c) => {
                c.set_xy(index, value)
            }
            LevelRecord::Wall(c) | LevelRecord::Room(c) => c.set_span(index, value),
            LevelRecord::Decoration(c) => c.set(index, value),
            LevelRecord::TurretStation(c) => c.set(index, value),
            LevelRecord::Shield(c) => c.set(index, value),
        }
    }

    /// Text form of every argument in positional order.
    pub fn values(&self) -> Vec<String> {
        match self {
            LevelRecord::Bird(c) => c.values(),
            LevelRecord::AllianceMothership(c) => c.values(),
            LevelRecord::EnemyMothership(c) => c.values(),
            LevelRecord::AllianceShip(c) | LevelRecord::EnemyCraft(c) | LevelRecord::Turret(c) => {
                vec![c.x.to_string(), c.y.to_string()]
            }
            LevelRecord::Wall(c) | LevelRecord::Room(c) => c.span_values(),
            LevelRecord::Decoration(c) => c.values(),
            LevelRecord::TurretStation(c) => c.values(),
            LevelRecord::Shield(c) => c.values(),
        }
    }

    /// Set an argument by name, as the editor does for a placed entity.
    pub fn set_arg(&mut self, name: &str, value: &str) -> Result<(), LevelError> {
        let Some(index) = self.arg_names().iter().position(|n| *n == name) else {
            return Err(LevelError::UnknownArgument {
                name: self.type_name().to_string(),
                arg: name.to_string(),
            });
        };
        if self.set_index(index, value.trim()) {
            Ok(())
        } else {
            Err(LevelError::InvalidValue {
                name: self.type_name().to_string(),
                arg: name.to_string(),
                value: value.to_string(),
            })
        }
    }

    /// `TypeName(arg, ...)`
    pub fn to_line(&self) -> String {
        format!("{}({})", self.type_name(), self.values().join(", "))
    }

    fn parse_line(line_no: usize, text: &str) -> Result<LevelRecord, LevelError> {
        let syntax = || LevelError::Syntax {
            line: line_no,
            text: text.to_string(),
        };
        let (name, rest) = text.split_once('(').ok_or_else(syntax)?;
        let inner = rest.trim_end().strip_suffix(')').ok_or_else(syntax)?;
        let name = name.trim();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(syntax());
        }

        let mut record = LevelRecord::blank(name).ok_or_else(|| LevelError::UnknownType {
            line: line_no,
            name: name.to_string(),
        })?;

        let args: Vec<&str> = if inner.trim().is_empty() {
            Vec::new()
        } else {
            inner.split(',').map(str::trim).collect()
        };
        let (min, max) = (REQUIRED_ARGS, record.arg_names().len());
        if args.len() < min || args.len() > max {
            return Err(LevelError::ArgumentCount {
                line: line_no,
                name: name.to_string(),
                min,
                max,
                got: args.len(),
            });
        }

        for (index, value) in args.iter().enumerate() {
            if !record.set_index(index, value) {
                return Err(LevelError::BadArgument {
                    line: line_no,
                    name: name.to_string(),
                    index,
                    value: value.to_string(),
                });
            }
        }
        Ok(record)
    }
}

/// Ordered records replayed on scene entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelDescription {
    pub records: Vec<LevelRecord>,
}

impl LevelDescription {
    pub fn new(records: Vec<LevelRecord>) -> Self {
        Self { records }
    }

    /// Parse the text form. Errors carry 1-based line numbers.
    pub fn parse(text: &str) -> Result<LevelDescription, LevelError> {
        let mut records = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            records.push(LevelRecord::parse_line(i + 1, line)?);
        }
        Ok(LevelDescription { records })
    }

    /// Dump in the text form accepted by `parse`.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&record.to_line());
            out.push('\n');
        }
        out
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Layout of a built-in scene.
    pub fn builtin(scene: SceneId) -> LevelDescription {
        let mut records = vec![LevelRecord::AllianceMothership(AllianceMothershipConfig {
            x: 0.0,
            y: -12.0,
            size: 50.0,
            width: 25.0,
        })];
        records.extend(ROOMS.iter().map(|&(x, y, x2, y2)| room(x, y, x2, y2)));
        records.extend(WALLS.iter().map(|&(x, y, x2, y2)| wall(x, y, x2, y2)));

        match scene {
            SceneId::Battle => {
                records.extend(HOME_TURRETS.iter().map(|&(x, y)| turret(x, y)));
                records.extend(HOME_STATIONS.iter().map(|&(x, y)| station(x, y, Team::Alliance)));
                records.push(decoration(-9.0, 21.0, 0));
                records.push(decoration(-18.0, 21.0, 0));
                records.push(LevelRecord::Bird(BirdConfig {
                    x: -14.0,
                    y: 20.0,
                    variant: 1,
                    flipped: true,
                }));
                records.push(LevelRecord::Bird(BirdConfig {
                    x: -11.0,
                    y: 19.0,
                    variant: 2,
                    flipped: false,
                }));
                records.push(enemy_mothership());
                records.extend(ENEMY_TURRETS.iter().map(|&(x, y)| turret(x, y)));
                // Enemy stations sit far outside the playfield; only their link matters.
                records.extend((0..ENEMY_TURRETS.len()).map(|_| station(99999.0, -58.0, Team::Enemy)));
                records.push(ship(-21.0, -17.0));
                records.push(ship(-19.0, -1.0));
                records.push(shield(0.0, -12.0, 40.0, 68.0, Team::Alliance));
                records.push(shield(-582.0, -24.0, 36.0, 36.0, Team::Enemy));
                records.push(decoration(14.0, 33.0, 3));
            }
            SceneId::Editor => {
                records.extend(HOME_STATIONS.iter().map(|&(x, y)| station(x, y, Team::Alliance)));
                records.extend(HOME_TURRETS.iter().map(|&(x, y)| turret(x, y)));
                records.push(decoration(-9.0, 21.0, 0));
                records.push(decoration(-18.0, 21.0, 0));
                records.push(enemy_mothership());
                records.extend(ENEMY_TURRETS.iter().map(|&(x, y)| turret(x, y)));
                records.push(ship(-21.0, -17.0));
                records.push(ship(-19.0, -1.0));
            }
        }
        LevelDescription { records }
    }
}

const ROOMS: [(f64, f64, f64, f64); 7] = [
    (-23.0, -60.0, 22.0, -51.0),
    (-1.0, -51.0, 2.0, 27.0),
    (-16.0, 27.0, 16.0, 36.0),
    (-19.0, 12.0, -8.0, 22.0),
    (-8.0, 12.0, -1.0, 14.0),
    (-25.0, -23.0, -8.0, 8.0),
    (-8.0, -18.0, -1.0, -16.0),
];

const WALLS: [(f64, f64, f64, f64); 25] = [
    (-25.0, -23.0, -8.0, -23.0),
    (-8.0, -23.0, -8.0, -18.0),
    (-8.0, -18.0, -1.0, -18.0),
    (-1.0, -18.0, -1.0, -51.0),
    (-1.0, -51.0, -23.0, -51.0),
    (-23.0, -51.0, -23.0, -60.0),
    (-23.0, -60.0, 22.0, -60.0),
    (22.0, -60.0, 22.0, -51.0),
    (22.0, -51.0, 2.0, -51.0),
    (2.0, -51.0, 2.0, 27.0),
    (2.0, 27.0, 16.0, 27.0),
    (16.0, 27.0, 16.0, 36.0),
    (16.0, 36.0, -16.0, 36.0),
    (-16.0, 36.0, -16.0, 27.0),
    (-16.0, 27.0, -1.0, 27.0),
    (-1.0, 27.0, -1.0, 14.0),
    (-1.0, 14.0, -8.0, 14.0),
    (-8.0, 14.0, -8.0, 22.0),
    (-8.0, 22.0, -19.0, 22.0),
    (-19.0, 22.0, -19.0, 12.0),
    (-19.0, 12.0, -1.0, 12.0),
    (-1.0, 12.0, -1.0, -16.0),
    (-1.0, -16.0, -8.0, -16.0),
    (-8.0, -16.0, -8.0, 8.0),
    (-8.0, 8.0, -25.0, 8.0),
];

const HOME_TURRETS: [(f64, f64); 4] = [(-22.0, -27.0), (-22.0, 12.0), (-22.0, -48.0), (-22.0, 32.0)];
const HOME_STATIONS: [(f64, f64); 4] = [(-18.0, -58.0), (-10.0, -58.0), (11.0, -58.0), (18.0, -58.0)];
const ENEMY_TURRETS: [(f64, f64); 3] = [(-554.0, -24.0), (-563.0, -46.0), (-563.0, -2.0)];

fn room(x: f64, y: f64, x2: f64, y2: f64) -> LevelRecord {
    LevelRecord::Room(SpanConfig { x, y, x2, y2 })
}

fn wall(x: f64, y: f64, x2: f64, y2: f64) -> LevelRecord {
    LevelRecord::Wall(SpanConfig { x, y, x2, y2 })
}

fn turret(x: f64, y: f64) -> LevelRecord {
    LevelRecord::Turret(PointConfig { x, y })
}

fn station(x: f64, y: f64, team: Team) -> LevelRecord {
    LevelRecord::TurretStation(StationConfig { x, y, team })
}

fn ship(x: f64, y: f64) -> LevelRecord {
    LevelRecord::AllianceShip(PointConfig { x, y })
}

fn decoration(x: f64, y: f64, index: u8) -> LevelRecord {
    LevelRecord::Decoration(DecorationConfig { x, y, index })
}

fn shield(x: f64, y: f64, w: f64, h: f64, team: Team) -> LevelRecord {
    LevelRecord::Shield(ShieldConfig { x, y, w, h, team })
}

fn enemy_mothership() -> LevelRecord {
    LevelRecord::EnemyMothership(EnemyMothershipConfig {
        x: -582.0,
        y: -24.0,
        size: 22.0,
        burst: 0,
    })
}
