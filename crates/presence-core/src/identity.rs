//! Display identities and the default pools they are drawn from.

/// Default pool of human-readable cursor names.
pub const DEFAULT_NAMES: [&str; 24] = [
    "Lion",
    "Tiger",
    "Bear",
    "Elephant",
    "Zebra",
    "Monkey",
    "Kangaroo",
    "Panda",
    "Fox",
    "Wolf",
    "Rabbit",
    "Deer",
    "Squirrel",
    "Owl",
    "Eagle",
    "Penguin",
    "Dolphin",
    "Whale",
    "Shark",
    "Octopus",
    "Crab",
    "Lobster",
    "Butterfly",
    "Bee",
];

/// Default cursor palette, handed out cyclically.
///
/// Purple appears twice; colors are allowed to repeat.
pub const DEFAULT_PALETTE: [&str; 15] = [
    "#0D47A1", // deep blue
    "#B71C1C", // deep red
    "#1B5E20", // deep green
    "#4A148C", // deep purple
    "#E65100", // deep orange
    "#006064", // deep cyan
    "#263238", // blue grey
    "#3E2723", // brown
    "#827717", // olive
    "#880E4F", // deep pink
    "#311B92", // deep indigo
    "#BF360C", // orange-red
    "#1A237E", // midnight blue
    "#33691E", // forest green
    "#4A148C", // royal purple
];

/// The `(name, color)` pair shown next to a connection's cursor.
///
/// `name` is unique among live connections; `color` carries no
/// uniqueness guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub name: String,
    pub color: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Identity {
            name: name.into(),
            color: color.into(),
        }
    }
}
