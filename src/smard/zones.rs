//! Supported SMARD bidding zones
//!
//! The feed identifies a price zone by a numeric filter id. The set is
//! fixed and closed; ids outside this table fail closed everywhere.

/// Zone used when the configuration does not name one (Germany/Luxembourg)
pub const DEFAULT_ZONE_ID: &str = "4169";

/// Filter id to human-readable zone name
pub const ZONES: &[(&str, &str)] = &[
    ("4169", "Germany/Luxembourg"),
    ("5078", "Neighboring DE/LU"),
    ("4996", "Belgium"),
    ("4997", "Norway 2"),
    ("4170", "Austria"),
    ("252", "Denmark 1"),
    ("253", "Denmark 2"),
    ("254", "France"),
    ("255", "Italy (North)"),
    ("256", "Netherlands"),
    ("257", "Poland"),
    ("258", "Sweden 4"),
    ("259", "Switzerland"),
    ("260", "Slovenia"),
    ("261", "Czech Republic"),
    ("262", "Hungary"),
];

/// Look up the display name for a zone id
pub fn zone_name(zone_id: &str) -> Option<&'static str> {
    ZONES
        .iter()
        .find(|(id, _)| *id == zone_id)
        .map(|(_, name)| *name)
}

/// Whether a zone id belongs to the supported set
pub fn is_supported(zone_id: &str) -> bool {
    zone_name(zone_id).is_some()
}
