// ── Constants shared across the domain model ──

/// Shown wherever a value is absent or cannot be rendered.
pub const PLACEHOLDER: &str = "-";

/// Timestamp default: the Unix epoch with an explicit UTC offset.
pub const EPOCH: &str = "1970-01-01T00:00:00+00:00";

/// Language tag used when neither the stored nor the ambient tag is usable.
pub const DEFAULT_LANG: &str = "en-GB";

/// Asset name of the bundled mower illustration.
pub const DEFAULT_IMAGE: &str = "landroid.svg";

/// Number of zone probability slots reported by the mower.
pub const ZONE_SLOTS: usize = 10;

/// Number of configurable zone starting points.
pub const ZONE_STARTING_POINTS: usize = 4;

/// Default `device_class` reported by the Landroid Cloud integration.
pub const DEFAULT_DEVICE_CLASS: &str = "landroid_cloud__state";

/// Default feature bitmask reported by the Landroid Cloud integration.
pub const DEFAULT_SUPPORTED_FEATURES: i64 = 12_500;

/// RSSI assumed when the mower reports none (no signal).
pub const DEFAULT_RSSI: i64 = -99;
