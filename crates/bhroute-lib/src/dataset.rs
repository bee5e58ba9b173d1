//! Hop data loading, lookup, and consistency checks.
//!
//! Hop data is a headered CSV file with one black hole hop per row. Column
//! names are matched loosely (case, spaces and punctuation are ignored) so
//! spreadsheet exports load without manual editing.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::env;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use directories::ProjectDirs;
use serde::Serialize;
use tracing::{debug, info};

use crate::coordinates::{parse_coordinates, LY_PER_UNIT};
use crate::error::{Error, Result};
use crate::hop::{is_valid_hop, Hop, Platform, System};

/// Default filename for the hop data file.
const HOPS_FILENAME: &str = "hops.csv";

/// Environment variable overriding the hop data location.
pub const HOPS_ENV_VAR: &str = "BHROUTE_HOPS";

/// Minimum Jaro-Winkler similarity for a name suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Maximum number of name suggestions attached to an unknown-system error.
const MAX_SUGGESTIONS: usize = 3;

/// Black holes further than this from the core are left out of statistics.
const MAX_STATS_DISTANCE_LY: f64 = 800_000.0;

const REQUIRED_COLUMNS: [&str; 6] = [
    "blackhole_region",
    "blackhole_system",
    "blackhole_coords",
    "exit_region",
    "exit_system",
    "exit_coords",
];

/// Collection of hops loaded from a CSV file.
#[derive(Debug, Clone, Default)]
pub struct HopCatalog {
    hops: Vec<Hop>,
    source: Option<PathBuf>,
}

impl HopCatalog {
    pub fn new(hops: Vec<Hop>) -> Self {
        Self { hops, source: None }
    }

    /// Load a hop catalog from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::HopDataNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = fs::File::open(path)?;
        let mut catalog = Self::from_reader(file)?;
        catalog.source = Some(path.to_path_buf());
        info!(
            hops = catalog.hops.len(),
            path = %path.display(),
            "loaded hop catalog"
        );
        Ok(catalog)
    }

    /// Load a hop catalog from a reader (e.g., file or in-memory buffer).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|err| Error::HopDataValidation {
                message: format!("failed to read hop data headers: {err}"),
            })?
            .clone();
        let columns = ColumnMap::resolve(headers.iter())?;

        let mut hops = Vec::new();
        // The header occupies line 1.
        let mut row: usize = 1;
        for result in csv_reader.records() {
            row += 1;
            let record = result.map_err(|err| Error::HopDataValidation {
                message: format!("row {row}: {err}"),
            })?;
            let get = |field: &str| columns.get(field, &record);

            let platform = match get("platform") {
                "" => None,
                text => Some(text.parse::<Platform>().map_err(|err| {
                    Error::HopDataValidation {
                        message: format!("row {row}: {err}"),
                    }
                })?),
            };
            let galaxy = Some(get("galaxy"))
                .filter(|text| !text.is_empty())
                .map(str::to_string);

            let blackhole = read_system(
                row,
                "black hole",
                get("blackhole_region"),
                get("blackhole_system"),
                get("blackhole_coords"),
            )?;
            let exit = read_system(
                row,
                "exit",
                get("exit_region"),
                get("exit_system"),
                get("exit_coords"),
            )?;

            hops.push(Hop {
                platform,
                galaxy,
                blackhole,
                exit,
            });
        }

        debug!(rows = row - 1, "parsed hop data");
        Ok(Self::new(hops))
    }

    /// File the catalog was read from, when loaded via [`HopCatalog::from_path`].
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// Hops that pass [`is_valid_hop`].
    pub fn valid_hops(&self) -> Vec<Hop> {
        let valid: Vec<Hop> = self.hops.iter().filter(|hop| is_valid_hop(hop)).cloned().collect();
        debug!(
            total = self.hops.len(),
            valid = valid.len(),
            "filtered unusable hops"
        );
        valid
    }

    /// Catalog restricted to one platform and/or galaxy.
    ///
    /// Galaxy names compare case-insensitively. `None` keeps every value.
    pub fn filter(&self, platform: Option<Platform>, galaxy: Option<&str>) -> Self {
        let hops = self
            .hops
            .iter()
            .filter(|hop| platform.is_none() || hop.platform == platform)
            .filter(|hop| match galaxy {
                None => true,
                Some(wanted) => hop
                    .galaxy
                    .as_deref()
                    .is_some_and(|name| name.eq_ignore_ascii_case(wanted)),
            })
            .cloned()
            .collect();

        Self {
            hops,
            source: self.source.clone(),
        }
    }

    /// Every black hole and exit system in the catalog, in file order.
    pub fn systems(&self) -> impl Iterator<Item = &System> {
        self.hops.iter().flat_map(|hop| [&hop.blackhole, &hop.exit])
    }

    /// Look up a system by name or `[region] name` label, ignoring case.
    pub fn find_system(&self, name: &str) -> Result<&System> {
        let wanted = name.trim();
        self.lookup(wanted).ok_or_else(|| self.unknown_system(wanted))
    }

    /// Resolve user input that is either a known system name or coordinates.
    ///
    /// Coordinates that match a catalog system resolve to that system so the
    /// route shows its name; other coordinates become an unnamed system.
    pub fn resolve_system(&self, query: &str) -> Result<System> {
        let wanted = query.trim();
        if let Some(system) = self.lookup(wanted) {
            return Ok(system.clone());
        }

        match parse_coordinates(wanted) {
            Ok(coords) => Ok(self
                .systems()
                .find(|system| system.coords.is_same_star(&coords))
                .cloned()
                .unwrap_or_else(|| System::new("", coords.to_string(), coords))),
            Err(Error::CoordinateSyntax { .. }) => Err(self.unknown_system(wanted)),
            Err(err) => Err(err),
        }
    }

    fn lookup(&self, wanted: &str) -> Option<&System> {
        self.systems().find(|system| {
            system.name.eq_ignore_ascii_case(wanted) || system.label().eq_ignore_ascii_case(wanted)
        })
    }

    fn unknown_system(&self, wanted: &str) -> Error {
        Error::UnknownSystem {
            name: wanted.to_string(),
            suggestions: self.suggest_systems(wanted, MAX_SUGGESTIONS),
        }
    }

    /// Names similar to `name`, best match first.
    pub fn suggest_systems(&self, name: &str, limit: usize) -> Vec<String> {
        let wanted = name.to_lowercase();
        let mut seen = HashSet::new();
        let mut scored: Vec<(f64, &str)> = self
            .systems()
            .map(|system| system.name.as_str())
            .filter(|candidate| seen.insert(*candidate))
            .map(|candidate| (strsim::jaro_winkler(&wanted, &candidate.to_lowercase()), candidate))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}

fn read_system(row: usize, what: &str, region: &str, name: &str, coords: &str) -> Result<System> {
    let coords = parse_coordinates(coords).map_err(|err| Error::HopDataValidation {
        message: format!("row {row}: {what} coordinates: {err}"),
    })?;
    Ok(System::new(region, name, coords))
}

/// Canonical column name -> header position.
struct ColumnMap {
    indices: BTreeMap<&'static str, usize>,
}

impl ColumnMap {
    fn resolve<'h>(headers: impl Iterator<Item = &'h str>) -> Result<Self> {
        let headers: Vec<&str> = headers.collect();
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

        // Mapping of canonical field name -> possible header synonyms
        let synonyms: &[(&'static str, &[&str])] = &[
            ("platform", &["platform"]),
            ("galaxy", &["galaxy"]),
            ("blackhole_region", &["blackhole_region", "bh_region", "region"]),
            ("blackhole_system", &["blackhole_system", "bh_system", "blackhole", "system"]),
            (
                "blackhole_coords",
                &["blackhole_coords", "blackhole_coordinates", "bh_coords", "coords", "coordinates"],
            ),
            ("exit_region", &["exit_region", "destination_region"]),
            ("exit_system", &["exit_system", "exit", "destination_system"]),
            (
                "exit_coords",
                &["exit_coords", "exit_coordinates", "destination_coords"],
            ),
        ];

        let mut indices = BTreeMap::new();
        for (canon, alts) in synonyms {
            let found = alts.iter().find_map(|alt| {
                let alt = normalize_header(alt);
                normalized.iter().position(|header| *header == alt)
            });
            if let Some(index) = found {
                indices.insert(*canon, index);
            }
        }

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .into_iter()
            .filter(|column| !indices.contains_key(column))
            .collect();
        if !missing.is_empty() {
            return Err(Error::HopDataValidation {
                message: format!(
                    "hop data missing required columns: {}. Available: {}",
                    missing.join(", "),
                    headers.join(", ")
                ),
            });
        }

        Ok(Self { indices })
    }

    fn get<'r>(&self, field: &str, record: &'r csv::StringRecord) -> &'r str {
        self.indices
            .get(field)
            .and_then(|&index| record.get(index))
            .unwrap_or("")
    }
}

fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// One inconsistency found in hop data. Row indices are zero-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// Two hops start at the same named black hole on one platform.
    DuplicateBlackHole {
        system: String,
        first: usize,
        second: usize,
    },
    /// Two systems in the same galaxy region cell disagree on the region name.
    RegionMismatch {
        coords: String,
        first_region: String,
        second_region: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::DuplicateBlackHole {
                system,
                first,
                second,
            } => write!(f, "duplicate black hole: {system}@[{first},{second}]"),
            ValidationIssue::RegionMismatch {
                coords,
                first_region,
                second_region,
            } => write!(
                f,
                "region mismatch at {coords}: '{first_region}' vs '{second_region}'"
            ),
        }
    }
}

/// Result of [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub hops: usize,
    pub valid_hops: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Convert into an error when any issue was found.
    pub fn into_result(self) -> Result<Self> {
        if self.is_clean() {
            Ok(self)
        } else {
            Err(Error::DatasetValidation {
                issues: self.issues.iter().map(ToString::to_string).collect(),
            })
        }
    }
}

type RegionKey<'a> = (Option<&'a str>, u16, u16, u16);

/// Check hop data for duplicate black holes and misspelled region names.
///
/// Region names are only compared between systems of usable hops.
pub fn validate(hops: &[Hop]) -> ValidationReport {
    let mut issues = Vec::new();

    let mut blackholes: HashMap<(Option<Platform>, &str, &str), usize> = HashMap::new();
    for (index, hop) in hops.iter().enumerate() {
        let key = (
            hop.platform,
            hop.blackhole.region.as_str(),
            hop.blackhole.name.as_str(),
        );
        if let Some(&first) = blackholes.get(&key) {
            issues.push(ValidationIssue::DuplicateBlackHole {
                system: hop.blackhole.name.clone(),
                first,
                second: index,
            });
        } else {
            blackholes.insert(key, index);
        }
    }

    let valid: Vec<&Hop> = hops.iter().filter(|hop| is_valid_hop(hop)).collect();
    let mut regions: HashMap<RegionKey<'_>, &str> = HashMap::new();
    let mut reported: HashSet<(RegionKey<'_>, &str)> = HashSet::new();
    for hop in valid.iter().copied() {
        for system in [&hop.blackhole, &hop.exit] {
            let c = &system.coords;
            let key = (hop.galaxy.as_deref(), c.x(), c.y(), c.z());
            let first = *regions.entry(key).or_insert(system.region.as_str());
            if first != system.region && reported.insert((key, system.region.as_str())) {
                issues.push(ValidationIssue::RegionMismatch {
                    coords: c.to_string(),
                    first_region: first.to_string(),
                    second_region: system.region.clone(),
                });
            }
        }
    }

    ValidationReport {
        hops: hops.len(),
        valid_hops: valid.len(),
        issues,
    }
}

/// Per-hop figures used to study how far black holes throw a traveller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HopStats {
    pub region: String,
    /// Signed travel around the core in degrees.
    pub axial_dist: f64,
    /// Black hole distance from the core, in light-years.
    pub radial_dist: f64,
    /// Distance gained toward the core, in light-years.
    pub dist: f64,
}

/// Statistics for every inward hop that starts within 800,000 ly of the core.
pub fn hop_stats(hops: &[Hop]) -> Vec<HopStats> {
    hops.iter()
        .filter(|hop| hop.blackhole.coords.distance_to_center() * LY_PER_UNIT < MAX_STATS_DISTANCE_LY)
        .filter(|hop| hop.blackhole.coords.distance_to_center() > hop.exit.coords.distance_to_center())
        .map(|hop| {
            let entry = hop.blackhole.coords.distance_to_center();
            let exit = hop.exit.coords.distance_to_center();
            HopStats {
                region: hop.blackhole.region.clone(),
                axial_dist: hop.axial_dist(),
                radial_dist: entry * LY_PER_UNIT,
                dist: (entry - exit) * LY_PER_UNIT,
            }
        })
        .collect()
}

/// Resolve the default hop data location using platform-specific project directories.
pub fn default_hops_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "bhroute", "bhroute").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(HOPS_FILENAME))
}

/// Pick the hop data file to load.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `BHROUTE_HOPS` environment variable.
/// 3. Platform-specific project data directory.
pub fn resolve_hops_path(target: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = target {
        return Ok(explicit.to_path_buf());
    }

    if let Some(env_path) = env::var_os(HOPS_ENV_VAR) {
        return Ok(PathBuf::from(env_path));
    }

    default_hops_path()
}
