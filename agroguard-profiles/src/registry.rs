//! Profile Registry for Version Management
//!
//! Centralized profile management with versioning, so an app can ship a
//! retrained model next to the old one and switch between them at runtime.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};

use include_dir::{include_dir, Dir};
use log::{debug, info, warn};

use crate::profile::{parse_version, ModelProfile};
use crate::ProfileError;

/// Profiles compiled into the binary
static BUNDLED: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/profiles");

/// Profile metadata for registry entries
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileMetadata {
    /// Base name (e.g., "cucumber_multimodal")
    pub name: String,

    /// Version tag (e.g., "v1")
    pub version: String,

    /// Full qualified name (e.g., "cucumber_multimodal_v1")
    pub qualified_name: String,

    /// Whether this profile is deprecated
    pub deprecated: bool,

    /// Replacement profile if deprecated
    pub replacement: Option<String>,
}

type Entry = (Arc<ModelProfile>, ProfileMetadata);

/// Thread-safe profile registry with version management
pub struct ProfileRegistry {
    /// Profiles indexed by qualified name
    profiles: RwLock<HashMap<String, Entry>>,

    /// Version mappings (name -> [versions])
    versions: RwLock<HashMap<String, Vec<String>>>,

    /// Latest version for each profile name
    latest: RwLock<HashMap<String, String>>,
}

impl ProfileRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
            versions: RwLock::new(HashMap::new()),
            latest: RwLock::new(HashMap::new()),
        }
    }

    /// Register a checked profile
    pub fn register(&self, profile: ModelProfile) -> Result<(), ProfileError> {
        profile.check()?;

        let metadata = ProfileMetadata {
            name: profile.name.clone(),
            version: profile.version.clone(),
            qualified_name: profile.qualified_name(),
            deprecated: false,
            replacement: None,
        };
        let qualified_name = metadata.qualified_name.clone();
        let base_name = metadata.name.clone();
        let version = metadata.version.clone();

        {
            let mut profiles = self.profiles.write().map_err(|_| ProfileError::Poisoned)?;
            if profiles.contains_key(&qualified_name) {
                return Err(ProfileError::Duplicate(qualified_name));
            }
            profiles.insert(qualified_name.clone(), (Arc::new(profile), metadata));
        }

        {
            let mut versions = self.versions.write().map_err(|_| ProfileError::Poisoned)?;
            versions.entry(base_name.clone()).or_default().push(version.clone());
        }

        {
            let mut latest = self.latest.write().map_err(|_| ProfileError::Poisoned)?;
            let newer = match latest.get(&base_name) {
                Some(current) => parse_version(&version) > parse_version(current),
                None => true,
            };
            if newer {
                latest.insert(base_name, version);
            }
        }

        debug!("registered profile {}", qualified_name);
        Ok(())
    }

    /// Get a profile by qualified name
    pub fn get(&self, name: &str) -> Result<Arc<ModelProfile>, ProfileError> {
        let profiles = self.profiles.read().map_err(|_| ProfileError::Poisoned)?;

        profiles
            .get(name)
            .map(|(profile, _)| Arc::clone(profile))
            .ok_or_else(|| ProfileError::NotFound(name.to_string()))
    }

    /// Get the latest version of a profile
    pub fn get_latest(&self, base_name: &str) -> Result<Arc<ModelProfile>, ProfileError> {
        let qualified_name = {
            let latest = self.latest.read().map_err(|_| ProfileError::Poisoned)?;
            let version = latest
                .get(base_name)
                .ok_or_else(|| ProfileError::NotFound(format!("no versions of {}", base_name)))?;
            format!("{}_{}", base_name, version)
        };

        self.get(&qualified_name)
    }

    /// All registered versions of a profile, in registration order
    pub fn get_versions(&self, base_name: &str) -> Result<Vec<String>, ProfileError> {
        let versions = self.versions.read().map_err(|_| ProfileError::Poisoned)?;
        Ok(versions.get(base_name).cloned().unwrap_or_default())
    }

    /// Get profile metadata
    pub fn get_metadata(&self, name: &str) -> Result<ProfileMetadata, ProfileError> {
        let profiles = self.profiles.read().map_err(|_| ProfileError::Poisoned)?;

        profiles
            .get(name)
            .map(|(_, metadata)| metadata.clone())
            .ok_or_else(|| ProfileError::NotFound(name.to_string()))
    }

    /// Qualified names of every registered profile, sorted
    pub fn names(&self) -> Result<Vec<String>, ProfileError> {
        let profiles = self.profiles.read().map_err(|_| ProfileError::Poisoned)?;
        let mut names: Vec<String> = profiles.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Mark a profile as deprecated
    pub fn deprecate(&self, name: &str, replacement: Option<String>) -> Result<(), ProfileError> {
        let mut profiles = self.profiles.write().map_err(|_| ProfileError::Poisoned)?;

        let (_, metadata) = profiles
            .get_mut(name)
            .ok_or_else(|| ProfileError::NotFound(name.to_string()))?;

        metadata.deprecated = true;
        metadata.replacement = replacement;
        warn!("profile {} deprecated", name);

        Ok(())
    }

    /// Load the profiles compiled into the binary
    pub fn load_defaults(&self) -> Result<usize, ProfileError> {
        let mut loaded = 0;
        for file in BUNDLED.files() {
            if file.path().extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let json = file.contents_utf8().ok_or_else(|| {
                ProfileError::Parse(format!("{} is not UTF-8", file.path().display()))
            })?;
            self.register(ModelProfile::from_json(json)?)?;
            loaded += 1;
        }

        info!("loaded {} bundled profile(s)", loaded);
        Ok(loaded)
    }

    /// Load every `*.json` profile in a directory
    pub fn load_dir(&self, dir: impl AsRef<Path>) -> Result<usize, ProfileError> {
        let dir = dir.as_ref();
        let entries =
            fs::read_dir(dir).map_err(|e| ProfileError::Io(format!("{}: {}", dir.display(), e)))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| ProfileError::Io(e.to_string()))?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in &paths {
            self.register(ModelProfile::from_path(path)?)?;
        }

        info!("loaded {} profile(s) from {}", paths.len(), dir.display());
        Ok(paths.len())
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Global registry instance (optional pattern)
lazy_static::lazy_static! {
    /// Global profile registry with bundled profiles loaded
    pub static ref GLOBAL_REGISTRY: ProfileRegistry = {
        let registry = ProfileRegistry::new();
        if let Err(e) = registry.load_defaults() {
            warn!("failed to load bundled profiles: {}", e);
        }
        registry
    };
}
