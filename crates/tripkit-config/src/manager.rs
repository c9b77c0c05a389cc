use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use tripkit_domain::{MemberDirectory, Tag};

use crate::{ConfigError, Preferences};

const PREFS_FILE: &str = "prefs.json";
const TAGS_FILE: &str = "tags.json";
const PROFILES_FILE: &str = "profiles.json";
const TMP_SUFFIX: &str = "tmp";

/// Loads and saves the user-preference records. One JSON file per logical
/// record; a missing file reads as the record's default.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    pub fn new(config_dir: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&config_dir)?;
        Ok(Self { config_dir })
    }

    /// Resolves the default application directory under the user's home.
    pub fn with_default_dir() -> Result<Self, ConfigError> {
        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("tripkit"))
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn load_preferences(&self) -> Result<Preferences, ConfigError> {
        self.load_record(PREFS_FILE, Preferences::default)
    }

    pub fn save_preferences(&self, prefs: &Preferences) -> Result<(), ConfigError> {
        self.save_record(PREFS_FILE, prefs)
    }

    /// The tag palette always contains the default tag, even on first run.
    pub fn load_tag_palette(&self) -> Result<Vec<Tag>, ConfigError> {
        let mut palette: Vec<Tag> = self.load_record(TAGS_FILE, default_palette)?;
        if !palette.iter().any(|tag| tag.name == tripkit_domain::GENERAL_TAG) {
            palette.insert(0, Tag::general());
        }
        Ok(palette)
    }

    pub fn save_tag_palette(&self, palette: &[Tag]) -> Result<(), ConfigError> {
        self.save_record(TAGS_FILE, &palette)
    }

    pub fn load_member_directory(&self) -> Result<MemberDirectory, ConfigError> {
        self.load_record(PROFILES_FILE, MemberDirectory::default)
    }

    pub fn save_member_directory(&self, directory: &MemberDirectory) -> Result<(), ConfigError> {
        self.save_record(PROFILES_FILE, directory)
    }

    fn load_record<T, F>(&self, file: &str, default: F) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let path = self.config_dir.join(file);
        if !path.exists() {
            return Ok(default());
        }
        let data = fs::read_to_string(&path)?;
        serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
    }

    fn save_record<T: Serialize>(&self, file: &str, record: &T) -> Result<(), ConfigError> {
        let path = self.config_dir.join(file);
        let json = serde_json::to_string_pretty(record)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

fn default_palette() -> Vec<Tag> {
    vec![
        Tag::general(),
        Tag::new("clothes", "blue"),
        Tag::new("electronics", "purple"),
        Tag::new("toiletries", "green"),
        Tag::new("documents", "orange"),
    ]
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
