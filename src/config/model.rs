// src/config/model.rs

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Built-in signing config every module can reference without declaring it.
pub const BUILTIN_SIGNING_CONFIG: &str = "debug";

/// Plugin id that marks the document as an application module.
pub const APPLICATION_PLUGIN: &str = "com.android.application";

/// Prefix marking a string value as a symbolic toolchain reference.
pub const REF_PREFIX: &str = "toolchain.";

/// Top-level document as read from a TOML file, before reference resolution.
///
/// This is a direct mapping of the module build file:
///
/// ```toml
/// plugins = ["com.android.application", "kotlin-android"]
///
/// [module]
/// namespace = "com.example.app"
/// compileSdk = "toolchain.compileSdkVersion"
///
/// [defaultConfig]
/// applicationId = "com.example.app"
/// minSdk = 21
/// ```
///
/// Unknown keys anywhere in the document are rejected at parse time.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawDocument {
    /// Ordered plugin identifiers; order is preserved for the build executor.
    #[serde(default)]
    pub plugins: Vec<String>,

    /// `[module]` section.
    pub module: ModuleSection,

    /// `[compileOptions]` section; defaults to level 11 for both bounds.
    #[serde(rename = "compileOptions", default)]
    pub compile_options: CompileOptions,

    /// `[defaultConfig]` section.
    #[serde(rename = "defaultConfig")]
    pub default_config: DefaultConfigSection,

    /// `[signingConfigs.<name>]` sections, keyed by alias.
    #[serde(rename = "signingConfigs", default)]
    pub signing_configs: BTreeMap<String, SigningConfigSection>,

    /// `[buildTypes]` section.
    #[serde(rename = "buildTypes", default)]
    pub build_types: BuildTypesSection,

    /// `[toolchain]` section.
    pub toolchain: ToolchainSection,
}

impl RawDocument {
    /// All signing aliases the release build type may reference: the declared
    /// `[signingConfigs.<name>]` entries plus the built-in `debug` config.
    pub fn signing_aliases(&self) -> BTreeSet<String> {
        let mut aliases: BTreeSet<String> = self.signing_configs.keys().cloned().collect();
        aliases.insert(BUILTIN_SIGNING_CONFIG.to_string());
        aliases
    }
}

/// `[module]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleSection {
    pub namespace: String,

    #[serde(rename = "compileSdk")]
    pub compile_sdk: IntOrRef,

    /// Pinned NDK release, e.g. `"27.0.12077973"`.
    #[serde(rename = "ndkVersion", default)]
    pub ndk_version: Option<String>,
}

/// `[compileOptions]` section.
///
/// `jvmTarget` is normally omitted and derived from `targetCompatibility`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompileOptions {
    #[serde(rename = "sourceCompatibility", default = "default_java_level")]
    pub source_compatibility: JavaLevel,

    #[serde(rename = "targetCompatibility", default = "default_java_level")]
    pub target_compatibility: JavaLevel,

    #[serde(rename = "jvmTarget", default)]
    pub jvm_target: Option<JavaLevel>,
}

fn default_java_level() -> JavaLevel {
    JavaLevel::V11
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            source_compatibility: default_java_level(),
            target_compatibility: default_java_level(),
            jvm_target: None,
        }
    }
}

/// `[defaultConfig]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultConfigSection {
    #[serde(rename = "applicationId")]
    pub application_id: String,

    #[serde(rename = "minSdk")]
    pub min_sdk: IntOrRef,

    #[serde(rename = "targetSdk")]
    pub target_sdk: IntOrRef,

    #[serde(rename = "versionCode")]
    pub version_code: IntOrRef,

    #[serde(rename = "versionName")]
    pub version_name: String,

    /// ABI allow-list; duplicates collapse, empty means "all supported ABIs".
    #[serde(rename = "abiFilters", default)]
    pub abi_filters: Vec<String>,
}

/// One `[signingConfigs.<name>]` entry.
///
/// The loader only resolves aliases against these; the credential fields are
/// passed through untouched for the build executor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SigningConfigSection {
    #[serde(rename = "storeFile", default)]
    pub store_file: Option<PathBuf>,

    #[serde(rename = "storePassword", default)]
    pub store_password: Option<String>,

    #[serde(rename = "keyAlias", default)]
    pub key_alias: Option<String>,

    #[serde(rename = "keyPassword", default)]
    pub key_password: Option<String>,
}

/// `[buildTypes]` section. Only the release type carries configuration here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildTypesSection {
    #[serde(default)]
    pub release: ReleaseSection,
}

/// `[buildTypes.release]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseSection {
    /// Alias of the signing config used for release artifacts.
    #[serde(rename = "signingConfig", default = "default_signing_alias")]
    pub signing_config: String,
}

fn default_signing_alias() -> String {
    BUILTIN_SIGNING_CONFIG.to_string()
}

impl Default for ReleaseSection {
    fn default() -> Self {
        Self {
            signing_config: default_signing_alias(),
        }
    }
}

/// `[toolchain]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolchainSection {
    /// Relative path from the document to the shared application source tree.
    pub source: PathBuf,
}

/// An integer-typed field that may instead hold a `toolchain.<field>`
/// reference, e.g. `compileSdk = "toolchain.compileSdkVersion"`.
///
/// Any other string is rejected during resolution, not at parse time, so the
/// error can name the offending key.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IntOrRef {
    Int(u32),
    Ref(String),
}

/// Enumerated language compatibility level.
///
/// Serialized as the bare level string ("8", "11", "17", "21"); the legacy
/// "1.8" spelling is accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum JavaLevel {
    V8,
    V11,
    V17,
    V21,
}

impl JavaLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            JavaLevel::V8 => "8",
            JavaLevel::V11 => "11",
            JavaLevel::V17 => "17",
            JavaLevel::V21 => "21",
        }
    }
}

impl fmt::Display for JavaLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for JavaLevel {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        match s.trim() {
            "8" | "1.8" => Ok(JavaLevel::V8),
            "11" => Ok(JavaLevel::V11),
            "17" => Ok(JavaLevel::V17),
            "21" => Ok(JavaLevel::V21),
            other => Err(format!("unknown language compatibility level '{other}'")),
        }
    }
}

impl From<JavaLevel> for String {
    fn from(level: JavaLevel) -> Self {
        level.as_str().to_string()
    }
}

/// Fully resolved, validated module configuration.
///
/// This is the value handed to the build executor. It is immutable for the
/// duration of a build and round-trips through TOML and JSON unchanged.
///
/// Scalar fields come before the nested tables so the TOML serializer accepts
/// the struct as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    pub plugins: Vec<String>,

    pub namespace: String,

    #[serde(rename = "applicationId")]
    pub application_id: String,

    #[serde(rename = "ndkVersion", default, skip_serializing_if = "Option::is_none")]
    pub ndk_version: Option<String>,

    #[serde(rename = "abiFilters")]
    pub abi_filters: BTreeSet<String>,

    #[serde(rename = "signingConfig")]
    pub signing_config: String,

    #[serde(rename = "sourceRoot")]
    pub source_root: PathBuf,

    pub sdk: SdkVersions,

    pub version: AppVersion,

    pub compat: LanguageCompat,
}

/// Resolved SDK version bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SdkVersions {
    pub compile: u32,
    pub min: u32,
    pub target: u32,
}

/// Resolved application version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppVersion {
    pub code: u32,
    pub name: String,
}

/// Resolved language compatibility levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageCompat {
    pub source: JavaLevel,
    pub target: JavaLevel,

    #[serde(rename = "jvmTarget")]
    pub jvm_target: JavaLevel,
}
